#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use pagecraft::api::{AuthService, PageStore, QuotaService, SubscriptionService, UserService};
use pagecraft::common::ApiError;
use pagecraft::models::*;
use pagecraft::types::*;

pub const CREATED_PAGE_ID: &str = "665f1c2e9b1d";

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: message.to_string(),
    }
}

pub fn get_seed_user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        username: format!("{}-name", id),
        email: format!("{}@test.com", id),
        role,
        subscription_status: SubscriptionStatus::Free,
        subscription_expiry: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()),
        page_count: None,
        is_banned: false,
    }
}

pub fn get_seed_page(id: &str, owner_id: &str) -> Page {
    let mut page = Page::draft(owner_id);
    page.id = id.to_string();
    page.title = format!("Page {}", id);
    page.blocks = vec![
        Block {
            id: format!("{}-b0", id),
            kind: BlockKind::Text,
            content: "<p>Hello</p>".to_string(),
            order: 0,
        },
        Block {
            id: format!("{}-b1", id),
            kind: BlockKind::Image,
            content: "https://cdn.test/a.png".to_string(),
            order: 1,
        },
    ];
    page
}

pub fn get_login_response(user: User) -> LoginResponse {
    LoginResponse {
        user,
        token: "token-abc".to_string(),
    }
}

/// In-memory page store recording every call.
#[derive(Default)]
pub struct MockPageStore {
    pub pages: RefCell<Vec<Page>>,
    pub created: RefCell<Vec<Page>>,
    pub updated: RefCell<Vec<(String, Page)>>,
    pub deleted: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<ImageFile>>,
    pub list_calls: Cell<usize>,
    pub fail_list: Cell<bool>,
    pub fail_save: Cell<bool>,
    pub fail_delete: Cell<bool>,
    pub fail_upload: Cell<bool>,
}

impl MockPageStore {
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages: RefCell::new(pages),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl PageStore for MockPageStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<Page>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_list.get() {
            return Err(server_error("list failed"));
        }
        Ok(self
            .pages
            .borrow()
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, page: &Page) -> Result<Page, ApiError> {
        self.created.borrow_mut().push(page.clone());
        if self.fail_save.get() {
            return Err(server_error("create failed"));
        }
        let mut saved = page.clone();
        saved.id = CREATED_PAGE_ID.to_string();
        saved.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        Ok(saved)
    }

    async fn update(&self, id: &str, page: &Page) -> Result<Page, ApiError> {
        self.updated.borrow_mut().push((id.to_string(), page.clone()));
        if self.fail_save.get() {
            return Err(server_error("update failed"));
        }
        Ok(page.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.deleted.borrow_mut().push(id.to_string());
        if self.fail_delete.get() {
            return Err(server_error("delete failed"));
        }
        Ok(())
    }

    async fn upload_image(&self, file: &ImageFile) -> Result<UploadedImage, ApiError> {
        self.uploads.borrow_mut().push(file.clone());
        if self.fail_upload.get() {
            return Err(server_error("upload failed"));
        }
        Ok(UploadedImage {
            file_url: format!("https://cdn.test/{}", file.name),
        })
    }
}

pub struct MockQuota {
    pub limit: PageLimit,
    pub calls: Cell<usize>,
}

impl MockQuota {
    pub fn allowing() -> Self {
        Self::answering(PageLimit::allowed())
    }

    pub fn answering(limit: PageLimit) -> Self {
        Self {
            limit,
            calls: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl QuotaService for MockQuota {
    async fn check_page_limit(&self, _owner_id: &str) -> Result<PageLimit, ApiError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.limit.clone())
    }
}

#[derive(Default)]
pub struct MockUsers {
    pub users: Vec<User>,
    pub details_calls: Cell<usize>,
    pub fail: Cell<bool>,
}

#[async_trait(?Send)]
impl UserService for MockUsers {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        if self.fail.get() {
            return Err(server_error("users failed"));
        }
        Ok(self.users.clone())
    }

    async fn details(&self, user_id: &str) -> Result<User, ApiError> {
        self.details_calls.set(self.details_calls.get() + 1);
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "User not found".to_string(),
            })
    }
}

/// Accepts exactly one account; any other login is rejected with the
/// server's message.
pub struct MockAuth {
    pub user: User,
    pub password: String,
    pub login_calls: Cell<usize>,
    pub registered: RefCell<Vec<RegisterRequest>>,
}

impl MockAuth {
    pub fn new(user: User, password: &str) -> Self {
        Self {
            user,
            password: password.to_string(),
            login_calls: Cell::new(0),
            registered: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl AuthService for MockAuth {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.login_calls.set(self.login_calls.get() + 1);
        if request.email == self.user.email && request.password == self.password {
            Ok(get_login_response(self.user.clone()))
        } else {
            Err(ApiError::Status {
                status: 401,
                message: "Invalid credentials".to_string(),
            })
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        if request.email == self.user.email {
            return Err(ApiError::Status {
                status: 409,
                message: "Email already registered".to_string(),
            });
        }
        self.registered.borrow_mut().push(request.clone());
        Ok(())
    }
}

pub struct MockSubscriptions {
    pub user: RefCell<User>,
    pub fail_update: Cell<bool>,
}

impl MockSubscriptions {
    pub fn new(user: User) -> Self {
        Self {
            user: RefCell::new(user),
            fail_update: Cell::new(false),
        }
    }
}

#[async_trait(?Send)]
impl SubscriptionService for MockSubscriptions {
    async fn status(&self, _user_id: &str) -> Result<User, ApiError> {
        Ok(self.user.borrow().clone())
    }

    async fn update(&self, _user_id: &str, status: SubscriptionStatus) -> Result<User, ApiError> {
        if self.fail_update.get() {
            return Err(server_error("update failed"));
        }
        let mut user = self.user.borrow_mut();
        user.subscription_status = status;
        user.subscription_expiry = Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
        Ok(user.clone())
    }
}
