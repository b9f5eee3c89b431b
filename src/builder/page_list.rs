use std::rc::Rc;

use crate::api::{PageStore, UserService};
use crate::log_err;
use crate::models::{Page, User, NEW_PAGE_ID};

pub const FETCH_PAGES_MESSAGE: &str = "Failed to fetch pages";
pub const DELETE_PAGE_MESSAGE: &str = "Failed to delete page";

pub fn new_page_path(owner_id: &str) -> String {
    edit_path(owner_id, NEW_PAGE_ID)
}

pub fn edit_path(owner_id: &str, page_id: &str) -> String {
    format!("/page-builder/{}/{}", owner_id, page_id)
}

pub fn pages_path(owner_id: &str) -> String {
    format!("/pages/{}", owner_id)
}

/// Pages of one account plus, for administrators browsing someone else,
/// that account's details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub pages: Vec<Page>,
    pub owner: Option<User>,
}

/// Fetches the listing of `owner_id` as seen by `viewer`.
pub async fn fetch_listing(
    store: &dyn PageStore,
    users: &dyn UserService,
    owner_id: &str,
    viewer: Option<&User>,
) -> Result<Listing, String> {
    let pages = store.list(owner_id).await.map_err(|e| {
        log_err!(e, "failed to fetch pages for {}", owner_id);
        FETCH_PAGES_MESSAGE.to_string()
    })?;

    let browsing_other = viewer.is_some_and(|v| v.is_admin() && v.id != owner_id);
    let owner = if browsing_other {
        Some(users.details(owner_id).await.map_err(|e| {
            log_err!(e, "failed to fetch details for {}", owner_id);
            FETCH_PAGES_MESSAGE.to_string()
        })?)
    } else {
        None
    };

    Ok(Listing { pages, owner })
}

pub struct PageList {
    store: Rc<dyn PageStore>,
    users: Rc<dyn UserService>,
    owner_id: String,
    listing: Listing,
    loading: bool,
    error: Option<String>,
}

impl PageList {
    pub fn new(store: Rc<dyn PageStore>, users: Rc<dyn UserService>) -> Self {
        Self {
            store,
            users,
            owner_id: String::new(),
            listing: Listing::default(),
            loading: true,
            error: None,
        }
    }

    pub fn store(&self) -> Rc<dyn PageStore> {
        Rc::clone(&self.store)
    }

    pub fn users(&self) -> Rc<dyn UserService> {
        Rc::clone(&self.users)
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn pages(&self) -> &[Page] {
        &self.listing.pages
    }

    pub fn owner(&self) -> Option<&User> {
        self.listing.owner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn heading(&self) -> String {
        match self.owner() {
            Some(owner) => format!("{}'s Pages", owner.username),
            None => "My Pages".to_string(),
        }
    }

    /// "Viewing pages for: <name>" when browsing another account.
    pub fn viewing_banner(&self) -> Option<String> {
        self.owner()
            .map(|owner| format!("Viewing pages for: {}", owner.username))
    }

    pub fn new_page_path(&self) -> String {
        new_page_path(&self.owner_id)
    }

    pub fn edit_path(&self, page_id: &str) -> String {
        edit_path(&self.owner_id, page_id)
    }

    pub fn begin_load(&mut self, owner_id: &str) {
        self.owner_id = owner_id.to_string();
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Listing, String>) {
        self.loading = false;
        match result {
            Ok(listing) => self.listing = listing,
            Err(message) => self.error = Some(message),
        }
    }

    pub async fn load(&mut self, owner_id: &str, viewer: Option<&User>) {
        self.begin_load(owner_id);
        let result = fetch_listing(
            self.store.as_ref(),
            self.users.as_ref(),
            owner_id,
            viewer,
        )
        .await;
        self.finish_load(result);
    }

    /// Drops `page_id` after a successful remote delete.
    pub fn finish_delete(&mut self, page_id: &str, deleted: bool) {
        if deleted {
            self.listing.pages.retain(|p| p.id != page_id);
        } else {
            self.error = Some(DELETE_PAGE_MESSAGE.to_string());
        }
    }

    pub async fn delete(&mut self, page_id: &str) -> bool {
        let deleted = match self.store.delete(page_id).await {
            Ok(()) => true,
            Err(e) => {
                log_err!(e, "failed to delete page {}", page_id);
                false
            }
        };
        self.finish_delete(page_id, deleted);
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_paths() {
        assert_eq!(new_page_path("u1"), "/page-builder/u1/new");
        assert_eq!(edit_path("u1", "p7"), "/page-builder/u1/p7");
        assert_eq!(pages_path("u1"), "/pages/u1");
    }
}
