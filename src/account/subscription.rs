use std::rc::Rc;

use crate::api::SubscriptionService;
use crate::log_err;
use crate::models::{Plan, SubscriptionStatus, User, PLANS};
use crate::services::SessionService;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load subscription information";
pub const UPGRADE_FAILED_MESSAGE: &str = "Failed to upgrade subscription";
pub const UPGRADED_MESSAGE: &str = "Subscription upgraded successfully!";

/// Plan catalogue and the signed-in user's current plan.
pub struct SubscriptionController {
    service: Rc<dyn SubscriptionService>,
    current: Option<SubscriptionStatus>,
    busy: bool,
}

impl SubscriptionController {
    pub fn new(service: Rc<dyn SubscriptionService>) -> Self {
        Self {
            service,
            current: None,
            busy: false,
        }
    }

    pub fn service(&self) -> Rc<dyn SubscriptionService> {
        Rc::clone(&self.service)
    }

    pub fn plans(&self) -> &'static [Plan] {
        &PLANS
    }

    pub fn current(&self) -> Option<SubscriptionStatus> {
        self.current
    }

    pub fn is_current(&self, plan: &Plan) -> bool {
        self.current == Some(plan.status)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Records the status the server reported.
    pub fn apply(&mut self, user: &User) {
        self.current = Some(user.subscription_status);
        self.busy = false;
    }

    pub async fn load(&mut self, user_id: &str) -> Result<SubscriptionStatus, &'static str> {
        self.busy = true;
        let result = self.service.status(user_id).await;
        self.busy = false;

        match result {
            Ok(user) => {
                self.apply(&user);
                Ok(user.subscription_status)
            }
            Err(e) => {
                log_err!(e, "failed to fetch subscription of {}", user_id);
                Err(LOAD_FAILED_MESSAGE)
            }
        }
    }

    /// Switches `user_id` to `status` and refreshes the session user.
    pub async fn upgrade(
        &mut self,
        session: &SessionService,
        user_id: &str,
        status: SubscriptionStatus,
    ) -> Result<SubscriptionStatus, &'static str> {
        self.busy = true;
        let result = self.service.update(user_id, status).await;
        self.busy = false;

        match result {
            Ok(user) => {
                self.apply(&user);
                sync_session(session, &user);
                Ok(user.subscription_status)
            }
            Err(e) => {
                log_err!(e, "failed to update subscription of {}", user_id);
                Err(UPGRADE_FAILED_MESSAGE)
            }
        }
    }
}

/// Copies subscription fields of `updated` into the session user when it
/// is the same account.
pub fn sync_session(session: &SessionService, updated: &User) {
    let result = session.update_user(|user| {
        if user.id == updated.id {
            user.subscription_status = updated.subscription_status;
            user.subscription_expiry = updated.subscription_expiry;
        }
    });
    if let Err(e) = result {
        log_err!(e, "failed to persist subscription change");
    }
}
