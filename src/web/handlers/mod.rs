pub mod shell;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(shell::healthz);
}

/// Catch-all serving the dashboard shell. This MUST be registered last.
pub fn configure_catch_all(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::get().to(shell::shell));
}
