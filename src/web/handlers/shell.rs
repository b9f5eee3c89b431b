use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use pagecraft::frontend::API_URL_META;
use pagecraft::routes::{find_route, NOT_FOUND_TITLE};

use crate::web::helpers::render;
use crate::web::state::{AppState, BUNDLE_NAME};
use crate::web::templates::ShellTemplate;

#[get("/healthz")]
pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Serves the shell for any dashboard path. Unknown paths still get the
/// shell (the bundle renders its not-found view) but with a 404 status.
pub async fn shell(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let path = req.path();
    let route = find_route(path).map(|(route, _)| route);
    let title = route.map_or(NOT_FOUND_TITLE, |r| r.title);

    let mut response = render(ShellTemplate {
        title,
        api_meta: API_URL_META,
        api_url: &state.api_base_url,
        bundle: BUNDLE_NAME,
    });

    if route.is_none() && response.status().is_success() {
        *response.status_mut() = actix_web::http::StatusCode::NOT_FOUND;
    }
    tracing::debug!(path, status = %response.status(), "served shell");
    response
}
