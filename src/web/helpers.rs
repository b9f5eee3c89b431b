use actix_web::HttpResponse;
use askama::Template;

pub fn render<T: Template>(t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to render template");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

/// Scheme, host and port of `url`, as CSP source expressions want it.
pub fn origin_of(url: &str) -> &str {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url;
    };
    match rest.find('/') {
        Some(end) => &url[..scheme.len() + 3 + end],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_from_origin() {
        assert_eq!(origin_of("http://localhost:3000/api"), "http://localhost:3000");
        assert_eq!(origin_of("https://api.example.com"), "https://api.example.com");
    }
}
