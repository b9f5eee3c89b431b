use askama::Template;

/// HTML shell every dashboard route is served with; the bundle takes over
/// routing once loaded.
#[derive(Template)]
#[template(path = "shell.html")]
pub struct ShellTemplate<'a> {
    pub title: &'a str,
    pub api_meta: &'a str,
    pub api_url: &'a str,
    pub bundle: &'a str,
}
