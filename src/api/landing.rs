use std::sync::Arc;

use axum::{Extension, response::Html};

/// Landing page pointing at the provider's consent screen.
#[derive(Debug, Clone)]
pub struct LandingPage {
    authorize_url: String,
}

impl LandingPage {
    pub fn new(authorize_url: impl Into<String>) -> Self {
        Self {
            authorize_url: authorize_url.into(),
        }
    }

    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    pub fn render(&self) -> String {
        // The link is built from percent-encoded parts; only `&` needs escaping in an attribute.
        let href = self.authorize_url.replace('&', "&amp;");
        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <title>Spotify Remote</title>
  </head>
  <body>
    <div>
      <a href="{href}">Click</a> to load Spotify authentication code
    </div>
  </body>
</html>
"#
        )
    }
}

pub async fn landing(Extension(page): Extension<Arc<LandingPage>>) -> Html<String> {
    Html(page.render())
}
