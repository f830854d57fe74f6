use base64::{Engine, engine::general_purpose::STANDARD};

/// Redirect target registered with Spotify for a node name.
///
/// The trailing slash matters: the provider compares it byte for byte with the
/// registered value and the callback route is mounted at `/callback/`.
pub fn redirect_uri(node_name: &str, port: u16) -> String {
    match port {
        80 => format!("http://{node_name}.local/callback/"),
        port => format!("http://{node_name}.local:{port}/callback/"),
    }
}

/// Address a browser on the local network opens to start authorization.
pub fn landing_url(node_name: &str, port: u16) -> String {
    match port {
        80 => format!("http://{node_name}.local"),
        port => format!("http://{node_name}.local:{port}"),
    }
}

/// Builds the link to the provider's consent screen.
///
/// Redirect URI and scope are percent-encoded, so `http://x.local/callback/`
/// becomes `http%3A%2F%2Fx.local%2Fcallback%2F` and spaces become `%20`.
pub fn build_authorize_url(auth_url: &str, client_id: &str, redirect_uri: &str, scope: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        client_id = urlencoding::encode(client_id),
        redirect_uri = urlencoding::encode(redirect_uri),
        scope = urlencoding::encode(scope),
    )
}

/// `Authorization` header value for a confidential client.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Shortens a secret for log output, keeping only its first characters.
pub fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    if visible.len() == secret.len() {
        "*".repeat(secret.len())
    } else {
        format!("{visible}…")
    }
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration_ms(ms: u64) -> String {
    let total = ms / 1000;
    format!("{}:{:02}", total / 60, total % 60)
}
