use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode};

use crate::{debug, info, management::PendingFlow, warning};

pub const CALLBACK_SUCCESS: &str =
    "Successfully fetched Spotify authentication code. Follow instructions on device.";
pub const CALLBACK_FAILURE: &str = "Failed to fetch Spotify authentication code, check the device log. \
Maybe go back in browser history and try again.";

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(pending): Extension<Arc<PendingFlow>>,
) -> (StatusCode, &'static str) {
    let code = params.get("code").map(String::as_str).unwrap_or_default();

    if code.is_empty() {
        match params.get("error") {
            Some(reason) => warning!("Spotify declined authorization: {}", reason),
            None => warning!("Callback hit without an authorization code"),
        }
        return (StatusCode::NOT_FOUND, CALLBACK_FAILURE);
    }

    if pending.capture(code).await {
        info!("Received Spotify authorization code");
    } else {
        debug!("Ignoring additional authorization code, one was already captured");
    }
    (StatusCode::OK, CALLBACK_SUCCESS)
}
