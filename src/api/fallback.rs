use axum::{
    extract::Query,
    http::{Method, StatusCode, Uri, header},
    response::IntoResponse,
};

use crate::warning;

pub async fn favicon() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/vnd.microsoft.icon")],
        "00000100",
    )
}

/// Echoes the unmatched request back for diagnosis.
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, String) {
    let args = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map(|Query(args)| args)
        .unwrap_or_default();

    let mut message = format!(
        "File Not Found\n\nURI: {}\nMethod: {}\nArguments: {}\n",
        uri.path(),
        method,
        args.len()
    );
    for (name, value) in &args {
        message.push_str(&format!(" {name}: {value}\n"));
    }

    warning!("{}", message.trim_end());
    (StatusCode::NOT_FOUND, message)
}
