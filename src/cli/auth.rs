use std::time::Duration;

use crate::{cli::Context, error::Result, info, progress::ProgressSink, success, utils, warning};

/// Authorizes the device if needed and logs in.
///
/// Mirrors device startup: the stored refresh token is used when present,
/// otherwise the user is sent through the browser flow. With `open_browser`
/// the landing page is opened locally as well.
pub async fn auth(ctx: &mut Context, timeout: Option<u64>, open_browser: bool) -> Result<()> {
    if let Some(secs) = timeout {
        ctx.flow.set_timeout(Duration::from_secs(secs));
    }

    if open_browser && ctx.tokens.load().await.is_none() {
        let url = ctx.settings.landing_url();
        // The server starts inside the flow; the browser retries until it answers.
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Please navigate to {} manually", url);
        }
    }

    let refresh = ctx
        .tokens
        .ensure_authorized(&mut ctx.flow, &ctx.progress, &ctx.cancel)
        .await;
    let refresh = match refresh {
        Ok(refresh) => refresh,
        Err(e) => {
            ctx.progress.finish();
            return Err(e);
        }
    };

    ctx.progress.report("Logging into Spotify...", 90);
    let login = ctx.tokens.current_access_token().await;
    ctx.progress.report("Startup completed!", 100);
    ctx.progress.finish();
    login?;

    info!("Refresh token: {}", utils::redact(&refresh));
    success!("Authentication against Spotify done.");
    Ok(())
}
