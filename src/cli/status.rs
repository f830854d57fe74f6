use std::time::Duration;

use colored::Colorize;

use crate::{
    cli::Context,
    error::{Error, Result},
    info,
    types::PlaybackState,
    utils, warning,
};

/// Shows the current playback, once or every `interval` seconds.
///
/// Each round asks the token manager for the access token first, so an expired
/// token is renewed right before the request that needs it.
pub async fn status(ctx: &mut Context, watch: bool, interval: u64) -> Result<()> {
    if ctx.tokens.load().await.is_none() {
        return Err(Error::NotAuthorized);
    }

    if !watch {
        return show_once(ctx).await;
    }

    let cancel = ctx.cancel.clone();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Failures are transient here; the next tick tries again.
                if let Err(e) = show_once(ctx).await {
                    warning!("{}", e);
                }
            }
            _ = cancel.cancelled() => return Ok(()),
        }
    }
}

async fn show_once(ctx: &mut Context) -> Result<()> {
    let token = ctx.tokens.current_access_token().await?;
    match ctx.spotify.playback(&token).await? {
        Some(state) => println!("{}", render(&state)),
        None => info!("Nothing is playing."),
    }
    Ok(())
}

fn render(state: &PlaybackState) -> String {
    let marker = if state.is_playing { "▶".green() } else { "⏸".yellow() };
    let Some(item) = &state.item else {
        return format!("{marker} (no track information)");
    };

    let artists = item
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let position = utils::format_duration_ms(state.progress_ms.unwrap_or(0));
    let length = utils::format_duration_ms(item.duration_ms);
    let device = state
        .device
        .as_ref()
        .map(|d| format!(" on {}", d.name))
        .unwrap_or_default();

    format!(
        "{marker} {} - {} [{position}/{length}]{device}",
        item.name.bold(),
        artists
    )
}
