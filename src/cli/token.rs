use crate::{
    cli::Context,
    error::{Error, Result},
};

/// Prints a valid access token without starting the browser flow.
pub async fn token(ctx: &mut Context) -> Result<()> {
    if ctx.tokens.load().await.is_none() {
        return Err(Error::NotAuthorized);
    }

    let token = ctx.tokens.current_access_token().await?;
    println!("{token}");
    Ok(())
}
