use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotremote::{
    cli::{self, Context},
    config::{self, Settings},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize the device with Spotify and log in
    Auth(AuthOptions),

    /// Print a valid access token
    Token,

    /// Show the current playback
    Status(StatusOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Seconds to wait for the browser authorization
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Open the landing page in a local browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusOptions {
    /// Keep refreshing until interrupted
    #[clap(long)]
    pub watch: bool,

    /// Seconds between refreshes with --watch
    #[clap(long, default_value_t = 5)]
    pub interval: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot prepare data directory. Err: {}", e);
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let mut ctx = Context::new(settings);
    ctx.cancel_on_ctrl_c();

    let result = match cli.command {
        Command::Auth(opt) => cli::auth(&mut ctx, opt.timeout, opt.open).await,
        Command::Token => cli::token(&mut ctx).await,
        Command::Status(opt) => cli::status(&mut ctx, opt.watch, opt.interval).await,
        Command::Completions(_) => Ok(()),
    };

    if let Err(e) = result {
        warning!("{}", e);
        if e.requires_reauth() {
            warning!("Run 'spotremote auth' to authorize the device.");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["spotremote", "auth", "--timeout", "0"]).is_err());

        let cli = Cli::try_parse_from(["spotremote", "auth", "--timeout", "30"]).unwrap();
        let Command::Auth(opt) = cli.command else {
            panic!("expected auth command");
        };
        assert_eq!(opt.timeout, Some(30));
    }
}
