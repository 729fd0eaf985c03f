//! Command-line interface parsing and dispatch.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::web;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "promptforge")]
#[command(version)]
#[command(about = "Crafts optimized prompts for AI models.")]
#[command(
    long_about = "Promptforge is a full-screen terminal tool that refines rough ideas into \
model-ready prompts via Gemini, then lets you run the refined prompt for a final answer.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    Your Gemini API key (required)\n\n\
Controls:\n\
  Up/Down           Pick a model, scroll results\n\
  Type              Enter your rough prompt in the input field\n\
  Enter             Submit the prompt (or start over from a result)\n\
  r                 Resubmit the crafted prompt for a final answer\n\
  c                 Copy the displayed content to the clipboard\n\
  Esc/Ctrl+C        Quit the application"
)]
pub struct Args {
    /// Run in web server mode on port 8080
    #[arg(long)]
    pub web: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main(Args::parse()))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    if args.web {
        // The TUI owns the terminal, so only server mode logs to stderr.
        init_tracing();
        web::serve(config, VERSION).await
    } else {
        run_chat(config, VERSION).await
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("promptforge=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_default_to_terminal_mode() {
        let args = Args::parse_from(["promptforge"]);
        assert!(!args.web);
    }

    #[test]
    fn web_flag_selects_server_mode() {
        let args = Args::parse_from(["promptforge", "--web"]);
        assert!(args.web);
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
