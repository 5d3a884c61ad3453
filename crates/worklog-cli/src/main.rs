use anyhow::Result;
use clap::Parser;

mod alias_cmd;
mod cli;
mod display;
mod hints;
mod i18n;
mod interactive_cmd;
mod menu;
mod prompt;
mod quick_cmd;
mod reconcile;
mod setup_cmd;
mod stats_cmd;
mod submit;
mod template_cmd;

use cli::{Cli, Commands};
use prompt::StdPrompt;
use wl_core::Lang;
use wl_store::Store;

#[tokio::main]
async fn main() {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {}
        Err(err) => {
            let lang = configured_lang();
            std::process::exit(hints::report(&err, lang));
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut store = Store::open_default()?;
    let mut prompt = StdPrompt::default();

    match cli.command {
        Some(Commands::Setup) => {
            let lang = configured_lang();
            setup_cmd::run(&store, &mut prompt, lang).await
        }
        Some(Commands::Quick { input }) => {
            let config = quick_cmd::require_config(&store)?;
            let input = input.join(" ");
            quick_cmd::run(&mut store, &config, &input, &mut prompt).await
        }
        Some(Commands::Template) => {
            let config = quick_cmd::require_config(&store)?;
            template_cmd::run(&mut store, &config, &mut prompt).await
        }
        Some(Commands::Alias) => {
            let config = quick_cmd::require_config(&store)?;
            alias_cmd::run(&store, &mut prompt, config.lang)
        }
        Some(Commands::Stats) => {
            let config = quick_cmd::require_config(&store)?;
            stats_cmd::run(&store, config.lang)
        }
        None => interactive_cmd::run(&mut store, &mut prompt).await,
    }
}

/// Language for diagnostics, best effort: config if reachable, Russian
/// otherwise (pre-setup failures included).
fn configured_lang() -> Lang {
    Store::open_default()
        .ok()
        .and_then(|store| store.get_config().ok().flatten())
        .map(|config| config.lang)
        .unwrap_or_default()
}
