use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use browsershelf::cli;
use browsershelf::config::Settings;
use browsershelf::render::HeadingTag;

#[derive(Parser)]
#[command(
    name = "browsershelf",
    about = "Browsershelf — render a supported-browsers list from a browserslist config",
    version,
    after_help = "Run 'browsershelf <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, resolve, classify, and print the browser list
    Render {
        /// Remote browserslist config URL
        #[arg(long)]
        config_url: Option<String>,
        /// Heading tag for the platform sections (h1-h6)
        #[arg(long, default_value = "h2")]
        heading: HeadingTag,
        /// Base URL under which images/<id>.png icons are served
        #[arg(long)]
        icon_base_url: Option<String>,
        /// Bypass the cached config and fetch it again
        #[arg(long)]
        fresh: bool,
    },
    /// Check npx, config URL, and cache directory readiness
    Doctor,
    /// Manage the cached config
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove all cached config entries
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::from_env();

    let result = match cli.command {
        Commands::Render {
            config_url,
            heading,
            icon_base_url,
            fresh,
        } => {
            if let Some(url) = config_url {
                settings.config_url = url;
            }
            if let Some(base) = icon_base_url {
                settings.icon_base_url = base;
            }
            cli::render_cmd::run(settings, heading, fresh, cli.json).await
        }
        Commands::Doctor => cli::doctor::run(&settings).await,
        Commands::Cache { action } => match action {
            CacheAction::Clear => cli::cache_cmd::run_clear(&settings),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "browsershelf", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}
