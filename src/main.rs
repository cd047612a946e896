//! Pokédex CLI - terminal browser for the PokéAPI

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use pokedex::config::Config;
use pokedex::error::{FixSuggestion, PokedexError};
use pokedex::{logging, tui};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Pokédex - browse the PokéAPI from your terminal")]
#[command(version)]
struct Cli {
    /// PokéAPI base URL (default: https://pokeapi.co/api/v2, env: POKEDEX_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (default: transport default, env: POKEDEX_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file (default: <tmp>/pokedex.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Browse the bundled sample instead of the network
    #[arg(long)]
    demo: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config, PokedexError> {
        let mut config = Config::default().with_env()?;
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Some(std::time::Duration::from_secs(secs));
        }
        if let Some(path) = self.log_file {
            config.log_file = path;
        }
        config.demo = self.demo;
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let check = cli.check;

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if check {
        print_config(&config);
        return;
    }

    if let Err(e) = logging::init(&config.log_file) {
        exit_with(&e);
    }

    if let Err(e) = tui::run(config).await {
        tracing::error!(error = %e, "Pokédex exited with an error");
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<PokedexError>().and_then(|e| e.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn print_config(config: &Config) {
    println!("{} Configuration is valid", "✓".green());
    println!("  API:     {}", config.api_url.cyan());
    println!("  Sprites: {}", config.sprite_url);
    println!(
        "  Timeout: {}",
        config
            .request_timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "(transport default)".to_string())
    );
    println!("  Log:     {}", config.log_file.display());
    println!("  Mode:    {}", if config.demo { "demo" } else { "live" });
}

fn exit_with(e: &PokedexError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    if let Some(suggestion) = e.fix_suggestion() {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(1);
}
