//! `folio` — command-line client for a portfolio backend.
//!
//! Shows the public portfolio and, once logged in, edits the profile and
//! uploads the profile photo.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Portfolio CLI tool.
#[derive(Parser, Debug)]
#[command(name = "folio", about = "Portfolio CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.folio/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Print every state change as it happens.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the public portfolio.
    Show,

    /// Login and save the session.
    Login {
        #[arg(long, default_value = "admin")]
        user: String,
        /// Password (not recommended; prompts when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved session.
    Logout,

    /// Change profile text fields.
    Edit {
        #[arg(long)]
        headline: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Upload a new profile photo.
    Photo {
        /// Image file (jpg, png, gif, webp).
        path: std::path::PathBuf,
    },

    /// Show connection and session status.
    Status,

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set configuration values.
    Set {
        /// API base URL, e.g. http://localhost:8080/api.
        #[arg(long)]
        server: Option<String>,
        /// Fetch the project list.
        #[arg(long)]
        projects: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::FolioConfig::default_path);
    let verbose = cli.verbose;
    let load = || config::FolioConfig::load(&config_path);

    match cli.command {
        Commands::Show => {
            commands::show::show(&load()?, verbose).await?;
        }

        Commands::Login { user, password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            if password.is_empty() {
                anyhow::bail!("Password cannot be empty.");
            }
            commands::login::login(&load()?, &user, &password, verbose).await?;
        }

        Commands::Logout => {
            commands::login::logout(&load()?, verbose).await?;
        }

        Commands::Edit {
            headline,
            summary,
            location,
        } => {
            let edits = commands::edit::ProfileEdits {
                headline,
                summary,
                location,
            };
            commands::edit::edit(&load()?, edits, verbose).await?;
        }

        Commands::Photo { path } => {
            commands::edit::photo(&load()?, &path, verbose).await?;
        }

        Commands::Status => {
            commands::status::status(&load()?, verbose).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Set { server, projects } => {
                commands::config::set(server.as_deref(), projects, &config_path)?;
            }
        },

        Commands::Version => {
            println!("folio v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
