//! CLI routing and command dispatch.

use crate::core::config;
use crate::core::shell::{Notice, NoticeLevel, Shell};
use crate::core::store::{CredentialStore, MemoryStore, RestStore};
use crate::models::config::ConfigFile;
use crate::util::logging;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

pub mod credential;
pub mod doctor;
pub mod init;
pub mod interactive;
pub mod prompt;
pub mod view;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub config_path: PathBuf,
    pub config: ConfigFile,
    pub config_load_warning: Option<String>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub demo: bool,
    pub non_interactive: bool,
}

impl CliContext {
    /// Prompts are allowed only on a terminal and without `--non-interactive`.
    pub fn interactive(&self) -> bool {
        !self.non_interactive && std::io::stdin().is_terminal()
    }

    pub fn store(&self) -> Result<Box<dyn CredentialStore>> {
        if self.demo {
            tracing::info!("using in-memory demo store");
            return Ok(Box::new(MemoryStore::with_demo_data()));
        }
        if let Some(w) = &self.config_load_warning {
            bail!("{}", w);
        }
        let cfg = config::store_config(&self.config, self.url.as_deref(), self.api_key.as_deref());
        let store = RestStore::new(cfg).context("configure store")?;
        Ok(Box::new(store))
    }

    /// Build the shell and load the list. A failed load is an error here.
    pub async fn open_shell(&self) -> Result<Shell> {
        let mut shell = Shell::new(self.store()?);
        shell.load().await;
        let notices = shell.drain_notices();
        if let Some(err) = notices.iter().find(|n| n.level == NoticeLevel::Error) {
            bail!("{}", err.message);
        }
        Ok(shell)
    }
}

/// Print notices: successes to stdout, errors to stderr.
pub fn report(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "credman", version, about = "Credential manager for a hosted credentials table")]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true, value_name = "PATH", env = "CREDMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Store base URL (overrides config)
    #[arg(long, global = true, env = "CREDMAN_URL")]
    pub url: Option<String>,

    /// Store public client key (overrides config)
    #[arg(long, global = true, env = "CREDMAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use an in-memory store seeded with sample credentials
    #[arg(long, global = true)]
    pub demo: bool,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "CREDMAN_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Enable debug logging (CREDMAN_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let config_path = config::resolve_path(self.config)?;

        // Best-effort: `init` and `doctor` must work with a broken file.
        let mut config_load_warning: Option<String> = None;
        let config = match config::load(&config_path) {
            Ok(c) => c,
            Err(e) => {
                config_load_warning = Some(format!("cannot read config: {:#}", e));
                ConfigFile::default()
            }
        };

        let ctx = CliContext {
            config_path,
            config,
            config_load_warning,
            url: self.url,
            api_key: self.api_key,
            demo: self.demo,
            non_interactive: self.non_interactive,
        };

        match self.command {
            Commands::Init(args) => init::run(&ctx, args),
            Commands::List(args) => credential::run_list(&ctx, args).await,
            Commands::Add(args) => credential::run_add(&ctx, args).await,
            Commands::Edit(args) => credential::run_edit(&ctx, args).await,
            Commands::Copy(args) => credential::run_copy(&ctx, args).await,
            Commands::Generate => credential::run_generate(),
            Commands::Stats(args) => credential::run_stats(&ctx, args).await,
            Commands::Doctor(args) => doctor::run(&ctx, args).await,
            Commands::Shell => interactive::run(&ctx).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the config file (store URL and client key)
    Init(init::InitArgs),
    /// List credentials, optionally filtered by a search term
    List(credential::ListArgs),
    /// Add a credential
    Add(credential::AddArgs),
    /// Edit a credential by id
    Edit(credential::EditArgs),
    /// Copy a credential's username or password to the clipboard
    Copy(credential::CopyArgs),
    /// Print a generated password
    Generate,
    /// Show aggregate counters
    Stats(credential::StatsArgs),
    /// Diagnose configuration and store connectivity (read-only)
    Doctor(doctor::DoctorArgs),
    /// Interactive session: search, add, edit, copy
    Shell,
}
