use crate::cli::CliContext;
use crate::core::config;
use crate::models::config::ConfigFile;
use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::{Input, Password};
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Table holding the credential rows
    #[arg(long)]
    pub table: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub fn run(ctx: &CliContext, args: InitArgs) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !args.force {
        bail!("config already exists: {} (use --force to overwrite)", path.display());
    }

    let url = match ctx.url.clone().filter(|u| !u.trim().is_empty()) {
        Some(u) => u,
        None if ctx.interactive() => Input::<String>::new()
            .with_prompt("Store URL")
            .interact_text()
            .context("read store url")?,
        None => bail!("--non-interactive requires --url (or CREDMAN_URL) for init"),
    };

    let api_key = match ctx.api_key.clone().filter(|k| !k.trim().is_empty()) {
        Some(k) => Zeroizing::new(k),
        None if ctx.interactive() => Zeroizing::new(
            Password::new()
                .with_prompt("Public client key")
                .interact()
                .context("read client key")?,
        ),
        None => bail!("--non-interactive requires --api-key (or CREDMAN_API_KEY) for init"),
    };

    let mut file = ConfigFile::default();
    file.store.url = Some(url.trim().trim_end_matches('/').to_string());
    file.store.api_key = Some(api_key.trim().to_string());
    if let Some(table) = args.table {
        file.store.table = table;
    }
    if let Some(secs) = args.timeout_secs {
        file.store.timeout_secs = secs;
    }

    config::save(path, &file)?;
    println!("Wrote {}", path.display());
    Ok(())
}
