//! Diagnostics for configuration and store connectivity.

use crate::cli::CliContext;
use crate::core::config;
use crate::core::store::{CredentialStore, RestStore};
use crate::util::clipboard::SystemClipboard;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Skip the request to the store
    #[arg(long)]
    pub offline: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    ok: u32,
    warn: u32,
    fail: u32,
}

impl Tally {
    fn pass(&mut self, msg: impl AsRef<str>) {
        println!("  [PASS] {}", msg.as_ref());
        self.ok += 1;
    }

    fn warn(&mut self, msg: impl AsRef<str>) {
        println!("  [WARN] {}", msg.as_ref());
        self.warn += 1;
    }

    fn fail(&mut self, msg: impl AsRef<str>) {
        println!("  [FAIL] {}", msg.as_ref());
        self.fail += 1;
    }
}

pub async fn run(ctx: &CliContext, args: DoctorArgs) -> Result<()> {
    let mut t = Tally::default();

    println!("Doctor: {}", ctx.config_path.display());

    if let Some(w) = &ctx.config_load_warning {
        t.fail(w);
    } else if ctx.config_path.is_file() {
        t.pass("config file exists");
    } else {
        t.warn("config file missing (run: credman init)");
    }

    let cfg = config::store_config(&ctx.config, ctx.url.as_deref(), ctx.api_key.as_deref());
    if cfg.url.is_empty() {
        t.fail("store url not set");
    } else {
        t.pass(format!("store url: {}", cfg.url));
    }
    if cfg.api_key.is_empty() {
        t.fail("client key not set");
    } else {
        t.pass("client key set");
    }

    match SystemClipboard::detect() {
        Some(c) => t.pass(format!("clipboard tool: {}", c.program())),
        None => t.warn("no clipboard tool found; copy will fail"),
    }

    if args.offline {
        println!("  [INFO] store check skipped (--offline)");
    } else if t.fail == 0 {
        match RestStore::new(cfg) {
            Ok(store) => match store.list().await {
                Ok(rows) => t.pass(format!("store reachable ({} credentials)", rows.len())),
                Err(e) => t.fail(format!("store request failed: {}", e)),
            },
            Err(e) => t.fail(format!("store config invalid: {}", e)),
        }
    }

    println!();
    println!("Doctor summary: {} pass, {} warn, {} fail", t.ok, t.warn, t.fail);
    if t.fail > 0 {
        std::process::exit(1);
    }
    Ok(())
}
