use crate::cli::prompt::{self, FieldArgs};
use crate::cli::{report, view, CliContext, OutputFormat};
use crate::core::cards;
use crate::core::form::Field;
use crate::core::password;
use crate::core::shell::{CopyTarget, Shell};
use crate::models::credential::Credential;
use crate::util::clipboard;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive search over platform, username, and domain
    #[arg(long, short)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show passwords instead of the mask
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Credential id
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyField {
    Username,
    Password,
}

impl From<CopyField> for CopyTarget {
    fn from(f: CopyField) -> Self {
        match f {
            CopyField::Username => CopyTarget::Username,
            CopyField::Password => CopyTarget::Password,
        }
    }
}

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Credential id
    pub id: String,

    /// Which field to copy
    #[arg(value_enum)]
    pub field: CopyField,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Also count results matching this search term
    #[arg(long, short)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ListItem<'a> {
    id: &'a str,
    platform: &'a str,
    domain: Option<&'a str>,
    username: &'a str,
    password: &'a str,
    created_at: Option<DateTime<Utc>>,
}

impl<'a> ListItem<'a> {
    fn from_card(card: &cards::CredentialCard<'a>) -> Self {
        let c: &'a Credential = card.credential();
        Self {
            id: &c.id,
            platform: &c.platform,
            domain: c.domain.as_deref(),
            username: &c.username,
            password: card.password_display(),
            created_at: c.created_at,
        }
    }
}

pub async fn run_list(ctx: &CliContext, args: ListArgs) -> Result<()> {
    let mut shell = ctx.open_shell().await?;
    if let Some(term) = args.search {
        shell.set_search(term);
    }
    let searching = !shell.search().is_empty();

    let visible = shell.visible();
    let mut rendered = cards::render(&visible);
    if args.reveal {
        rendered.iter_mut().for_each(|c| c.toggle_password());
    }

    if args.format == OutputFormat::Json {
        let items: Vec<ListItem<'_>> = rendered.iter().map(ListItem::from_card).collect();
        let json = serde_json::to_string_pretty(&items).context("serialize list")?;
        println!("{}", json);
        return Ok(());
    }

    view::print_cards(&rendered, searching);
    println!("{}", view::stats_table(&shell.stats(), searching));
    Ok(())
}

pub async fn run_add(ctx: &CliContext, args: AddArgs) -> Result<()> {
    let mut shell = ctx.open_shell().await?;
    shell.open_create();
    prompt::apply_args(&mut shell, &args.fields)?;
    if ctx.interactive() {
        prompt::prompt_fields(&mut shell, &args.fields, false)?;
    }
    save(&mut shell, &args.fields).await?;
    Ok(())
}

pub async fn run_edit(ctx: &CliContext, args: EditArgs) -> Result<()> {
    let mut shell = ctx.open_shell().await?;
    if !shell.open_edit(&args.id) {
        bail!("credential not found: {}", args.id);
    }
    prompt::apply_args(&mut shell, &args.fields)?;
    if ctx.interactive() {
        prompt::prompt_fields(&mut shell, &args.fields, args.fields.is_empty())?;
    } else if args.fields.is_empty() {
        bail!("--non-interactive requires at least one field flag for edit");
    }
    save(&mut shell, &args.fields).await?;
    Ok(())
}

/// Save the form; a password generated from `--generate` is shown once it is stored.
async fn save(shell: &mut Shell, fields: &FieldArgs) -> Result<Option<Zeroizing<String>>> {
    let generated = fields
        .generate
        .then(|| Zeroizing::new(shell.form().inputs().get(Field::Password).to_owned()));
    let result = shell.save().await;
    report(shell.drain_notices());
    result.context("credential not saved")?;
    if let Some(password) = &generated {
        println!("Generated password: {}", password.as_str());
    }
    Ok(generated)
}

pub async fn run_copy(ctx: &CliContext, args: CopyArgs) -> Result<()> {
    let mut shell = ctx.open_shell().await?;
    let clip = clipboard::system();
    let ok = shell.copy(&*clip, &args.id, args.field.into());
    report(shell.drain_notices());
    if !ok {
        bail!("copy failed");
    }
    Ok(())
}

pub fn run_generate() -> Result<()> {
    println!("{}", password::generate());
    Ok(())
}

pub async fn run_stats(ctx: &CliContext, args: StatsArgs) -> Result<()> {
    let mut shell = ctx.open_shell().await?;
    if let Some(term) = args.search {
        shell.set_search(term);
    }
    let searching = !shell.search().is_empty();
    let stats = shell.stats();

    if args.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&stats).context("serialize stats")?;
        println!("{}", json);
        return Ok(());
    }
    println!("{}", view::stats_table(&stats, searching));
    Ok(())
}
