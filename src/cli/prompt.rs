//! Terminal prompts for filling the credential form.

use crate::core::form::Field;
use crate::core::shell::Shell;
use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input, Password};
use std::io::Read;
use zeroize::Zeroizing;

/// Field values given on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Platform name (e.g. Gmail, GitHub)
    #[arg(long)]
    pub platform: Option<String>,

    /// Domain (empty string clears it)
    #[arg(long)]
    pub domain: Option<String>,

    /// Username or email
    #[arg(long)]
    pub username: Option<String>,

    /// Read the password from stdin
    #[arg(long, conflicts_with = "generate")]
    pub password_stdin: bool,

    /// Generate a 16-character password
    #[arg(long)]
    pub generate: bool,
}

impl FieldArgs {
    fn given(&self, field: Field) -> bool {
        match field {
            Field::Platform => self.platform.is_some(),
            Field::Domain => self.domain.is_some(),
            Field::Username => self.username.is_some(),
            Field::Password => self.password_stdin || self.generate,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| !self.given(*f))
    }
}

/// Apply command-line values to the open form.
pub fn apply_args(shell: &mut Shell, args: &FieldArgs) -> Result<()> {
    let form = shell.form_mut();
    if let Some(v) = &args.platform {
        form.set(Field::Platform, v.as_str())?;
    }
    if let Some(v) = &args.domain {
        form.set(Field::Domain, v.as_str())?;
    }
    if let Some(v) = &args.username {
        form.set(Field::Username, v.as_str())?;
    }
    if args.password_stdin {
        let password = read_password_stdin()?;
        form.set(Field::Password, password.as_str())?;
    }
    if args.generate {
        shell.generate_password();
    }
    Ok(())
}

/// Prompt for fields not given on the command line.
///
/// With `all` set (editing), every such field is prompted with its current
/// value; otherwise only empty fields are.
pub fn prompt_fields(shell: &mut Shell, args: &FieldArgs, all: bool) -> Result<()> {
    for field in Field::ALL {
        if args.given(field) {
            continue;
        }
        let current = shell.form().inputs().get(field).to_string();
        if !all && !current.is_empty() {
            continue;
        }
        match field {
            Field::Password => prompt_password(shell, &current)?,
            _ => {
                let value = prompt_text(field, &current)?;
                shell.form_mut().set(field, value)?;
            }
        }
    }
    Ok(())
}

fn prompt_text(field: Field, initial: &str) -> Result<String> {
    let label = if field.required() {
        format!("{} *", capitalize(field.label()))
    } else {
        capitalize(field.label())
    };
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("read {} from prompt", field))
}

fn prompt_password(shell: &mut Shell, current: &str) -> Result<()> {
    if !current.is_empty() {
        let change = Confirm::new()
            .with_prompt("Change password?")
            .default(false)
            .interact()
            .context("read confirmation")?;
        if !change {
            return Ok(());
        }
    }
    let password = Zeroizing::new(
        Password::new()
            .with_prompt("Password * (leave empty to generate)")
            .allow_empty_password(true)
            .interact()
            .context("read password from prompt")?,
    );
    if password.is_empty() {
        shell.generate_password();
    } else {
        shell.form_mut().set(Field::Password, password.as_str())?;
    }
    Ok(())
}

fn read_password_stdin() -> Result<Zeroizing<String>> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read password from stdin")?;
    Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
