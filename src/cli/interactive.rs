//! Interactive session over the application shell.
//!
//! Esc on any menu backs out: from the main menu it quits, from a card it
//! returns to the list, from the form it cancels without saving.

use crate::cli::prompt::{self, FieldArgs};
use crate::cli::{report, view, CliContext};
use crate::core::cards::{self, CredentialCard};
use crate::core::shell::{CopyTarget, Shell};
use crate::util::clipboard::{self, Clipboard};
use anyhow::{bail, Context, Result};
use dialoguer::{Input, Select};

const MAIN_MENU: &[&str] = &[
    "Search",
    "Clear search",
    "New credential",
    "Open credential",
    "Refresh",
    "Quit",
];

const CARD_MENU: &[&str] = &[
    "Show/hide password",
    "Copy username",
    "Copy password",
    "Edit",
    "Back",
];

pub async fn run(ctx: &CliContext) -> Result<()> {
    if !ctx.interactive() {
        bail!("the shell needs an interactive terminal");
    }
    let clip = clipboard::system();
    let mut shell = Shell::new(ctx.store()?);
    println!("Loading credentials...");
    shell.load().await;

    loop {
        report(shell.drain_notices());
        render(&shell);

        let choice = Select::new()
            .with_prompt("Action")
            .items(MAIN_MENU)
            .default(0)
            .interact_opt()
            .context("read menu choice")?;

        match choice {
            Some(0) => {
                let term: String = Input::new()
                    .with_prompt("Search (platform, domain, or username)")
                    .with_initial_text(shell.search())
                    .allow_empty(true)
                    .interact_text()
                    .context("read search term")?;
                shell.set_search(term.trim());
            }
            Some(1) => shell.set_search(""),
            Some(2) => {
                shell.open_create();
                form_session(&mut shell).await?;
            }
            Some(3) => {
                if let Some(id) = pick_card(&shell)? {
                    card_session(&mut shell, &*clip, &id).await?;
                }
            }
            Some(4) => shell.load().await,
            _ => return Ok(()),
        }
    }
}

fn render(shell: &Shell) {
    let searching = !shell.search().is_empty();
    if searching {
        println!("Search: {}", shell.search());
    }
    let visible = shell.visible();
    view::print_cards(&cards::render(&visible), searching);
    println!("{}", view::stats_table(&shell.stats(), searching));
}

/// Choose one of the visible credentials; returns its id.
fn pick_card(shell: &Shell) -> Result<Option<String>> {
    let visible = shell.visible();
    if visible.is_empty() {
        println!("Nothing to open.");
        return Ok(None);
    }
    let labels: Vec<String> = visible
        .iter()
        .map(|c| {
            let card = CredentialCard::new(c);
            format!("{} {} ({})", card.icon().glyph(), c.platform, c.username)
        })
        .collect();
    let choice = Select::new()
        .with_prompt("Credential")
        .items(&labels[..])
        .default(0)
        .interact_opt()
        .context("read credential choice")?;
    Ok(choice.map(|i| visible[i].id.clone()))
}

/// Actions on a single card. Visibility lives only as long as this session.
async fn card_session(shell: &mut Shell, clip: &dyn Clipboard, id: &str) -> Result<()> {
    let mut revealed = false;
    loop {
        let Some(credential) = shell.find(id) else {
            return Ok(());
        };
        let mut card = CredentialCard::new(credential);
        if revealed {
            card.toggle_password();
        }
        println!("{}", view::card_detail(&card));

        let choice = Select::new()
            .with_prompt("Card")
            .items(CARD_MENU)
            .default(0)
            .interact_opt()
            .context("read card action")?;

        match choice {
            Some(0) => revealed = !revealed,
            Some(1) => {
                shell.copy(clip, id, CopyTarget::Username);
            }
            Some(2) => {
                shell.copy(clip, id, CopyTarget::Password);
            }
            Some(3) => {
                if shell.open_edit(id) {
                    form_session(shell).await?;
                }
                return Ok(());
            }
            _ => return Ok(()),
        }
        report(shell.drain_notices());
    }
}

/// Drive the open form until it is saved or cancelled.
async fn form_session(shell: &mut Shell) -> Result<()> {
    let editing = shell.form().editing_id().is_some();
    println!("{}", shell.form().title());
    prompt::prompt_fields(shell, &FieldArgs::default(), editing)?;

    loop {
        report(shell.drain_notices());
        let items = [
            shell.form().submit_label(),
            "Generate password",
            "Change fields",
            "Cancel",
        ];
        let choice = Select::new()
            .with_prompt(shell.form().title())
            .items(&items)
            .default(0)
            .interact_opt()
            .context("read form action")?;

        match choice {
            Some(0) => {
                // A rejected save keeps the form open with the user's input.
                if shell.save().await.is_ok() {
                    return Ok(());
                }
            }
            Some(1) => shell.generate_password(),
            Some(2) => prompt::prompt_fields(shell, &FieldArgs::default(), true)?,
            _ => {
                shell.cancel_form();
                return Ok(());
            }
        }
    }
}
