//! Terminal rendering of credential cards and counters.

use crate::core::cards::CredentialCard;
use crate::core::shell::Stats;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

pub fn cards_table(cards: &[CredentialCard<'_>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Platform").add_attribute(Attribute::Bold),
        Cell::new("Domain").add_attribute(Attribute::Bold),
        Cell::new("Username").add_attribute(Attribute::Bold),
        Cell::new("Password").add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
    ]);

    for (i, card) in cards.iter().enumerate() {
        let c = card.credential();
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{} {}", card.icon().glyph(), c.platform),
            c.domain.clone().unwrap_or_else(|| "-".to_string()),
            c.username.clone(),
            card.password_display().to_string(),
            c.id.clone(),
        ]);
    }
    table
}

/// A single card as a two-column detail table.
pub fn card_detail(card: &CredentialCard<'_>) -> Table {
    let c = card.credential();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new(card.icon().glyph()),
        Cell::new(&c.platform).add_attribute(Attribute::Bold),
    ]);
    if let Some(domain) = &c.domain {
        table.add_row(vec!["Domain", domain.as_str()]);
    }
    table.add_row(vec!["Username", c.username.as_str()]);
    table.add_row(vec!["Password", card.password_display()]);
    table
}

/// Headline and hint shown when no card is visible.
pub fn empty_state(searching: bool) -> (&'static str, &'static str) {
    if searching {
        ("No credentials found", "Try other search terms.")
    } else {
        ("No credentials yet", "Add your first credential with `credman add`.")
    }
}

pub fn stats_table(stats: &Stats, searching: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Unique platforms").add_attribute(Attribute::Bold),
        Cell::new("With domain").add_attribute(Attribute::Bold),
    ];
    let mut row = vec![
        stats.total.to_string(),
        stats.unique_platforms.to_string(),
        stats.with_domain.to_string(),
    ];
    if searching {
        header.push(Cell::new("Matching").add_attribute(Attribute::Bold));
        row.push(stats.matching.to_string());
    }
    table.set_header(header);
    table.add_row(row);
    table
}

pub fn print_cards(cards: &[CredentialCard<'_>], searching: bool) {
    if cards.is_empty() {
        let (headline, hint) = empty_state(searching);
        println!("{}", headline);
        println!("{}", hint);
        return;
    }
    println!("{}", cards_table(cards));
}
