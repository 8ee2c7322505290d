//! Human-readable console lines for room events.

use owo_colors::OwoColorize;

use firedeck_shared::{Card, RoomStatePublic};

/// Card face like "Q♥ (queen of hearts)", red suits tinted when `color` is on.
pub fn format_card(card: Card, color: bool) -> String {
    let text = format!(
        "{}{} ({} of {})",
        card.rank(),
        card.suit().glyph(),
        card.rank().name(),
        card.suit().name()
    );
    if color && card.is_red() {
        text.red().to_string()
    } else {
        text
    }
}

/// One line per draw, shown on the server console.
pub fn format_draw(name: &str, card: Card, penalty: Option<&str>, color: bool) -> String {
    let tag = if color {
        "[DRAW]".green().to_string()
    } else {
        "[DRAW]".to_owned()
    };
    let who = if color {
        name.bold().to_string()
    } else {
        name.to_owned()
    };
    let mut line = format!("{} {} drew {}", tag, who, format_card(card, color));
    if let Some(p) = penalty {
        let p = if color { p.red().to_string() } else { p.to_owned() };
        line.push(' ');
        line.push_str(&p);
    }
    line
}

/// Room banner printed when a game starts.
pub fn format_table_header(gs: &RoomStatePublic, color: bool) -> String {
    let code = if color {
        gs.code.bold().cyan().to_string()
    } else {
        gs.code.clone()
    };
    let names: Vec<&str> = gs.players.iter().map(|p| p.name.as_str()).collect();
    format!(
        "[ROOM {}] {} players ({}), {} cards in the draw pile",
        code,
        gs.players.len(),
        names.join(", "),
        gs.draw_count
    )
}
