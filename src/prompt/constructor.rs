//! Icon prompt templates.
//!
//! Prompts stay short and ask for no rendered text, which icon models tend
//! to add otherwise.
use crate::pack::RecordView;
use crate::prompt::classify::{Classification, Kind};

const CONSTRAINTS: &str =
    "centered composition, no text, no letters, no numbers, no watermark, no logo";

/// Sent as the negative prompt to backends that support one.
pub const NEGATIVE_PROMPT: &str =
    "text, letters, numbers, watermark, logo, signature, border, frame, blurry";

pub fn icon_prompt(classification: &Classification, name: &str) -> String {
    match classification.kind {
        Kind::Spell => format!(
            "Fantasy RPG spell icon, {}, glowing magical effect, parchment background, {}",
            name, CONSTRAINTS
        ),
        Kind::Item => item_prompt(classification.category_label(), name),
    }
}

/// Proof variant: spells also carry school and rank.
pub fn proof_prompt(classification: &Classification, record: &RecordView<'_>) -> String {
    match classification.kind {
        Kind::Spell => format!(
            "Fantasy RPG spell icon, {}, {} school, rank {} spell, glowing magical effect, parchment background, {}",
            record.name(),
            record.school().unwrap_or("General"),
            record.rank().unwrap_or(0),
            CONSTRAINTS
        ),
        Kind::Item => item_prompt(classification.category_label(), record.name()),
    }
}

fn item_prompt(category: &str, name: &str) -> String {
    format!(
        "Fantasy RPG item icon, single {} on parchment background, {}, {}",
        category, name, CONSTRAINTS
    )
}
