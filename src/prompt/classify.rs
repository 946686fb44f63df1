//! Heuristic spell/item classification.
//!
//! Items take their category from an explicit known `type` when there is
//! one, otherwise from the first keyword rule that matches the name.
use regex::Regex;
use std::sync::OnceLock;

use crate::pack::RecordView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Spell,
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: Kind,
    /// Always `Some` for items, `None` for spells.
    pub category: Option<String>,
}

impl Classification {
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("item")
    }
}

const KNOWN_SUBTYPES: &[&str] = &[
    "weapon", "armor", "shield", "cloak", "robe", "boots", "helm", "helmet", "ring", "amulet",
    "staff", "wand",
];

/// Keyword rules in priority order. Each rule is a case-insensitive
/// substring test against the name; the first rule that matches wins.
const KEYWORD_RULES: &[(&str, &str)] = &[
    (r"sword|blade|dagger|knife|knives|axe|mace|hammer|spear|halberd|bow|weapon", "weapon"),
    (r"shield|buckler", "shield"),
    (r"armor|armour|breastplate|mail|plate", "armor"),
    (r"helm|hood", "helmet"),
    (r"cloak|cape|mantle", "cloak"),
    (r"robe|vestment|tunic", "robe"),
    (r"boots|shoes|greaves", "boots"),
    (r"gloves|gauntlets", "gloves"),
    (r"ring", "ring"),
    (r"amulet|pendant|necklace", "amulet"),
    (r"staff|staves", "staff"),
    (r"wand", "wand"),
    (r"tome|grimoire|book", "book"),
    (r"scroll", "scroll"),
    (r"potion|elixir|vial", "potion"),
];

fn keyword_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        KEYWORD_RULES
            .iter()
            .filter_map(|(pattern, category)| {
                Regex::new(&format!("(?i){}", pattern))
                    .ok()
                    .map(|re| (re, *category))
            })
            .collect()
    })
}

pub fn classify(record: &RecordView<'_>) -> Classification {
    let record_type = record.record_type().unwrap_or("");
    if record_type.eq_ignore_ascii_case("spell") {
        return Classification { kind: Kind::Spell, category: None };
    }
    Classification { kind: Kind::Item, category: Some(item_category(record_type, record.name())) }
}

fn item_category(record_type: &str, name: &str) -> String {
    let lowered = record_type.to_ascii_lowercase();
    if KNOWN_SUBTYPES.contains(&lowered.as_str()) {
        return lowered;
    }
    keyword_rules()
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| "item".to_string())
}
