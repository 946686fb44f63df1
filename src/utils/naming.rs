//! Deterministic icon file naming.
//!
//! An icon's file name is `<slug>-<hash>.png`: the slug keeps it readable
//! and the hash of the record's `_id` (or name) keeps same-named records
//! apart while staying stable across reruns.
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::prompt::Kind;

const HASH_LEN: usize = 8;

/// Where one record's icon lives on disk and how the record refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    pub disk_path: PathBuf,
    pub reference: String,
}

/// Lower-case, dash-separated ASCII slug. Never empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "icon".to_string()
    } else {
        slug
    }
}

pub fn short_hash(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..HASH_LEN].to_string()
}

pub fn icon_file_name(name: &str, id: Option<&str>) -> String {
    let key = id.filter(|id| !id.is_empty()).unwrap_or(name);
    format!("{}-{}.png", slugify(name), short_hash(key))
}

pub fn kind_dir(kind: Kind) -> &'static str {
    match kind {
        Kind::Spell => "spells",
        Kind::Item => "items",
    }
}

/// Target for the record-update script:
/// `<root>/icons/generated/<kind>/<file>` referenced as
/// `modules/<module_id>/icons/generated/<kind>/<file>`.
pub fn generated_icon(root: &Path, module_id: &str, kind: Kind, name: &str, id: Option<&str>) -> IconTarget {
    let file = icon_file_name(name, id);
    let dir = kind_dir(kind);
    IconTarget {
        disk_path: root.join("icons").join("generated").join(dir).join(&file),
        reference: format!("modules/{}/icons/generated/{}/{}", module_id, dir, file),
    }
}

/// Proof icons are written next to the generated set, never referenced by records.
pub fn proof_icon_path(root: &Path, kind: Kind, name: &str, id: Option<&str>) -> PathBuf {
    root.join("icons")
        .join("proof")
        .join(kind_dir(kind))
        .join(icon_file_name(name, id))
}
