use crate::consts::{ALPHABET, BLANK, POSITION_COUNT};
use crate::error::{KeysolveError, KsResult};
use serde_json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum KnownLayout {
    Qwerty,
    Dvorak,
    Colemak,
    ColemakDh,
    Workman,
    Canary,
}

impl KnownLayout {
    // Standard 30-key row-stagger strings, before alphabet normalization.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjkl;zxcvbnm,./",
            Self::Dvorak => "',.pyfgcrlaoeuidhtns;qjkxbmwvz",
            Self::Colemak => "qwfpgjluy;arstdhneiozxcvbkm,./",
            Self::ColemakDh => "qwfpbjluy;arstgmneiozxcdvkh,./",
            Self::Workman => "qdrwbjfup;ashtgyneoizxmcvkl,./",
            Self::Canary => "wlypbzfou'crstgmneiaqjvdkxh,./",
        }
    }

    /// The layout string with out-of-alphabet symbols blanked.
    pub fn layout_string(&self) -> String {
        normalize_layout_string(self.get_str())
    }
}

/// Replaces every symbol outside the solver alphabet with the blank.
pub fn normalize_layout_string(chars: &str) -> String {
    chars
        .chars()
        .map(|c| if ALPHABET.contains(c) { c } else { BLANK })
        .collect()
}

/// Checks a catalog string: exactly 30 cells, every cell in the alphabet
/// or blank, no letter placed twice.
pub fn validate_layout_string(chars: &str) -> KsResult<()> {
    let count = chars.chars().count();
    if count != POSITION_COUNT {
        return Err(KeysolveError::Validation(format!(
            "Layout string has {} characters, expected {}",
            count, POSITION_COUNT
        )));
    }

    let mut seen = std::collections::BTreeSet::new();
    for c in chars.chars() {
        if c == BLANK {
            continue;
        }
        if !ALPHABET.contains(c) {
            return Err(KeysolveError::Validation(format!(
                "Layout string contains '{}', which is not in the alphabet",
                c
            )));
        }
        if !seen.insert(c) {
            return Err(KeysolveError::Validation(format!(
                "Layout string places '{}' twice",
                c
            )));
        }
    }
    Ok(())
}

/// Named layout strings: the built-in classics plus anything loaded from
/// a JSON catalog file.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    entries: BTreeMap<String, String>,
}

impl LayoutCatalog {
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for layout in KnownLayout::iter() {
            entries.insert(layout.to_string(), layout.layout_string());
        }
        Self { entries }
    }

    /// Loads a `name -> 30-char string` JSON map, rejecting malformed
    /// entries. Loaded entries are added on top of the built-ins.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(&path)?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)?;

        let mut catalog = Self::builtin();
        for (name, chars) in raw {
            let chars = normalize_layout_string(&chars);
            validate_layout_string(&chars).map_err(|e| {
                KeysolveError::Validation(format!("Catalog entry '{}': {}", name, e))
            })?;
            catalog.entries.insert(name, chars);
        }

        info!(
            "Layout catalog ready: {} entries from {}",
            catalog.entries.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
