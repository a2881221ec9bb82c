use crate::consts::ALPHABET;
use crate::error::{KeysolveError, KsResult};
use crate::metrics::{fscissor, Key};
use std::collections::{BTreeMap, BTreeSet};

/// A monogram placement rule: the named letters may only sit on the listed
/// positions. Letters the rule does not name are unaffected.
#[derive(Debug, Clone, Default)]
pub struct MonogramRule {
    pub header: String,
    letters: BTreeSet<char>,
    positions: BTreeSet<u8>,
}

impl MonogramRule {
    pub fn new(header: impl Into<String>, letters: &str, positions: &[u8]) -> Self {
        Self {
            header: header.into(),
            letters: letters.chars().collect(),
            positions: positions.iter().copied().collect(),
        }
    }

    pub fn allows(&self, key: &Key) -> bool {
        !self.letters.contains(&key.c) || self.positions.contains(&key.pos.index)
    }
}

/// Symmetric table of letter pairs exempt from the bigram rules.
///
/// A letter with no listed partner is unrestricted: it pairs with every
/// other letter.
#[derive(Debug, Clone)]
pub struct AllowedPairs {
    table: BTreeMap<char, BTreeSet<char>>,
}

impl Default for AllowedPairs {
    fn default() -> Self {
        Self::from_pairs(&[])
    }
}

impl AllowedPairs {
    pub fn from_pairs(pairs: &[(char, char)]) -> Self {
        let mut table: BTreeMap<char, BTreeSet<char>> =
            ALPHABET.chars().map(|c| (c, BTreeSet::new())).collect();

        for &(a, b) in pairs {
            if let Some(set) = table.get_mut(&a) {
                set.insert(b);
            }
            if let Some(set) = table.get_mut(&b) {
                set.insert(a);
            }
        }

        for (c, set) in table.iter_mut() {
            if set.is_empty() {
                *set = ALPHABET.chars().filter(|x| x != c).collect();
            }
        }

        Self { table }
    }

    /// Parses the pair-list file format: a JSON array of two-letter strings.
    pub fn from_strings(entries: &[String]) -> KsResult<Self> {
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut chars = entry.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => pairs.push((a, b)),
                _ => {
                    return Err(KeysolveError::Validation(format!(
                        "Pair entry '{}' is not exactly two letters",
                        entry
                    )))
                }
            }
        }
        Ok(Self::from_pairs(&pairs))
    }

    pub fn allows(&self, a: char, b: char) -> bool {
        self.table.get(&a).is_some_and(|set| set.contains(&b))
    }
}

/// The full rule set a solve runs under. Built once, shared read-only by
/// every trial.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    pub monograms: Vec<MonogramRule>,
    pub pairs: AllowedPairs,
}

impl ConstraintSet {
    pub fn new(monograms: Vec<MonogramRule>, pairs: AllowedPairs) -> Self {
        Self { monograms, pairs }
    }

    /// Monogram admissibility of a letter on a position.
    pub fn allows_position(&self, key: &Key) -> bool {
        self.monograms.iter().all(|rule| rule.allows(key))
    }

    /// Bigram admissibility of candidate `a` sitting next to committed `b`.
    ///
    /// An allowed pair passes unconditionally; otherwise the two keys must
    /// be on different fingers and must not form a full scissor.
    pub fn allows_adjacent(&self, a: &Key, b: &Key) -> bool {
        if self.pairs.allows(a.c, b.c) {
            return true;
        }
        a.pos.finger != b.pos.finger && !fscissor(a, b)
    }
}
