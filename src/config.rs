use crate::consts::{DEFAULT_TRIALS, POSITION_COUNT};
use crate::constraints::{AllowedPairs, MonogramRule};
use crate::error::{KeysolveError, KsResult};
use crate::solver::GeneratorOptions;
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolverParams {
    /// Number of independent generation trials.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Fixed rng seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads for the trial fan-out (0 = all cores).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

impl SolverParams {
    pub fn generator_options(&self) -> GeneratorOptions {
        let defaults = GeneratorOptions::default();
        GeneratorOptions {
            trials: self.trials,
            num_threads: if self.threads == 0 {
                defaults.num_threads
            } else {
                self.threads
            },
            seed: self.seed,
        }
    }
}

/// One monogram rule as stored in a constraint file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstraintRule {
    pub header: String,
    pub letters: String,
    pub positions: Vec<u8>,
}

/// The built-in preset used when no constraint file is supplied.
pub fn default_rules() -> Vec<MonogramRule> {
    vec![
        MonogramRule::new("Homerow", "srnthaei", &[10, 11, 12, 13, 16, 17, 18, 19]),
        MonogramRule::new("Vowels", "aeiou", &[7, 8, 17, 18, 19]),
    ]
}

pub fn load_rules<P: AsRef<Path>>(path: P) -> KsResult<Vec<MonogramRule>> {
    let content = fs::read_to_string(&path)?;
    let raw: Vec<ConstraintRule> = serde_json::from_str(&content)?;

    let mut rules = Vec::with_capacity(raw.len());
    for rule in &raw {
        if let Some(&bad) = rule.positions.iter().find(|&&p| p as usize >= POSITION_COUNT) {
            return Err(KeysolveError::Config(format!(
                "Rule '{}' names position {}, outside the grid",
                rule.header, bad
            )));
        }
        rules.push(MonogramRule::new(
            rule.header.clone(),
            &rule.letters,
            &rule.positions,
        ));
    }

    info!(
        "Loaded {} monogram rules from {}",
        rules.len(),
        path.as_ref().display()
    );
    Ok(rules)
}

pub fn load_pairs<P: AsRef<Path>>(path: P) -> KsResult<AllowedPairs> {
    let content = fs::read_to_string(&path)?;
    let entries: Vec<String> = serde_json::from_str(&content)?;
    info!(
        "Loaded {} allowed pairs from {}",
        entries.len(),
        path.as_ref().display()
    );
    AllowedPairs::from_strings(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Key;
    use crate::geometry::Pos;

    #[test]
    fn preset_pins_homerow_and_vowels() {
        let rules = default_rules();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].allows(&Key::new('s', Pos::new(11))));
        assert!(!rules[0].allows(&Key::new('s', Pos::new(0))));
        assert!(!rules[1].allows(&Key::new('o', Pos::new(10))));
        assert!(rules[1].allows(&Key::new('o', Pos::new(18))));
    }
}
