use crate::corpus::Corpus;
use crate::metrics::{Key, METRICS};
use crate::solver::Layout;
use serde::Serialize;

/// Accumulator for one metric over one corpus class.
///
/// `total` counts every n-gram the keymap could express; `count` the
/// subset matching the predicate. Contributing grams are kept in the
/// order they were counted, so equal-count entries rank stably.
#[derive(Debug, Default)]
pub struct Stat {
    pub count: u64,
    pub total: u64,
    grams: Vec<(String, u64)>,
}

impl Stat {
    pub fn add(&mut self, gram: &str, count: u64) {
        self.grams.push((gram.to_string(), count));
        self.count += count;
    }

    /// Matched share of the expressible corpus, as a percentage.
    pub fn freq(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64 * 100.0
        }
    }

    /// Contributing n-grams by descending share of the total.
    pub fn top(&self) -> Vec<(String, f64)> {
        let mut entries = self.grams.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .map(|(gram, count)| (gram, count as f64 / self.total as f64 * 100.0))
            .collect()
    }
}

/// One metric's evaluation, flattened for serialization.
#[derive(Debug, Serialize)]
pub struct StatSummary {
    pub name: &'static str,
    pub positive: bool,
    pub freq: f64,
    pub total: u64,
    pub top: Vec<(String, f64)>,
}

/// Every metric's Stat for one layout, in canonical card order.
#[derive(Debug, Default)]
pub struct StatsReport {
    stats: Vec<(&'static str, Stat)>,
}

impl StatsReport {
    pub fn get(&self, name: &str) -> Option<&Stat> {
        self.stats.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Stat)> {
        self.stats.iter().map(|(name, stat)| (*name, stat))
    }

    pub fn summaries(&self) -> Vec<StatSummary> {
        self.stats
            .iter()
            .zip(METRICS.iter())
            .map(|((name, stat), def)| StatSummary {
                name,
                positive: def.positive,
                freq: stat.freq(),
                total: stat.total,
                top: stat.top(),
            })
            .collect()
    }
}

/// Runs every metric in the canonical table against the layout's keymap.
///
/// N-grams touching a letter absent from the keymap are skipped entirely:
/// they count toward neither the numerator nor the denominator.
pub fn evaluate(layout: &Layout, corpus: &Corpus) -> StatsReport {
    let keymap = layout.keymap();
    let mut stats = Vec::with_capacity(METRICS.len());

    for def in &METRICS {
        let mut stat = Stat::default();
        let mut keys: Vec<Key> = Vec::with_capacity(3);

        'grams: for (gram, &count) in corpus.class(def.class) {
            keys.clear();
            for c in gram.chars() {
                match keymap.get(&c) {
                    Some(key) => keys.push(*key),
                    None => continue 'grams,
                }
            }

            if def.metric.matches(&keys) {
                stat.add(gram, count);
            }
            stat.total += count;
        }

        stats.push((def.name, stat));
    }

    StatsReport { stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freq_is_zero_when_nothing_counted() {
        let stat = Stat::default();
        assert_eq!(stat.freq(), 0.0);
    }

    #[test]
    fn top_breaks_ties_by_insertion_order() {
        let mut stat = Stat::default();
        stat.add("th", 5);
        stat.add("he", 9);
        stat.add("an", 5);
        stat.total = 20;

        let top = stat.top();
        let grams: Vec<&str> = top.iter().map(|(g, _)| g.as_str()).collect();
        assert_eq!(grams, ["he", "th", "an"]);
        assert_eq!(top[0].1, 45.0);
    }
}
