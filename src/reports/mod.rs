use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keysolve::consts::{POSITION_COUNT, ROW_WIDTH};
use keysolve::error::{KeysolveError, KsResult};
use keysolve::metrics::METRICS;
use keysolve::solver::Layout;
use keysolve::stats::StatsReport;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-layout metric frequencies, in canonical metric order.
pub type AuditResults = Vec<(String, Vec<(&'static str, f64)>)>;

/// Percentile thresholds per metric: 100 ascending values, one per rank.
#[derive(Debug, Clone, Default)]
pub struct PercentileTable {
    thresholds: BTreeMap<String, Vec<f64>>,
}

impl PercentileTable {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(&path)?;
        let thresholds: BTreeMap<String, Vec<f64>> = serde_json::from_str(&content)?;

        for (name, values) in &thresholds {
            if values.len() != 100 {
                return Err(KeysolveError::Validation(format!(
                    "Percentile entry '{}' has {} thresholds, expected 100",
                    name,
                    values.len()
                )));
            }
        }
        Ok(Self { thresholds })
    }

    /// Rank of a frequency against the metric's thresholds: the first
    /// threshold the frequency does not exceed, presented from the good
    /// end of the scale (high ranks are desirable either way).
    pub fn rank(&self, metric: &str, freq: f64) -> Option<i64> {
        let thresholds = self.thresholds.get(metric)?;
        let positive = METRICS.iter().find(|d| d.name == metric)?.positive;
        let raw = thresholds
            .iter()
            .position(|&t| freq <= t)
            .map(|i| i as i64)
            .unwrap_or(-1);
        Some(if positive { raw + 1 } else { 100 - raw })
    }
}

pub fn print_layout_grid(name: &str, layout: &Layout) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut cells = [' '; POSITION_COUNT];
    for key in layout.keymap().values() {
        cells[key.pos.index as usize] = key.c;
    }

    for chunk in cells.chunks(ROW_WIDTH) {
        let row: Vec<Cell> = chunk
            .iter()
            .map(|c| Cell::new(c.to_string()).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_stat_cards(report: &StatsReport, percentiles: Option<&PercentileTable>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Freq %"),
        Cell::new("Pctl"),
        Cell::new("Top n-grams"),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for summary in report.summaries() {
        let rank = if summary.total > 0 {
            percentiles.and_then(|p| p.rank(summary.name, summary.freq))
        } else {
            None
        };

        let freq_text = format!("{:.3}", summary.freq);
        let freq_cell = match rank {
            Some(r) if r > 50 => Cell::new(freq_text).fg(Color::Cyan),
            Some(_) => Cell::new(freq_text).fg(Color::Yellow),
            None => Cell::new(freq_text),
        };

        let rank_cell = match rank {
            Some(r) => Cell::new(r.to_string()),
            None => Cell::new("-"),
        };

        let examples = summary
            .top
            .iter()
            .take(4)
            .map(|(gram, share)| format!("{} {:.3}", gram, share))
            .collect::<Vec<_>>()
            .join("  ");

        table.add_row(vec![
            Cell::new(summary.name).add_attribute(Attribute::Bold),
            freq_cell,
            rank_cell,
            Cell::new(examples),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_audit_table(results: &AuditResults, percentiles: Option<&PercentileTable>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Layout").add_attribute(Attribute::Bold)];
    for def in &METRICS {
        header.push(Cell::new(def.name));
    }
    table.add_row(header);

    for i in 1..=METRICS.len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, freqs) in results {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        for (metric, freq) in freqs {
            let text = format!("{:.3}", freq);
            let cell = match percentiles.and_then(|p| p.rank(metric, *freq)) {
                Some(r) if r > 50 => Cell::new(text).fg(Color::Cyan),
                Some(_) => Cell::new(text).fg(Color::Yellow),
                None => Cell::new(text),
            };
            row.push(cell);
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}

pub fn write_audit_csv<P: AsRef<Path>>(path: P, results: &AuditResults) -> KsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["layout".to_string()];
    header.extend(METRICS.iter().map(|d| d.name.to_string()));
    writer.write_record(&header)?;

    for (name, freqs) in results {
        let mut record = vec![name.clone()];
        record.extend(freqs.iter().map(|(_, freq)| format!("{:.6}", freq)));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
