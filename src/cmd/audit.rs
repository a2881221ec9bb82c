use crate::reports::{self, AuditResults, PercentileTable};
use clap::Args;
use keysolve::constraints::ConstraintSet;
use keysolve::corpus::Corpus;
use keysolve::error::KsResult;
use keysolve::layouts::LayoutCatalog;
use keysolve::solver::Layout;
use keysolve::stats;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Layout catalog JSON, audited on top of the built-ins.
    #[arg(long)]
    pub catalog: Option<String>,

    /// Write the results to this path as CSV.
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run(args: AuditArgs, corpus: &Corpus, percentiles: Option<&PercentileTable>) -> KsResult<()> {
    let catalog = match &args.catalog {
        Some(path) => LayoutCatalog::load_from_file(path)?,
        None => LayoutCatalog::builtin(),
    };

    // Seeding bypasses solving, so the rule set is irrelevant here.
    let constraints = Arc::new(ConstraintSet::default());

    let mut results: AuditResults = Vec::with_capacity(catalog.len());
    for (name, chars) in catalog.iter() {
        let layout = Layout::seeded(constraints.clone(), Some(name), chars)?;
        let report = stats::evaluate(&layout, corpus);
        let freqs = report.iter().map(|(metric, stat)| (metric, stat.freq())).collect();
        results.push((name.to_string(), freqs));
    }

    info!("Audited {} layouts", results.len());
    reports::print_audit_table(&results, percentiles);

    if let Some(path) = &args.csv {
        reports::write_audit_csv(path, &results)?;
        println!("CSV written to {}", path);
    }

    Ok(())
}
