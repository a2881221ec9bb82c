use crate::reports::{self, PercentileTable};
use clap::Args;
use keysolve::config::{self, SolverParams};
use keysolve::constraints::{AllowedPairs, ConstraintSet};
use keysolve::corpus::Corpus;
use keysolve::error::KsResult;
use keysolve::solver::Generator;
use keysolve::stats;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub params: SolverParams,

    /// Monogram rule file (JSON). The built-in preset when omitted.
    #[arg(long)]
    pub rules: Option<String>,
}

pub fn run(
    args: GenerateArgs,
    pairs: AllowedPairs,
    corpus: Option<&Corpus>,
    percentiles: Option<&PercentileTable>,
) -> KsResult<()> {
    let rules = match &args.rules {
        Some(path) => config::load_rules(path)?,
        None => config::default_rules(),
    };

    let constraints = Arc::new(ConstraintSet::new(rules, pairs));
    let generator = Generator::new(constraints, args.params.generator_options());
    let result = generator.run();

    reports::print_layout_grid(&result.layout.display_name(), &result.layout);
    println!(
        "Unresolved: {} (trial {} of {})",
        result.unresolved, result.trial, result.trials_run
    );

    if let Some(corpus) = corpus {
        let report = stats::evaluate(&result.layout, corpus);
        reports::print_stat_cards(&report, percentiles);
    }

    Ok(())
}
