use keysolve::constraints::{AllowedPairs, ConstraintSet, MonogramRule};
use keysolve::corpus::Corpus;
use keysolve::layouts::LayoutCatalog;
use keysolve::solver::{Generator, GeneratorOptions, Layout};
use keysolve::stats;
use std::sync::Arc;

fn options(trials: usize, seed: u64) -> GeneratorOptions {
    GeneratorOptions {
        trials,
        num_threads: 2,
        seed: Some(seed),
    }
}

fn qwerty_layout() -> Layout {
    let catalog = LayoutCatalog::builtin();
    let chars = catalog.get("qwerty").unwrap().to_string();
    Layout::seeded(Arc::new(ConstraintSet::default()), Some("qwerty"), &chars).unwrap()
}

#[test]
fn generated_layouts_honor_monogram_rules() {
    let rules = vec![
        MonogramRule::new("Homerow", "srnthaei", &[10, 11, 12, 13, 16, 17, 18, 19]),
        MonogramRule::new("Vowels", "aeiou", &[7, 8, 17, 18, 19]),
    ];
    let constraints = Arc::new(ConstraintSet::new(rules, AllowedPairs::default()));
    let result = Generator::new(constraints.clone(), options(8, 3)).run();

    for key in result.layout.keymap().values() {
        assert!(
            constraints.allows_position(key),
            "'{}' landed on forbidden position {}",
            key.c,
            key.pos.index
        );
    }
}

#[test]
fn committed_keys_satisfy_pair_rules_mutually() {
    let pairs = AllowedPairs::from_pairs(&[('t', 'h'), ('e', 'r'), ('a', 'n')]);
    let constraints = Arc::new(ConstraintSet::new(vec![], pairs));
    let result = Generator::new(constraints.clone(), options(8, 11)).run();

    let keys: Vec<_> = result.layout.keymap().into_values().collect();
    for a in &keys {
        for b in &keys {
            if a.c != b.c {
                assert!(
                    constraints.allows_adjacent(a, b),
                    "'{}' at {} conflicts with '{}' at {}",
                    a.c,
                    a.pos.index,
                    b.c,
                    b.pos.index
                );
            }
        }
    }
}

#[test]
fn impossible_rules_leave_letters_unresolved() {
    // Five letters fighting over a single cell.
    let rules = vec![MonogramRule::new("Crowded", "qlcmk", &[0])];
    let constraints = Arc::new(ConstraintSet::new(rules, AllowedPairs::default()));
    let result = Generator::new(constraints, options(4, 5)).run();

    assert!(result.unresolved >= 4);
    assert_eq!(result.trials_run, 4);
}

#[test]
fn generated_layouts_carry_the_tool_author() {
    let result = Generator::new(Arc::new(ConstraintSet::default()), options(1, 9)).run();
    assert_eq!(result.layout.display_name(), "Untitled");
    assert_eq!(result.layout.display_author(), "Keysolve");
    assert_eq!(result.unresolved, 0);
}

#[test]
fn evaluate_counts_same_finger_bigrams() {
    // On qwerty, 'e' and 'd' share the left middle finger; 'e' and 'r' do not.
    let mut corpus = Corpus::default();
    corpus.bigrams.insert("ed".into(), 1);
    corpus.bigrams.insert("er".into(), 3);

    let report = stats::evaluate(&qwerty_layout(), &corpus);
    let sfb = report.get("sfb").unwrap();
    assert_eq!(sfb.count, 1);
    assert_eq!(sfb.total, 4);
    assert_eq!(sfb.freq(), 25.0);
    assert_eq!(sfb.top()[0], ("ed".to_string(), 25.0));
}

#[test]
fn evaluate_skips_grams_with_unmapped_letters() {
    // The builtin qwerty string blanks ';', so it never reaches the keymap.
    let mut corpus = Corpus::default();
    corpus.bigrams.insert("ed".into(), 2);
    corpus.bigrams.insert("e;".into(), 7);

    let report = stats::evaluate(&qwerty_layout(), &corpus);
    let sfb = report.get("sfb").unwrap();
    assert_eq!(sfb.count, 2);
    assert_eq!(sfb.total, 2);
    assert_eq!(sfb.freq(), 100.0);
}

#[test]
fn evaluate_classifies_trigrams() {
    let mut corpus = Corpus::default();
    corpus.trigrams.insert("aja".into(), 1);
    corpus.trigrams.insert("asd".into(), 1);

    let report = stats::evaluate(&qwerty_layout(), &corpus);
    assert_eq!(report.get("alternate").unwrap().count, 1);
    assert_eq!(report.get("onehand").unwrap().count, 1);
    assert_eq!(report.get("redirect").unwrap().count, 0);
    assert_eq!(report.get("roll").unwrap().count, 0);
}

#[test]
fn skipgram_metrics_use_outer_keys() {
    // 'w' sits directly above 's' on qwerty.
    let mut corpus = Corpus::default();
    corpus.skipgrams.insert("ws".into(), 4);

    let report = stats::evaluate(&qwerty_layout(), &corpus);
    assert_eq!(report.get("sfs").unwrap().count, 4);
    assert_eq!(report.get("hss").unwrap().count, 0);
}

#[test]
fn summaries_follow_the_metric_table_order() {
    let report = stats::evaluate(&qwerty_layout(), &Corpus::default());
    let summaries = report.summaries();
    assert_eq!(summaries.len(), 14);
    assert_eq!(summaries[0].name, "sfb");
    assert_eq!(summaries[13].name, "outroll");
    assert!(summaries.iter().all(|s| s.total == 0 && s.freq == 0.0));
}
