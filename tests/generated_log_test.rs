use endpoint_seq::config::{AggregatorConfig, Delimiter, KeyOrder, RawConfig};
use endpoint_seq::generate::{ENDPOINTS, GeneratorConfig, LogLineGenerator};
use endpoint_seq::model::SequenceAggregator;
use endpoint_seq::render::{build_report_view, render_text_report};
use pretty_assertions::assert_eq;

fn generated(count: u64, seed: u64, malformed_rate: f64, delimiter: &str) -> Vec<Vec<u8>> {
    LogLineGenerator::new(GeneratorConfig {
        count: Some(count),
        seed: Some(seed),
        malformed_rate,
        delimiter: delimiter.to_string(),
        ..GeneratorConfig::default()
    })
    .unwrap()
    .collect()
}

#[test]
fn test_generated_log_invariants() {
    let lines = generated(2000, 3, 0.05, " : ");
    let config = AggregatorConfig::new(3).unwrap();
    let result = SequenceAggregator::new(config).ingest(&lines);

    assert_eq!(result.lines_seen(), 2000);
    assert!(result.skipped > 0);
    for window in result.user_windows.values() {
        assert!(window.len() <= 3);
    }

    let (winner, count) = result.winner().unwrap();
    assert_eq!(winner.endpoints().len(), 3);
    assert!(winner.endpoints().iter().all(|e| ENDPOINTS.contains(&e.as_str())));
    assert!(result.frequency_table.values().all(|c| *c <= count));

    // Every full window after a record counts once; each user's first
    // seqlen - 1 records never do.
    let counted: u64 = result.frequency_table.values().sum();
    let unfilled: u64 = result
        .user_windows
        .values()
        .map(|w| w.len().min(2) as u64)
        .sum();
    assert_eq!(counted, result.records - unfilled);
}

#[test]
fn test_same_input_same_result() {
    let lines = generated(500, 99, 0.1, " : ");
    let run = || SequenceAggregator::new(AggregatorConfig::new(4).unwrap()).ingest(&lines);
    assert_eq!(run(), run());
}

#[test]
fn test_config_file_shape_drives_regex_delimiter() {
    let raw: RawConfig =
        serde_json::from_str(r#"{ "seqlen": 2, "delimiter": "\\s*\\|\\s*", "delimiter_regex": true }"#)
            .unwrap();
    let config = raw.validate_and_build().unwrap();
    assert_eq!(config.delimiter, Delimiter::pattern(r"\s*\|\s*").unwrap());

    let lines = generated(300, 5, 0.0, " | ");
    let result = SequenceAggregator::new(config).ingest(&lines);
    assert_eq!(result.skipped, 0);
    assert!(result.winner().is_some());
}

#[test]
fn test_orders_agree_up_to_reversal() {
    let lines = generated(1000, 21, 0.0, " : ");
    let chrono = SequenceAggregator::new(AggregatorConfig::new(3).unwrap()).ingest(&lines);
    let recent = SequenceAggregator::new(
        AggregatorConfig::new(3)
            .unwrap()
            .with_order(KeyOrder::MostRecentFirst),
    )
    .ingest(&lines);

    let mut reversed: Vec<(Vec<String>, u64)> = recent
        .frequency_table
        .iter()
        .map(|(k, c)| (k.endpoints().iter().rev().cloned().collect(), *c))
        .collect();
    reversed.sort();
    let forward: Vec<(Vec<String>, u64)> = chrono
        .frequency_table
        .iter()
        .map(|(k, c)| (k.endpoints().to_vec(), *c))
        .collect();
    assert_eq!(forward, reversed);
    assert_eq!(chrono.max_count(), recent.max_count());
}

#[test]
fn test_text_report_for_too_little_data() {
    let lines = generated(1, 1, 0.0, " : ");
    let config = AggregatorConfig::default();
    let result = SequenceAggregator::new(config.clone()).ingest(&lines);
    let text = render_text_report(&build_report_view(&result, &config, 3));
    assert_eq!(
        text,
        "Processed 1 line (1 record, 0 skipped) from 1 user; 0 distinct sequences of 3.\n\
         \n\
         Insufficient data: no user visited 3 endpoints.\n"
    );
}
