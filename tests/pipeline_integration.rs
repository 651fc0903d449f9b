//! End-to-end pipeline tests: dataset file -> harness -> report outputs.

use advex::{load_records, report, tokenize_join, Harness, ModelId, Record, RunConfig};
use std::io::Write;

/// The two-record scenario: zero replacement probability and a fixed seed
/// must reproduce each clean text modulo tokenization, for both records.
#[test]
fn zero_probability_run_preserves_texts() {
    let records = vec![
        Record::new("1").with_field("clean_text", "The cat sat on the mat"),
        Record::new("2").with_field("clean_text", "A quick brown fox jumps"),
    ];
    let config = RunConfig::default()
        .with_sample_count(2)
        .with_replacement_probability(0.0)
        .with_seed(1234);
    let results = Harness::new(config).run(&records).unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(
            result.adversarial_text,
            tokenize_join(&result.original_text),
            "p=0.0 must only apply tokenize/join normalization"
        );
        // No punctuation in these texts, so the normalization is identity.
        assert_eq!(result.adversarial_text, result.original_text);
        assert!(result
            .original_response
            .starts_with("As a language model, I understand your text about"));
        assert!((0.0..=1.0).contains(&result.metrics.rouge_like));
        assert!((0.25..=0.75).contains(&result.metrics.mauve_like));
    }
    let mut ids: Vec<&str> = results.iter().map(|r| r.sample_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["1", "2"]);
}

#[test]
fn punctuated_text_is_normalized_by_the_join() {
    let records = vec![Record::new("1").with_field("clean_text", "Wait, really?!")];
    let config = RunConfig::default()
        .with_sample_count(1)
        .with_replacement_probability(0.0)
        .with_seed(0);
    let results = Harness::new(config).run(&records).unwrap();
    assert_eq!(results[0].adversarial_text, "Wait , really ? !");
}

#[test]
fn file_to_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.csv");
    {
        let mut f = std::fs::File::create(&data_path).unwrap();
        writeln!(f, "id,clean_text,sentiment").unwrap();
        writeln!(f, "3,The quick cat sat on the mat,pos").unwrap();
        writeln!(f, "4,\"A big, happy dog jumps\",neg").unwrap();
        writeln!(f, "16,The slow fox walks home,neu").unwrap();
    }

    let records = load_records(&data_path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].get("sentiment"), Some("neg"));

    let config = RunConfig::default()
        .with_sample_count(3)
        .with_replacement_probability(0.3)
        .with_seed(42);
    let results = Harness::new(config).run(&records).unwrap();
    assert_eq!(results.len(), 3);

    // CSV export carries the documented header and one row per sample.
    // None of these texts embed newlines, so a line count is reliable even
    // with quoted commas.
    let out_path = dir.path().join("results.csv");
    report::write_csv(&results, &out_path).unwrap();
    let exported = std::fs::read_to_string(&out_path).unwrap();
    assert!(exported.starts_with(report::CSV_HEADER));
    assert_eq!(exported.lines().count(), 4);

    // Charts render and land on disk.
    report::write_bar_chart(&results, dir.path().join("bar.svg")).unwrap();
    report::write_radar_chart(&results, dir.path().join("radar.svg")).unwrap();
    let bar = std::fs::read_to_string(dir.path().join("bar.svg")).unwrap();
    assert!(bar.starts_with("<svg"));

    // JSON export carries the metric fields.
    let json = report::to_json(&results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert!(value[0]["metrics"]["rouge_like"].is_number());
}

#[test]
fn identical_seed_identical_full_run() {
    let records: Vec<Record> = (0..20)
        .map(|i| {
            Record::new(format!("r{}", i))
                .with_field("clean_text", format!("The big cat number {} runs fast", i))
        })
        .collect();
    let config = RunConfig::default()
        .with_sample_count(5)
        .with_replacement_probability(0.7)
        .with_seed(777);
    let a = Harness::new(config.clone()).run(&records).unwrap();
    let b = Harness::new(config).run(&records).unwrap();
    let csv_a = report::to_csv(&a);
    let csv_b = report::to_csv(&b);
    assert_eq!(csv_a, csv_b, "seeded runs must be byte-identical");
}

#[test]
fn unrecognized_model_yields_sentinel_responses() {
    let records = vec![Record::new("1").with_field("clean_text", "some text")];
    let config = RunConfig::default()
        .with_sample_count(1)
        .with_model_id(ModelId::Unrecognized)
        .with_seed(8);
    let results = Harness::new(config).run(&records).unwrap();
    assert!(results[0].original_response.starts_with("Unknown model"));
    assert!(results[0].adversarial_response.starts_with("Unknown model"));
}
