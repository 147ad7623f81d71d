use review_insights::{export_records, write_records_json, write_text, AnalysisRecord, Aspect, SentimentLabel};
use serde_json::Value;

fn sample_records() -> Vec<AnalysisRecord> {
    vec![
        AnalysisRecord {
            review_id: 1,
            review_text: "The display is stunning".to_string(),
            sentiment: SentimentLabel::Positive,
            confidence: 0.95,
            aspects: vec![Aspect::new("display", "positive")],
        },
        AnalysisRecord {
            review_id: 2,
            review_text: "Way too expensive".to_string(),
            sentiment: SentimentLabel::Negative,
            confidence: 0.9,
            aspects: vec![],
        },
    ]
}

#[test]
fn records_export_as_json_array_with_contract_fields() {
    let mut buffer = Vec::new();
    write_records_json(&sample_records(), &mut buffer).unwrap();

    let value: Value = serde_json::from_slice(&buffer).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);

    let first = array[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["aspects", "confidence", "review_id", "review_text", "sentiment"]
    );

    assert_eq!(first["review_id"], 1);
    assert_eq!(first["sentiment"], "POSITIVE");
    let aspect = first["aspects"][0].as_object().unwrap();
    assert_eq!(aspect["aspect"], "display");
    assert_eq!(aspect["sentiment"], "positive");

    assert_eq!(array[1]["sentiment"], "NEGATIVE");
    assert_eq!(array[1]["aspects"].as_array().unwrap().len(), 0);
}

#[test]
fn exported_records_round_trip() {
    let mut buffer = Vec::new();
    write_records_json(&sample_records(), &mut buffer).unwrap();

    let restored: Vec<AnalysisRecord> = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(restored, sample_records());
}

#[test]
fn text_sink_writes_document_verbatim() {
    let mut buffer = Vec::new();
    write_text("INSIGHTS\n========\n", &mut buffer).unwrap();

    assert_eq!(buffer, b"INSIGHTS\n========\n");
}

#[test]
fn file_export_writes_readable_json() {
    let path = std::env::temp_dir().join("review_insights_export_test.json");

    export_records(&sample_records(), &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn export_failure_surfaces_the_cause() {
    let path = std::env::temp_dir().join("no-such-dir-review-insights/export.json");

    let err = export_records(&sample_records(), &path).unwrap_err();

    assert!(err.to_string().contains("export failed"));
}
