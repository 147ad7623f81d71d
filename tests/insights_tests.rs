use review_insights::{
    aggregate, build_insights, render_summary, AnalysisRecord, Aspect, SentimentLabel,
};

fn record(id: u32, sentiment: SentimentLabel, aspects: &[(&str, &str)]) -> AnalysisRecord {
    AnalysisRecord {
        review_id: id,
        review_text: format!("review {}", id),
        sentiment,
        confidence: 0.9,
        aspects: aspects
            .iter()
            .map(|(name, polarity)| Aspect::new(*name, *polarity))
            .collect(),
    }
}

fn sample_records() -> Vec<AnalysisRecord> {
    vec![
        record(1, SentimentLabel::Positive, &[("display", "positive")]),
        record(2, SentimentLabel::Positive, &[("display", "positive")]),
        record(3, SentimentLabel::Negative, &[("price", "negative")]),
    ]
}

#[test]
fn summary_reports_distribution_and_top_aspects() {
    let report = aggregate(&sample_records());

    let summary = render_summary(&report);

    assert!(summary.contains("Total Reviews Analyzed: 3"));
    assert!(summary.contains("Positive: 2 (66.7%)"));
    assert!(summary.contains("Negative: 1 (33.3%)"));
    assert!(summary.contains("Neutral: 0 (0.0%)"));
    assert!(summary.contains("Total Aspects Extracted: 3"));
    assert!(summary.contains("Unique Aspects: 2"));
    assert!(summary.contains("display: 2 times"));
    assert!(summary.contains("price: 1 times"));
}

#[test]
fn insights_document_ranks_strengths_and_weaknesses() {
    let report = aggregate(&sample_records());

    let document = build_insights(&report, "Vision Pro");

    assert!(document.contains("VISION PRO - INSIGHTS AND RECOMMENDATIONS"));
    assert!(document.contains("Total Reviews: 3"));
    assert!(document.contains("Positive: 2 (66.7%)"));
    assert!(document.contains("1. DISPLAY: Mentioned positively 2 times"));
    assert!(document.contains("1. PRICE: Mentioned negatively 1 times"));
    assert!(document.contains("PRIORITY: Address price issues - mentioned 1 times"));
    assert!(document.contains("Leverage display as a key marketing point"));
    assert!(document.contains("Focus R&D efforts on improving price"));
}

#[test]
fn sections_appear_in_fixed_order() {
    let report = aggregate(&sample_records());

    let document = build_insights(&report, "Vision Pro");

    let summary_at = document.find("OVERALL SENTIMENT SUMMARY").unwrap();
    let strengths_at = document.find("STRENGTHS").unwrap();
    let weaknesses_at = document.find("AREAS FOR IMPROVEMENT").unwrap();
    let actions_at = document.find("ACTIONABLE RECOMMENDATIONS").unwrap();
    let strategy_at = document.find("STRATEGIC INSIGHTS").unwrap();

    assert!(summary_at < strengths_at);
    assert!(strengths_at < weaknesses_at);
    assert!(weaknesses_at < actions_at);
    assert!(actions_at < strategy_at);
}

#[test]
fn sections_with_no_aspects_say_so_instead_of_disappearing() {
    let records = vec![
        record(1, SentimentLabel::Neutral, &[]),
        record(2, SentimentLabel::Neutral, &[]),
    ];
    let report = aggregate(&records);

    let document = build_insights(&report, "Vision Pro");

    assert!(document.contains("No positive aspects identified"));
    assert!(document.contains("No negative aspects identified"));
    assert!(document.contains("Continue maintaining current product quality"));
    // Strategic callouts only exist when a top strength/weakness exists.
    assert!(!document.contains("Leverage"));
    assert!(!document.contains("Focus R&D"));
}

#[test]
fn rule_lines_span_sixty_columns() {
    let report = aggregate(&sample_records());

    let document = build_insights(&report, "Vision Pro");

    assert!(document.contains(&"=".repeat(60)));
    assert!(document.contains(&"-".repeat(60)));
}
