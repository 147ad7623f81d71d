//! Summary and recommendations rendering
//!
//! Deterministic text construction over an [`AggregateReport`]. Both
//! documents are plain text with a fixed section order so they diff cleanly
//! between runs.

use crate::aggregate::{AggregateReport, TOP_PRIORITY, TOP_SUMMARY};
use crate::review::SentimentLabel;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Render the summary statistics block: totals, sentiment distribution, and
/// the most-mentioned aspects.
pub fn render_summary(report: &AggregateReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total Reviews Analyzed: {}", report.total_reviews);
    let _ = writeln!(out);
    let _ = writeln!(out, "Sentiment Distribution:");
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        let _ = writeln!(
            out,
            "  {}: {} ({:.1}%)",
            label_title(label),
            report.count(label),
            report.percentage(label)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total Aspects Extracted: {}",
        report.total_aspect_mentions()
    );
    let _ = writeln!(out, "Unique Aspects: {}", report.unique_aspects());
    let _ = writeln!(out);
    let _ = writeln!(out, "Top {} Most Mentioned Aspects:", TOP_SUMMARY);
    for (aspect, count) in report.top_aspects(TOP_SUMMARY) {
        let _ = writeln!(out, "  {}: {} times", aspect, count);
    }

    out
}

/// Build the sectioned recommendations document.
///
/// Section order is fixed: overall summary, strengths, areas for improvement,
/// actionable recommendations, strategic insights. Sections with no
/// qualifying aspects render an explicit "none identified" line instead of
/// being omitted; the two strategic callouts are emitted only when a top
/// strength or weakness exists.
pub fn build_insights(report: &AggregateReport, product: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(
        out,
        "{} - INSIGHTS AND RECOMMENDATIONS",
        product.to_uppercase()
    );
    let _ = writeln!(out, "{}", heavy_rule());
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERALL SENTIMENT SUMMARY:");
    let _ = writeln!(out, "  Total Reviews: {}", report.total_reviews);
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        let _ = writeln!(
            out,
            "  {}: {} ({:.1}%)",
            label_title(label),
            report.count(label),
            report.percentage(label)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "STRENGTHS (Most Appreciated Features):");
    let _ = writeln!(out, "{}", light_rule());
    let strengths = report.top_strengths(TOP_SUMMARY);
    if strengths.is_empty() {
        let _ = writeln!(out, "  No positive aspects identified");
    } else {
        for (i, (aspect, count)) in strengths.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}: Mentioned positively {} times",
                i + 1,
                aspect.to_uppercase(),
                count
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "AREAS FOR IMPROVEMENT (Common Complaints):");
    let _ = writeln!(out, "{}", light_rule());
    let weaknesses = report.top_weaknesses(TOP_SUMMARY);
    if weaknesses.is_empty() {
        let _ = writeln!(out, "  No negative aspects identified");
    } else {
        for (i, (aspect, count)) in weaknesses.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}: Mentioned negatively {} times",
                i + 1,
                aspect.to_uppercase(),
                count
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "ACTIONABLE RECOMMENDATIONS:");
    let _ = writeln!(out, "{}", light_rule());
    let priorities = report.top_weaknesses(TOP_PRIORITY);
    if priorities.is_empty() {
        let _ = writeln!(out, "  Continue maintaining current product quality");
    } else {
        for (i, (aspect, count)) in priorities.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. PRIORITY: Address {} issues - mentioned {} times",
                i + 1,
                aspect,
                count
            );
            let _ = writeln!(
                out,
                "     This is a critical area affecting customer satisfaction"
            );
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "STRATEGIC INSIGHTS:");
    let _ = writeln!(out, "{}", light_rule());
    if let Some((top_strength, _)) = report.positive_aspects.top() {
        let _ = writeln!(
            out,
            "  • Leverage {} as a key marketing point",
            top_strength
        );
    }
    if let Some((top_weakness, _)) = report.negative_aspects.top() {
        let _ = writeln!(
            out,
            "  • Focus R&D efforts on improving {}",
            top_weakness
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heavy_rule());

    out
}

fn label_title(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "Positive",
        SentimentLabel::Negative => "Negative",
        SentimentLabel::Neutral => "Neutral",
    }
}
