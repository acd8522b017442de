//! Derivation of the short enrichment summary string.

use crate::types::FoodFactsProduct;

/// How many certification labels the summary mentions at most.
const MAX_LABELS_IN_SUMMARY: usize = 3;

/// Build the human-readable summary for an external record.
///
/// Combines the eco-grade text (fixed a–e mapping), an additive-count note,
/// the packaging description, and the first few certification labels. Falls
/// back to a generic line when none of those fields are present.
pub(crate) fn describe(record: &FoodFactsProduct) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(grade) = record.ecoscore_grade.as_deref() {
        if let Some(text) = grade_text(grade) {
            parts.push(text.to_string());
        }
    }

    let additives = record.additives_tags.len();
    if additives > 0 {
        parts.push(format!("Contains {additives} additives."));
        if additives > 5 {
            parts.push("High number of additives may impact eco-score.".to_string());
        }
    }

    if let Some(packaging) = record.packaging.as_deref() {
        if !packaging.is_empty() {
            parts.push(format!("Packaging: {packaging}."));
        }
    }

    if !record.labels_tags.is_empty() {
        let shown: Vec<&str> = record
            .labels_tags
            .iter()
            .take(MAX_LABELS_IN_SUMMARY)
            .map(String::as_str)
            .collect();
        parts.push(format!("Certified with: {}.", shown.join(", ")));
    }

    if parts.is_empty() {
        "Basic sustainability information available.".to_string()
    } else {
        parts.join(" ")
    }
}

fn grade_text(grade: &str) -> Option<&'static str> {
    match grade {
        "a" => Some("Excellent environmental rating."),
        "b" => Some("Good environmental rating."),
        "c" => Some("Average environmental rating."),
        "d" => Some("Below average environmental rating."),
        "e" => Some("Poor environmental rating."),
        _ => None,
    }
}
