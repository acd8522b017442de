//! Assembly of a full comparison result from two resolved products.
//!
//! Everything here is pure: enrichment data arrives as an input (already
//! fetched, possibly absent) so the scoring, narrative, and graph steps stay
//! deterministic and independently testable.

use serde::{Deserialize, Serialize};

use crate::enrichment::EnrichmentData;
use crate::graph::{build_comparison_graph, GraphData};
use crate::narrative::{eco_description, key_difference};
use crate::product::Product;
use crate::score::score_product;

/// An enrichment result reporting more than this many additives earns the
/// product an extra cautionary suggestion.
const ADDITIVE_CAUTION_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub products: Vec<ProductSummary>,
    pub scores: ScorePair,
    /// Id of the strictly higher-scoring product; `None` on a tie.
    pub winner: Option<i64>,
    pub sustainability_highlights: Highlights,
    pub comparison_graph: GraphData,
    pub external_data: ExternalData,
    pub recommendations: Recommendations,
    pub eco_description: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub sustainability_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub product1: i32,
    pub product2: i32,
    pub difference: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlights {
    pub product1_advantages: Vec<String>,
    pub product2_advantages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalData {
    pub product1: Option<EnrichmentData>,
    pub product2: Option<EnrichmentData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub general: Vec<String>,
    pub product1_suggestions: Vec<String>,
    pub product2_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub best_for: String,
    pub key_difference: String,
}

/// Compare two resolved products into a complete [`ComparisonOutcome`].
///
/// Winner determination is a strict score comparison; a tie produces no
/// winner and `summary.best_for` of `"Both products"`. Enrichment inputs are
/// optional and only ever add information (the additive-count caution).
#[must_use]
pub fn compare_products(
    product1: &Product,
    product2: &Product,
    external1: Option<EnrichmentData>,
    external2: Option<EnrichmentData>,
) -> ComparisonOutcome {
    let result1 = score_product(product1);
    let result2 = score_product(product2);
    let difference = (result1.score - result2.score).abs();

    let winner = if result1.score > result2.score {
        Some(product1.id)
    } else if result2.score > result1.score {
        Some(product2.id)
    } else {
        None
    };

    let description = eco_description(product1, product2, result1.score, result2.score);

    let mut product1_suggestions = result1.suggestions.clone();
    let mut product2_suggestions = result2.suggestions.clone();
    if exceeds_additive_threshold(external1.as_ref()) {
        product1_suggestions.push(additive_caution());
    }
    if exceeds_additive_threshold(external2.as_ref()) {
        product2_suggestions.push(additive_caution());
    }

    let best_for = match winner {
        Some(id) if id == product1.id => product1.name.clone(),
        Some(_) => product2.name.clone(),
        None => "Both products".to_string(),
    };

    ComparisonOutcome {
        products: vec![
            summarize(product1, result1.score),
            summarize(product2, result2.score),
        ],
        scores: ScorePair {
            product1: result1.score,
            product2: result2.score,
            difference,
        },
        winner,
        sustainability_highlights: Highlights {
            product1_advantages: result1.advantages.clone(),
            product2_advantages: result2.advantages.clone(),
        },
        comparison_graph: build_comparison_graph(product1, product2),
        external_data: ExternalData {
            product1: external1,
            product2: external2,
        },
        recommendations: Recommendations {
            general: vec![
                description.clone(),
                format!("Sustainability score difference: {difference} points"),
            ],
            product1_suggestions,
            product2_suggestions,
        },
        eco_description: description,
        summary: Summary {
            best_for,
            key_difference: key_difference(product1, product2, &result1, &result2),
        },
    }
}

fn summarize(product: &Product, score: i32) -> ProductSummary {
    ProductSummary {
        id: product.id,
        name: product.name.clone(),
        brand: product.brand.clone(),
        category: product.category.clone(),
        sustainability_score: score,
    }
}

fn exceeds_additive_threshold(external: Option<&EnrichmentData>) -> bool {
    external.is_some_and(|data| data.additives > ADDITIVE_CAUTION_THRESHOLD)
}

fn additive_caution() -> String {
    "High additive count - consider cleaner ingredients".to_string()
}
