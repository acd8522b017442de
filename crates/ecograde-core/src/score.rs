//! Sustainability scoring: product attributes → score plus narrative fragments.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// The scored view of a single product.
///
/// `advantages` and `suggestions` are ordered by the fixed attribute
/// evaluation order; each attribute contributes to exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i32,
    pub advantages: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ScoreResult {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            score: 0,
            advantages: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// Derive the sustainability score for a product.
///
/// Additive point scheme, one attribute at a time, no interaction effects.
/// The raw sum can exceed 100; the returned score is clamped to [0, 100].
/// A product without a sustainability block scores 0 with empty lists.
#[must_use]
pub fn score_product(product: &Product) -> ScoreResult {
    let Some(attrs) = &product.sustainability else {
        return ScoreResult::empty();
    };

    let mut score: i32 = 0;
    let mut advantages = Vec::new();
    let mut suggestions = Vec::new();

    if attrs.recyclable_material {
        score += 15;
        advantages.push("Made from recyclable materials".to_string());
    } else {
        suggestions.push("Consider using recyclable materials".to_string());
    }

    if attrs.biodegradable {
        score += 15;
        advantages.push("Product is biodegradable".to_string());
    } else {
        suggestions.push("Look for biodegradable alternatives".to_string());
    }

    if attrs.plastic_free {
        score += 20;
        advantages.push("Plastic-free packaging".to_string());
    } else {
        suggestions.push("Reduce plastic packaging".to_string());
    }

    if attrs.carbon_footprint < 2.0 {
        score += 25;
        advantages.push("Excellent carbon footprint (low emissions)".to_string());
    } else if attrs.carbon_footprint < 4.0 {
        score += 15;
        advantages.push("Good carbon footprint".to_string());
    } else if attrs.carbon_footprint < 6.0 {
        score += 10;
        advantages.push("Average carbon footprint".to_string());
    } else {
        suggestions.push("High carbon footprint - consider reducing emissions".to_string());
    }

    if attrs.cruelty_free {
        score += 15;
        advantages.push("Cruelty-free certified".to_string());
    } else {
        suggestions.push("Consider cruelty-free certification".to_string());
    }

    if attrs.fair_trade_certified {
        score += 15;
        advantages.push("Fair Trade certified".to_string());
    } else {
        suggestions.push("Look for Fair Trade certification".to_string());
    }

    if attrs.renewable_energy_used {
        score += 10;
        advantages.push("Produced using renewable energy".to_string());
    } else {
        suggestions.push("Consider switching to renewable energy".to_string());
    }

    if let Some(rating) = attrs.energy_efficiency_rating {
        score += i32::from(rating) * 3;
        if rating >= 4 {
            advantages.push("Excellent energy efficiency".to_string());
        } else if rating <= 2 {
            suggestions.push("Improve energy efficiency rating".to_string());
        }
    }

    ScoreResult {
        score: score.clamp(0, 100),
        advantages,
        suggestions,
    }
}
