//! Comparative narrative generation for a pair of scored products.

use crate::product::Product;
use crate::score::ScoreResult;

/// Build the eco-friendliness description for a pair of scored products.
///
/// Four tiers by absolute score difference: >30 "significantly", >15
/// "moderately", >5 "slightly", otherwise a neutral "similar scores" message.
/// Equal scores always land in the neutral tier since their difference is 0.
#[must_use]
pub fn eco_description(
    product1: &Product,
    product2: &Product,
    score1: i32,
    score2: i32,
) -> String {
    let (winner, loser) = if score1 > score2 {
        (product1, product2)
    } else {
        (product2, product1)
    };
    let diff = (score1 - score2).abs();

    if diff > 30 {
        format!(
            "{} is significantly more eco-friendly than {}. \
             This product excels in multiple sustainability categories.",
            winner.name, loser.name
        )
    } else if diff > 15 {
        format!(
            "{} is moderately more sustainable than {}. \
             It has clear advantages in key environmental areas.",
            winner.name, loser.name
        )
    } else if diff > 5 {
        format!(
            "{} is slightly more eco-friendly than {}. \
             Both have good sustainability practices, but the winner has a small edge.",
            winner.name, loser.name
        )
    } else {
        "Both products have similar sustainability scores. \
         Consider other factors like price, brand ethics, or specific certifications."
            .to_string()
    }
}

/// Summarize the key difference between two products by comparing how many
/// sustainability advantages each one earned.
#[must_use]
pub fn key_difference(
    product1: &Product,
    product2: &Product,
    result1: &ScoreResult,
    result2: &ScoreResult,
) -> String {
    let n1 = result1.advantages.len();
    let n2 = result2.advantages.len();

    if n1 == 0 && n2 == 0 {
        return "Both products need significant sustainability improvements".to_string();
    }

    if n1 > n2 {
        format!(
            "{} has more sustainability features ({n1} vs {n2})",
            product1.name
        )
    } else if n2 > n1 {
        format!(
            "{} has more sustainability features ({n2} vs {n1})",
            product2.name
        )
    } else {
        "Both products have similar sustainability features".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            brand: "Brand".to_string(),
            category: "Category".to_string(),
            description: None,
            sustainability: None,
        }
    }

    fn result_with_advantages(n: usize) -> ScoreResult {
        ScoreResult {
            score: 0,
            advantages: (0..n).map(|i| format!("advantage {i}")).collect(),
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn zero_diff_yields_similar_tier() {
        let desc = eco_description(&named("A"), &named("B"), 50, 50);
        assert!(desc.contains("similar sustainability scores"), "{desc}");
    }

    #[test]
    fn max_diff_yields_significant_tier() {
        let desc = eco_description(&named("A"), &named("B"), 100, 0);
        assert!(desc.starts_with("A is significantly more eco-friendly"), "{desc}");
    }

    #[test]
    fn moderate_tier_between_16_and_30() {
        let desc = eco_description(&named("A"), &named("B"), 10, 30);
        assert!(desc.starts_with("B is moderately more sustainable"), "{desc}");
    }

    #[test]
    fn slight_tier_between_6_and_15() {
        let desc = eco_description(&named("A"), &named("B"), 48, 40);
        assert!(desc.starts_with("A is slightly more eco-friendly"), "{desc}");
    }

    #[test]
    fn boundary_values_fall_into_lower_tier() {
        // diff exactly 30 is "moderately", exactly 15 is "slightly", exactly 5 is "similar"
        assert!(eco_description(&named("A"), &named("B"), 40, 10).contains("moderately"));
        assert!(eco_description(&named("A"), &named("B"), 25, 10).contains("slightly"));
        assert!(eco_description(&named("A"), &named("B"), 15, 10).contains("similar"));
    }

    #[test]
    fn key_difference_both_zero() {
        let msg = key_difference(
            &named("A"),
            &named("B"),
            &result_with_advantages(0),
            &result_with_advantages(0),
        );
        assert_eq!(msg, "Both products need significant sustainability improvements");
    }

    #[test]
    fn key_difference_first_has_more() {
        let msg = key_difference(
            &named("A"),
            &named("B"),
            &result_with_advantages(5),
            &result_with_advantages(2),
        );
        assert_eq!(msg, "A has more sustainability features (5 vs 2)");
    }

    #[test]
    fn key_difference_second_has_more() {
        let msg = key_difference(
            &named("A"),
            &named("B"),
            &result_with_advantages(1),
            &result_with_advantages(4),
        );
        assert_eq!(msg, "B has more sustainability features (4 vs 1)");
    }

    #[test]
    fn key_difference_equal_nonzero() {
        let msg = key_difference(
            &named("A"),
            &named("B"),
            &result_with_advantages(3),
            &result_with_advantages(3),
        );
        assert_eq!(msg, "Both products have similar sustainability features");
    }
}
