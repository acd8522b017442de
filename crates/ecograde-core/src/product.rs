use serde::{Deserialize, Serialize};

/// A product as seen by the comparison engine, resolved from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    /// `None` means the product carries no sustainability data at all —
    /// a distinct case from a block with every attribute unset.
    pub sustainability: Option<SustainabilityAttributes>,
}

/// The environmental/ethical attribute block on a product.
///
/// Boolean attributes default to `false` when missing so that a partially
/// filled block still deserializes; `carbon_footprint` is required whenever
/// the block is present, `energy_efficiency_rating` (1–5) is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityAttributes {
    #[serde(default)]
    pub recyclable_material: bool,
    #[serde(default)]
    pub biodegradable: bool,
    #[serde(default)]
    pub plastic_free: bool,
    /// Estimated kg CO2e per unit; lower is better.
    pub carbon_footprint: f64,
    #[serde(default)]
    pub cruelty_free: bool,
    #[serde(default)]
    pub fair_trade_certified: bool,
    #[serde(default)]
    pub renewable_energy_used: bool,
    #[serde(default)]
    pub energy_efficiency_rating: Option<u8>,
}

impl SustainabilityAttributes {
    /// Returns how many of the boolean attributes are satisfied.
    #[must_use]
    pub fn satisfied_count(&self) -> usize {
        [
            self.recyclable_material,
            self.biodegradable,
            self.plastic_free,
            self.cruelty_free,
            self.fair_trade_certified,
            self.renewable_energy_used,
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

impl Product {
    /// Returns `true` if the product has any sustainability data to score.
    #[must_use]
    pub fn has_sustainability(&self) -> bool {
        self.sustainability.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_block_deserializes_with_defaults() {
        let attrs: SustainabilityAttributes =
            serde_json::from_str(r#"{"carbon_footprint": 1.5, "plastic_free": true}"#)
                .expect("deserialization failed");
        assert!(attrs.plastic_free);
        assert!(!attrs.recyclable_material);
        assert!((attrs.carbon_footprint - 1.5).abs() < f64::EPSILON);
        assert!(attrs.energy_efficiency_rating.is_none());
    }

    #[test]
    fn block_without_carbon_footprint_is_rejected() {
        let result: Result<SustainabilityAttributes, _> =
            serde_json::from_str(r#"{"plastic_free": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn satisfied_count_counts_true_booleans() {
        let attrs = SustainabilityAttributes {
            recyclable_material: true,
            biodegradable: false,
            plastic_free: true,
            carbon_footprint: 3.0,
            cruelty_free: false,
            fair_trade_certified: true,
            renewable_energy_used: false,
            energy_efficiency_rating: Some(4),
        };
        assert_eq!(attrs.satisfied_count(), 3);
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = Product {
            id: 7,
            name: "Oat Crunch".to_string(),
            brand: "GreenFields".to_string(),
            category: "Snacks".to_string(),
            description: Some("Crunchy oat bar".to_string()),
            sustainability: Some(SustainabilityAttributes {
                recyclable_material: true,
                biodegradable: true,
                plastic_free: false,
                carbon_footprint: 2.5,
                cruelty_free: true,
                fair_trade_certified: false,
                renewable_energy_used: true,
                energy_efficiency_rating: Some(3),
            }),
        };
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.id, product.id);
        assert_eq!(decoded.name, product.name);
        assert_eq!(decoded.sustainability, product.sustainability);
    }
}
