//! Chart-ready comparison series over the fixed sustainability category axis.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// The fixed category axis, in display order. Both datasets are aligned to it.
pub const GRAPH_CATEGORIES: [&str; 8] = [
    "Recyclable Material",
    "Biodegradable",
    "Plastic Free",
    "Carbon Footprint",
    "Cruelty Free",
    "Fair Trade",
    "Renewable Energy",
    "Energy Efficiency",
];

const DATASET_STYLES: [(&str, &str); 2] = [
    ("rgba(75, 192, 192, 0.7)", "rgba(75, 192, 192, 1)"),
    ("rgba(255, 159, 64, 0.7)", "rgba(255, 159, 64, 1)"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub labels: Vec<String>,
    pub datasets: Vec<GraphDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDataset {
    pub label: String,
    pub data: Vec<i32>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u8,
}

/// Build the two aligned chart series for a product pair.
///
/// Every value is in [0, 20]: boolean attributes map to 20/0, the carbon
/// footprint to a 20/15/10/5 tier, and the energy efficiency rating to
/// rating×4. A product without a sustainability block contributes all zeros.
#[must_use]
pub fn build_comparison_graph(product1: &Product, product2: &Product) -> GraphData {
    let datasets = [product1, product2]
        .into_iter()
        .zip(DATASET_STYLES)
        .map(|(product, (background, border))| GraphDataset {
            label: product.name.clone(),
            data: GRAPH_CATEGORIES
                .iter()
                .map(|category| category_value(product, category))
                .collect(),
            background_color: background.to_string(),
            border_color: border.to_string(),
            border_width: 1,
        })
        .collect();

    GraphData {
        labels: GRAPH_CATEGORIES.iter().map(ToString::to_string).collect(),
        datasets,
    }
}

fn category_value(product: &Product, category: &str) -> i32 {
    let Some(attrs) = &product.sustainability else {
        return 0;
    };

    let bool_value = |b: bool| if b { 20 } else { 0 };

    match category {
        "Recyclable Material" => bool_value(attrs.recyclable_material),
        "Biodegradable" => bool_value(attrs.biodegradable),
        "Plastic Free" => bool_value(attrs.plastic_free),
        "Carbon Footprint" => {
            if attrs.carbon_footprint < 2.0 {
                20
            } else if attrs.carbon_footprint < 4.0 {
                15
            } else if attrs.carbon_footprint < 6.0 {
                10
            } else {
                5
            }
        }
        "Cruelty Free" => bool_value(attrs.cruelty_free),
        "Fair Trade" => bool_value(attrs.fair_trade_certified),
        "Renewable Energy" => bool_value(attrs.renewable_energy_used),
        "Energy Efficiency" => attrs
            .energy_efficiency_rating
            .map_or(0, |rating| i32::from(rating) * 4),
        _ => 0,
    }
}
