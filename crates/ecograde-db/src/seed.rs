//! Demo data seeding for local development.

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use ecograde_core::{score_product, Product, SustainabilityAttributes};

use crate::DbError;

/// Upsert the admin account used for local development.
///
/// The password must already be hashed by the caller. Returns the user id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn seed_admin_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, role, first_name, last_name) \
         VALUES ($1, $2, 'admin', 'Admin', 'User') \
         ON CONFLICT (email) DO UPDATE SET \
             password_hash = EXCLUDED.password_hash, \
             role = 'admin', \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Insert a small demo catalog spanning the scoring range.
///
/// Skips seeding entirely when any product already exists, so re-running the
/// seed does not duplicate the catalog. Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the batch runs in one
/// transaction and rolls back as a whole.
pub async fn seed_demo_products(pool: &PgPool) -> Result<usize, DbError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let catalog = demo_catalog();

    for (name, brand, category, description, price, attrs) in &catalog {
        let score = score_product(&Product {
            id: 0,
            name: (*name).to_string(),
            brand: (*brand).to_string(),
            category: (*category).to_string(),
            description: None,
            sustainability: attrs.clone(),
        })
        .score;

        sqlx::query(
            "INSERT INTO products \
                 (name, brand, category, description, price, sustainability, sustainability_score) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(name)
        .bind(brand)
        .bind(category)
        .bind(description)
        .bind(Decimal::new(*price, 2))
        .bind(attrs.as_ref().map(Json))
        .bind(score)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(catalog.len())
}

type SeedProduct = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    Option<SustainabilityAttributes>,
);

fn demo_catalog() -> Vec<SeedProduct> {
    vec![
        (
            "Bamboo Toothbrush",
            "GreenSmile",
            "Personal Care",
            "Compostable bamboo handle with plant-based bristles",
            499,
            Some(SustainabilityAttributes {
                recyclable_material: true,
                biodegradable: true,
                plastic_free: true,
                carbon_footprint: 0.8,
                cruelty_free: true,
                fair_trade_certified: true,
                renewable_energy_used: true,
                energy_efficiency_rating: None,
            }),
        ),
        (
            "Oat Drink Original",
            "FieldGrain",
            "Beverages",
            "Oat-based milk alternative in a carton",
            249,
            Some(SustainabilityAttributes {
                recyclable_material: true,
                biodegradable: false,
                plastic_free: false,
                carbon_footprint: 1.5,
                cruelty_free: true,
                fair_trade_certified: false,
                renewable_energy_used: true,
                energy_efficiency_rating: None,
            }),
        ),
        (
            "Classic Laundry Pods",
            "WashCo",
            "Household",
            "Concentrated detergent pods in a plastic tub",
            1299,
            Some(SustainabilityAttributes {
                recyclable_material: false,
                biodegradable: false,
                plastic_free: false,
                carbon_footprint: 5.2,
                cruelty_free: false,
                fair_trade_certified: false,
                renewable_energy_used: false,
                energy_efficiency_rating: Some(2),
            }),
        ),
        (
            "Compact Dishwasher 45",
            "Voltera",
            "Appliances",
            "Slimline dishwasher with an eco programme",
            39999,
            Some(SustainabilityAttributes {
                recyclable_material: true,
                biodegradable: false,
                plastic_free: false,
                carbon_footprint: 4.8,
                cruelty_free: false,
                fair_trade_certified: false,
                renewable_energy_used: false,
                energy_efficiency_rating: Some(5),
            }),
        ),
        (
            "Trail Mix Deluxe",
            "SnackWorks",
            "Snacks",
            "Nut and dried fruit mix",
            599,
            None,
        ),
    ]
}
