use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ecograde-cli")]
#[command(about = "ecograde operational command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed the demo product catalog and an admin account.
    Seed {
        /// Admin account email.
        #[arg(long, default_value = "admin@ecograde.local")]
        admin_email: String,
        /// Admin account password (hashed before storage).
        #[arg(long, env = "ECOGRADE_ADMIN_PASSWORD")]
        admin_password: String,
    },
    /// Delete comparison history rows past their 30-day retention window.
    PurgeExpired,
    /// Print aggregate comparison statistics.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let pool = ecograde_db::connect_pool_from_env().await?;
    ecograde_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Seed {
            admin_email,
            admin_password,
        } => {
            let hash = ecograde_core::credentials::hash_password(&admin_password)?;
            let admin_id = ecograde_db::seed_admin_user(&pool, &admin_email, &hash).await?;
            let inserted = ecograde_db::seed_demo_products(&pool).await?;
            if inserted == 0 {
                println!("admin user {admin_email} ready (id {admin_id}); catalog already seeded");
            } else {
                println!(
                    "admin user {admin_email} ready (id {admin_id}); seeded {inserted} demo products"
                );
            }
        }
        Commands::PurgeExpired => {
            let purged = ecograde_db::purge_expired(&pool).await?;
            println!("purged {purged} expired comparisons");
        }
        Commands::Stats => {
            let total = ecograde_db::count_comparisons(&pool).await?;
            let average = ecograde_db::average_score_difference(&pool).await?;
            let most = ecograde_db::most_compared_products(&pool, 5).await?;
            let trend = ecograde_db::trend_last_7_days(&pool).await?;

            println!("total comparisons: {total}");
            println!("average score difference: {average:.2}");
            println!("most compared products:");
            for row in most {
                println!("  {:>5}x  {} ({})", row.count, row.name, row.brand);
            }
            println!("last 7 days:");
            for point in trend {
                println!("  {}  {}", point.day, point.count);
            }
        }
    }

    Ok(())
}
