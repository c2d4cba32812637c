//! Admin provisioning tool
//!
//! The public API never sets the admin flag; this binary is the out-of-band
//! step that creates an admin account (or promotes an existing one). It is
//! idempotent: running it again for the same email just re-asserts the
//! flags.
//!
//! Usage:
//!   create-admin --email admin@sweetshop.example --password <password>

use anyhow::Context;
use clap::Parser;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use sweetshop_api::auth::password::hash_password;
use sweetshop_core::AppConfig;

#[derive(Parser)]
#[command(name = "create-admin")]
#[command(about = "Provision an admin account for the Sweet Shop API")]
#[command(version)]
struct Cli {
    /// Email for the admin account
    #[arg(long)]
    email: String,

    /// Password for the admin account
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .context("failed to open database")?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&cli.email)
        .fetch_one(&db_pool)
        .await?;

    if existing > 0 {
        sqlx::query("UPDATE users SET is_admin = TRUE, is_active = TRUE WHERE email = ?")
            .bind(&cli.email)
            .execute(&db_pool)
            .await?;
        println!("User {} already exists; promoted to admin.", cli.email);
        return Ok(());
    }

    let password_hash = hash_password(&cli.password)?;
    sqlx::query(
        "INSERT INTO users (email, password_hash, is_active, is_admin) VALUES (?, ?, TRUE, TRUE)",
    )
    .bind(&cli.email)
    .bind(&password_hash)
    .execute(&db_pool)
    .await?;

    println!("Admin user {} created.", cli.email);

    Ok(())
}
