use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

pub async fn init_db(database_url: &str, acquire_timeout: Duration) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    info!("Running database migrations...");

    create_people_table(pool).await?;
    create_sites_table(pool).await?;
    create_attendance_logs_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_people_table(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id CHAR(36) PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL,
            department VARCHAR(120) NULL,
            work_category VARCHAR(20) NOT NULL DEFAULT 'HEAD_OFFICE',
            position VARCHAR(120) NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sites_table(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sites (
            id CHAR(36) PRIMARY KEY,
            site_code VARCHAR(64) NOT NULL UNIQUE,
            site_name VARCHAR(200) NOT NULL,
            location_address VARCHAR(255) NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_attendance_logs_table(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            id CHAR(36) PRIMARY KEY,
            person_id CHAR(36) NOT NULL,
            attendance_date DATE NOT NULL,
            time_in DATETIME(3) NULL,
            time_out DATETIME(3) NULL,
            site_id CHAR(36) NULL,
            department VARCHAR(255) NULL,
            activities TEXT NULL,
            image_in_url TEXT NULL,
            image_out_url TEXT NULL,
            members JSON NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
            UNIQUE KEY uq_attendance_person_date (person_id, attendance_date),
            CONSTRAINT fk_attendance_person FOREIGN KEY (person_id) REFERENCES people (id),
            CONSTRAINT fk_attendance_site FOREIGN KEY (site_id) REFERENCES sites (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
