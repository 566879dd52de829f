use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod location;
mod model;
mod repository;
mod routes;
mod seed;
mod service;
mod storage;
mod utils;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::repository::{
    AttendanceRepository, InMemoryStore, MySqlStore, PersonDirectory, SiteCatalog,
};
use crate::service::{AttendanceService, ServiceSettings};
use crate::storage::{EvidenceUploader, HttpUploader, InMemoryUploader};
use crate::utils::site_cache::CachedSiteCatalog;
use anyhow::{Context, anyhow};
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

type Stores = (
    Arc<dyn PersonDirectory>,
    Arc<dyn SiteCatalog>,
    Arc<dyn AttendanceRepository>,
);

async fn build_stores(config: &Config, timeout: Duration) -> anyhow::Result<Stores> {
    if config.uses_memory_store() {
        warn!("Using in-memory store, data is lost on restart");
        let store = Arc::new(InMemoryStore::new());
        if config.seed_demo_data {
            store.seed(seed::demo_people(), seed::demo_sites());
        }
        let people: Arc<dyn PersonDirectory> = store.clone();
        let sites: Arc<dyn SiteCatalog> = store.clone();
        let records: Arc<dyn AttendanceRepository> = store;
        return Ok((people, sites, records));
    }

    let pool = init_db(&config.database_url, timeout).await?;
    let store = Arc::new(MySqlStore::new(pool));
    if config.seed_demo_data {
        store.seed(&seed::demo_people(), &seed::demo_sites()).await?;
    }
    let people: Arc<dyn PersonDirectory> = store.clone();
    let sites: Arc<dyn SiteCatalog> = store.clone();
    let records: Arc<dyn AttendanceRepository> = store;
    Ok((people, sites, records))
}

fn build_uploader(config: &Config, timeout: Duration) -> anyhow::Result<Arc<dyn EvidenceUploader>> {
    match &config.storage_url {
        Some(url) => {
            let key = config
                .storage_key
                .as_deref()
                .ok_or_else(|| anyhow!("STORAGE_KEY must be set when STORAGE_URL is set"))?;
            info!(storage_url = %url, bucket = %config.storage_bucket, "Using HTTP photo storage");
            let uploader: Arc<dyn EvidenceUploader> =
                Arc::new(HttpUploader::new(url, key, timeout)?);
            Ok(uploader)
        }
        None => {
            warn!("STORAGE_URL not set, photos are kept in memory");
            let uploader: Arc<dyn EvidenceUploader> = Arc::new(InMemoryUploader::new());
            Ok(uploader)
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let (people, sites, records) = build_stores(&config, timeout).await?;
    let uploader = build_uploader(&config, timeout)?;

    let sites: Arc<dyn SiteCatalog> = Arc::new(CachedSiteCatalog::new(
        sites,
        Duration::from_secs(config.site_cache_ttl_secs),
    ));

    let utc_offset = FixedOffset::east_opt(config.utc_offset_hours * 3600)
        .context("UTC_OFFSET_HOURS out of range")?;

    let service = Data::new(AttendanceService::new(
        people,
        sites,
        records,
        uploader,
        ServiceSettings {
            bucket: config.storage_bucket.clone(),
            max_photo_bytes: config.max_photo_bytes,
            timeout,
            utc_offset,
        },
    ));

    info!(
        max_photo_bytes = service.max_photo_bytes(),
        utc_offset_hours = config.utc_offset_hours,
        "Attendance service ready"
    );

    // Clone values for the closure (avoid move issues)
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(service.clone())
            .service(health)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
