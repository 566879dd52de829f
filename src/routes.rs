use crate::{api::attendance, config::Config, error::AttendanceError};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, error::JsonPayloadError, web};
use std::fmt;
use serde_json::json;
use std::sync::Arc;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // period and burst are both clamped to at least 1 above
        .expect("valid governor config");
    Governor::new(&cfg)
}

/// JSON extractor config: big enough for a base64 photo, and an oversized body
/// is reported with the same error kind as an oversized decoded photo.
pub fn json_config(config: &Config) -> web::JsonConfig {
    let max_photo_bytes = config.max_photo_bytes;

    web::JsonConfig::default()
        .limit(config.json_body_limit())
        .error_handler(move |err, _req| match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                AttendanceError::PayloadTooLarge {
                    limit: max_photo_bytes,
                }
                .into()
            }
            other => invalid_request(other),
        })
}

/// Query extractor config: a missing or malformed parameter gets the same JSON
/// error body as every other rejection.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| invalid_request(err))
}

fn invalid_request<E>(err: E) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let message = err.to_string();
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({
            "error": "INVALID_REQUEST",
            "message": message
        })),
    )
    .into()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let submit_limiter = Arc::new(build_limiter(config.rate_submit_per_min));
    let read_limiter = Arc::new(build_limiter(config.rate_read_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .app_data(json_config(&config))
            .app_data(query_config())
            // /sites
            .service(
                web::resource("/sites")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(attendance::list_sites)),
            )
            // /options
            .service(
                web::resource("/options")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(attendance::form_options)),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .wrap(submit_limiter)
                            .route(web::post().to(attendance::submit)),
                    )
                    // /attendance/status
                    .service(
                        web::resource("/status")
                            .wrap(read_limiter)
                            .route(web::get().to(attendance::get_status)),
                    ),
            ),
    );
}
