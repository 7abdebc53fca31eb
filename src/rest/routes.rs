use actix_web::{web, HttpResponse};
use log::error;

use super::AppState;
use crate::metrics::metrics;
use crate::models::{RequestLookup, RequestLookupAll};
use crate::utils::{is_valid_hex_tag, normalize_hex};

// Registers every route of the lookup service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(find_request)
        .service(find_all_requests)
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics));
}

fn invalid_tag(tag: &str) -> HttpResponse {
    HttpResponse::BadRequest().body(format!("tag must be even-length hex, got {tag:?}"))
}

#[actix_web::get("/requests/{address}/{tag}")]
pub async fn find_request(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (address, tag) = path.into_inner();
    if !is_valid_hex_tag(&tag) {
        return Ok(invalid_tag(&tag));
    }

    let txid = state.extractor.find_request(&address, &tag).await.map_err(|e| {
        error!("Lookup for {} failed: {}", address, e);
        actix_web::error::ErrorBadGateway(e)
    })?;

    Ok(HttpResponse::Ok().json(RequestLookup {
        address,
        tag: normalize_hex(&tag),
        txid,
    }))
}

#[actix_web::get("/requests/{address}/{tag}/all")]
pub async fn find_all_requests(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (address, tag) = path.into_inner();
    if !is_valid_hex_tag(&tag) {
        return Ok(invalid_tag(&tag));
    }

    let txids = state
        .extractor
        .find_all_requests(&address, &tag)
        .await
        .map_err(|e| {
            error!("Lookup for {} failed: {}", address, e);
            actix_web::error::ErrorBadGateway(e)
        })?;

    Ok(HttpResponse::Ok().json(RequestLookupAll {
        address,
        tag: normalize_hex(&tag),
        txids,
    }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
