use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{compute_pricing_stats, pricing::price_per_area_values, Matcher};
use crate::error::{ParseError, ScoringError};
use crate::models::{
    ErrorResponse, HealthResponse, MatchesResponse, PricingRequest, PricingResponse, Property,
    RawProperty, ScoreComparablesRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure all comparable-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/comparables/matches", web::post().to(score_comparables))
        .route("/comparables/pricing", web::post().to(pricing_stats))
        .route("/comparables/analyze", web::post().to(analyze_comparables));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score comparables endpoint
///
/// POST /api/v1/comparables/matches
///
/// Request body:
/// ```json
/// {
///   "base": { "listingName": "string", "propertyType": "house", "bedrooms": "3", ... },
///   "comparables": [{ "listingName": "string", ... }]
/// }
/// ```
async fn score_comparables(
    state: web::Data<AppState>,
    req: web::Json<ScoreComparablesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let (base, comparables) = match parse_listings(&req.base, &req.comparables) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    tracing::info!(
        "Scoring {} comparables for {}",
        comparables.len(),
        base.listing_name
    );

    match state.matcher.score(&base, &comparables) {
        Ok(matches) => HttpResponse::Ok().json(MatchesResponse {
            total_comparables: matches.len(),
            matches,
        }),
        Err(e) => unable_to_compute(&base.listing_name, e),
    }
}

/// Price-per-area statistics endpoint
///
/// POST /api/v1/comparables/pricing
///
/// Listings with a missing, unparseable or non-positive price/size are skipped
/// rather than rejected.
async fn pricing_stats(req: web::Json<PricingRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let valid_samples = price_per_area_values(&req.comparables).len();
    let stats = compute_pricing_stats(&req.comparables);

    tracing::info!(
        "Pricing statistics from {} of {} comparables",
        valid_samples,
        req.comparables.len()
    );

    HttpResponse::Ok().json(PricingResponse {
        stats,
        valid_samples,
    })
}

/// Combined scoring, pricing and suggested range endpoint
///
/// POST /api/v1/comparables/analyze
///
/// Only the base property must parse. Unparseable comparables are listed under
/// `skipped` while their price and size still feed the pricing statistics.
async fn analyze_comparables(
    state: web::Data<AppState>,
    req: web::Json<ScoreComparablesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let base = match req.base.parse() {
        Ok(base) => base,
        Err(e) => return invalid_listing("base property".to_string(), e),
    };

    match state.matcher.analyze_raw(&base, &req.comparables) {
        Ok(analysis) => {
            tracing::info!(
                "Analyzed {} comparables for {} ({} skipped, pricing available: {})",
                analysis.matches.len(),
                base.listing_name,
                analysis.skipped.len(),
                analysis.pricing.is_some()
            );
            HttpResponse::Ok().json(analysis)
        }
        Err(e) => unable_to_compute(&base.listing_name, e),
    }
}

fn parse_listings(
    base: &RawProperty,
    comparables: &[RawProperty],
) -> Result<(Property, Vec<Property>), HttpResponse> {
    let base = base
        .parse()
        .map_err(|e| invalid_listing("base property".to_string(), e))?;

    let comparables = comparables
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            raw.parse()
                .map_err(|e| invalid_listing(format!("comparable #{}", index + 1), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((base, comparables))
}

fn invalid_listing(which: String, err: ParseError) -> HttpResponse {
    tracing::info!("Rejected {}: {}", which, err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid listing".to_string(),
        message: format!("{}: {}", which, err),
        status_code: 400,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn unable_to_compute(listing_name: &str, err: ScoringError) -> HttpResponse {
    tracing::error!("Failed to score comparables for {}: {}", listing_name, err);
    HttpResponse::UnprocessableEntity().json(ErrorResponse {
        error: "Unable to compute".to_string(),
        message: err.to_string(),
        status_code: 422,
    })
}
