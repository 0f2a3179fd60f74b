//! HTTP handler functions for the temple map API.

use actix_web::{HttpResponse, web};
use temple_map_directory::{LocationSummary, filter_temples, unique_states};
use temple_map_server_models::{
    ApiError, ApiHealth, ApiVisits, FeedbackResponse, FeedbackSubmission, StatesResponse,
    TempleSearchParams, TempleSearchResponse, TemplesResponse,
};
use temple_map_source::SourceError;

use crate::AppState;
use crate::feedback::FeedbackError;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/temples`
///
/// Loads and normalizes the configured source. No geocoding is done here.
pub async fn temples(state: web::Data<AppState>) -> HttpResponse {
    match state.source.load().await {
        Ok(temples) => HttpResponse::Ok().json(TemplesResponse { temples }),
        Err(e) => source_failure(&e),
    }
}

/// `GET /api/temples/search`
///
/// Applies the free-text and state filters to the configured source.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<TempleSearchParams>,
) -> HttpResponse {
    let all = match state.source.load().await {
        Ok(temples) => temples,
        Err(e) => return source_failure(&e),
    };

    let temples = filter_temples(
        &all,
        params.q.as_deref().unwrap_or_default(),
        params.state.as_deref().unwrap_or_default(),
    );
    let summary = LocationSummary::new(&temples, all.len());

    HttpResponse::Ok().json(TempleSearchResponse {
        temples,
        located: summary.located,
        total: summary.total,
    })
}

/// `GET /api/states`
///
/// Lists the distinct states present in the configured source.
pub async fn states(state: web::Data<AppState>) -> HttpResponse {
    match state.source.load().await {
        Ok(temples) => HttpResponse::Ok().json(StatesResponse {
            states: unique_states(&temples),
        }),
        Err(e) => source_failure(&e),
    }
}

/// `GET /api/visits`
///
/// A counter that cannot be read is reported as zero visits.
pub async fn get_visits(state: web::Data<AppState>) -> HttpResponse {
    let visits = state.visits.get().await.unwrap_or_else(|e| {
        log::error!("Error reading visits file: {e}");
        0
    });
    HttpResponse::Ok().json(ApiVisits { visits })
}

/// `POST /api/visits`
///
/// Records one visit and returns the new total.
pub async fn post_visits(state: web::Data<AppState>) -> HttpResponse {
    let visits = state.visits.increment().await.unwrap_or_else(|e| {
        log::error!("Error updating visits file: {e}");
        0
    });
    HttpResponse::Ok().json(ApiVisits { visits })
}

/// `POST /api/send-feedback`
pub async fn send_feedback(
    state: web::Data<AppState>,
    body: web::Json<FeedbackSubmission>,
) -> HttpResponse {
    match state.feedback.submit(&body).await {
        Ok(_) => HttpResponse::Ok().json(FeedbackResponse {
            success: true,
            message: "Feedback received".to_string(),
        }),
        Err(e @ FeedbackError::MissingField { .. }) => {
            HttpResponse::BadRequest().json(FeedbackResponse {
                success: false,
                message: e.to_string(),
            })
        }
        Err(e) => {
            log::error!("Error processing feedback: {e}");
            HttpResponse::InternalServerError().json(FeedbackResponse {
                success: false,
                message: "Failed to process feedback".to_string(),
            })
        }
    }
}

fn source_failure(e: &SourceError) -> HttpResponse {
    log::error!("Error fetching temple data: {e}");
    HttpResponse::InternalServerError().json(ApiError {
        error: "Failed to fetch temple data".to_string(),
        details: Some(e.to_string()),
    })
}
