use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::places::types::PlacesError;
use crate::places::{
    autocomplete_guess, extract_address_fields, parse_fields_spec, AddressComponent, AddressTerm,
    AutocompleteGuess, FieldsToExtract,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn error_status(err: &PlacesError) -> StatusCode {
    match err {
        PlacesError::NotFound(_) | PlacesError::CacheMiss(_) => StatusCode::NOT_FOUND,
        PlacesError::Network(_) | PlacesError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        PlacesError::MissingApiKey | PlacesError::Offline(_) => StatusCode::SERVICE_UNAVAILABLE,
        PlacesError::NoInput => StatusCode::BAD_REQUEST,
    }
}

// ─── POST /api/extract ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub address_components: Vec<AddressComponent>,
    pub fields: FieldsToExtract,
}

pub async fn extract_fields(Json(req): Json<ExtractRequest>) -> Json<HashMap<String, String>> {
    let start = Instant::now();
    let result = extract_address_fields(&req.address_components, &req.fields);
    eprintln!(
        "[{}] POST /api/extract {} fields over {} components ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        req.fields.len(),
        req.address_components.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    Json(result)
}

// ─── POST /api/guess ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GuessRequest {
    pub terms: Vec<AddressTerm>,
}

pub async fn guess(Json(req): Json<GuessRequest>) -> Json<AutocompleteGuess> {
    let start = Instant::now();
    let result = autocomplete_guess(&req.terms);
    eprintln!(
        "[{}] POST /api/guess {} terms ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        req.terms.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    Json(result)
}

// ─── GET /api/place ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PlaceQuery {
    pub place_id: Option<String>,
    pub fields: Option<String>,
}

pub async fn place_fields(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<HashMap<String, String>>, Response> {
    let start = Instant::now();

    let place_id = params.place_id.as_deref().unwrap_or("").trim();
    if place_id.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'place_id' parameter").into_response());
    }

    let fields = match params.fields.as_deref() {
        Some(spec) => parse_fields_spec(spec)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e).into_response())?,
        None => {
            return Err(
                api_error(StatusCode::BAD_REQUEST, "Missing 'fields' parameter").into_response()
            )
        }
    };

    let result = {
        let mut resolver = state.resolver.lock().unwrap();
        resolver.fields_for_place(place_id, &fields)
    };

    let result = match result {
        Ok(r) => r,
        Err(e) => return Err(api_error(error_status(&e), format!("{}", e)).into_response()),
    };

    eprintln!(
        "[{}] GET /api/place?place_id={} -> {} fields ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        place_id,
        result.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(result))
}
