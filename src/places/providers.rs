//! Places provider client: place details and autocomplete over the REST API.

use super::types::{AddressComponent, AddressTerm, PlacesError};
use serde::Deserialize;

const API_BASE: &str = "https://maps.googleapis.com/maps/api/place";
const USER_AGENT: &str = "placekit/0.3 (address-field-extractor)";

// ─── Wire payloads ──────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct PlaceDetailsPayload {
    pub status: String,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DetailsResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AutocompletePayload {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One autocomplete suggestion. Terms are ordered from most specific to
/// most general.
#[derive(Deserialize, Debug, Clone)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
    #[serde(default)]
    pub terms: Vec<AddressTerm>,
}

// ─── Client ─────────────────────────────────────────────────────

/// Blocking client for a Places-compatible REST API.
pub struct PlacesClient {
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Build a client from the PLACES_API_KEY environment variable.
    pub fn from_env() -> Result<Self, PlacesError> {
        match std::env::var("PLACES_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(PlacesError::MissingApiKey),
        }
    }

    /// Fetch the address components for a place id.
    pub fn place_details(&self, place_id: &str) -> Result<Vec<AddressComponent>, PlacesError> {
        let url = format!(
            "{}/details/json?place_id={}&fields=address_components&key={}",
            API_BASE,
            urlencod(place_id),
            urlencod(&self.api_key),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| PlacesError::Network(e.to_string()))?;

        let payload: PlaceDetailsPayload = response
            .into_json()
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        parse_details(place_id, payload)
    }

    /// Fetch autocomplete predictions for a free-text query.
    pub fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>, PlacesError> {
        let url = format!(
            "{}/autocomplete/json?input={}&key={}",
            API_BASE,
            urlencod(input),
            urlencod(&self.api_key),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| PlacesError::Network(e.to_string()))?;

        let payload: AutocompletePayload = response
            .into_json()
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        parse_autocomplete(input, payload)
    }
}

// ─── Payload handling ───────────────────────────────────────────

/// Fold a details envelope into its components, mapping provider status
/// codes onto errors.
fn parse_details(
    place_id: &str,
    payload: PlaceDetailsPayload,
) -> Result<Vec<AddressComponent>, PlacesError> {
    match payload.status.as_str() {
        "OK" => payload
            .result
            .map(|r| r.address_components)
            .ok_or_else(|| PlacesError::InvalidResponse("OK status without result".into())),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(PlacesError::NotFound(place_id.to_string())),
        other => Err(PlacesError::InvalidResponse(format!(
            "provider status {}",
            other
        ))),
    }
}

fn parse_autocomplete(
    input: &str,
    payload: AutocompletePayload,
) -> Result<Vec<Prediction>, PlacesError> {
    match payload.status.as_str() {
        "OK" => Ok(payload.predictions),
        "ZERO_RESULTS" => Err(PlacesError::NotFound(input.to_string())),
        other => Err(PlacesError::InvalidResponse(format!(
            "provider status {}",
            other
        ))),
    }
}

/// Parse a details payload from raw JSON: either the full provider
/// envelope or a bare component array (the CLI accepts both from local
/// files).
pub fn parse_components_payload(data: &str) -> Result<Vec<AddressComponent>, PlacesError> {
    if let Ok(components) = serde_json::from_str::<Vec<AddressComponent>>(data) {
        return Ok(components);
    }
    let payload: PlaceDetailsPayload =
        serde_json::from_str(data).map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;
    parse_details("local input", payload)
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

fn urlencod(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => format!("%{:02X}", c as u32),
        })
        .collect()
}
