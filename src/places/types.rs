//! Core types for the places subsystem.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which textual form of an address component to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameForm {
    LongName,
    ShortName,
}

impl std::str::FromStr for NameForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long_name" => Ok(Self::LongName),
            "short_name" => Ok(Self::ShortName),
            _ => Err(format!(
                "Unknown name form '{}'. Use 'long_name' or 'short_name'.",
                s
            )),
        }
    }
}

/// One labeled fragment of a geocoded address.
///
/// Field names match the provider wire payload, so this deserializes
/// straight out of a place-details response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Full form, e.g. "New York".
    pub long_name: String,
    /// Abbreviated form, e.g. "NY".
    pub short_name: String,
    /// Provider-defined classification tags (e.g. "postal_code",
    /// "administrative_area_level_1"). Open set; a component may carry
    /// several.
    pub types: Vec<String>,
}

/// Requested fields: type tag mapped to the name form to read.
pub type FieldsToExtract = HashMap<String, NameForm>;

/// One fragment of a free-text autocomplete suggestion.
///
/// The wire payload also carries an `offset`; only the text matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressTerm {
    pub value: String,
}

/// Best-effort address quadruple derived from autocomplete terms.
/// Underivable slots stay empty; the shape is always complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteGuess {
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
}

/// Errors from the provider and cache plumbing.
///
/// Field extraction itself is total and never produces one of these;
/// a tag with no matching component resolves to the empty string.
#[derive(Debug)]
pub enum PlacesError {
    Network(String),
    InvalidResponse(String),
    NotFound(String),
    CacheMiss(String),
    MissingApiKey,
    Offline(String),
    NoInput,
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::NotFound(q) => write!(f, "Place not found: '{}'", q),
            Self::CacheMiss(id) => write!(f, "No cached components for '{}'", id),
            Self::MissingApiKey => {
                write!(f, "No API key. Use --api-key or set PLACES_API_KEY")
            }
            Self::Offline(what) => {
                write!(f, "{} requires the network; offline mode is on", what)
            }
            Self::NoInput => {
                write!(f, "No place specified. Use a query, --place-id, or --input")
            }
        }
    }
}

impl std::error::Error for PlacesError {}
