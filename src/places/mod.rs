//! Address intelligence subsystem for placekit.
//!
//! Provides the pure field-extraction core, the provider wire client,
//! local caching of fetched place details, and the resolver that chains
//! them.

pub mod cache;
pub mod extract;
pub mod providers;
pub mod resolver;
pub mod types;

pub use extract::{autocomplete_guess, extract_address_fields, parse_fields_spec};
pub use providers::{parse_components_payload, PlacesClient, Prediction};
pub use resolver::PlaceResolver;
pub use types::{
    AddressComponent, AddressTerm, AutocompleteGuess, FieldsToExtract, NameForm, PlacesError,
};
