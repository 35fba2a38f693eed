//! placekit — typed address-field extraction for places payloads.
//!
//! Pairs a pure extraction core (address components to requested fields,
//! autocomplete terms to a country/state/city/street guess) with a provider
//! client, a local place-details cache, and an HTTP surface.

pub mod places;
pub mod server;
