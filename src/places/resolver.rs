//! Place resolver — orchestrates the cache → provider chain.
//!
//! Details flow:  cache → provider details → cache put → extract
//! Guess flow:    provider autocomplete → top prediction's terms

use super::cache::PlaceCache;
use super::extract;
use super::providers::PlacesClient;
use super::types::{AddressComponent, AutocompleteGuess, FieldsToExtract, PlacesError};
use std::collections::HashMap;

/// The place resolver with its fallback pipeline.
pub struct PlaceResolver {
    cache: PlaceCache,
    client: Option<PlacesClient>,
    offline: bool,
}

impl PlaceResolver {
    pub fn new(client: Option<PlacesClient>) -> Self {
        Self {
            cache: PlaceCache::load(),
            client,
            offline: false,
        }
    }

    /// Create a resolver with a specific cache (for testing).
    pub fn with_cache(cache: PlaceCache, client: Option<PlacesClient>) -> Self {
        Self {
            cache,
            client,
            offline: false,
        }
    }

    /// Set offline mode — skip network calls.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Fetch (or recall) the address components for a place id.
    pub fn components_for_place(
        &mut self,
        place_id: &str,
    ) -> Result<Vec<AddressComponent>, PlacesError> {
        // 1. Check cache
        if let Some(components) = self.cache.get(place_id) {
            return Ok(components);
        }

        // 2. Provider details (if online)
        if !self.offline {
            let client = self.client.as_ref().ok_or(PlacesError::MissingApiKey)?;
            let components = client.place_details(place_id)?;
            self.cache.put(place_id, &components);
            return Ok(components);
        }

        Err(PlacesError::CacheMiss(place_id.to_string()))
    }

    /// Resolve a place id and extract the requested fields from it.
    ///
    /// Resolution can fail (network, unknown id); the extraction itself
    /// cannot — tags with no matching component come back as empty strings.
    pub fn fields_for_place(
        &mut self,
        place_id: &str,
        fields: &FieldsToExtract,
    ) -> Result<HashMap<String, String>, PlacesError> {
        let components = self.components_for_place(place_id)?;
        Ok(extract::extract_address_fields(&components, fields))
    }

    /// Run a free-text query through autocomplete and slot the top
    /// prediction's terms into a {country, state, city, street} guess.
    ///
    /// Autocomplete has no cache tier; predictions are query-dependent
    /// and short-lived.
    pub fn guess_for_query(&mut self, input: &str) -> Result<AutocompleteGuess, PlacesError> {
        if self.offline {
            return Err(PlacesError::Offline("autocomplete".into()));
        }

        let client = self.client.as_ref().ok_or(PlacesError::MissingApiKey)?;
        let predictions = client.autocomplete(input)?;
        let first = predictions
            .first()
            .ok_or_else(|| PlacesError::NotFound(input.to_string()))?;

        Ok(extract::autocomplete_guess(&first.terms))
    }
}

#[cfg(test)]
mod tests {
    use super::super::cache::PlaceCache;
    use super::super::types::NameForm;
    use super::*;
    use tempfile::TempDir;

    fn offline_resolver() -> (PlaceResolver, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let cache = PlaceCache::load_from(path);
        let mut resolver = PlaceResolver::with_cache(cache, None);
        resolver.set_offline(true);
        (resolver, dir)
    }

    fn brooklyn_components() -> Vec<AddressComponent> {
        vec![
            AddressComponent {
                long_name: "Brooklyn".into(),
                short_name: "Brooklyn".into(),
                types: vec![
                    "sublocality_level_1".into(),
                    "sublocality".into(),
                    "political".into(),
                ],
            },
            AddressComponent {
                long_name: "New York".into(),
                short_name: "NY".into(),
                types: vec!["administrative_area_level_1".into(), "political".into()],
            },
            AddressComponent {
                long_name: "11206".into(),
                short_name: "11206".into(),
                types: vec!["postal_code".into()],
            },
        ]
    }

    fn fields(pairs: &[(&str, NameForm)]) -> FieldsToExtract {
        pairs.iter().map(|(k, f)| (k.to_string(), *f)).collect()
    }

    #[test]
    fn test_fields_from_cache_offline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = PlaceCache::load_from(path);
        cache.put("place-123", &brooklyn_components());

        let mut resolver = PlaceResolver::with_cache(cache, None);
        resolver.set_offline(true);

        let result = resolver
            .fields_for_place(
                "place-123",
                &fields(&[
                    ("sublocality", NameForm::LongName),
                    ("administrative_area_level_1", NameForm::ShortName),
                    ("postal_code", NameForm::LongName),
                ]),
            )
            .unwrap();

        assert_eq!(result["sublocality"], "Brooklyn");
        assert_eq!(result["administrative_area_level_1"], "NY");
        assert_eq!(result["postal_code"], "11206");
    }

    #[test]
    fn test_missing_tag_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = PlaceCache::load_from(path);
        cache.put("place-123", &brooklyn_components());

        let mut resolver = PlaceResolver::with_cache(cache, None);
        resolver.set_offline(true);

        let result = resolver
            .fields_for_place("place-123", &fields(&[("does-not-exist", NameForm::LongName)]))
            .unwrap();

        assert_eq!(result["does-not-exist"], "");
    }

    #[test]
    fn test_cache_miss_offline() {
        let (mut resolver, _dir) = offline_resolver();
        let result =
            resolver.fields_for_place("unknown-id", &fields(&[("country", NameForm::LongName)]));
        assert!(matches!(result, Err(PlacesError::CacheMiss(_))));
    }

    #[test]
    fn test_components_for_place_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = PlaceCache::load_from(path);
        cache.put("place-123", &brooklyn_components());

        let mut resolver = PlaceResolver::with_cache(cache, None);
        resolver.set_offline(true);

        let components = resolver.components_for_place("place-123").unwrap();
        assert_eq!(components.len(), 3);
    }

    #[test]
    fn test_guess_offline() {
        let (mut resolver, _dir) = offline_resolver();
        let result = resolver.guess_for_query("Brooklyn");
        assert!(matches!(result, Err(PlacesError::Offline(_))));
    }

    #[test]
    fn test_online_without_client_is_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let cache = PlaceCache::load_from(path);
        let mut resolver = PlaceResolver::with_cache(cache, None);

        let result = resolver.components_for_place("place-123");
        assert!(matches!(result, Err(PlacesError::MissingApiKey)));
    }
}
