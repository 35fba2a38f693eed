//! The field-extraction core.
//!
//! Both operations are total: absent data degrades to empty strings, never
//! to an error. Downstream form-population code relies on always receiving
//! the complete result shape.

use super::types::{AddressComponent, AddressTerm, AutocompleteGuess, FieldsToExtract, NameForm};
use std::collections::HashMap;

/// Resolve each requested type tag against a component list.
///
/// The first component whose tag set contains the requested tag wins, and
/// the requested form (long or short) is read from it. A tag with no match
/// resolves to the empty string, so the result always has exactly the same
/// key set as `fields`.
pub fn extract_address_fields(
    components: &[AddressComponent],
    fields: &FieldsToExtract,
) -> HashMap<String, String> {
    fields
        .iter()
        .map(|(tag, form)| {
            let value = components
                .iter()
                .find(|c| c.types.iter().any(|t| t == tag))
                .map(|c| match form {
                    NameForm::LongName => c.long_name.clone(),
                    NameForm::ShortName => c.short_name.clone(),
                })
                .unwrap_or_default();
            (tag.clone(), value)
        })
        .collect()
}

/// Derive a {country, state, city, street} guess from autocomplete terms.
///
/// Terms run from most specific to most general, so slots fill from the
/// end of the list: last term is the country, second-to-last the state,
/// then city, then street. Slots past the start of the list stay empty.
pub fn autocomplete_guess(terms: &[AddressTerm]) -> AutocompleteGuess {
    let from_end = |n: usize| {
        terms
            .len()
            .checked_sub(n)
            .map(|i| terms[i].value.clone())
            .unwrap_or_default()
    };

    AutocompleteGuess {
        country: from_end(1),
        state: from_end(2),
        city: from_end(3),
        street: from_end(4),
    }
}

/// Parse a `tag=form,tag=form` spec string into a field request.
///
/// Example: "sublocality=long_name,postal_code=long_name". Used by both
/// the CLI `--fields` flag and the server's `fields` query parameter.
pub fn parse_fields_spec(spec: &str) -> Result<FieldsToExtract, String> {
    let mut fields = FieldsToExtract::new();
    for pair in spec.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (tag, form) = pair.split_once('=').ok_or_else(|| {
            format!(
                "Invalid field spec '{}'. Use tag=long_name or tag=short_name.",
                pair
            )
        })?;
        let form: NameForm = form.trim().parse()?;
        fields.insert(tag.trim().to_string(), form);
    }
    if fields.is_empty() {
        return Err("Empty field spec. Provide tag=long_name or tag=short_name pairs.".into());
    }
    Ok(fields)
}
