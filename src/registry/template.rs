//! Identifier substitution into URL templates.
//!
//! The identifier is percent-encoded for the part of the URL the placeholder
//! sits in: form encoding in the query (space becomes `+`), `%20` for spaces
//! in the path.

use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::config::IDENTIFIER_PLACEHOLDER;
use crate::error_handling::ProbeError;

/// Substitutes `identifier` into `template` and parses the result.
///
/// # Errors
///
/// Returns `ProbeError::MalformedTarget` when the template has no
/// placeholder, or when the substituted string is not an absolute
/// `http`/`https` URL.
pub fn render_url(template: &str, identifier: &str) -> Result<Url, ProbeError> {
    let Some(position) = template.find(IDENTIFIER_PLACEHOLDER) else {
        return Err(ProbeError::MalformedTarget);
    };
    let in_query = template[..position].contains('?');
    let encoded = encode_identifier(identifier.trim(), in_query);
    let rendered = template.replacen(IDENTIFIER_PLACEHOLDER, &encoded, 1);

    let url = Url::parse(&rendered).map_err(|_| ProbeError::MalformedTarget)?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ProbeError::MalformedTarget),
    }
}

/// Percent-encodes an identifier for the query or the path.
pub fn encode_identifier(identifier: &str, in_query: bool) -> String {
    let encoded: String = byte_serialize(identifier.as_bytes()).collect();
    if in_query {
        encoded
    } else {
        encoded.replace('+', "%20")
    }
}

/// Number of placeholders in a template.
pub fn placeholder_count(template: &str) -> usize {
    template.matches(IDENTIFIER_PLACEHOLDER).count()
}
