//! URI helpers built on top of [`url::Url`].
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::Error;

/// Base URI of documents that do not declare one.
pub const DEFAULT_ROOT_URI: &str = "json-schema:///";

static DEFAULT_ROOT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_ROOT_URI).expect("Invalid default root URI"));

/// Parse a URI, resolving relative ones against [`DEFAULT_ROOT_URI`].
///
/// An empty string maps to [`DEFAULT_ROOT_URI`] itself.
///
/// # Errors
///
/// Returns an error if the input is not a valid URI reference.
pub fn from_str(uri: &str) -> Result<Url, Error> {
    if uri.is_empty() {
        return Ok(DEFAULT_ROOT.clone());
    }
    match Url::parse(uri) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => resolve_against(&DEFAULT_ROOT, uri),
        Err(error) => Err(Error::invalid_uri(uri, error)),
    }
}

/// Resolve a URI reference against a base URI (RFC 3986, section 5).
///
/// # Errors
///
/// Returns an error if the reference can not be resolved against `base`.
pub fn resolve_against(base: &Url, reference: &str) -> Result<Url, Error> {
    base.join(reference)
        .map_err(|error| Error::invalid_uri(reference, error))
}

/// Split a URI into its fragment-less part and its percent-decoded fragment.
///
/// Empty fragments are reported as absent.
#[must_use]
pub fn split_fragment(mut uri: Url) -> (Url, Option<String>) {
    let fragment = uri
        .fragment()
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| percent_decode_str(fragment).decode_utf8_lossy().into_owned());
    uri.set_fragment(None);
    (uri, fragment)
}

/// The fragment-less form of `uri`.
#[must_use]
pub fn without_fragment(uri: Url) -> Url {
    split_fragment(uri).0
}
