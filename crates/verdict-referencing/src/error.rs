use core::fmt;

/// Errors that can occur while indexing schema documents or resolving references.
#[derive(Debug)]
pub enum Error {
    /// A URI could not be parsed or resolved against its base.
    InvalidUri { uri: String, source: url::ParseError },
    /// `$id` carries a non-empty fragment.
    InvalidId { id: String },
    /// An anchor name is not a plain name.
    InvalidAnchor { anchor: String },
    /// No resource is known under this URI.
    Unresolvable { uri: String },
    /// A JSON Pointer leads to a non-existent location.
    PointerToNowhere { pointer: String },
    /// The requested anchor does not exist in the resource.
    NoSuchAnchor { anchor: String },
}

impl Error {
    pub(crate) fn invalid_uri(uri: impl Into<String>, source: url::ParseError) -> Error {
        Error::InvalidUri {
            uri: uri.into(),
            source,
        }
    }
    pub(crate) fn invalid_id(id: impl Into<String>) -> Error {
        Error::InvalidId { id: id.into() }
    }
    pub(crate) fn invalid_anchor(anchor: impl Into<String>) -> Error {
        Error::InvalidAnchor {
            anchor: anchor.into(),
        }
    }
    pub(crate) fn unresolvable(uri: impl Into<String>) -> Error {
        Error::Unresolvable { uri: uri.into() }
    }
    pub(crate) fn pointer_to_nowhere(pointer: impl Into<String>) -> Error {
        Error::PointerToNowhere {
            pointer: pointer.into(),
        }
    }
    pub(crate) fn no_such_anchor(anchor: impl Into<String>) -> Error {
        Error::NoSuchAnchor {
            anchor: anchor.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUri { uri, source } => write!(f, "Invalid URI '{uri}': {source}"),
            Error::InvalidId { id } => {
                write!(f, "'{id}' is not a valid '$id': fragments are not allowed")
            }
            Error::InvalidAnchor { anchor } => write!(f, "Anchor '{anchor}' is invalid"),
            Error::Unresolvable { uri } => write!(f, "Resource '{uri}' is not present"),
            Error::PointerToNowhere { pointer } => {
                write!(f, "Pointer '{pointer}' does not exist")
            }
            Error::NoSuchAnchor { anchor } => write!(f, "Anchor '{anchor}' does not exist"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUri { source, .. } => Some(source),
            _ => None,
        }
    }
}
