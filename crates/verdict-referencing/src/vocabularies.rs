use core::fmt;

use serde_json::{Map, Value};

/// A JSON Schema 2020-12 vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Core,
    Applicator,
    Unevaluated,
    Validation,
    MetaData,
    FormatAnnotation,
    FormatAssertion,
    Content,
}

impl Vocabulary {
    const fn bit(self) -> u8 {
        match self {
            Vocabulary::Core => 1,
            Vocabulary::Applicator => 1 << 1,
            Vocabulary::Unevaluated => 1 << 2,
            Vocabulary::Validation => 1 << 3,
            Vocabulary::MetaData => 1 << 4,
            Vocabulary::FormatAnnotation => 1 << 5,
            Vocabulary::FormatAssertion => 1 << 6,
            Vocabulary::Content => 1 << 7,
        }
    }

    /// Identify a vocabulary by its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Vocabulary> {
        let name = uri.strip_prefix("https://json-schema.org/draft/2020-12/vocab/")?;
        match name {
            "core" => Some(Vocabulary::Core),
            "applicator" => Some(Vocabulary::Applicator),
            "unevaluated" => Some(Vocabulary::Unevaluated),
            "validation" => Some(Vocabulary::Validation),
            "meta-data" => Some(Vocabulary::MetaData),
            "format-annotation" => Some(Vocabulary::FormatAnnotation),
            "format-assertion" => Some(Vocabulary::FormatAssertion),
            "content" => Some(Vocabulary::Content),
            _ => None,
        }
    }
}

/// A compact set of vocabularies.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VocabularySet(u8);

impl VocabularySet {
    /// Vocabularies that are always active, whatever the meta-schema declares.
    const REQUIRED: u8 =
        Vocabulary::Core.bit() | Vocabulary::Applicator.bit() | Vocabulary::Unevaluated.bit();

    /// The vocabularies of the 2020-12 meta-schema.
    #[must_use]
    pub const fn draft202012() -> VocabularySet {
        VocabularySet(
            VocabularySet::REQUIRED
                | Vocabulary::Validation.bit()
                | Vocabulary::MetaData.bit()
                | Vocabulary::FormatAnnotation.bit()
                | Vocabulary::Content.bit(),
        )
    }

    /// Build a set from a `$vocabulary` object.
    ///
    /// Unknown vocabularies are ignored.
    #[must_use]
    pub fn from_declaration(declaration: &Map<String, Value>) -> VocabularySet {
        let mut set = VocabularySet(VocabularySet::REQUIRED);
        for (uri, required) in declaration {
            if let Some(vocabulary) = Vocabulary::from_uri(uri) {
                set.insert(vocabulary);
            } else {
                tracing::debug!(
                    vocabulary = %uri,
                    required = required.as_bool().unwrap_or(false),
                    "Ignoring unknown vocabulary"
                );
            }
        }
        set
    }

    pub fn insert(&mut self, vocabulary: Vocabulary) {
        self.0 |= vocabulary.bit();
    }

    #[must_use]
    pub fn contains(&self, vocabulary: Vocabulary) -> bool {
        self.0 & vocabulary.bit() != 0
    }
}

impl Default for VocabularySet {
    fn default() -> Self {
        VocabularySet::draft202012()
    }
}

impl fmt::Debug for VocabularySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ALL: [Vocabulary; 8] = [
            Vocabulary::Core,
            Vocabulary::Applicator,
            Vocabulary::Unevaluated,
            Vocabulary::Validation,
            Vocabulary::MetaData,
            Vocabulary::FormatAnnotation,
            Vocabulary::FormatAssertion,
            Vocabulary::Content,
        ];
        f.debug_set()
            .entries(ALL.iter().filter(|v| self.contains(**v)))
            .finish()
    }
}
