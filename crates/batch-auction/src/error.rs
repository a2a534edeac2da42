use {
    crate::{auction::AmmKind, ids::TokenId},
    std::fmt,
};

/// Dotted location of a value inside a document, e.g. `orders.0.sell_token`.
/// The document root is the empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(String);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn join(&self, segment: impl fmt::Display) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{segment}", self.0))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reasons a document is rejected. Validation is fail-fast: the first error
/// found is returned and nothing of the partially read document escapes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
    #[error("missing required field {0}")]
    MissingRequiredField(Path),
    #[error("{path}: expected {expected}, got {got}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{0}: malformed number")]
    MalformedNumber(Path),
    #[error("{0}: number exceeds the configured digit bound")]
    NumberTooLarge(Path),
    #[error("{path}: unknown variant {value:?}")]
    UnknownEnumVariant { path: Path, value: String },
    #[error("{0}: identifier must not be empty")]
    EmptyIdentifier(Path),
    #[error("{path}: reserves do not have the shape required by {kind} AMMs")]
    VariantShapeMismatch { path: Path, kind: AmmKind },
    #[error("{path}: token {id} is not declared")]
    UnknownTokenReference { path: Path, id: TokenId },
    #[error("cannot tell whether the document is a problem or a solution")]
    AmbiguousDocumentKind,
    #[error("{0}: executed amounts violate the declared bounds")]
    ExecutionBoundsViolation(Path),
    #[error("{path}: {reason}")]
    InvalidValue { path: Path, reason: &'static str },
    #[error("{path}: {id} is not part of the originating auction")]
    UnknownEntityReference { path: Path, id: String },
}

impl Error {
    /// Name of the error kind, e.g. `"MissingRequiredField"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MalformedJson(_) | Self::AmbiguousDocumentKind => None,
            Self::MissingRequiredField(path)
            | Self::MalformedNumber(path)
            | Self::NumberTooLarge(path)
            | Self::EmptyIdentifier(path)
            | Self::ExecutionBoundsViolation(path)
            | Self::TypeMismatch { path, .. }
            | Self::UnknownEnumVariant { path, .. }
            | Self::VariantShapeMismatch { path, .. }
            | Self::UnknownTokenReference { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::UnknownEntityReference { path, .. } => Some(path),
        }
    }

    pub(crate) fn number(err: number::Error, path: &Path) -> Self {
        match err {
            number::Error::Malformed => Self::MalformedNumber(path.clone()),
            number::Error::TooLarge => Self::NumberTooLarge(path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        let path = Path::root().join("orders").join("0").join("sell_token");
        assert_eq!(path.as_str(), "orders.0.sell_token");
        assert_eq!(path, Path::from("orders.0.sell_token"));
        assert_eq!(Path::root().to_string(), "<root>");
        assert_eq!(Path::root().join(3).as_str(), "3");
    }

    #[test]
    fn kind_and_path() {
        let err = Error::MissingRequiredField("metadata.native_token".into());
        assert_eq!(err.kind(), "MissingRequiredField");
        assert_eq!(err.path(), Some(&Path::from("metadata.native_token")));
        assert_eq!(
            err.to_string(),
            "missing required field metadata.native_token"
        );

        assert_eq!(Error::AmbiguousDocumentKind.kind(), "AmbiguousDocumentKind");
        assert_eq!(Error::AmbiguousDocumentKind.path(), None);
    }
}
