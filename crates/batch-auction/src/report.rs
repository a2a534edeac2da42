use {crate::error::Path, number::Decimal, std::fmt};

/// Observations collected while validating a document that don't reject it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Paths of unknown fields that were kept as opaque side data.
    pub ignored: Vec<Path>,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.ignored.is_empty() && self.warnings.is_empty()
    }

    pub fn extend(&mut self, other: Report) {
        self.ignored.extend(other.ignored);
        self.warnings.extend(other.warnings);
    }

    pub(crate) fn ignore(&mut self, path: Path) {
        tracing::debug!(%path, "ignoring unknown field");
        self.ignored.push(path);
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        tracing::warn!(%warning, "accepted document with warning");
        self.warnings.push(warning);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The weights of a weighted product pool don't sum to 1 (within 1e-9).
    WeightSum { path: Path, sum: Decimal },
    /// A check needs the originating problem and was skipped.
    ContextRequired(Check),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightSum { path, sum } => write!(f, "{path}: weights sum to {sum}"),
            Self::ContextRequired(check) => write!(f, "{check} check requires context"),
        }
    }
}

/// Solution checks that need more than the solution itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Check {
    TokenReferences,
    ExecutionBounds,
    ReserveMembership,
    PlanPositions,
}

/// A validated value together with its [`Report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validated<T> {
    pub value: T,
    pub report: Report,
}

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated {
            value: f(self.value),
            report: self.report,
        }
    }
}
