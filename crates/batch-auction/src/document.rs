use {
    crate::{
        auction::BatchAuction,
        error::{Error, Path},
        reader::mismatch,
        solution::SettledBatchAuction,
    },
    serde::Serialize,
    serde_json::Value,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
    Problem,
    Solution,
}

/// Tells problems and solutions apart by their root keys.
pub fn classify(value: &Value) -> Result<DocumentKind, Error> {
    let Value::Object(root) = value else {
        return Err(mismatch(&Path::root(), "object", value));
    };
    match (root.contains_key("metadata"), root.contains_key("prices")) {
        (true, false) => Ok(DocumentKind::Problem),
        (false, true) => Ok(DocumentKind::Solution),
        _ => Err(Error::AmbiguousDocumentKind),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Problem(BatchAuction),
    Solution(SettledBatchAuction),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Problem(_) => DocumentKind::Problem,
            Self::Solution(_) => DocumentKind::Solution,
        }
    }

    /// Sorts every keyed map of the document by key.
    pub fn sort_keys(&mut self) {
        match self {
            Self::Problem(problem) => problem.sort_keys(),
            Self::Solution(solution) => solution.sort_keys(),
        }
    }
}
