//! Schema and validator of the batch auction interchange format.
//!
//! A coordinator sends a batch auction instance (the problem) to a solver,
//! which answers with a settled batch auction (the solution). Documents are
//! untrusted JSON: they are checked structurally, then for invariants spanning
//! several fields, and turned into the typed entities of [`auction`] and
//! [`solution`]. Entities serialize back to the same JSON shape.

pub mod auction;
mod checks;
mod context;
pub mod document;
mod error;
pub mod ids;
mod reader;
mod report;
pub mod schema;
pub mod serialize;
pub mod solution;

pub use {
    self::{
        auction::BatchAuction,
        context::validate_against,
        document::{Document, DocumentKind, classify},
        error::{Error, Path},
        reader::Extra,
        report::{Check, Report, Validated, Warning},
        solution::SettledBatchAuction,
    },
    number::{BigInt, Decimal, Limits},
};
use {
    reader::{Decode, Reader},
    serde::Serialize,
    serde_json::Value,
};

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub limits: Limits,
}

fn parse_json(json: &str) -> Result<Value, Error> {
    serde_json::from_str(json).map_err(|err| Error::MalformedJson(err.to_string()))
}

fn read_problem(value: &Value, config: &Config) -> Result<Validated<BatchAuction>, Error> {
    let mut reader = Reader::new(&config.limits);
    let problem = BatchAuction::decode(value, &Path::root(), &mut reader)?;
    problem.validate()?;
    Ok(Validated {
        value: problem,
        report: reader.into_report(),
    })
}

fn read_solution(value: &Value, config: &Config) -> Result<Validated<SettledBatchAuction>, Error> {
    let mut reader = Reader::new(&config.limits);
    let solution = SettledBatchAuction::decode(value, &Path::root(), &mut reader)?;
    Ok(Validated {
        value: solution,
        report: reader.into_report(),
    })
}

/// Parses and validates a batch auction instance.
pub fn parse_problem(json: &str, config: &Config) -> Result<Validated<BatchAuction>, Error> {
    read_problem(&parse_json(json)?, config)
}

/// Parses and validates a settled batch auction on its own. Checks that need
/// the originating auction are skipped and reported as warnings.
pub fn parse_solution(
    json: &str,
    config: &Config,
) -> Result<Validated<SettledBatchAuction>, Error> {
    let mut solution = read_solution(&parse_json(json)?, config)?;
    context::standalone(&solution.value, &mut solution.report)?;
    Ok(solution)
}

/// Parses a settled batch auction and validates it against the auction it
/// settles.
pub fn parse_solution_in_context(
    json: &str,
    problem: &BatchAuction,
    config: &Config,
) -> Result<Validated<SettledBatchAuction>, Error> {
    let mut solution = read_solution(&parse_json(json)?, config)?;
    let report = validate_against(&solution.value, problem)?;
    solution.report.extend(report);
    Ok(solution)
}

/// Parses a document of either kind, telling them apart by their root keys.
pub fn parse_document(json: &str, config: &Config) -> Result<Validated<Document>, Error> {
    let value = parse_json(json)?;
    let kind = classify(&value)?;
    tracing::debug!(%kind, "classified document");
    match kind {
        DocumentKind::Problem => Ok(read_problem(&value, config)?.map(Document::Problem)),
        DocumentKind::Solution => {
            let mut solution = read_solution(&value, config)?;
            context::standalone(&solution.value, &mut solution.report)?;
            Ok(solution.map(Document::Solution))
        }
    }
}

/// Serializes an entity to compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serializes an entity to indented JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
