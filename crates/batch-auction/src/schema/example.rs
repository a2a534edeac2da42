use serde_json::Value;

const PROBLEM: &str = include_str!("problem.json");
const SOLUTION: &str = include_str!("solution.json");

/// A complete batch auction instance.
pub fn example_instance() -> Value {
    parse(PROBLEM)
}

/// A settled batch auction for [`example_instance`].
pub fn example_solution() -> Value {
    parse(SOLUTION)
}

/// The embedded examples are checked by the tests below. Numbers are parsed
/// from text so that they keep their exact digits.
fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{Config, error::Path, parse_problem, parse_solution_in_context, validate_against},
    };

    #[test]
    fn examples_are_json() {
        assert!(serde_json::from_str::<Value>(PROBLEM).is_ok());
        assert!(serde_json::from_str::<Value>(SOLUTION).is_ok());
    }

    #[test]
    fn example_instance_is_valid() {
        let problem = parse_problem(PROBLEM, &Config::default()).unwrap();
        assert!(problem.report.warnings.is_empty());
        assert_eq!(
            problem.report.ignored,
            ["01", "02", "03", "04"]
                .map(|id| Path::from(format!("amms.{id}.mandatory")))
                .to_vec()
        );
        assert_eq!(problem.value.metadata.auction_id, "1");
        assert_eq!(problem.value.metadata.gas_price.to_string(), "4850000000.0");
    }

    #[test]
    fn example_solution_settles_example_instance() {
        let config = Config::default();
        let problem = parse_problem(PROBLEM, &config).unwrap().into_inner();
        let solution = parse_solution_in_context(SOLUTION, &problem, &config).unwrap();
        assert!(solution.report.is_clean());
        assert!(validate_against(&solution.value, &problem).is_ok());
    }

    #[test]
    fn examples_keep_exact_numbers() {
        let example = example_instance();
        assert_eq!(
            example["tokens"]["0x6b175474e89094c44da98b954eedeac495271d0f"]["external_price"]
                .to_string(),
            "0.00021508661247926934"
        );
    }
}
