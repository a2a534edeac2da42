use {
    auction_tool::{Args, run},
    batch_auction::schema::{example_instance, example_solution},
    clap::Parser,
    serde_json::{Value, json},
    std::{fs, path::Path},
    tempfile::TempDir,
};

fn write(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, value.to_string()).unwrap();
    path.display().to_string()
}

fn execute<'a>(args: impl IntoIterator<Item = &'a str>) -> anyhow::Result<String> {
    let args = Args::parse_from(std::iter::once("auction-tool").chain(args));
    let mut out = Vec::new();
    run(args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn validates_problem() {
    let dir = TempDir::new().unwrap();
    let problem = write(&dir, "problem.json", &example_instance());

    let output = execute(["validate", &problem]).unwrap();
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        [
            "valid problem",
            "ignored amms.01.mandatory",
            "ignored amms.02.mandatory",
            "ignored amms.03.mandatory",
            "ignored amms.04.mandatory",
        ]
    );
}

#[test]
fn validates_solution_alone_and_in_context() {
    let dir = TempDir::new().unwrap();
    let problem = write(&dir, "problem.json", &example_instance());
    let solution = write(&dir, "solution.json", &example_solution());

    let alone = execute(["validate", &solution]).unwrap();
    assert!(alone.starts_with("valid solution\n"));
    assert!(alone.contains("warning execution_bounds check requires context"));

    let in_context = execute(["validate", &solution, "--problem", &problem]).unwrap();
    assert_eq!(in_context, "valid solution\n");
}

#[test]
fn rejects_solution_exceeding_orders() {
    let dir = TempDir::new().unwrap();
    let problem = write(&dir, "problem.json", &example_instance());
    let mut solution = example_solution();
    solution["orders"]["0"]["exec_sell_amount"] = json!("1");
    let solution = write(&dir, "solution.json", &solution);

    let err = execute(["validate", &solution, "--problem", &problem]).unwrap_err();
    assert!(format!("{err:#}").contains("orders.0"), "{err:#}");
}

#[test]
fn rejects_ambiguous_document() {
    let dir = TempDir::new().unwrap();
    let document = write(&dir, "document.json", &json!({ "metadata": {}, "prices": {} }));
    assert!(execute(["validate", &document]).is_err());
}

#[test]
fn missing_file() {
    let err = execute(["validate", "/nonexistent/problem.json"]).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn limits_are_applied() {
    let dir = TempDir::new().unwrap();
    let problem = write(&dir, "problem.json", &example_instance());
    assert!(execute(["validate", &problem]).is_ok());
    assert!(execute(["--max-bigint-digits", "5", "validate", &problem]).is_err());
}

#[test]
fn normalizes_with_sorted_keys() {
    let dir = TempDir::new().unwrap();
    let mut problem = example_instance();
    let tokens = problem["tokens"].as_object().unwrap();
    problem["tokens"] = tokens
        .iter()
        .rev()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let path = write(&dir, "problem.json", &problem);

    let output = execute(["normalize", &path, "--sort-keys"]).unwrap();
    let normalized = serde_json::from_str::<Value>(&output).unwrap();
    let keys = normalized["tokens"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(normalized["metadata"], example_instance()["metadata"]);
}

#[test]
fn describes_format() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("openapi.json");

    assert_eq!(execute(["describe", "--output", &output.display().to_string()]).unwrap(), "");
    let document = serde_json::from_str::<Value>(&fs::read_to_string(Path::new(&output)).unwrap())
        .unwrap();
    assert_eq!(document["openapi"], "3.0.3");
    assert!(document["components"]["schemas"]["BatchAuction"].is_object());

    let stdout = execute(["describe"]).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&stdout).unwrap(), document);
}
