use {
    crate::cli::{Args, Command},
    anyhow::{Context, Result},
    batch_auction::{Config, DocumentKind, Report},
    clap::Parser,
    std::{fs, io::Write, path::Path, process::ExitCode},
};

pub fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Args::parse_from(args);
    // Logs go to stderr so that stdout only carries command output.
    let config = observe::Config::new(&args.log, Some(tracing::Level::TRACE), args.log_json);
    observe::tracing::initialize(&config);
    tracing::info!("running auction tool with {args:#?}");

    match run(args, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Executes the parsed command, writing its output to `out`.
pub fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let config = Config {
        limits: (&args.limits).into(),
    };
    match args.command {
        Command::Describe { output } => describe(output.as_deref(), out),
        Command::Validate { path, problem } => validate(&path, problem.as_deref(), &config, out),
        Command::Normalize { path, sort_keys } => normalize(&path, sort_keys, &config, out),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn describe(output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let document = serde_json::to_string_pretty(&batch_auction::schema::openapi())?;
    match output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(out, "{document}")?,
    }
    Ok(())
}

fn validate(
    path: &Path,
    problem: Option<&Path>,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let json = read(path)?;
    let (kind, report) = match problem {
        Some(problem_path) => {
            let problem = batch_auction::parse_problem(&read(problem_path)?, config)
                .with_context(|| format!("invalid problem {}", problem_path.display()))?;
            let solution =
                batch_auction::parse_solution_in_context(&json, &problem.value, config)
                    .with_context(|| format!("invalid solution {}", path.display()))?;
            (DocumentKind::Solution, solution.report)
        }
        None => {
            let document = batch_auction::parse_document(&json, config)
                .with_context(|| format!("invalid document {}", path.display()))?;
            (document.value.kind(), document.report)
        }
    };
    tracing::debug!(
        %kind,
        ignored = report.ignored.len(),
        warnings = report.warnings.len(),
        "validated document"
    );
    write_report(kind, &report, out)
}

fn write_report(kind: DocumentKind, report: &Report, out: &mut impl Write) -> Result<()> {
    writeln!(out, "valid {kind}")?;
    for path in &report.ignored {
        writeln!(out, "ignored {path}")?;
    }
    for warning in &report.warnings {
        writeln!(out, "warning {warning}")?;
    }
    Ok(())
}

fn normalize(path: &Path, sort_keys: bool, config: &Config, out: &mut impl Write) -> Result<()> {
    let mut document = batch_auction::parse_document(&read(path)?, config)
        .with_context(|| format!("invalid document {}", path.display()))?
        .into_inner();
    if sort_keys {
        document.sort_keys();
    }
    writeln!(out, "{}", batch_auction::to_json_pretty(&document)?)?;
    Ok(())
}
