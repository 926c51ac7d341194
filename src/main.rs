use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use canvas_extract::core::aggregator::CourseAggregator;
use canvas_extract::core::config::{CanvasConfig, parse_timezone, validate_request};
use canvas_extract::core::report::{ReportFormat, build_report, render};
use canvas_extract::error::{CanvasError, ErrorKind};
use canvas_extract::http::CanvasClient;
use canvas_extract::utils::input::{input_lines, parse_course_ids};
use clap::{Parser, ValueEnum};

const MISSING_INPUT: &str = "Debe ingresar los IDs de cursos y el API Token para continuar.";

/// Extractor de información de cursos Canvas.
///
/// Reads `URL`, `TOKEN`, `CLEAN_URL` and `TIMEZONE` from the environment or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "canvas-extract", version, about)]
struct Cli {
    /// Course ids, separated by commas and/or whitespace
    ids: Vec<String>,

    /// Read course ids from a file as well
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format: table, markdown or json
    #[arg(long, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// API root, overrides URL
    #[arg(long)]
    url: Option<String>,

    /// Bearer token, overrides TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Public URL for course links, overrides CLEAN_URL
    #[arg(long)]
    clean_url: Option<String>,

    /// IANA time zone for dates, overrides TIMEZONE
    #[arg(long)]
    timezone: Option<String>,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "canvas_extract=warn",
        1 => "canvas_extract=info",
        2 => "canvas_extract=debug",
        _ => "canvas_extract=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CanvasConfig> {
    let mut config = CanvasConfig::from_env()?;

    let flag = |value: &Option<String>| value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
    if let Some(url) = flag(&cli.url) {
        config.base_url = Some(url);
    }
    if let Some(token) = flag(&cli.token) {
        config.token = Some(token);
    }
    if let Some(clean_url) = flag(&cli.clean_url) {
        config.clean_url = Some(clean_url);
    }
    if let Some(name) = flag(&cli.timezone) {
        config.timezone = parse_timezone(&name)?;
    }
    Ok(config)
}

fn collect_input(cli: &Cli) -> anyhow::Result<String> {
    let mut text = cli.ids.join(" ");
    if let Some(path) = &cli.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("no se pudo leer {}", path.display()))?;
        text.push('\n');
        text.push_str(&contents);
    }
    if text.trim().is_empty() {
        text = input_lines("Ingrese IDs de cursos:")?;
    }
    Ok(text)
}

/// User mistakes print the form message and exit 2; configuration errors abort.
fn reject(err: CanvasError) -> anyhow::Result<ExitCode> {
    if err.kind == ErrorKind::Validation {
        log::debug!("{}", err);
        eprintln!("{}", MISSING_INPUT);
        return Ok(ExitCode::from(2));
    }
    Err(err.into())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = load_config(&cli)?;
    if let Err(err) = config.check_credentials() {
        return reject(err);
    }

    let course_ids = parse_course_ids(&collect_input(&cli)?);
    if let Err(err) = validate_request(&config, &course_ids) {
        return reject(err);
    }
    let client = CanvasClient::new(&config)?;

    let aggregator = CourseAggregator::new(&client, &config);
    let report = build_report(&aggregator, &course_ids).await;
    if report.error_count() > 0 {
        log::warn!("{} de {} cursos con error", report.error_count(), report.len());
    }

    print!("{}", render(&report, cli.format)?);
    Ok(ExitCode::SUCCESS)
}
