//! line-check - Verify a Linecast setup before scheduling it

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use liblinecast::messages::text_message;
use liblinecast::platforms::line::LineClient;
use liblinecast::platforms::Broadcaster;
use liblinecast::service::validation::validate_file;
use liblinecast::{logging, ChannelToken, Config};
use serde::Serialize;

const TEST_MESSAGE: &str = "[TEST] This is a test message from the automatic posting system.";

#[derive(Parser, Debug)]
#[command(name = "line-check")]
#[command(version, about = "Verify configuration and content before scheduling line-post")]
#[command(long_about = r#"Verify configuration and content before scheduling line-post.

CHECKS:
    Configuration  config.toml (if any) parses and the token variable is set
    Content file   JSON array of objects, each with "text", dates as YYYY-MM-DD
    LINE API       (--live only) broadcasts a test message to ALL friends

EXIT CODES:
    0 - Every check that ran passed
    1 - At least one check failed
"#)]
struct Cli {
    /// Content file (defaults to content.path from config, then ./content.json)
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Also broadcast a test message (really delivered to every friend)
    #[arg(long)]
    live: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    passed: bool,
    details: Vec<String>,
}

impl CheckResult {
    fn from_result(name: &'static str, result: Result<Vec<String>>) -> Self {
        match result {
            Ok(details) => Self {
                name,
                passed: true,
                details,
            },
            Err(e) => Self {
                name,
                passed: false,
                details: vec![format!("{:#}", e)],
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let results = run_checks(&cli).await;
    let all_passed = results.iter().all(|r| r.passed);

    match cli.format {
        OutputFormat::Json => {
            let report = serde_json::json!({ "passed": all_passed, "checks": results });
            match serde_json::to_string_pretty(&report) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        OutputFormat::Text => print_text(&results, all_passed),
    }

    if !all_passed {
        std::process::exit(1);
    }
}

async fn run_checks(cli: &Cli) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let config = Config::load();
    let content_path = cli.content.clone().unwrap_or_else(|| match &config {
        Ok(config) => config.content_path(),
        Err(_) => Config::default().content_path(),
    });

    let config = config.context("failed to load configuration");
    results.push(CheckResult::from_result(
        "Configuration",
        config.as_ref().map_err(|e| anyhow::anyhow!("{:#}", e)).and_then(check_config),
    ));

    tracing::debug!("Validating content file {}", content_path.display());
    results.push(CheckResult::from_result(
        "Content file",
        check_content(&content_path),
    ));

    if cli.live {
        let live = match &config {
            Ok(config) => check_live(config).await,
            Err(_) => Err(anyhow::anyhow!("skipped, configuration did not load")),
        };
        results.push(CheckResult::from_result("LINE API", live));
    }

    results
}

fn check_config(config: &Config) -> Result<Vec<String>> {
    ChannelToken::from_env(config)?;
    Ok(vec![
        format!("content file: {}", config.content_path().display()),
        format!("endpoint: {}", config.broadcast_url()),
        format!("{} is set", config.line.token_env),
    ])
}

fn check_content(path: &Path) -> Result<Vec<String>> {
    let report = validate_file(path);
    let mut details: Vec<String> = report
        .warnings
        .iter()
        .map(|w| format!("warning: {}", w))
        .collect();

    if !report.valid {
        let mut issues: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        issues.append(&mut details);
        anyhow::bail!("{} is invalid: {}", path.display(), issues.join("; "));
    }

    details.insert(
        0,
        format!("{} post(s) found in {}", report.item_count, path.display()),
    );
    Ok(details)
}

async fn check_live(config: &Config) -> Result<Vec<String>> {
    let token = ChannelToken::from_env(config)?;
    let client = LineClient::new(config, token)?;

    let response = client
        .broadcast(&[text_message(TEST_MESSAGE)])
        .await
        .context("test broadcast failed")?;

    Ok(vec![format!(
        "test message accepted with HTTP {}: {}",
        response.status, response.body
    )])
}

fn print_text(results: &[CheckResult], all_passed: bool) {
    for result in results {
        println!("--- {} ---", result.name);
        for detail in &result.details {
            println!("  {}", detail);
        }
    }

    println!();
    println!("=== Summary ===");
    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!("{}: {}", status, result.name);
    }

    if all_passed {
        println!("\nAll checks passed.");
    } else {
        println!("\nSome checks failed. See the messages above.");
    }
}
