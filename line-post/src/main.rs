//! line-post - Broadcast today's post to a LINE channel

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use liblinecast::platforms::line::LineClient;
use liblinecast::selection::{today_local, SelectionRule};
use liblinecast::service::{prepare, PostingService};
use liblinecast::{logging, ChannelToken, Config, LinecastError, Result};

#[derive(Parser, Debug)]
#[command(name = "line-post")]
#[command(version, about = "Broadcast today's post to a LINE channel")]
#[command(long_about = r#"Broadcast today's post to a LINE channel.

Reads a JSON array of posts, picks the one whose "date" is today or, when
none is pinned to today, the one at (day of year % number of posts), and
broadcasts its text and image to every friend of the channel.

Meant to be run once a day from cron or a CI schedule:

    0 9 * * *  LINE_CHANNEL_ACCESS_TOKEN=... line-post --content ~/posts/content.json

ENVIRONMENT:
    LINE_CHANNEL_ACCESS_TOKEN  Channel access token (required unless --dry-run)
    LINECAST_CONFIG            Path to config.toml
    LINECAST_LOG_FORMAT        text, json or pretty
    LINECAST_LOG_LEVEL         error, warn, info, debug, trace

EXIT CODES:
    0 - Broadcast accepted
    1 - Network failure or the API rejected the broadcast
    2 - Configuration error (missing token, unreadable config)
    3 - No content (file missing or malformed, nothing to send)
    4 - Invalid input
"#)]
struct Cli {
    /// Content file (defaults to content.path from config, then ./content.json)
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Post as if today were this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Show what would be sent without calling the API
    #[arg(long)]
    dry_run: bool,

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

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let content_path = cli.content.clone().unwrap_or_else(|| config.content_path());
    let today = match cli.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => today_local(),
    };

    if cli.dry_run {
        let post = prepare(&content_path, today)?;
        match cli.format {
            OutputFormat::Json => print_json(&post)?,
            OutputFormat::Text => {
                println!("Dry run for {} ({})", post.date, describe(post.selection));
                println!("{}", to_pretty(&serde_json::json!({ "messages": post.messages }))?);
            }
        }
        return Ok(());
    }

    // The token is checked before the content so a misconfigured job fails fast
    let token = ChannelToken::from_env(&config)?;
    let client = LineClient::new(&config, token)?;
    let service = PostingService::new(Arc::new(client));

    let outcome = service.post(&content_path, today).await?;
    tracing::info!("Posted {} ({})", outcome.post.date, describe(outcome.post.selection));

    match cli.format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => println!("Broadcast result: {}", outcome.response.body),
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        LinecastError::InvalidInput(format!("Invalid --date '{}', expected YYYY-MM-DD", s))
    })
}

fn describe(rule: SelectionRule) -> String {
    match rule {
        SelectionRule::ExactDate => "pinned to this date".to_string(),
        SelectionRule::DayOfYear { ordinal, index } => {
            format!("day {} of the year, post #{}", ordinal, index + 1)
        }
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LinecastError::InvalidInput(format!("Failed to serialize output: {}", e)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", to_pretty(value)?);
    Ok(())
}
