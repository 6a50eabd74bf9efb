//! scoring-replay: replays a recorded WebSocket log through the live scoring
//! core and prints the resulting match snapshot as JSON.

use std::path::PathBuf;

use clap::Parser;
use live_scoring::config::scoring::ScoringConfig;
use live_scoring::domain::ids::MatchId;
use live_scoring::replay::replay_file;
use tracing::info;

mod telemetry;

#[derive(Parser)]
#[command(name = "scoring-replay")]
#[command(about = "Replay newline-delimited WebSocket scoring messages")]
struct Args {
    /// File with one WebSocket JSON message per line
    log: PathBuf,

    /// Match public id to attach to the replayed session
    #[arg(long, default_value = "replay")]
    match_id: String,

    /// Print the summary counters alongside the snapshot
    #[arg(long)]
    summary: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Raise log verbosity (-v debug, -vv trace); ignored when RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    let config = match ScoringConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(log = %args.log.display(), sport = %config.sport, "replaying scoring log");
    let (store, summary) = match replay_file(&args.log, MatchId::new(args.match_id), &config).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Failed to replay {}: {e}", args.log.display());
            std::process::exit(1);
        }
    };

    let rendered = serde_json::to_value(store.snapshot())
        .and_then(|snapshot| {
            if args.summary {
                Ok(serde_json::json!({
                    "snapshot": snapshot,
                    "summary": serde_json::to_value(&summary)?,
                }))
            } else {
                Ok(snapshot)
            }
        })
        .and_then(|output| {
            if args.pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
        });
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("❌ Failed to render snapshot: {e}");
            std::process::exit(1);
        }
    }

    if !summary.is_clean() {
        eprintln!(
            "⚠️  {} line(s) rejected, {} malformed event(s)",
            summary.rejected_lines, summary.malformed
        );
        std::process::exit(1);
    }
}
