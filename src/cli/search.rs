//! Search command handler
//!
//! Types the query into a session, waits for the debounce and prints the
//! suggestion panel.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_resolver, LocationCandidate};
use crate::session::PosterSession;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place to look up
    pub query: String,

    /// Print candidates as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let candidates = lookup(&config, &args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else if candidates.is_empty() {
        eprintln!("No places found for '{}'", args.query.trim());
    } else {
        print!("{}", render_panel(&candidates));
    }

    Ok(())
}

/// Resolve `query` through a headless session
pub(crate) async fn lookup(config: &Config, query: &str) -> Result<Vec<LocationCandidate>> {
    let mut session = PosterSession::headless(get_resolver(config)?, config);
    session.type_text(query);
    session.settle().await;
    Ok(session.suggestions().to_vec())
}

/// Numbered list, secondary line indented under its entry
fn render_panel(candidates: &[LocationCandidate]) -> String {
    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, candidate.display_name()));
        if let Some(secondary) = candidate.secondary_line() {
            out.push_str(&format!("    {}\n", secondary));
        }
    }
    out
}
