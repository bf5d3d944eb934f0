use std::io::{self, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jpsp_paths::puzzle::{self, DistanceTable};
use jpsp_paths::{GoalPriority, Outcome, Pathfinder, SearchConfig, reference};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "jpsp")]
#[command(about = "JPS+ grid preprocessing and pathfinding")]
struct Cmd {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Read a map from stdin and print its jump distance table
    Precompute,
    /// Read a search request from stdin and print the visited tiles
    Search {
        /// Give up after closing this many nodes
        #[arg(long)]
        max_expansions: Option<usize>,
        /// Give up after this many milliseconds
        #[arg(long)]
        time_limit_ms: Option<u64>,
        /// Pop a queued goal node immediately instead of on a cost tie
        #[arg(long)]
        eager_goal: bool,
        /// Check the path cost against a plain Dijkstra search
        #[arg(long)]
        verify: bool,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::WARN
    };
    SubscriberBuilder::default()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;

    let out = match cmd.action {
        Action::Precompute => precompute(&input)?,
        Action::Search {
            max_expansions,
            time_limit_ms,
            eager_goal,
            verify,
        } => {
            let mut config = SearchConfig::default();
            if let Some(n) = max_expansions {
                config = config.with_max_expansions(n);
            }
            if let Some(ms) = time_limit_ms {
                config = config.with_time_limit(Duration::from_millis(ms));
            }
            if eager_goal {
                config = config.with_goal_priority(GoalPriority::Always);
            }
            search(&input, config, verify)?
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn precompute(input: &str) -> Result<String> {
    let grid = puzzle::parse_map(input).context("parsing map")?;
    log::info!(
        "precomputed {}x{} map, {} passable tiles",
        grid.width(),
        grid.height(),
        grid.passable_count()
    );
    Ok(DistanceTable(&grid).to_string())
}

fn search(input: &str, config: SearchConfig, verify: bool) -> Result<String> {
    let request = puzzle::parse_search(input).context("parsing search request")?;
    let grid = request.build_grid().context("building grid")?;
    let report = Pathfinder::with_config(&grid, config)
        .search(request.source, request.goal)
        .with_context(|| format!("searching from {} to {}", request.source, request.goal))?;

    match &report.outcome {
        Outcome::Found(path) => log::info!(
            "path of cost {:.2} through {} jump points, {} nodes closed",
            path.cost(),
            path.waypoints().len(),
            report.visits.len()
        ),
        Outcome::NoPath => log::info!("no path, {} nodes closed", report.visits.len()),
        Outcome::Interrupted => log::warn!(
            "search stopped early after {} nodes",
            report.visits.len()
        ),
    }

    if verify && report.outcome != Outcome::Interrupted {
        let want = reference::shortest_cost(&grid, request.source, request.goal);
        let got = report.path().map(|p| p.cost());
        match (want, got) {
            (Some(w), Some(g)) if (w - g).abs() < 1e-9 => log::info!("verified cost {w:.2}"),
            (None, None) => log::info!("verified no path"),
            (want, got) => log::warn!("cost mismatch: dijkstra {want:?}, jps+ {got:?}"),
        }
    }

    Ok(report.to_string())
}
