use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handicap_stats::api::{build_router, state::AppState};
use handicap_stats::calculate::{
    compute_grouped_handicap, compute_head_to_head, compute_scope_breakdown,
    compute_team_handicap, round2,
};
use handicap_stats::config::AppConfig;
use handicap_stats::models::{
    GroupBy, HandicapRange, LeagueId, PatchId, TeamHandicapSummary, TeamId,
};
use handicap_stats::storage::{
    load_matches, read_match_export, EntityType, JsonlWriter, MatchQuery, NameLookup,
    StorageConfig,
};

#[derive(Parser)]
#[command(name = "handicap-stats")]
#[command(about = "Kill-score handicap analysis for professional Dota 2 matches")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Handicap table for a single team
    Team {
        team: u64,

        /// Only matches in this league
        #[arg(long)]
        league: Option<u64>,

        /// Only matches on this patch
        #[arg(long)]
        patch: Option<u64>,

        /// Only matches started in this year
        #[arg(long)]
        year: Option<i32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Handicap tables for a team split by league or patch
    Grouped {
        team: u64,

        /// Grouping dimension: league or patch
        #[arg(long, default_value = "league")]
        by: GroupBy,

        #[arg(long)]
        year: Option<i32>,

        /// Show at most this many groups
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Handicap tables for every team on a patch
    Patch {
        patch: u64,

        #[arg(long)]
        league: Option<u64>,

        /// Show the top N teams by match count
        #[arg(long, default_value = "10")]
        limit: usize,

        #[arg(long)]
        json: bool,
    },

    /// Direct results between two teams
    HeadToHead {
        team_a: u64,
        team_b: u64,

        #[arg(long)]
        league: Option<u64>,

        #[arg(long)]
        patch: Option<u64>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Import a JSON array of match records into the data directory
    Import {
        file: PathBuf,

        /// Append to existing matches instead of replacing them
        #[arg(long)]
        append: bool,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting handicap-stats v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let range = config.handicap.build_range()?;
    tracing::debug!(handicaps = ?range.labels(), "Handicap range ready");

    match cli.command {
        Commands::Serve { host, port } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let app = build_router(AppState::new(storage, range), &server);
            let addr = format!("{}:{}", server.host, server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Team {
            team,
            league,
            patch,
            year,
            json,
        } => {
            let team = TeamId::new(team);
            let query = MatchQuery::for_team(team)
                .with_league(league.map(LeagueId::new))
                .with_patch(patch.map(PatchId::new))
                .with_year(year);
            let matches = load_matches(&storage, &query)?;
            let lookup = NameLookup::load(&storage)?;
            let summary = compute_team_handicap(&matches, team, &range);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&lookup.team_name(team), &summary, &range);
            }
        }
        Commands::Grouped {
            team,
            by,
            year,
            limit,
            json,
        } => {
            if by == GroupBy::Team {
                bail!("--by must be league or patch");
            }
            let team = TeamId::new(team);
            let matches = load_matches(&storage, &MatchQuery::for_team(team).with_year(year))?;
            let lookup = NameLookup::load(&storage)?;
            let grouped = compute_grouped_handicap(&matches, team, by, &range);
            let entries = grouped.top(limit.unwrap_or(grouped.len()));

            if json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                println!("{} by {}", lookup.team_name(team), by);
                for entry in entries {
                    let name = match by {
                        GroupBy::Patch => lookup.patch_name(PatchId::new(entry.key)),
                        _ => lookup.league_name(LeagueId::new(entry.key)),
                    };
                    println!();
                    print_summary(&name, &entry.summary, &range);
                }
            }
        }
        Commands::Patch {
            patch,
            league,
            limit,
            json,
        } => {
            let patch = PatchId::new(patch);
            let query = MatchQuery::default()
                .with_patch(Some(patch))
                .with_league(league.map(LeagueId::new));
            let matches = load_matches(&storage, &query)?;
            let lookup = NameLookup::load(&storage)?;
            let grouped = compute_scope_breakdown(&matches, GroupBy::Team, &range);
            let entries = grouped.top(limit);

            if json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                println!(
                    "{}: {} matches, {} teams",
                    lookup.patch_name(patch),
                    matches.len(),
                    grouped.len()
                );
                for entry in entries {
                    println!();
                    print_summary(&lookup.team_name(entry.team_id), &entry.summary, &range);
                }
            }
        }
        Commands::HeadToHead {
            team_a,
            team_b,
            league,
            patch,
            year,
            json,
        } => {
            if team_a == team_b {
                bail!("team_a and team_b must be different teams");
            }
            let (team_a, team_b) = (TeamId::new(team_a), TeamId::new(team_b));
            let query = MatchQuery::for_team(team_a)
                .with_league(league.map(LeagueId::new))
                .with_patch(patch.map(PatchId::new))
                .with_year(year);
            let matches = load_matches(&storage, &query)?;
            let tally = compute_head_to_head(&matches, team_a, team_b);

            if json {
                println!("{}", serde_json::to_string_pretty(&tally)?);
            } else {
                let lookup = NameLookup::load(&storage)?;
                println!(
                    "{} {} - {} {} ({} matches)",
                    lookup.team_name(team_a),
                    tally.team_a_wins,
                    tally.team_b_wins,
                    lookup.team_name(team_b),
                    tally.total_matches
                );
            }
        }
        Commands::Import { file, append } => {
            let records = read_match_export(&file)?;
            let writer = JsonlWriter::for_entity(&storage, EntityType::Match);
            let count = if append {
                writer.append_batch(&records)?
            } else {
                writer.write_all(&records)?
            };
            tracing::info!("Imported {} matches from {:?}", count, file);
        }
    }

    Ok(())
}

fn print_summary(title: &str, summary: &TeamHandicapSummary, range: &HandicapRange) {
    println!(
        "{}: {} matches, {}-{} ({:.2}%), avg kill diff {:+.2}, avg duration {:.0}s",
        title,
        summary.total_matches,
        summary.wins,
        summary.losses,
        summary.win_rate(),
        round2(summary.avg_kill_differential),
        summary.avg_duration,
    );
    println!(
        "{:>8} {:>16} {:>16} {:>16}",
        "handicap", "victory", "loss", "general"
    );
    for row in summary.rows(range) {
        println!(
            "{:>8} {:>6} {:>8.2}% {:>6} {:>8.2}% {:>6} {:>8.2}%",
            row.label,
            row.victory_count,
            row.victory_pct,
            row.loss_count,
            row.loss_pct,
            row.general_count,
            row.general_pct,
        );
    }
}
