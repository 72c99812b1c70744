//! Hemicycle CLI - inspect legislative decisions and officials from fixture data

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use hemicycle::config::{default_config_path, load_config, write_config, HemicycleConfig};
use hemicycle::domain::{DecisionFilters, DecisionId};
use hemicycle::fixtures::{seed_test_database, TestData};
use hemicycle::provider::provider_from_config;
use hemicycle::query::migrate;
use hemicycle::repository::{SqlDecisionsRepository, SqlElectedOfficialsRepository};
use hemicycle::service::{DecisionsService, ElectedOfficialsService};
use hemicycle::{ui, InMemoryDatabaseProvider, Table, Value};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hemicycle")]
#[command(version)]
#[command(about = "Browse legislative decisions, votes and elected officials")]
#[command(long_about = r#"
Hemicycle loads a JSON fixture bundle into an in-memory database and runs
the same repository queries the API would.

Example usage:
  hemicycle decisions --fixtures fixtures/sample.json --search climate
  hemicycle decision --fixtures fixtures/sample.json --id d-climate --votes
  hemicycle tables --fixtures fixtures/sample.json --only decision
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to hemicycle.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default hemicycle.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Query(QueryCommand),
}

/// Commands that read a fixture bundle into the in-memory database
#[derive(Subcommand)]
enum QueryCommand {
    /// List decisions, optionally filtered
    Decisions {
        #[command(flatten)]
        source: FixtureArgs,

        /// Only decisions of this assembly
        #[arg(short, long)]
        assembly: Option<String>,

        /// Earliest decision date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,

        /// Latest decision date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,

        /// Case-insensitive text search over title, summary and full text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one decision
    Decision {
        #[command(flatten)]
        source: FixtureArgs,

        /// Decision ID
        #[arg(long)]
        id: String,

        /// Also list individual votes
        #[arg(long)]
        votes: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List elected officials
    Officials {
        #[command(flatten)]
        source: FixtureArgs,

        /// Only officials of this assembly
        #[arg(short, long)]
        assembly: Option<String>,

        /// Only officials of this party ID
        #[arg(short, long)]
        party: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how many rows each table holds after seeding
    Tables {
        #[command(flatten)]
        source: FixtureArgs,

        /// Only count this table (e.g. decision, individual_vote)
        #[arg(long)]
        only: Option<String>,
    },
}

#[derive(Args)]
struct FixtureArgs {
    /// Fixture bundle to load
    #[arg(short, long)]
    fixtures: PathBuf,
}

impl QueryCommand {
    fn fixtures(&self) -> &Path {
        match self {
            Self::Decisions { source, .. }
            | Self::Decision { source, .. }
            | Self::Officials { source, .. }
            | Self::Tables { source, .. } => &source.fixtures,
        }
    }
}

fn parse_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    Value::from(raw)
        .as_date()
        .with_context(|| format!("invalid date {raw:?} (expected YYYY-MM-DD or RFC 3339)"))
}

fn seed(provider: &InMemoryDatabaseProvider, fixtures: &Path) -> anyhow::Result<()> {
    let data = TestData::load(fixtures)
        .with_context(|| format!("failed to load fixtures from {}", fixtures.display()))?;
    seed_test_database(provider, &data);
    tracing::info!("Seeded fixtures from {}", fixtures.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(default_config_path);
            write_config(&path, &HemicycleConfig::default(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Query(command) => {
            let config = load_config(cli.config.as_deref())?.unwrap_or_default();
            let provider = provider_from_config(&config)?;
            let db = provider.get_db();
            migrate(&db).await?;

            let outcome = run(command, &provider).await;
            db.destroy().await?;
            outcome
        }
    }
}

async fn run(command: QueryCommand, provider: &InMemoryDatabaseProvider) -> anyhow::Result<ExitCode> {
    seed(provider, command.fixtures())?;
    let db = provider.get_db();
    let decisions = DecisionsService::new(Arc::new(SqlDecisionsRepository::new(db.clone())));
    let officials = ElectedOfficialsService::new(Arc::new(SqlElectedOfficialsRepository::new(db)));

    match command {
        QueryCommand::Decisions { assembly, from, to, search, json, .. } => {
            let filters = DecisionFilters {
                assembly_id: assembly,
                date_from: from.as_deref().map(parse_date).transpose()?,
                date_to: to.as_deref().map(parse_date).transpose()?,
                party_id: None,
                search_term: search,
            };

            let found = decisions.find_all(&filters).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else if found.is_empty() {
                ui::warn("No decisions match.");
            } else {
                let scope = if filters.is_empty() { "decision(s)" } else { "matching decision(s)" };
                ui::header(&format!("{} {}", found.len(), scope));
                println!("{}", ui::decisions_table(&found));
            }
        }

        QueryCommand::Decision { id, votes, json, .. } => {
            let id = DecisionId::new(id);
            let decision = match decisions.find_by_id(&id).await {
                Ok(decision) => decision,
                Err(e) if e.is_not_found() => {
                    ui::error(&e.to_string());
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            };
            let cast = if votes {
                decisions.find_votes_by_decision_id(&id).await?
            } else {
                Vec::new()
            };

            if json {
                let body = serde_json::json!({ "decision": decision, "votes": cast });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                ui::header(&decision.title);
                ui::field("Date", &decision.date.format("%Y-%m-%d").to_string());
                ui::field("Assembly", &decision.assembly_id);
                ui::field("Source", &decision.source);
                ui::section("Summary");
                println!("{}", decision.summary);
                ui::section("Results");
                ui::tally(&decision.results_overview);
                ui::outcome(decision.results_overview.is_passed);
                if votes {
                    ui::section("Votes");
                    println!("{}", ui::votes_table(&cast));
                }
            }
        }

        QueryCommand::Officials { assembly, party, json, .. } => {
            let found = match (&assembly, &party) {
                (Some(assembly), Some(party)) => {
                    let mut found = officials.find_by_assembly(assembly).await?;
                    found.retain(|o| o.party_id.as_ref() == Some(party));
                    found
                }
                (Some(assembly), None) => officials.find_by_assembly(assembly).await?,
                (None, Some(party)) => officials.find_by_party(party).await?,
                (None, None) => officials.find_all().await?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else if found.is_empty() {
                ui::warn("No elected officials match.");
            } else {
                ui::header(&format!("{} elected official(s)", found.len()));
                println!("{}", ui::officials_table(&found));
            }
        }

        QueryCommand::Tables { only, .. } => {
            let tables = match only {
                Some(name) => vec![name.parse::<Table>()?],
                None => Table::all().to_vec(),
            };
            let counts: Vec<(Table, usize)> = tables
                .into_iter()
                .map(|table| (table, provider.count(table)))
                .collect();
            ui::header("Seeded tables");
            println!("{}", ui::table_counts(&counts));
        }
    }

    Ok(ExitCode::SUCCESS)
}
