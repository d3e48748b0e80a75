use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use ms_core::api::{simulate_batch, BatchSummary, MatchFixture, MatchRequest};
use ms_core::{EngineConfig, MatchEngine, MatchSeed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// League-average tuning
    Realistic,
    /// More goals
    Arcade,
    /// Tighter, more defensive matches
    Simulation,
}

impl Profile {
    fn config(self) -> EngineConfig {
        match self {
            Profile::Realistic => EngineConfig::realistic(),
            Profile::Arcade => EngineConfig::arcade(),
            Profile::Simulation => EngineConfig::simulation(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ms_cli", version)]
#[command(about = "Simulate football match outcomes from JSON rosters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate one match and print the result as JSON
    Simulate {
        /// Match request file (seed, debug, homeTeam, awayTeam)
        #[arg(long)]
        request: PathBuf,

        /// Override the request seed (digits are numeric, anything else is text)
        #[arg(long)]
        seed: Option<String>,

        /// Attach the decision trace to the result
        #[arg(long)]
        debug: bool,

        /// YAML engine config; takes precedence over --profile
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,

        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replay one fixture across many seeds and summarize the outcomes
    Batch {
        #[arg(long)]
        request: PathBuf,

        /// Number of simulations
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Seeds are "<prefix>-0", "<prefix>-1", ...
        #[arg(long, default_value = "run")]
        seed_prefix: String,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { request, seed, debug, config, profile, pretty, output } => {
            let config = resolve_config(config.as_deref(), profile)?;
            let mut fixture = load_fixture(&request)?;
            if let Some(raw) = seed {
                fixture.seed = MatchSeed::parse_lenient(&raw);
            }
            fixture.debug |= debug;

            let engine = MatchEngine::new(config);
            let result =
                engine.simulate(&fixture.home, &fixture.away, &fixture.seed, fixture.debug);
            log::info!(
                "{} {}-{} {} (seed {}, fingerprint {})",
                fixture.home.name,
                result.home_score,
                result.away_score,
                fixture.away.name,
                fixture.seed,
                result.fingerprint()
            );

            if let Some(trace) = &result.debug {
                log::debug!("decision trace:\n{}", trace.summary());
            }

            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("writing result to {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Command::Batch { request, runs, seed_prefix, config, profile, json } => {
            if runs == 0 {
                bail!("--runs must be at least 1");
            }
            let config = resolve_config(config.as_deref(), profile)?;
            let fixture = load_fixture(&request)?;
            let fixtures = fixture.replicate(runs, &seed_prefix);
            let results = simulate_batch(&fixtures, &config);
            let summary = BatchSummary::from_results(&results);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&fixture, &summary);
            }
        }
    }

    Ok(())
}

/// `--config` file, then `--profile`, then `MS_ENGINE_PROFILE`
fn resolve_config(path: Option<&Path>, profile: Option<Profile>) -> Result<EngineConfig> {
    if let Some(path) = path {
        return EngineConfig::from_yaml_file(path)
            .with_context(|| format!("loading engine config {}", path.display()));
    }
    Ok(profile.map(Profile::config).unwrap_or_else(EngineConfig::from_env_or_default))
}

fn load_fixture(path: &Path) -> Result<MatchFixture> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading request {}", path.display()))?;
    let request = MatchRequest::from_json(&text)
        .with_context(|| format!("parsing request {}", path.display()))?;
    request.into_fixture().context("invalid match request")
}

fn print_summary(fixture: &MatchFixture, summary: &BatchSummary) {
    println!("{} vs {} over {} matches", fixture.home.name, fixture.away.name, summary.matches);
    println!("  home wins: {}", summary.home_wins);
    println!("  draws:     {}", summary.draws);
    println!("  away wins: {}", summary.away_wins);
    if summary.forfeits > 0 {
        println!("  forfeits:  {}", summary.forfeits);
    }
    println!(
        "  goals/match: {:.2} - {:.2}",
        summary.avg_home_goals(),
        summary.avg_away_goals()
    );
    println!("  xG/match:    {:.2}", summary.avg_total_xg());
}
