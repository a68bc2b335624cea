//! Cage Sim - Main Binary
//!
//! Command-line front end for running bouts, series and round robins

use anyhow::{bail, Context, Result};
use cage_sim::{
    game::{
        fight_loop::describe_result, Dice, FightLoop, OutputFormat, TendencyController, VerbosityLevel,
    },
    loader::Roster,
    tables::ReferenceTables,
    tournament::{run_round_robin, run_series, simulate_bout},
    BoutConfig, TieBreak,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Verbosity level for bout output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Round tie-break rule
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Fair coin flip
    Coin,
    /// More strikes landed in the round, coin flip if still level
    Strikes,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Coin => TieBreak::CoinFlip,
            TieBreakArg::Strikes => TieBreak::StrikeDifferential,
        }
    }
}

#[derive(Parser)]
#[command(name = "cage")]
#[command(about = "Cage Sim - combat sports bout simulator", long_about = None)]
struct Cli {
    /// Bout configuration file (JSON); defaults are used when omitted
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Override the number of rounds
    #[arg(long, global = true)]
    rounds: Option<u32>,

    /// Override the round tie-break rule
    #[arg(long, global = true, value_enum)]
    tie_break: Option<TieBreakArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single bout and narrate it
    Fight {
        /// Roster file (JSON array of fighters, or {"fighters": [...]})
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Red corner (id or name)
        #[arg(value_name = "RED")]
        red: String,

        /// Blue corner (id or name)
        #[arg(value_name = "BLUE")]
        blue: String,

        /// Set random seed for deterministic bouts
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for bout output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Emit log lines as JSON objects
        #[arg(long)]
        json_log: bool,

        /// Write the event timeline as JSON to this file
        #[arg(long, value_name = "EVENTS_FILE")]
        events: Option<PathBuf>,

        /// Print the bout result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run many bouts between two fighters and report outcome rates
    Series {
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        #[arg(value_name = "RED")]
        red: String,

        #[arg(value_name = "BLUE")]
        blue: String,

        /// Number of bouts
        #[arg(long, short = 'n', default_value_t = 1000)]
        fights: usize,

        /// Master seed; each bout derives its own seed from it
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Round robin over every fighter in a roster
    Tourney {
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Bouts per pairing
        #[arg(long, short = 'n', default_value_t = 100)]
        fights: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long)]
        json: bool,
    },

    /// Run bouts in a tight loop for profiling (use with cargo-flamegraph)
    Profile {
        /// Number of bouts to run
        #[arg(long, short = 'n', default_value_t = 10000)]
        fights: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Roster to draw the first two fighters from (built-in pair if omitted)
        #[arg(long, value_name = "ROSTER")]
        roster: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.rounds, cli.tie_break)?;
    let tables = ReferenceTables::shared();

    match cli.command {
        Commands::Fight {
            roster,
            red,
            blue,
            seed,
            verbosity,
            json_log,
            events,
            json,
        } => run_fight(
            &roster,
            &red,
            &blue,
            seed,
            verbosity.into(),
            json_log,
            events.as_deref(),
            json,
            &config,
            tables,
        )?,
        Commands::Series {
            roster,
            red,
            blue,
            fights,
            seed,
            json,
        } => {
            let roster = load_roster(&roster)?;
            let stats = run_series(roster.find(&red)?, roster.find(&blue)?, fights, seed, &config, &tables)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("=== Series Complete ===\n");
                print!("{stats}");
            }
        }
        Commands::Tourney {
            roster,
            fights,
            seed,
            json,
        } => {
            let roster = load_roster(&roster)?;
            let start = std::time::Instant::now();
            let report = run_round_robin(&roster, fights, seed, &config, &tables)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("=== Tournament Complete ===");
                println!("Fighters: {}, bouts per pairing: {fights}", roster.len());
                println!("Elapsed: {:.2}s\n", start.elapsed().as_secs_f64());
                print!("{report}");
            }
        }
        Commands::Profile { fights, seed, roster } => run_profile(fights, seed, roster.as_deref(), &config, tables)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>, rounds: Option<u32>, tie_break: Option<TieBreakArg>) -> Result<BoutConfig> {
    let mut config = match path {
        Some(path) => BoutConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BoutConfig::default(),
    };
    if let Some(rounds) = rounds {
        config = config.with_rounds(rounds);
    }
    if let Some(tie_break) = tie_break {
        config = config.with_tie_break(tie_break.into());
    }
    config.validate()?;
    Ok(config)
}

fn load_roster(path: &Path) -> Result<Roster> {
    Roster::load_from_file(path).with_context(|| format!("failed to load roster {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
fn run_fight(
    roster_path: &Path,
    red: &str,
    blue: &str,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    json_log: bool,
    events_path: Option<&Path>,
    json: bool,
    config: &BoutConfig,
    tables: Arc<ReferenceTables>,
) -> Result<()> {
    let roster = load_roster(roster_path)?;
    let red = roster.fighter(red, config)?;
    let blue = roster.fighter(blue, config)?;
    if red.id == blue.id {
        bail!("a fighter cannot fight themselves ({})", red.name);
    }

    let seed = seed.unwrap_or_else(rand::random);
    // JSON output owns stdout
    let verbosity = if json { VerbosityLevel::Silent } else { verbosity };
    if verbosity >= VerbosityLevel::Normal {
        println!("=== {} vs {} ===", red.name, blue.name);
        println!("Using random seed: {seed}\n");
    }

    let mut fight = FightLoop::new(red, blue, config.clone(), tables, Dice::seeded(seed)).with_verbosity(verbosity);
    if json_log {
        fight.logger.set_output_format(OutputFormat::Json);
    }
    let mut red_ai = TendencyController::new(cage_sim::core::Corner::Red);
    let mut blue_ai = TendencyController::new(cage_sim::core::Corner::Blue);
    let result = fight.run_fight(&mut red_ai, &mut blue_ai)?;

    if let Some(path) = events_path {
        std::fs::write(path, fight.events().to_json()?)
            .with_context(|| format!("failed to write events to {}", path.display()))?;
    }

    if json {
        println!("{}", result.to_json()?);
    } else if verbosity >= VerbosityLevel::Normal {
        println!("\n=== Fight Over ===");
        println!("{}", describe_result(&result, config.round_seconds));
        for card in &result.scorecards {
            let tie = if card.tie_break { " (tie-break)" } else { "" };
            println!(
                "  Round {}: {}{tie}  health lost {:.1} - {:.1}, landed {} - {}",
                card.round,
                result.fighters[card.winner.index()].name,
                card.health_lost[0],
                card.health_lost[1],
                card.strikes_landed[0],
                card.strikes_landed[1]
            );
        }
    }
    Ok(())
}

fn run_profile(
    fights: usize,
    seed: u64,
    roster_path: Option<&Path>,
    config: &BoutConfig,
    tables: Arc<ReferenceTables>,
) -> Result<()> {
    println!("=== Cage Sim - Profiling Mode ===\n");

    let (red, blue) = match roster_path {
        Some(path) => {
            let roster = load_roster(path)?;
            match roster.records() {
                [red, blue, ..] => (red.clone(), blue.clone()),
                _ => bail!("profiling needs a roster with at least 2 fighters"),
            }
        }
        None => (
            cage_sim::loader::FighterRecord::new(1, "Striker").with_style("muay thai"),
            cage_sim::loader::FighterRecord::new(2, "Grappler").with_style("bjj"),
        ),
    };

    println!("Running {fights} bouts with seed {seed}\n");
    let start = std::time::Instant::now();
    let mut rounds = 0u64;
    for i in 0..fights {
        let result = simulate_bout(&red, &blue, config, &tables, seed.wrapping_add(i as u64))?;
        rounds += u64::from(result.round);
        if (i + 1) % 1000 == 0 {
            println!("Completed {} bouts", i + 1);
        }
    }
    let elapsed = start.elapsed();

    println!();
    println!("Profiling complete! {fights} bouts, {rounds} rounds executed.");
    if fights > 0 {
        println!(
            "  {:.2}us per bout",
            elapsed.as_secs_f64() * 1e6 / fights as f64
        );
    }
    println!();
    println!("For CPU profiling:");
    println!("  cargo flamegraph --bin cage -- profile --fights {fights} --seed {seed}");
    Ok(())
}
