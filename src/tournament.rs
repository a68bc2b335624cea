//! Series and round-robin runners
//!
//! Bouts are independent, so they run in parallel with rayon. Each bout gets
//! a seed derived from the master seed and its index, and results are folded
//! in index order, so a master seed always produces the same report.

use crate::config::BoutConfig;
use crate::core::Corner;
use crate::game::{BoutResult, Dice, FightLoop, Method, TendencyController, VerbosityLevel};
use crate::loader::{FighterRecord, Roster};
use crate::tables::ReferenceTables;
use crate::{FightError, Result};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Seed for bout `index` of a run seeded with `master`
pub fn bout_seed(master: u64, index: u64) -> u64 {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(master.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15)));
    rng.next_u64()
}

/// Run one silent bout between two records
pub fn simulate_bout(
    red: &FighterRecord,
    blue: &FighterRecord,
    config: &BoutConfig,
    tables: &Arc<ReferenceTables>,
    seed: u64,
) -> Result<BoutResult> {
    let mut fight = FightLoop::new(
        red.into_fighter(config),
        blue.into_fighter(config),
        config.clone(),
        Arc::clone(tables),
        Dice::seeded(seed),
    )
    .with_verbosity(VerbosityLevel::Silent);
    let mut red_ai = TendencyController::new(Corner::Red);
    let mut blue_ai = TendencyController::new(Corner::Blue);
    fight.run_fight(&mut red_ai, &mut blue_ai)
}

/// Outcome counts over a set of bouts between the same two corners
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    pub red: String,
    pub blue: String,
    pub fights: usize,
    pub red_wins: usize,
    pub blue_wins: usize,
    pub draws: usize,
    pub knockouts: usize,
    pub submissions: usize,
    pub decisions: usize,
    /// Sum of ending rounds, for the mean
    total_rounds: u64,
}

impl SeriesStats {
    pub fn new(red: impl Into<String>, blue: impl Into<String>) -> Self {
        SeriesStats {
            red: red.into(),
            blue: blue.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: &BoutResult) {
        self.fights += 1;
        self.total_rounds += u64::from(result.round);
        match result.winner {
            Some(Corner::Red) => self.red_wins += 1,
            Some(Corner::Blue) => self.blue_wins += 1,
            None => self.draws += 1,
        }
        match result.method {
            Method::Knockout => self.knockouts += 1,
            Method::Submission => self.submissions += 1,
            Method::Decision => self.decisions += 1,
            Method::Draw => {}
        }
    }

    pub fn mean_round(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            self.total_rounds as f64 / self.fights as f64
        }
    }

    pub fn stoppage_rate(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            (self.knockouts + self.submissions) as f64 / self.fights as f64
        }
    }
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

impl fmt::Display for SeriesStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {}: {} fights", self.red, self.blue, self.fights)?;
        writeln!(f, "  {} wins: {} ({:.1}%)", self.red, self.red_wins, pct(self.red_wins, self.fights))?;
        writeln!(f, "  {} wins: {} ({:.1}%)", self.blue, self.blue_wins, pct(self.blue_wins, self.fights))?;
        if self.draws > 0 {
            writeln!(f, "  Draws: {} ({:.1}%)", self.draws, pct(self.draws, self.fights))?;
        }
        writeln!(
            f,
            "  KO {} / SUB {} / DEC {}, mean ending round {:.2}",
            self.knockouts,
            self.submissions,
            self.decisions,
            self.mean_round()
        )
    }
}

/// Run `fights` independent bouts between two records in parallel
pub fn run_series(
    red: &FighterRecord,
    blue: &FighterRecord,
    fights: usize,
    master_seed: u64,
    config: &BoutConfig,
    tables: &Arc<ReferenceTables>,
) -> Result<SeriesStats> {
    config.validate()?;
    let results: Vec<BoutResult> = (0..fights)
        .into_par_iter()
        .map(|i| simulate_bout(red, blue, config, tables, bout_seed(master_seed, i as u64)))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = SeriesStats::new(red.display_name(), blue.display_name());
    for result in &results {
        stats.record(result);
    }
    Ok(stats)
}

/// Win/loss/draw line of one fighter across a tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TournamentReport {
    pub matchups: Vec<SeriesStats>,
    /// Sorted by wins, then name
    pub standings: Vec<Standing>,
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Matchup Results ===")?;
        for matchup in &self.matchups {
            write!(f, "{matchup}")?;
        }
        writeln!(f, "\n=== Standings ===")?;
        for (rank, s) in self.standings.iter().enumerate() {
            writeln!(f, "{:>3}. {:<28} {:>5} W {:>5} L {:>5} D", rank + 1, s.name, s.wins, s.losses, s.draws)?;
        }
        Ok(())
    }
}

/// Every roster entry fights every other entry `fights_per_pair` times
pub fn run_round_robin(
    roster: &Roster,
    fights_per_pair: usize,
    master_seed: u64,
    config: &BoutConfig,
    tables: &Arc<ReferenceTables>,
) -> Result<TournamentReport> {
    let records = roster.records();
    if records.len() < 2 {
        return Err(FightError::InvalidConfig(
            "a round robin needs at least 2 fighters".to_string(),
        ));
    }

    let pairs: Vec<(usize, usize)> = (0..records.len())
        .flat_map(|i| (i + 1..records.len()).map(move |j| (i, j)))
        .collect();

    let mut standings: Vec<Standing> = records
        .iter()
        .map(|r| Standing {
            name: r.display_name(),
            ..Default::default()
        })
        .collect();
    let mut matchups = Vec::with_capacity(pairs.len());

    for (pair_index, (i, j)) in pairs.into_iter().enumerate() {
        let seed = bout_seed(master_seed, pair_index as u64);
        let stats = run_series(&records[i], &records[j], fights_per_pair, seed, config, tables)?;

        standings[i].wins += stats.red_wins;
        standings[i].losses += stats.blue_wins;
        standings[i].draws += stats.draws;
        standings[j].wins += stats.blue_wins;
        standings[j].losses += stats.red_wins;
        standings[j].draws += stats.draws;
        matchups.push(stats);
    }

    standings.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
    Ok(TournamentReport { matchups, standings })
}
