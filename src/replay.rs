// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the decision pipeline on the logged snapshots
// 3. Check the logged move against the replayed candidate set
// 4. Generate a summary report
//
// The final pick among candidates is random, so a turn "matches" when the
// logged move is still among the replayed candidates and the decision tier
// is unchanged.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::candidates::DirectionSet;
use crate::debug_logger::LogEntry;
use crate::decision::{self, DecisionTier};
use crate::reachability::FloodSettings;
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_tier: DecisionTier,
    pub replayed_tier: DecisionTier,
    pub replayed_candidates: DirectionSet,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    settings: FloodSettings,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given pipeline settings
    pub fn new(settings: FloodSettings, verbose: bool) -> Self {
        ReplayEngine { settings, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let start_time = Instant::now();
        // Candidates and tier do not depend on the RNG; seeding keeps runs stable
        let mut rng = StdRng::seed_from_u64(entry.turn as u64);
        let replayed = decision::decide(&entry.snapshot, &self.settings, &mut rng)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = replayed.candidates.contains(entry.chosen_move) && replayed.tier == entry.tier;

        let result = ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            original_tier: entry.tier,
            replayed_tier: replayed.tier,
            replayed_candidates: replayed.candidates,
            matches,
            computation_time_us,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} in {:?} ({:?}, {}us)",
                    entry.turn,
                    entry.chosen_move,
                    replayed.candidates.to_vec(),
                    replayed.tier,
                    computation_time_us
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - logged {} ({:?}), replayed {:?} ({:?})",
                    entry.turn,
                    entry.chosen_move,
                    entry.tier,
                    replayed.candidates.to_vec(),
                    replayed.tier
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            let fallbacks = results
                .iter()
                .filter(|r| {
                    matches!(
                        r.replayed_tier,
                        DecisionTier::SafetyFallback | DecisionTier::LastResort
                    )
                })
                .count();

            println!("Average Decision Time:      {:.1}us", avg_time);
            println!("Fallback Turns:             {}\n", fallbacks);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({:?}) → {:?} ({:?})",
                    result.turn,
                    result.original_move,
                    result.original_tier,
                    result.replayed_candidates.to_vec(),
                    result.replayed_tier
                );
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Decision;
    use crate::reachability::SpaceScores;
    use crate::snapshot::{Snake, Snapshot};
    use crate::types::Coord;
    use std::io::Write;

    fn entry(turn: i32, chosen_move: Direction, tier: DecisionTier) -> LogEntry {
        let body = vec![Coord::new(5, 5), Coord::new(5, 4), Coord::new(5, 3)];
        let snapshot = Snapshot {
            width: 11,
            height: 11,
            you: Snake {
                id: "me".to_string(),
                head: body[0],
                body,
                length: 3,
                health: 60,
            },
            opponents: vec![],
            food: vec![],
            hazards: vec![],
        };
        let decision = Decision {
            direction: chosen_move,
            tier,
            candidates: DirectionSet::only(chosen_move),
            scores: SpaceScores::default(),
        };
        LogEntry::new(turn, "game".to_string(), snapshot, &decision)
    }

    #[test]
    fn test_logged_move_inside_candidates_matches() {
        let engine = ReplayEngine::new(FloodSettings::default(), false);
        let result = engine
            .replay_entry(&entry(1, Direction::Left, DecisionTier::Reachability))
            .unwrap();
        assert!(result.matches);
        assert_eq!(
            result.replayed_candidates.to_vec(),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_reversal_onto_neck_is_a_mismatch() {
        let engine = ReplayEngine::new(FloodSettings::default(), false);
        let results = engine.replay_all(&[
            entry(1, Direction::Up, DecisionTier::Reachability),
            entry(2, Direction::Down, DecisionTier::Reachability),
            entry(3, Direction::Right, DecisionTier::SafetyFallback),
        ]);
        let stats = engine.generate_stats(&results);
        assert_eq!(stats.total_turns, 3);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.mismatches, 2);
    }

    #[test]
    fn test_load_log_file_round_trip() {
        let path = std::env::temp_dir().join(format!("flood_snake_replay_{}.jsonl", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            for turn in [4, 5] {
                let line = serde_json::to_string(&entry(turn, Direction::Up, DecisionTier::Reachability)).unwrap();
                writeln!(file, "{}", line).unwrap();
            }
            writeln!(file).unwrap();
        }

        let engine = ReplayEngine::new(FloodSettings::default(), false);
        let entries = engine.load_log_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 2);
        let results = engine.replay_turns(&entries, &[5]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].turn, 5);
        assert!(engine.replay_turns(&entries, &[9]).is_err());
    }

    #[test]
    fn test_missing_log_file_is_an_error() {
        let engine = ReplayEngine::new(FloodSettings::default(), false);
        assert!(engine.load_log_file("does-not-exist.jsonl").is_err());
    }
}
