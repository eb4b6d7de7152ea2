// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The bot ties the decision pipeline to the API endpoints: it owns the
// static configuration, runs each move under the turn budget and hands the
// outcome to the debug logger.

use log::{info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::decision::{self, Decision};
use crate::error::SnapshotResult;
use crate::reachability::FloodSettings;
use crate::snapshot::Snapshot;
use crate::types::{Direction, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    settings: FloodSettings,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decided turn to `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let settings = config.flood_settings();
        Bot {
            config,
            settings,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, snapshot: &Snapshot) {
        info!(
            "GAME START {} ({}x{}, {} opponents)",
            game.id,
            snapshot.width,
            snapshot.height,
            snapshot.opponents.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, snapshot: &Snapshot) {
        info!("GAME OVER {} (final length {})", game.id, snapshot.you.length);
    }

    /// Decides a move synchronously with the thread-local RNG
    pub fn decide(&self, snapshot: &Snapshot) -> SnapshotResult<Direction> {
        decision::decide(snapshot, &self.settings, &mut rand::rng()).map(|d| d.direction)
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on tokio's blocking pool and is bounded by the
    /// effective turn budget. If it does not come back in time the bot
    /// answers with any direction the safety filters allow.
    ///
    /// # Arguments
    /// * `game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `snapshot` - Validated board state for this turn
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(&self, game: &Game, turn: i32, snapshot: Snapshot) -> SnapshotResult<Value> {
        let start_time = Instant::now();
        snapshot.validate()?;

        info!("Turn {}: Computing move", turn);

        let settings = self.settings;
        let worker_snapshot = snapshot.clone();
        let task = tokio::task::spawn_blocking(move || {
            decision::decide(&worker_snapshot, &settings, &mut rand::rng())
        });

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let decision: Option<Decision> = match tokio::time::timeout(budget, task).await {
            Ok(Ok(result)) => Some(result?),
            Ok(Err(e)) => {
                warn!("Turn {}: decision worker failed: {}", turn, e);
                None
            }
            Err(_) => {
                warn!("Turn {}: decision exceeded {}ms budget", turn, budget.as_millis());
                None
            }
        };

        let chosen_move = match &decision {
            Some(decision) => {
                info!(
                    "Turn {}: Chose {} ({:?} from {:?}, time: {}ms)",
                    turn,
                    decision.direction,
                    decision.tier,
                    decision.candidates.to_vec(),
                    start_time.elapsed().as_millis()
                );
                decision.direction
            }
            None => {
                let direction = Self::emergency_move(&snapshot);
                warn!("Turn {}: Falling back to {}", turn, direction);
                direction
            }
        };

        if let Some(decision) = decision {
            self.debug_logger
                .log_move(turn, game.id.clone(), snapshot, decision);
        }

        Ok(json!({ "move": chosen_move.as_str() }))
    }

    fn emergency_move(snapshot: &Snapshot) -> Direction {
        decision::emergency_move(snapshot, &mut rand::rng())
    }
}
