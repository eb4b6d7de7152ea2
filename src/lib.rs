// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all build on these

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod candidates;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod error;
pub mod food;
pub mod grid;
pub mod handler;
pub mod reachability;
pub mod replay;
pub mod safety;
pub mod snapshot;
pub mod types;
