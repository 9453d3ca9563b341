#![warn(clippy::all)]

pub mod config;
mod error;
mod grid;
mod simulation;
mod stepper;
mod utils;

pub use config::DEFAULT_GENERATIONS;
pub use error::{LifeError, Result};
pub use grid::{Buffer, Grid};
pub use simulation::{run, RunSummary};
pub use stepper::next_state;
pub use utils::{load_world, read_world, save_world, write_world, NiceInt};
