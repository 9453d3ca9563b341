use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::ConfigSnapshot;
use crate::{load_world, save_world, NiceInt, Result};

/// What a finished run did.
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub width: usize,
    pub height: usize,
    pub generations: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed: Duration,
}

/// Loads the world from `input`, advances it `config.generations` times and
/// writes the result to `output`.
///
/// Nothing is written when loading fails.
pub fn run(input: &Path, output: &Path, config: ConfigSnapshot) -> Result<RunSummary> {
    let mut grid = load_world(input)?;
    let (width, height) = grid.size();
    let initial_population = grid.population();

    let timer = Instant::now();
    grid.update(config.generations, config.threads);
    let elapsed = timer.elapsed();

    save_world(&grid, output)?;
    let final_population = grid.population();
    grid.release();

    log::info!(
        "Advanced {} generations in {:?} on {} thread(s), population {} -> {}",
        config.generations,
        elapsed,
        config.threads,
        NiceInt::from_usize(initial_population),
        NiceInt::from_usize(final_population)
    );
    Ok(RunSummary {
        width,
        height,
        generations: config.generations,
        initial_population,
        final_population,
        elapsed,
    })
}
