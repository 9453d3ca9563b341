use anyhow::{Context, Result};
use life_grid::{Grid, NiceInt};
use std::time::Instant;

const SIDE: usize = 1 << 10;
const GENERATIONS: usize = 200;
const SEED: u64 = 42;
const FILL_RATE: f64 = 0.3;

fn main() -> Result<()> {
    env_logger::init();

    let threads_max = std::thread::available_parallelism()
        .context("querying available parallelism")?
        .get();
    let original = Grid::random(SIDE, SIDE, Some(SEED), FILL_RATE)?;
    println!(
        "Field {}x{}, population {}",
        SIDE,
        SIDE,
        NiceInt::from_usize(original.population())
    );

    let mut reference = None;
    let mut threads = 1;
    while threads <= threads_max {
        let mut grid = original.clone();
        let timer = Instant::now();
        grid.update(GENERATIONS, threads);
        println!(
            "Time on {} generations with {} thread(s): {:?}",
            GENERATIONS,
            threads,
            timer.elapsed()
        );

        let cells = grid.get_cells();
        match &reference {
            None => reference = Some(cells),
            Some(expected) => anyhow::ensure!(
                &cells == expected,
                "{} threads diverged from the sequential result",
                threads
            ),
        }
        threads *= 2;
    }
    Ok(())
}
