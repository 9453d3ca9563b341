use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{LifeError, Result};

/// Number of generations a run advances the world by unless overridden.
pub const DEFAULT_GENERATIONS: usize = 50;

pub const GENERATIONS_VAR: &str = "LIFE_GENERATIONS";
pub const THREADS_VAR: &str = "LIFE_THREADS";

struct Config {
    generations: AtomicUsize,
    threads: AtomicUsize,
}

static CONFIG: Config = Config {
    generations: AtomicUsize::new(DEFAULT_GENERATIONS),
    threads: AtomicUsize::new(1),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub generations: usize,
    /// 1 means the sequential stepper
    pub threads: usize,
}

pub fn get_config() -> ConfigSnapshot {
    ConfigSnapshot {
        generations: CONFIG.generations.load(Ordering::Relaxed),
        threads: CONFIG.threads.load(Ordering::Relaxed),
    }
}

pub fn set_generations(generations: usize) {
    CONFIG.generations.store(generations, Ordering::Relaxed);
}

pub fn set_threads(threads: usize) {
    CONFIG.threads.store(threads.max(1), Ordering::Relaxed);
}

/// Applies `LIFE_GENERATIONS` and `LIFE_THREADS` from the process environment.
pub fn load_from_env() -> Result<ConfigSnapshot> {
    if let Some(generations) = read_var(GENERATIONS_VAR)? {
        set_generations(generations);
    }
    if let Some(threads) = read_var(THREADS_VAR)? {
        if threads == 0 {
            return Err(LifeError::Config {
                name: THREADS_VAR,
                value: threads.to_string(),
            });
        }
        set_threads(threads);
    }
    Ok(get_config())
}

fn read_var(name: &'static str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LifeError::Config { name, value }),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(value)) => Err(LifeError::Config {
            name,
            value: value.to_string_lossy().into_owned(),
        }),
    }
}
