#![warn(clippy::all)]

use std::path::Path;
use std::process::ExitCode;

use life_grid::{config, LifeError, Result};

fn main() -> ExitCode {
    env_logger::init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ LifeError::Usage { .. }) => {
            println!("{}", err);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let args = std::env::args_os().collect::<Vec<_>>();
    if args.len() != 3 {
        let program = args
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        return Err(LifeError::Usage { program });
    }

    let config = config::load_from_env()?;
    life_grid::run(Path::new(&args[1]), Path::new(&args[2]), config)?;
    Ok(())
}
