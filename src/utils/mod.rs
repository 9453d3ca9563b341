mod format_int;
mod world_file;

pub use format_int::NiceInt;
pub use world_file::{load_world, read_world, save_world, write_world};
