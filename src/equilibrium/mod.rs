pub mod brent;
pub mod world_rate;
