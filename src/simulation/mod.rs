pub mod autarky;
pub mod complete_markets;
pub mod phase;
pub mod productivity;
pub mod report;
pub mod world;
