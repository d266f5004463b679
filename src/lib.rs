//! # ksv-econ
//!
//! Two-country economy with credit-market frictions.
//!
//! Each country's entrepreneurs borrow against their wage income; a
//! financial friction caps how much they can raise. When the two credit
//! markets are integrated, a single world interest rate clears total
//! borrowing against total savings, and next period's wages follow from
//! the realized fraction of entrepreneurs.
//!
//! ## Architecture
//!
//! - **core** — The `Economy` interface, its two calibrations, and `Country`
//! - **equilibrium** — Brent root finding and the world interest-rate solver
//! - **simulation** — Integrated, autarky and complete-markets dynamics
//! - **config** — JSON run configuration

pub mod config;
pub mod core;
pub mod equilibrium;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::country::Country;
    pub use crate::core::economy::Economy;
    pub use crate::core::error::ParameterError;
    pub use crate::core::ksv::{KsvEconomy, KsvParams};
    pub use crate::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
    pub use crate::equilibrium::world_rate::{EquilibriumError, WorldRateSolver};
    pub use crate::simulation::world::{
        simulate, FailurePolicy, SimulationError, SimulationOptions, SimulationTrace,
    };
}
