pub mod country;
pub mod economy;
pub mod error;
pub mod ksv;
pub mod moral_hazard;
