pub mod logic;
pub mod rng;
pub mod types;

pub use logic::*;
pub use types::*;
