// Utility functions
pub mod error;
pub mod params;

pub use error::*;
pub use params::*;
