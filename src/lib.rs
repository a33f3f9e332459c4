pub mod core;
pub mod error;
pub mod models;
pub mod prelude;
pub mod utils;

// Re-export types
pub use crate::core::{Activation, Dense, NetworkConfig};
pub use crate::error::{NNError, Result};
pub use crate::models::{ForwardCache, Network, NetworkBuilder};
