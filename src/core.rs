// src/core.rs
pub mod activations;
pub mod config;
pub mod layers;
pub mod losses;
pub mod optimizers;
pub mod output;

// Re-export commonly used items
pub use activations::Activation;
pub use config::NetworkConfig;
pub use layers::Dense;
pub use losses::{squared_error, squared_error_derivative};
pub use optimizers::{apply_gradient_descent, Optimization};
pub use output::write_losses_to_csv;
