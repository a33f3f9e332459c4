pub use serde::{Serialize, Deserialize};

pub use ndarray::*;
pub use ndarray_rand::RandomExt;
pub use ndarray_rand::rand_distr::Uniform;

pub use crate::models::{ForwardCache, Network, NetworkBuilder};
pub use crate::error::*;
pub use crate::utils::INIT_RANGE;

// Internal re-exports
pub use crate::core::{
    Activation,
    Dense,
    NetworkConfig,
    Optimization,
    apply_gradient_descent,
    squared_error,
    squared_error_derivative,
    write_losses_to_csv,
};
