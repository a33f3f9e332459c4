use crate::prelude::*;

pub trait Optimization {
    fn optimize(&mut self, learning_rate: f64);
}

/// Plain gradient descent: `weights -= learning_rate * dw`, then clears `dw`.
pub fn apply_gradient_descent(weights: &mut Array2<f64>, dw: &mut Array2<f64>, learning_rate: f64) {
    weights.zip_mut_with(dw, |w, &g| *w -= learning_rate * g);
    dw.fill(0.0);
}
