use crate::prelude::*;

/// Sum over the output units of `0.5 * (target - output)^2`.
pub fn squared_error(y_hat: &Array1<f64>, y: &Array1<f64>) -> Result<f64> {
    check_shapes(y_hat, y)?;
    Ok(y_hat
        .iter()
        .zip(y.iter())
        .map(|(o, t)| 0.5 * (t - o).powi(2))
        .sum())
}

/// dE/dOutput of `squared_error`, i.e. `output - target`.
pub fn squared_error_derivative(y_hat: &Array1<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
    check_shapes(y_hat, y)?;
    Ok(y_hat - y)
}

fn check_shapes(y_hat: &Array1<f64>, y: &Array1<f64>) -> Result<()> {
    if y_hat.len() != y.len() {
        return Err(NNError::InvalidOutputShape(format!(
            "Prediction length {} doesn't match target length {}",
            y_hat.len(),
            y.len()
        )));
    }
    Ok(())
}
