use crate::prelude::*;
use crate::core::optimizers::Optimization;
use crate::rand_array;
use rand::Rng;

/// One fully connected weight matrix together with its gradient accumulator.
///
/// `w` has shape `(fan_in, fan_out)` and is applied as `a.dot(&w)`, so row `j`
/// holds the outgoing weights of input unit `j`. `dw` always has the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    w: Array2<f64>,
    dw: Array2<f64>,
}

impl Dense {
    pub fn new<R: Rng>(prev: usize, perceptron: usize, rng: &mut R) -> Self {
        Self {
            w: rand_array!(rng; prev, perceptron),
            dw: Array2::zeros((prev, perceptron)),
        }
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.w
    }

    pub fn gradients(&self) -> &Array2<f64> {
        &self.dw
    }

    pub fn shape(&self) -> (usize, usize) {
        self.w.dim()
    }

    /// Net input of the next layer.
    pub fn forward(&self, a: &Array1<f64>) -> Array1<f64> {
        a.dot(&self.w)
    }

    /// Error w.r.t. this layer's inputs given the error w.r.t. its net outputs.
    pub fn backward(&self, dz: &Array1<f64>) -> Array1<f64> {
        self.w.dot(dz)
    }

    /// Adds the outer product `a ⊗ dz` to the accumulator.
    pub fn accumulate(&mut self, a: &Array1<f64>, dz: &Array1<f64>) {
        for (mut row, &a_j) in self.dw.outer_iter_mut().zip(a.iter()) {
            row.scaled_add(a_j, dz);
        }
    }

    pub fn assign(&mut self, w: &Array2<f64>) -> Result<()> {
        if w.dim() != self.w.dim() {
            return Err(NNError::InvalidWeightShape(format!(
                "expected {:?}, got {:?}",
                self.w.dim(),
                w.dim()
            )));
        }
        self.w.assign(w);
        Ok(())
    }

    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let (rows, cols) = self.w.dim();
        self.w = rand_array!(rng; rows, cols);
        self.reset_gradients();
    }

    pub fn reset_gradients(&mut self) {
        self.dw.fill(0.0);
    }

    pub fn num_parameters(&self) -> usize {
        self.w.len()
    }
}

impl Optimization for Dense {
    fn optimize(&mut self, learning_rate: f64) {
        apply_gradient_descent(&mut self.w, &mut self.dw, learning_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layer() -> Dense {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layer = Dense::new(3, 2, &mut rng);
        layer
            .assign(&array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]])
            .unwrap();
        layer
    }

    #[test]
    fn test_layer_creation() {
        let mut rng = StdRng::seed_from_u64(0);
        let layer = Dense::new(4, 3, &mut rng);
        assert_eq!(layer.shape(), (4, 3));
        assert_eq!(layer.gradients().dim(), (4, 3));
        assert!(layer.gradients().iter().all(|&g| g == 0.0));
        assert!(layer.weights().iter().all(|w| (-INIT_RANGE..=INIT_RANGE).contains(w)));
        assert_eq!(layer.num_parameters(), 12);
    }

    #[test]
    fn test_forward_and_backward() {
        let layer = layer();
        let z = layer.forward(&array![1.0, 0.5, 0.45]);
        assert_abs_diff_eq!(z[0], 0.475, epsilon = 1e-12);
        assert_abs_diff_eq!(z[1], 0.67, epsilon = 1e-12);

        let da = layer.backward(&array![1.0, -1.0]);
        assert_eq!(da.len(), 3);
        assert_abs_diff_eq!(da[2], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulate_outer_product() {
        let mut layer = layer();
        layer.accumulate(&array![1.0, 2.0, 3.0], &array![0.5, -1.0]);
        assert_eq!(
            layer.gradients(),
            &array![[0.5, -1.0], [1.0, -2.0], [1.5, -3.0]]
        );
    }

    #[test]
    fn test_optimize_resets_gradients() {
        let mut layer = layer();
        layer.accumulate(&array![1.0, 0.0, 0.0], &array![1.0, 1.0]);
        layer.optimize(0.1);
        assert_abs_diff_eq!(layer.weights()[[0, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(layer.weights()[[1, 0]], 0.3, epsilon = 1e-12);
        assert!(layer.gradients().iter().all(|&g| g == 0.0));
    }

    #[test]
    fn test_assign_rejects_other_shape() {
        let mut layer = layer();
        let err = layer.assign(&Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(err, NNError::InvalidWeightShape(_)));
        assert_eq!(layer.shape(), (3, 2));
    }

    #[test]
    fn test_gradients_keep_weight_shape() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut layer = Dense::new(5, 2, &mut rng);
        layer.accumulate(&Array1::ones(5), &array![0.5, -0.5]);
        layer.randomize(&mut rng);
        assert_eq!(layer.gradients().dim(), layer.weights().dim());
        layer.assign(&Array2::ones((5, 2))).unwrap();
        layer.accumulate(&Array1::ones(5), &array![1.0, 1.0]);
        layer.optimize(0.5);
        assert_eq!(layer.weights(), &Array2::from_elem((5, 2), 0.5));
        assert_eq!(layer.gradients().dim(), (5, 2));
    }
}
