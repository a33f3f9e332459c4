use crate::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Activations of the last forward pass, consumed by `backward`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardCache {
    /// Input with the bias unit appended.
    pub input: Array1<f64>,
    pub net_lower: Array1<f64>,
    pub out_lower: Array1<f64>,
    pub net_upper: Array1<f64>,
    pub out_upper: Array1<f64>,
}

/// Input → hidden → output perceptron trained by accumulated gradient descent.
///
/// Every call to [`backward`](Network::backward) adds one sample's gradient to
/// the accumulators; [`update_weights`](Network::update_weights) applies the sum
/// and clears them. A mini-batch is simply the forward/backward pairs issued
/// between two updates.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    lower: Dense,
    upper: Dense,
    cache: Option<ForwardCache>,
    rng: StdRng,
}

#[derive(Debug, Default)]
pub struct NetworkBuilder {
    input_count: Option<usize>,
    hidden_count: Option<usize>,
    output_count: Option<usize>,
    activation: Option<Activation>,
    activation_error: Option<NNError>,
    seed: Option<u64>,
}

impl NetworkBuilder {
    pub fn inputs(mut self, n: usize) -> Self {
        self.input_count = Some(n);
        self
    }

    pub fn hidden(mut self, n: usize) -> Self {
        self.hidden_count = Some(n);
        self
    }

    pub fn outputs(mut self, n: usize) -> Self {
        self.output_count = Some(n);
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = Some(activation);
        self.activation_error = None;
        self
    }

    /// Activation by key (`sigmoid`, `leakyRelu`, `tanh`). Unknown keys fail in `build`.
    pub fn activation_kind(mut self, key: &str) -> Self {
        match key.parse() {
            Ok(activation) => return self.activation(activation),
            Err(err) => {
                self.activation = None;
                self.activation_error = Some(err);
            }
        }
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Network> {
        if let Some(err) = self.activation_error {
            return Err(err);
        }
        let missing = |name: &str| NNError::InvalidLayerConfiguration(format!("{} not set", name));
        let config = NetworkConfig {
            input_count: self.input_count.ok_or_else(|| missing("input count"))?,
            hidden_count: self.hidden_count.ok_or_else(|| missing("hidden count"))?,
            output_count: self.output_count.ok_or_else(|| missing("output count"))?,
            activation: self.activation.ok_or_else(|| missing("activation"))?,
        };
        match self.seed {
            Some(seed) => Network::with_seed(config, seed),
            None => Network::new(config),
        }
    }
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn new(config: NetworkConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: NetworkConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: NetworkConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let lower = Dense::new(config.augmented_input_count(), config.hidden_count, &mut rng);
        let upper = Dense::new(config.hidden_count, config.output_count, &mut rng);
        debug!(
            lower = ?lower.shape(),
            upper = ?upper.shape(),
            activation = %config.activation,
            "network initialised"
        );
        Ok(Self {
            config,
            lower,
            upper,
            cache: None,
            rng,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn activation(&self) -> Activation {
        self.config.activation
    }

    /// `(input_count + 1) x hidden_count`; the last row belongs to the bias unit.
    pub fn weights_lower(&self) -> &Array2<f64> {
        self.lower.weights()
    }

    /// `hidden_count x output_count`.
    pub fn weights_upper(&self) -> &Array2<f64> {
        self.upper.weights()
    }

    pub fn gradients_lower(&self) -> &Array2<f64> {
        self.lower.gradients()
    }

    pub fn gradients_upper(&self) -> &Array2<f64> {
        self.upper.gradients()
    }

    pub fn cache(&self) -> Option<&ForwardCache> {
        self.cache.as_ref()
    }

    /// Overwrites both weight matrices. Shapes must match exactly; on error
    /// neither matrix is touched. The cached forward pass is discarded.
    pub fn set_weights(&mut self, lower: &Array2<f64>, upper: &Array2<f64>) -> Result<()> {
        for (name, current, new) in [("lower", &self.lower, lower), ("upper", &self.upper, upper)] {
            if current.shape() != new.dim() {
                return Err(NNError::InvalidWeightShape(format!(
                    "{} weights must be {:?}, got {:?}",
                    name,
                    current.shape(),
                    new.dim()
                )));
            }
        }
        self.lower.assign(lower)?;
        self.upper.assign(upper)?;
        self.cache = None;
        Ok(())
    }

    /// Redraws every weight from `[-0.3, 0.3]`, zeroes both accumulators and
    /// drops the cached forward pass.
    pub fn randomize(&mut self) {
        self.lower.randomize(&mut self.rng);
        self.upper.randomize(&mut self.rng);
        self.cache = None;
        debug!("weights randomized");
    }

    fn propagate(&self, input: &Array1<f64>) -> Result<ForwardCache> {
        if input.len() != self.config.input_count {
            return Err(NNError::InvalidInputShape(format!(
                "expected {} features, got {}",
                self.config.input_count,
                input.len()
            )));
        }
        let activation = self.config.activation;

        // Bias unit. Its input is a constant picked by the activation (0.45,
        // 0.8 or 0.5), never 1 and never learned. The weights leaving it are the
        // last row of the lower matrix and train like any other weight.
        let input: Array1<f64> = input
            .iter()
            .copied()
            .chain(std::iter::once(activation.bias_value()))
            .collect();

        let net_lower = self.lower.forward(&input);
        let out_lower = activation.forward(&net_lower);
        let net_upper = self.upper.forward(&out_lower);
        let out_upper = activation.forward(&net_upper);

        Ok(ForwardCache {
            input,
            net_lower,
            out_lower,
            net_upper,
            out_upper,
        })
    }

    /// Runs one sample through the network and caches every intermediate
    /// vector for the following `backward` call.
    pub fn forward(&mut self, input: &Array1<f64>) -> Result<Array1<f64>> {
        let cache = self.propagate(input)?;
        let output = cache.out_upper.clone();
        self.cache = Some(cache);
        Ok(output)
    }

    /// Like `forward`, but leaves the cache alone.
    pub fn predict(&self, input: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(self.propagate(input)?.out_upper)
    }

    /// Adds the gradient of the squared error against `target` for the cached
    /// forward pass to the accumulators and returns that error.
    pub fn backward(&mut self, target: &Array1<f64>) -> Result<f64> {
        let cache = self.cache.as_ref().ok_or(NNError::MissingForwardPass)?;
        if target.len() != self.config.output_count {
            return Err(NNError::InvalidOutputShape(format!(
                "expected {} target values, got {}",
                self.config.output_count,
                target.len()
            )));
        }
        let activation = self.config.activation;
        let loss = squared_error(&cache.out_upper, target)?;

        // Output layer: dE/dNet_U = dE/dOut_U * dOut_U/dNet_U
        let de_dout_upper = squared_error_derivative(&cache.out_upper, target)?;
        let de_dnet_upper = de_dout_upper * activation.backward(&cache.out_upper);

        // Hidden layer: dE/dOut_L = W_U . dE/dNet_U, read before any update
        let de_dout_lower = self.upper.backward(&de_dnet_upper);
        let de_dnet_lower = de_dout_lower * activation.backward(&cache.out_lower);

        // dE/dW = previous activations (outer) dE/dNet
        self.upper.accumulate(&cache.out_lower, &de_dnet_upper);
        self.lower.accumulate(&cache.input, &de_dnet_lower);

        Ok(loss)
    }

    /// `w -= learning_rate * accumulated_gradient` for both matrices, then
    /// resets the accumulators.
    pub fn update_weights(&mut self, learning_rate: f64) {
        debug!(learning_rate, "applying accumulated gradients");
        self.lower.optimize(learning_rate);
        self.upper.optimize(learning_rate);
    }

    /// Mean per-sample loss over the rows of `x` and `y`.
    pub fn evaluate(&self, x: &Array2<f64>, y: &Array2<f64>) -> Result<f64> {
        self.check_dataset(x, y)?;
        if x.nrows() == 0 {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (xi, yi) in x.outer_iter().zip(y.outer_iter()) {
            total += squared_error(&self.predict(&xi.to_owned())?, &yi.to_owned())?;
        }
        Ok(total / x.nrows() as f64)
    }

    /// Trains on the rows of `x` / `y` in order, one weight update per
    /// `batch_size` rows. Returns the mean sample loss of every epoch.
    pub fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        epochs: usize,
        batch_size: usize,
        learning_rate: f64,
        verbose: bool,
    ) -> Result<Vec<f64>> {
        self.check_dataset(x, y)?;
        if batch_size == 0 {
            return Err(NNError::InvalidLayerConfiguration(
                "batch size must be greater than 0".to_string(),
            ));
        }

        let mut history = Vec::with_capacity(epochs);
        for i in 0..epochs {
            let mut total = 0.0;
            for (xb, yb) in x
                .axis_chunks_iter(Axis(0), batch_size)
                .zip(y.axis_chunks_iter(Axis(0), batch_size))
            {
                for (xi, yi) in xb.outer_iter().zip(yb.outer_iter()) {
                    self.forward(&xi.to_owned())?;
                    total += self.backward(&yi.to_owned())?;
                }
                self.update_weights(learning_rate);
            }

            let loss = if x.nrows() == 0 { 0.0 } else { total / x.nrows() as f64 };
            if verbose {
                info!("Epoch: {}/{} loss: {:.6}", i + 1, epochs, loss);
            }
            history.push(loss);
        }
        Ok(history)
    }

    fn check_dataset(&self, x: &Array2<f64>, y: &Array2<f64>) -> Result<()> {
        if x.ncols() != self.config.input_count {
            return Err(NNError::InvalidInputShape(format!(
                "expected {} feature columns, got {}",
                self.config.input_count,
                x.ncols()
            )));
        }
        if y.ncols() != self.config.output_count || y.nrows() != x.nrows() {
            return Err(NNError::InvalidOutputShape(format!(
                "expected {} x {} targets, got {:?}",
                x.nrows(),
                self.config.output_count,
                y.dim()
            )));
        }
        Ok(())
    }

    pub fn num_parameters(&self) -> usize {
        self.lower.num_parameters() + self.upper.num_parameters()
    }

    pub fn summary(&self) -> String {
        let mut res = format!("\nModel Network ({})\n", self.config.activation);
        res.push_str("-------------------------------------------------------------\n");
        res.push_str("Layer (Type)\t\t Weights shape\t\t No.of params\n");
        for (name, layer) in [("Lower", &self.lower), ("Upper", &self.upper)] {
            res.push_str(&format!(
                "{} (Dense)\t\t  {:?}\t\t  {}\n",
                name,
                layer.shape(),
                layer.num_parameters()
            ));
        }
        res.push_str("-------------------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", self.num_parameters()));
        res
    }
}
