use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Activation shared by the hidden and the output layer.
///
/// Derivatives are evaluated on the *activated* value `y = f(x)`, not on the
/// net input. That shortcut holds for all three variants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Activation {
    Sigmoid,
    #[serde(alias = "relu")]
    LeakyRelu,
    Tanh,
}

impl Activation {
    pub fn activate(&self, x: f64) -> f64 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::LeakyRelu => (0.01 * x).max(x),
            Self::Tanh => x.tanh(),
        }
    }

    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            Self::Sigmoid => y * (1.0 - y),
            // 0 on the negative branch, not the slope 0.01 of activate().
            Self::LeakyRelu => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Tanh => 1.0 - y * y,
        }
    }

    /// Constant fed through the bias unit appended to every input vector.
    pub fn bias_value(&self) -> f64 {
        match self {
            Self::Sigmoid => 0.45,
            Self::LeakyRelu => 0.8,
            Self::Tanh => 0.5,
        }
    }

    pub fn forward(&self, z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|z| self.activate(z))
    }

    pub fn backward(&self, a: &Array1<f64>) -> Array1<f64> {
        a.mapv(|a| self.derivative(a))
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Sigmoid => "sigmoid",
            Self::LeakyRelu => "leakyRelu",
            Self::Tanh => "tanh",
        }
    }
}

impl FromStr for Activation {
    type Err = NNError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sigmoid" => Ok(Self::Sigmoid),
            "leakyRelu" | "relu" => Ok(Self::LeakyRelu),
            "tanh" => Ok(Self::Tanh),
            other => Err(NNError::InvalidActivation(format!(
                "unknown activation '{}', expected one of sigmoid, leakyRelu, tanh",
                other
            ))),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sigmoid() {
        let s = Activation::Sigmoid;
        assert_abs_diff_eq!(s.activate(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.derivative(0.5), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(s.activate(2.0) + s.activate(-2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_leaky_relu() {
        let r = Activation::LeakyRelu;
        assert_eq!(r.activate(2.0), 2.0);
        assert_abs_diff_eq!(r.activate(-2.0), -0.02, epsilon = 1e-12);
        assert_eq!(r.derivative(3.0), 1.0);
        assert_eq!(r.derivative(-0.02), 0.0);
        assert_eq!(r.derivative(0.0), 0.0);
    }

    #[test]
    fn test_tanh_matches_exponential_form() {
        let t = Activation::Tanh;
        for &x in &[-1.5f64, -0.3, 0.0, 0.7, 2.0] {
            let expected = (x.exp() - (-x).exp()) / (x.exp() + (-x).exp());
            assert_abs_diff_eq!(t.activate(x), expected, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(t.derivative(0.5), 0.75, epsilon = 1e-12);
        // Saturates instead of producing inf / inf.
        assert_eq!(t.activate(1000.0), 1.0);
    }

    #[test]
    fn test_forward_is_elementwise() {
        let z = array![-1.0, 0.0, 1.0, 2.0, 3.0];
        for act in [Activation::Sigmoid, Activation::LeakyRelu, Activation::Tanh] {
            let a = act.forward(&z);
            assert_eq!(a.len(), z.len());
            for (ai, zi) in a.iter().zip(z.iter()) {
                assert_eq!(*ai, act.activate(*zi));
            }
            assert_eq!(act.backward(&a).len(), z.len());
        }
    }

    #[test]
    fn test_bias_values() {
        assert_eq!(Activation::Sigmoid.bias_value(), 0.45);
        assert_eq!(Activation::LeakyRelu.bias_value(), 0.8);
        assert_eq!(Activation::Tanh.bias_value(), 0.5);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sigmoid".parse::<Activation>().unwrap(), Activation::Sigmoid);
        assert_eq!("leakyRelu".parse::<Activation>().unwrap(), Activation::LeakyRelu);
        assert_eq!("relu".parse::<Activation>().unwrap(), Activation::LeakyRelu);
        assert_eq!("tanh".parse::<Activation>().unwrap(), Activation::Tanh);

        let err = "softmax".parse::<Activation>().unwrap_err();
        assert!(matches!(err, NNError::InvalidActivation(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for act in [Activation::Sigmoid, Activation::LeakyRelu, Activation::Tanh] {
            assert_eq!(act.to_string().parse::<Activation>().unwrap(), act);
        }
    }
}
