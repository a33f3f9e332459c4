use crate::prelude::*;

/// Shape and activation of a [`Network`](crate::models::Network).
///
/// `input_count` is the number of external features. The bias unit is added
/// internally and is not counted here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub input_count: usize,
    pub hidden_count: usize,
    pub output_count: usize,
    #[serde(rename = "activationKind")]
    pub activation: Activation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    input_count: usize,
    hidden_count: usize,
    output_count: usize,
    activation_kind: String,
}

impl NetworkConfig {
    pub fn new(
        input_count: usize,
        hidden_count: usize,
        output_count: usize,
        activation: Activation,
    ) -> Self {
        Self {
            input_count,
            hidden_count,
            output_count,
            activation,
        }
    }

    /// Parses `{"inputCount": .., "hiddenCount": .., "outputCount": .., "activationKind": ".."}`.
    pub fn from_json(s: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(s)
            .map_err(|e| NNError::InvalidLayerConfiguration(e.to_string()))?;
        let config = Self {
            input_count: raw.input_count,
            hidden_count: raw.hidden_count,
            output_count: raw.output_count,
            activation: raw.activation_kind.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_count == 0 || self.output_count == 0 {
            return Err(NNError::InvalidLayerConfiguration(format!(
                "hidden and output layers need at least one unit, got {} hidden and {} output",
                self.hidden_count, self.output_count
            )));
        }
        Ok(())
    }

    /// Rows of the lower weight matrix: features plus the bias unit.
    pub fn augmented_input_count(&self) -> usize {
        self.input_count + 1
    }
}
