use serde::{Deserialize, Serialize};

/// Direction in which the monitored value improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopMode {
    /// Lower is better (e.g. loss)
    Min,
    /// Higher is better (e.g. accuracy)
    Max,
}

/// Early stopping counter
///
/// The first observed value becomes the baseline. Each later value must beat
/// the best value by more than `min_delta` to reset the counter. Once the
/// counter reaches `patience` the stop flag latches.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    patience: usize,
    min_delta: f64,
    mode: StopMode,
    best_value: Option<f64>,
    counter: usize,
    early_stop: bool,
}

impl EarlyStopping {
    pub fn new(patience: usize, min_delta: f64, mode: StopMode) -> Self {
        Self {
            patience,
            min_delta,
            mode,
            best_value: None,
            counter: 0,
            early_stop: false,
        }
    }

    /// Record a value and report whether training should stop
    pub fn step(&mut self, value: f64) -> bool {
        match self.best_value {
            None => self.best_value = Some(value),
            Some(best) => {
                let improved = match self.mode {
                    StopMode::Min => value < best - self.min_delta,
                    StopMode::Max => value > best + self.min_delta,
                };

                if improved {
                    self.best_value = Some(value);
                    self.counter = 0;
                } else {
                    self.counter += 1;
                }
            }
        }

        if self.counter >= self.patience {
            self.early_stop = true;
        }
        self.early_stop
    }

    pub fn should_stop(&self) -> bool {
        self.early_stop
    }

    pub fn best_value(&self) -> Option<f64> {
        self.best_value
    }

    /// Non-improving steps since the last improvement
    pub fn counter(&self) -> usize {
        self.counter
    }
}

impl Default for EarlyStopping {
    fn default() -> Self {
        Self::new(10, 0.0, StopMode::Min)
    }
}
