use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscrOptions {
    pub remove_outliers: bool,
    pub threshold: f64,
    pub verbose: bool,
}

impl Default for DiscrOptions {
    fn default() -> Self {
        Self {
            remove_outliers: true,
            threshold: 0.0,
            verbose: false,
        }
    }
}

impl DiscrOptions {
    pub fn quiet(self) -> Self {
        Self {
            verbose: false,
            ..self
        }
    }
}
