use super::traits::ConfigSection;
use crate::engines::evaluation::fitness::{Fitness, GeneLinking, TestCase};
use crate::error::{GepError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Score of a case predicted exactly
    pub max_fitness: f64,
    pub linking: GeneLinking,
    pub cases: Vec<TestCase>,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            max_fitness: 100.0,
            linking: GeneLinking::First,
            cases: Vec::new(),
        }
    }
}

impl FitnessConfig {
    pub fn build(&self) -> Fitness {
        Fitness::new(self.cases.clone(), self.max_fitness, self.linking)
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<()> {
        if !self.max_fitness.is_finite() || self.max_fitness <= 0.0 {
            return Err(GepError::Configuration(
                "Max fitness must be a positive number".to_string(),
            ));
        }
        if let Some(i) = self.cases.iter().position(|c| !c.expected.is_finite()) {
            return Err(GepError::Configuration(format!(
                "Test case {} has a non-finite expected value",
                i
            )));
        }
        Ok(())
    }
}
