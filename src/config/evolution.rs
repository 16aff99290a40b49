use super::traits::ConfigSection;
use crate::engines::generation::sampler::{SamplerKind, RouletteWheelSampler};
use crate::error::{GepError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub gene_count: usize,
    pub seed: Option<u64>,
    pub sampler: SamplerKind,
    pub weight_tolerance: f64,
    pub mutations_per_individual: usize,
    pub hall_of_fame_size: usize,
    /// Stop once the best score reaches this; defaults to a perfect score.
    pub target_fitness: Option<f64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            gene_count: 1,
            seed: None,
            sampler: SamplerKind::RouletteWheel,
            weight_tolerance: RouletteWheelSampler::DEFAULT_TOLERANCE,
            mutations_per_individual: 2,
            hall_of_fame_size: 10,
            target_fitness: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GepError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.max_generations == 0 {
            return Err(GepError::Configuration(
                "At least one generation is required".to_string(),
            ));
        }
        if self.gene_count == 0 {
            return Err(GepError::Configuration(
                "Gene count must be positive".to_string(),
            ));
        }
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(GepError::Configuration(
                "Weight tolerance must be a non-negative number".to_string(),
            ));
        }
        if matches!(self.target_fitness, Some(t) if t.is_nan()) {
            return Err(GepError::Configuration(
                "Target fitness must be a number".to_string(),
            ));
        }
        Ok(())
    }
}
