use super::traits::ConfigSection;
use crate::engines::generation::operators::OperatorRates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub mutation_rate: f64,
    pub one_point_rate: f64,
    pub two_point_rate: f64,
    pub gene_recombination_rate: f64,
    pub is_transposition_rate: f64,
    pub ris_transposition_rate: f64,
    pub gene_transposition_rate: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.5,
            one_point_rate: 0.3,
            two_point_rate: 0.3,
            gene_recombination_rate: 0.1,
            is_transposition_rate: 0.1,
            ris_transposition_rate: 0.1,
            gene_transposition_rate: 0.1,
        }
    }
}

impl OperatorConfig {
    fn named_rates(&self) -> [(&'static str, f64); 7] {
        [
            ("mutation_rate", self.mutation_rate),
            ("one_point_rate", self.one_point_rate),
            ("two_point_rate", self.two_point_rate),
            ("gene_recombination_rate", self.gene_recombination_rate),
            ("is_transposition_rate", self.is_transposition_rate),
            ("ris_transposition_rate", self.ris_transposition_rate),
            ("gene_transposition_rate", self.gene_transposition_rate),
        ]
    }

    /// Rates as handed to `GeneticOperators`, which clamps out-of-range values.
    pub fn to_rates(&self) -> OperatorRates {
        OperatorRates {
            mutation: self.mutation_rate,
            one_point: self.one_point_rate,
            two_point: self.two_point_rate,
            gene_recombination: self.gene_recombination_rate,
            is_transposition: self.is_transposition_rate,
            ris_transposition: self.ris_transposition_rate,
            gene_transposition: self.gene_transposition_rate,
        }
    }
}

impl ConfigSection for OperatorConfig {
    fn section_name() -> &'static str {
        "operators"
    }

    // Probabilities are never rejected, only reported.
    fn validate(&self) -> Result<()> {
        for (name, rate) in self.named_rates() {
            if !(0.0..=1.0).contains(&rate) {
                log::warn!("operators.{} = {} is outside [0, 1] and will be treated as 1.0", name, rate);
            }
        }
        Ok(())
    }
}
