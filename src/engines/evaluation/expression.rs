use crate::engines::generation::{chromosome::Chromosome, genome::Genome};
use crate::error::Result;
use crate::types::Bindings;
use std::fmt::Debug;

/// A decoded, evaluable expression tree.
pub trait ExpressionNode: Debug {
    type Value;

    /// Evaluate with the given terminal bindings
    fn evaluate(&self, bindings: &Bindings<Self::Value>) -> Result<Self::Value>;

    /// Human-readable form for logs and reports
    fn to_formula(&self) -> String;
}

/// Decode capability plugged in per expression domain.
///
/// Implementations turn a chromosome into one expression root per gene,
/// keeping the evolutionary core independent of what the symbols mean.
pub trait Decoder {
    type Node: ExpressionNode;

    fn decode(&self, genome: &Genome, chromosome: &Chromosome) -> Result<Vec<Self::Node>>;
}
