//! Gene Expression Programming: fixed-length linear chromosomes with a
//! head/tail layout, decoded breadth-first into expression trees and evolved
//! with mutation, transposition and recombination under elitist selection.

pub mod config;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use engines::generation::{
    Chromosome, EvolutionEngine, GeneticOperators, Genome, Individual, Population, RunSummary,
};
pub use error::{CapacityExceeded, GepError, Result};
