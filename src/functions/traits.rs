use crate::error::Result;

/// Primitive numeric function usable as a function symbol
pub trait Primitive: Send + Sync {
    fn ui_name(&self) -> &'static str;

    /// Symbol name used in genomes and formulas
    fn alias(&self) -> &'static str;

    fn arity(&self) -> usize;

    /// Apply to exactly `arity()` arguments
    fn execute(&self, args: &[f64]) -> Result<f64>;
}
