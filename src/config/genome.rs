use super::traits::ConfigSection;
use crate::engines::generation::genome::Genome;
use crate::error::{GepError, Result};
use crate::functions::registry::FunctionRegistry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenomeConfig {
    pub terminals: Vec<String>,
    pub functions: Vec<String>,
    /// Taken from the registered primitives when absent.
    pub max_arity: Option<usize>,
    pub head_length: usize,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            terminals: vec!["a".to_string()],
            functions: vec!["+".to_string(), "-".to_string(), "*".to_string(), "/".to_string()],
            max_arity: None,
            head_length: 7,
        }
    }
}

impl GenomeConfig {
    /// Largest arity among the configured functions
    pub fn resolve_max_arity(&self, registry: &FunctionRegistry) -> Result<usize> {
        if let Some(max_arity) = self.max_arity {
            return Ok(max_arity);
        }

        self.functions
            .iter()
            .map(|name| {
                registry
                    .get_primitive(name)
                    .map(|p| p.arity())
                    .ok_or_else(|| GepError::Configuration(format!("Function {} not found", name)))
            })
            .try_fold(0, |max, arity| arity.map(|a| max.max(a)))
    }

    pub fn build(&self, registry: &FunctionRegistry) -> Result<Genome> {
        let max_arity = self.resolve_max_arity(registry)?;
        Genome::new(
            self.terminals.clone(),
            self.functions.clone(),
            max_arity,
            self.head_length,
        )
    }
}

impl ConfigSection for GenomeConfig {
    fn section_name() -> &'static str {
        "genome"
    }

    fn validate(&self) -> Result<()> {
        if self.terminals.is_empty() {
            return Err(GepError::Configuration(
                "At least one terminal is required".to_string(),
            ));
        }
        if self.functions.is_empty() {
            return Err(GepError::Configuration(
                "At least one function is required".to_string(),
            ));
        }
        if self.head_length == 0 {
            return Err(GepError::Configuration(
                "Head length must be positive".to_string(),
            ));
        }
        if self.max_arity == Some(0) {
            return Err(GepError::Configuration(
                "Max arity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_arity_from_registry() {
        let registry = FunctionRegistry::new();
        let config = GenomeConfig {
            functions: vec!["Q".to_string(), "*".to_string()],
            ..GenomeConfig::default()
        };
        assert_eq!(config.resolve_max_arity(&registry).unwrap(), 2);

        let genome = config.build(&registry).unwrap();
        assert_eq!(genome.max_arity(), 2);
        assert_eq!(genome.tail_length(), 8);
    }

    #[test]
    fn test_unknown_function_without_explicit_arity() {
        let registry = FunctionRegistry::new();
        let config = GenomeConfig {
            functions: vec!["sin".to_string()],
            ..GenomeConfig::default()
        };
        assert!(config.build(&registry).is_err());
    }

    #[test]
    fn test_validation() {
        assert!(GenomeConfig::default().validate().is_ok());
        let empty = GenomeConfig {
            terminals: Vec::new(),
            ..GenomeConfig::default()
        };
        assert!(empty.validate().is_err());
    }
}
