use crate::functions::{
    primitives::{Add, Divide, Multiply, Negate, Power, SquareRoot, Subtract},
    traits::Primitive,
};
use std::{collections::HashMap, sync::Arc};

/// Primitives available as function symbols, keyed by alias
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Primitive>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_arithmetic();
        registry
    }

    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Add or replace a primitive under its alias.
    pub fn register(&mut self, primitive: Arc<dyn Primitive>) {
        self.functions.insert(primitive.alias().to_string(), primitive);
    }

    pub fn get_primitive(&self, alias: &str) -> Option<Arc<dyn Primitive>> {
        self.functions.get(alias).cloned()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.functions.contains_key(alias)
    }

    /// Aliases in sorted order
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.functions.keys().cloned().collect();
        aliases.sort();
        aliases
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_arithmetic(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(Add),
            Arc::new(Subtract),
            Arc::new(Multiply),
            Arc::new(Divide),
            Arc::new(Power),
            Arc::new(SquareRoot),
            Arc::new(Negate),
        ];
        for primitive in primitives {
            self.register(primitive);
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
