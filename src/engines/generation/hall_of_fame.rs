use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliteExpression {
    pub formula: String,    // For deduplication
    pub chromosome: String, // Rendered symbols
    pub fitness: f64,
    pub generation: usize,
}

/// Best distinct expressions seen during a run, fittest first.
pub struct HallOfFame {
    expressions: Vec<EliteExpression>,
    max_size: usize,
    seen_formulas: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            expressions: Vec::new(),
            max_size,
            seen_formulas: HashSet::new(),
        }
    }

    /// Attempt to add an expression to the Hall of Fame
    pub fn try_add(&mut self, expression: EliteExpression) -> bool {
        if self.max_size == 0 || !expression.fitness.is_finite() {
            return false;
        }
        if self.seen_formulas.contains(&expression.formula) {
            return false;
        }

        if self.expressions.len() >= self.max_size {
            match self.expressions.last() {
                Some(worst) if worst.fitness >= expression.fitness => return false,
                _ => {}
            }
        }

        self.seen_formulas.insert(expression.formula.clone());
        self.expressions.push(expression);
        self.sort_and_trim();
        true
    }

    fn sort_and_trim(&mut self) {
        // Stable: earlier entries win ties
        self.expressions.sort_by(|a, b| {
            b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.expressions.len() > self.max_size {
            if let Some(removed) = self.expressions.pop() {
                self.seen_formulas.remove(&removed.formula);
            }
        }
    }

    pub fn get_all(&self) -> &[EliteExpression] {
        &self.expressions
    }

    pub fn get_top_n(&self, n: usize) -> &[EliteExpression] {
        &self.expressions[..n.min(self.expressions.len())]
    }

    pub fn best(&self) -> Option<&EliteExpression> {
        self.expressions.first()
    }

    pub fn filter_by_threshold(&self, min_fitness: f64) -> Vec<EliteExpression> {
        self.expressions
            .iter()
            .filter(|e| e.fitness >= min_fitness)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elite(formula: &str, fitness: f64) -> EliteExpression {
        EliteExpression {
            formula: formula.to_string(),
            chromosome: String::new(),
            fitness,
            generation: 0,
        }
    }

    #[test]
    fn test_sorted_and_bounded() {
        let mut hof = HallOfFame::new(2);
        assert!(hof.try_add(elite("a", 1.0)));
        assert!(hof.try_add(elite("b", 3.0)));
        assert!(hof.try_add(elite("c", 2.0)));

        let formulas: Vec<&str> = hof.get_all().iter().map(|e| e.formula.as_str()).collect();
        assert_eq!(formulas, vec!["b", "c"]);
        assert!(!hof.try_add(elite("d", 0.5)));
        assert_eq!(hof.best().map(|e| e.fitness), Some(3.0));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut hof = HallOfFame::new(5);
        assert!(hof.try_add(elite("(a * a)", 4.0)));
        assert!(!hof.try_add(elite("(a * a)", 9.0)));
        assert_eq!(hof.len(), 1);
    }

    #[test]
    fn test_evicted_formula_can_return() {
        let mut hof = HallOfFame::new(1);
        assert!(hof.try_add(elite("a", 1.0)));
        assert!(hof.try_add(elite("b", 2.0)));
        assert!(hof.try_add(elite("a", 5.0)));
        assert_eq!(hof.get_top_n(10).len(), 1);
        assert_eq!(hof.filter_by_threshold(4.0).len(), 1);
    }

    #[test]
    fn test_non_finite_ignored() {
        let mut hof = HallOfFame::new(3);
        assert!(!hof.try_add(elite("nan", f64::NAN)));
        assert!(hof.is_empty());
    }
}
