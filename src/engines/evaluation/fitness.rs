use crate::engines::evaluation::expression::ExpressionNode;
use crate::error::{GepError, Result};
use crate::types::Bindings;
use serde::{Deserialize, Serialize};

/// Score credited to a test case whose evaluation fails.
pub const FAILED_CASE_VALUE: f64 = -1_000_000_000.0;

/// One fitness case: input bindings and the value they should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub inputs: Bindings,
    pub expected: f64,
}

impl TestCase {
    pub fn new(inputs: Bindings, expected: f64) -> Self {
        Self { inputs, expected }
    }
}

/// How the per-gene roots of a chromosome combine into one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeneLinking {
    /// Only the first gene's tree is evaluated.
    #[default]
    First,
    /// The trees of all genes are added together.
    Sum,
}

impl GeneLinking {
    pub fn link<N>(&self, roots: &[N], bindings: &Bindings) -> Result<f64>
    where
        N: ExpressionNode<Value = f64>,
    {
        let first = roots
            .first()
            .ok_or_else(|| GepError::Evaluation("no expression roots to link".to_string()))?;

        match self {
            GeneLinking::First => first.evaluate(bindings),
            GeneLinking::Sum => roots.iter().map(|root| root.evaluate(bindings)).sum(),
        }
    }

    /// Formula of the linked expression, as `link` evaluates it
    pub fn formula<N: ExpressionNode>(&self, roots: &[N]) -> String {
        match self {
            GeneLinking::First => roots.first().map(|root| root.to_formula()).unwrap_or_default(),
            GeneLinking::Sum => roots
                .iter()
                .map(|root| root.to_formula())
                .collect::<Vec<_>>()
                .join(" + "),
        }
    }
}

/// Aggregates the error of an expression over every test case.
///
/// Each case contributes `max_fitness - |value - expected|`, so a perfect
/// expression scores `max_fitness * cases`.
#[derive(Debug, Clone)]
pub struct Fitness {
    cases: Vec<TestCase>,
    max_fitness: f64,
    linking: GeneLinking,
}

impl Fitness {
    pub fn new(cases: Vec<TestCase>, max_fitness: f64, linking: GeneLinking) -> Self {
        Self {
            cases,
            max_fitness,
            linking,
        }
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn max_fitness(&self) -> f64 {
        self.max_fitness
    }

    pub fn linking(&self) -> GeneLinking {
        self.linking
    }

    /// Best achievable score
    pub fn perfect_score(&self) -> f64 {
        self.max_fitness * self.cases.len() as f64
    }

    pub fn evaluate<N>(&self, roots: &[N]) -> f64
    where
        N: ExpressionNode<Value = f64>,
    {
        self.cases
            .iter()
            .map(|case| {
                let value = match self.linking.link(roots, &case.inputs) {
                    Ok(v) if v.is_finite() => v,
                    _ => FAILED_CASE_VALUE,
                };
                self.max_fitness - (value - case.expected).abs()
            })
            .sum()
    }
}

/// Normalise raw scores into selection weights summing to 1.
///
/// Scores are shifted so the worst becomes zero; when every score is equal
/// (or none is finite) the weights are uniform. Non-finite scores get zero
/// weight.
pub fn proportional_weights(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let uniform = vec![1.0 / scores.len() as f64; scores.len()];

    let finite: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
    let min = match finite.iter().copied().reduce(f64::min) {
        Some(min) => min,
        None => return uniform,
    };

    let shifted: Vec<f64> = scores
        .iter()
        .map(|&s| if s.is_finite() { s - min } else { 0.0 })
        .collect();
    let total: f64 = shifted.iter().sum();

    if total <= 0.0 || !total.is_finite() {
        return uniform;
    }

    shifted.iter().map(|s| s / total).collect()
}

/// Index of the highest finite score; the first one wins ties.
pub fn best_index(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if score <= b => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i).or(if scores.is_empty() { None } else { Some(0) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Constant(f64);

    impl ExpressionNode for Constant {
        type Value = f64;

        fn evaluate(&self, _bindings: &Bindings) -> Result<f64> {
            Ok(self.0)
        }

        fn to_formula(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl ExpressionNode for Failing {
        type Value = f64;

        fn evaluate(&self, _bindings: &Bindings) -> Result<f64> {
            Err(GepError::DivisionByZero)
        }

        fn to_formula(&self) -> String {
            "fail".to_string()
        }
    }

    fn cases() -> Vec<TestCase> {
        vec![
            TestCase::new(Bindings::new(), 2.0),
            TestCase::new(Bindings::new(), 4.0),
        ]
    }

    #[test]
    fn test_score_aggregation() {
        let fitness = Fitness::new(cases(), 100.0, GeneLinking::First);
        // |2-3| + |4-3|
        assert_eq!(fitness.evaluate(&[Constant(3.0)]), 198.0);
        assert_eq!(fitness.perfect_score(), 200.0);
        assert_eq!(fitness.perfect_score(), fitness.max_fitness() * fitness.cases().len() as f64);
    }

    #[test]
    fn test_linking() {
        let roots = [Constant(1.0), Constant(2.0)];
        let bindings = Bindings::new();
        assert_eq!(GeneLinking::First.link(&roots, &bindings).unwrap(), 1.0);
        assert_eq!(GeneLinking::Sum.link(&roots, &bindings).unwrap(), 3.0);
        assert!(GeneLinking::Sum.link::<Constant>(&[], &bindings).is_err());
        assert_eq!(GeneLinking::First.formula(&roots), "1");
        assert_eq!(GeneLinking::Sum.formula(&roots), "1 + 2");
    }

    #[test]
    fn test_failed_case_scores_sentinel() {
        let fitness = Fitness::new(vec![TestCase::new(Bindings::new(), 0.0)], 10.0, GeneLinking::First);
        assert_eq!(fitness.evaluate(&[Failing]), 10.0 - 1_000_000_000.0);
    }

    #[test]
    fn test_proportional_weights() {
        let weights = proportional_weights(&[1.0, 3.0, 5.0]);
        assert_eq!(weights, vec![0.0, 2.0 / 6.0, 4.0 / 6.0]);

        let equal = proportional_weights(&[7.0, 7.0]);
        assert_eq!(equal, vec![0.5, 0.5]);

        let with_nan = proportional_weights(&[f64::NAN, 1.0, 2.0]);
        assert_eq!(with_nan, vec![0.0, 0.0, 1.0]);

        assert!(proportional_weights(&[]).is_empty());
    }

    #[test]
    fn test_best_index() {
        assert_eq!(best_index(&[1.0, 5.0, 5.0, 2.0]), Some(1));
        assert_eq!(best_index(&[f64::NAN, -3.0]), Some(1));
        assert_eq!(best_index(&[f64::NAN]), Some(0));
        assert_eq!(best_index(&[]), None);
    }
}
