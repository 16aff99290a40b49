use crate::engines::evaluation::expression::{Decoder, ExpressionNode};
use crate::engines::generation::{chromosome::Chromosome, genome::Genome, semantic_mapper::SemanticMapper};
use crate::error::{GepError, Result};
use crate::functions::{registry::FunctionRegistry, traits::Primitive};
use crate::types::{AstNode, Bindings};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type PrimitiveTable = Arc<HashMap<String, Arc<dyn Primitive>>>;

/// Decodes chromosomes into real-valued arithmetic expressions.
///
/// Every function symbol of the genome must name a registered primitive
/// whose arity does not exceed the genome's max arity.
pub struct ArithmeticDecoder {
    mapper: SemanticMapper,
    primitives: PrimitiveTable,
}

impl ArithmeticDecoder {
    pub fn new(registry: &FunctionRegistry, genome: Arc<Genome>) -> Result<Self> {
        let mut primitives = HashMap::new();
        let mut arities = Vec::with_capacity(genome.function_count());

        for name in genome.functions() {
            let primitive = registry
                .get_primitive(name)
                .ok_or_else(|| GepError::Configuration(format!("Function {} not found", name)))?;
            arities.push(primitive.arity());
            primitives.insert(name.clone(), primitive);
        }

        let mapper = SemanticMapper::new(genome, arities)?;
        Ok(Self {
            mapper,
            primitives: Arc::new(primitives),
        })
    }
}

impl Decoder for ArithmeticDecoder {
    type Node = ArithmeticExpression;

    fn decode(&self, genome: &Genome, chromosome: &Chromosome) -> Result<Vec<ArithmeticExpression>> {
        let own = self.mapper.genome().as_ref();
        if !std::ptr::eq(genome, own) && genome != own {
            return Err(GepError::Decode("chromosome belongs to a different genome".to_string()));
        }

        Ok(self
            .mapper
            .map_chromosome(chromosome)?
            .into_iter()
            .map(|ast| ArithmeticExpression {
                ast,
                primitives: Arc::clone(&self.primitives),
            })
            .collect())
    }
}

/// A decoded arithmetic expression tree
#[derive(Clone)]
pub struct ArithmeticExpression {
    ast: AstNode,
    primitives: PrimitiveTable,
}

impl ArithmeticExpression {
    pub fn ast(&self) -> &AstNode {
        &self.ast
    }

    fn eval_node(&self, node: &AstNode, bindings: &Bindings) -> Result<f64> {
        match node {
            AstNode::Terminal(name) => bindings
                .get(name)
                .copied()
                .or_else(|| name.parse::<f64>().ok())
                .ok_or_else(|| GepError::UnboundVariable(name.clone())),
            AstNode::Call { function, args } => {
                let primitive = self
                    .primitives
                    .get(function)
                    .ok_or_else(|| GepError::Evaluation(format!("Function {} not found", function)))?;
                if args.len() != primitive.arity() {
                    return Err(GepError::Evaluation(format!(
                        "{} expects {} arguments, got {}",
                        function,
                        primitive.arity(),
                        args.len()
                    )));
                }
                let values = args
                    .iter()
                    .map(|arg| self.eval_node(arg, bindings))
                    .collect::<Result<Vec<f64>>>()?;
                primitive.execute(&values)
            }
        }
    }
}

impl ExpressionNode for ArithmeticExpression {
    type Value = f64;

    fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        self.eval_node(&self.ast, bindings)
    }

    fn to_formula(&self) -> String {
        self.ast.to_formula()
    }
}

impl fmt::Debug for ArithmeticExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArithmeticExpression")
            .field("formula", &self.ast.to_formula())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome(functions: &[&str]) -> Arc<Genome> {
        Arc::new(
            Genome::new(
                vec!["a".to_string(), "2".to_string()],
                functions.iter().map(|f| f.to_string()).collect(),
                2,
                3,
            )
            .unwrap(),
        )
    }

    fn bindings(a: f64) -> Bindings {
        let mut b = Bindings::new();
        b.insert("a".to_string(), a);
        b
    }

    #[test]
    fn test_decode_and_evaluate() {
        let registry = FunctionRegistry::new();
        let genome = genome(&["+", "*", "Q"]);
        let decoder = ArithmeticDecoder::new(&registry, Arc::clone(&genome)).unwrap();

        // (a * a) + 2, tail padding afterwards
        let chromosome = genome.parse_chromosome("+*2aaaa").unwrap();
        let roots = decoder.decode(&genome, &chromosome).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].to_formula(), "((a * a) + 2)");
        assert_eq!(roots[0].evaluate(&bindings(3.0)).unwrap(), 11.0);
    }

    #[test]
    fn test_unbound_variable_is_typed_failure() {
        let registry = FunctionRegistry::new();
        let genome = genome(&["+", "*", "Q"]);
        let decoder = ArithmeticDecoder::new(&registry, Arc::clone(&genome)).unwrap();
        let chromosome = genome.parse_chromosome("aaaaaaa").unwrap();
        let roots = decoder.decode(&genome, &chromosome).unwrap();

        match roots[0].evaluate(&Bindings::new()) {
            Err(GepError::UnboundVariable(name)) => assert_eq!(name, "a"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_division_by_zero_surfaces() {
        let registry = FunctionRegistry::new();
        let genome = genome(&["/", "-"]);
        let decoder = ArithmeticDecoder::new(&registry, Arc::clone(&genome)).unwrap();
        // a / (a - a)
        let chromosome = genome.parse_chromosome("/a-aaaa").unwrap();
        let roots = decoder.decode(&genome, &chromosome).unwrap();
        assert!(matches!(roots[0].evaluate(&bindings(1.0)), Err(GepError::DivisionByZero)));
    }

    #[test]
    fn test_unknown_function_rejected() {
        let registry = FunctionRegistry::new();
        assert!(ArithmeticDecoder::new(&registry, genome(&["+", "%"])).is_err());
    }

    #[test]
    fn test_foreign_genome_rejected() {
        let registry = FunctionRegistry::new();
        let genome_a = genome(&["+"]);
        let genome_b = genome(&["*"]);
        let decoder = ArithmeticDecoder::new(&registry, Arc::clone(&genome_a)).unwrap();
        let chromosome = genome_b.parse_chromosome("*aaaaaa").unwrap();
        assert!(decoder.decode(&genome_b, &chromosome).is_err());
    }
}
