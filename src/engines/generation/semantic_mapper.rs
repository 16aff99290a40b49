use crate::engines::generation::{
    chromosome::Chromosome,
    gene_consumer::GeneConsumer,
    genome::Genome,
};
use crate::error::{GepError, Result};
use crate::types::{AstNode, Symbol};
use std::sync::Arc;

/// Decodes genes into expression trees (Karva notation).
///
/// A gene is read breadth-first: the first symbol is the root, then every
/// function on the current level takes the next `arity` symbols as its
/// children, left to right, before the next level starts. Reading stops as
/// soon as every argument is filled, so the rest of the gene is non-coding.
pub struct SemanticMapper {
    genome: Arc<Genome>,
    arities: Vec<usize>,
}

struct FlatNode {
    symbol: Symbol,
    children: Vec<usize>,
}

impl SemanticMapper {
    /// `arities[i]` is the arity of function `i`; each must be in
    /// `[1, max_arity]`.
    pub fn new(genome: Arc<Genome>, arities: Vec<usize>) -> Result<Self> {
        if arities.len() != genome.function_count() {
            return Err(GepError::Decode(format!(
                "{} arities for {} functions",
                arities.len(),
                genome.function_count()
            )));
        }
        for (i, &arity) in arities.iter().enumerate() {
            if arity == 0 || arity > genome.max_arity() {
                return Err(GepError::Decode(format!(
                    "function '{}' has arity {}, allowed range is [1, {}]",
                    genome.function(i).unwrap_or("?"),
                    arity,
                    genome.max_arity()
                )));
            }
        }
        Ok(Self { genome, arities })
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn arity(&self, symbol: Symbol) -> usize {
        match symbol {
            Symbol::Terminal(_) => 0,
            Symbol::Function(i) => self.arities.get(i).copied().unwrap_or(0),
        }
    }

    /// One tree per gene, in gene order.
    pub fn map_chromosome(&self, chromosome: &Chromosome) -> Result<Vec<AstNode>> {
        chromosome.genes().map(|gene| self.map_gene(gene)).collect()
    }

    pub fn map_gene(&self, gene: &[Symbol]) -> Result<AstNode> {
        let nodes = self.read_levels(gene)?;
        self.build(&nodes, 0)
    }

    /// Number of symbols the gene's tree actually uses.
    pub fn coding_length(&self, gene: &[Symbol]) -> Result<usize> {
        Ok(self.read_levels(gene)?.len())
    }

    fn read_levels(&self, gene: &[Symbol]) -> Result<Vec<FlatNode>> {
        let mut consumer = GeneConsumer::new(gene);
        let root = consumer
            .consume()
            .ok_or_else(|| GepError::Decode("empty gene".to_string()))?;

        let mut nodes = vec![FlatNode {
            symbol: root,
            children: Vec::new(),
        }];

        let mut next = 0;
        while next < nodes.len() {
            for _ in 0..self.arity(nodes[next].symbol) {
                let symbol = consumer.consume().ok_or_else(|| {
                    GepError::Decode(format!("gene exhausted after {} symbols", consumer.position()))
                })?;
                let child = nodes.len();
                nodes.push(FlatNode {
                    symbol,
                    children: Vec::new(),
                });
                nodes[next].children.push(child);
            }
            next += 1;
        }

        Ok(nodes)
    }

    fn build(&self, nodes: &[FlatNode], index: usize) -> Result<AstNode> {
        let node = &nodes[index];
        let name = self
            .genome
            .name_of(node.symbol)
            .ok_or_else(|| GepError::Decode(format!("symbol {:?} not in genome", node.symbol)))?
            .to_string();

        match node.symbol {
            Symbol::Terminal(_) => Ok(AstNode::Terminal(name)),
            Symbol::Function(_) => {
                let args = node
                    .children
                    .iter()
                    .map(|&child| self.build(nodes, child))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AstNode::Call { function: name, args })
            }
        }
    }
}
