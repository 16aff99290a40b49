use crate::error::{GepError, Result};
use crate::types::Symbol;
use std::ops::Range;

/// Head and gene lengths of a chromosome's genes.
///
/// All `(gene, offset)` arithmetic lives here so the operators never derive
/// flat positions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneShape {
    head_length: usize,
    gene_length: usize,
}

impl GeneShape {
    pub fn new(head_length: usize, gene_length: usize) -> Self {
        Self { head_length, gene_length }
    }

    pub fn head_length(&self) -> usize {
        self.head_length
    }

    pub fn gene_length(&self) -> usize {
        self.gene_length
    }

    pub fn tail_length(&self) -> usize {
        self.gene_length - self.head_length
    }

    /// Flat position of `offset` within gene `gene`
    pub fn position(&self, gene: usize, offset: usize) -> usize {
        gene * self.gene_length + offset
    }

    /// `(gene, offset)` of a flat position
    pub fn locate(&self, position: usize) -> (usize, usize) {
        (position / self.gene_length, position % self.gene_length)
    }

    pub fn gene_range(&self, gene: usize) -> Range<usize> {
        let start = gene * self.gene_length;
        start..start + self.gene_length
    }

    pub fn head_range(&self, gene: usize) -> Range<usize> {
        let start = gene * self.gene_length;
        start..start + self.head_length
    }

    pub fn tail_range(&self, gene: usize) -> Range<usize> {
        let start = gene * self.gene_length;
        start + self.head_length..start + self.gene_length
    }

    pub fn is_tail(&self, position: usize) -> bool {
        self.locate(position).1 >= self.head_length
    }
}

/// A fixed-length symbol buffer made of one or more genes.
///
/// Chromosomes are values: operators read them and return new ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    symbols: Vec<Symbol>,
    shape: GeneShape,
}

impl Chromosome {
    /// Wrap a symbol buffer, checking only that it holds whole genes.
    ///
    /// Alphabet membership and the tail rule are checked by
    /// `Genome::chromosome`.
    pub fn from_parts(symbols: Vec<Symbol>, shape: GeneShape) -> Result<Self> {
        if shape.gene_length == 0 || shape.head_length == 0 || shape.head_length >= shape.gene_length {
            return Err(GepError::Construction(format!(
                "invalid gene shape: head {} within gene {}",
                shape.head_length, shape.gene_length
            )));
        }
        if symbols.is_empty() || symbols.len() % shape.gene_length != 0 {
            return Err(GepError::Construction(format!(
                "chromosome length {} is not a positive multiple of gene length {}",
                symbols.len(),
                shape.gene_length
            )));
        }
        Ok(Self { symbols, shape })
    }

    /// Gene-wise rebuild; every gene must be exactly one gene length long.
    pub fn from_genes<'a, I>(genes: I, shape: GeneShape) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [Symbol]>,
    {
        let mut symbols = Vec::new();
        for gene in genes {
            if gene.len() != shape.gene_length {
                return Err(GepError::ShapeMismatch {
                    expected: format!("gene of length {}", shape.gene_length),
                    actual: format!("gene of length {}", gene.len()),
                });
            }
            symbols.extend_from_slice(gene);
        }
        Self::from_parts(symbols, shape)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn shape(&self) -> GeneShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn gene_count(&self) -> usize {
        self.symbols.len() / self.shape.gene_length
    }

    pub fn is_monogenic(&self) -> bool {
        self.gene_count() == 1
    }

    /// Panics if `index >= gene_count()`, like slice indexing.
    pub fn gene(&self, index: usize) -> &[Symbol] {
        &self.symbols[self.shape.gene_range(index)]
    }

    pub fn head(&self, index: usize) -> &[Symbol] {
        &self.symbols[self.shape.head_range(index)]
    }

    pub fn tail(&self, index: usize) -> &[Symbol] {
        &self.symbols[self.shape.tail_range(index)]
    }

    pub fn genes(&self) -> impl Iterator<Item = &[Symbol]> {
        self.symbols.chunks(self.shape.gene_length)
    }

    /// Copy with gene `index` replaced by `gene`.
    pub fn with_gene(&self, index: usize, gene: &[Symbol]) -> Chromosome {
        let mut symbols = self.symbols.clone();
        symbols[self.shape.gene_range(index)].clone_from_slice(gene);
        Chromosome { symbols, shape: self.shape }
    }

    /// Copy with the head of gene `index` replaced by `head`.
    pub fn with_head(&self, index: usize, head: &[Symbol]) -> Chromosome {
        let mut symbols = self.symbols.clone();
        symbols[self.shape.head_range(index)].clone_from_slice(head);
        Chromosome { symbols, shape: self.shape }
    }

    /// Copy with a single position overwritten.
    pub fn with_symbol(&self, position: usize, symbol: Symbol) -> Chromosome {
        let mut symbols = self.symbols.clone();
        symbols[position] = symbol;
        Chromosome { symbols, shape: self.shape }
    }

    /// Same shape, different buffer of identical length.
    pub(crate) fn rebuilt(&self, symbols: Vec<Symbol>) -> Chromosome {
        debug_assert_eq!(symbols.len(), self.symbols.len());
        Chromosome { symbols, shape: self.shape }
    }

    /// First flat position where a tail holds a function symbol.
    pub fn first_tail_violation(&self) -> Option<usize> {
        self.symbols
            .iter()
            .enumerate()
            .find(|(position, symbol)| symbol.is_function() && self.shape.is_tail(*position))
            .map(|(position, _)| position)
    }

    pub fn is_well_formed(&self) -> bool {
        self.first_tail_violation().is_none()
    }
}
