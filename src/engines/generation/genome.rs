use crate::engines::generation::chromosome::{Chromosome, GeneShape};
use crate::error::{GepError, Result};
use crate::types::Symbol;
use rand::Rng;
use std::collections::HashSet;

/// Genome: the grammar every chromosome of a run is written in
///
/// A genome fixes two alphabets and the shape of a gene:
/// - **Terminals**: zero-arity leaf symbols (variables, constants)
/// - **Functions**: internal-node symbols with arity up to `max_arity`
/// - **Head**: `head_length` positions that may hold any symbol
/// - **Tail**: `head_length * (max_arity - 1) + 1` positions of terminals only
///
/// # Why is the tail length derived?
///
/// A head made entirely of `max_arity`-ary functions needs
/// `head_length * (max_arity - 1) + 1` leaves to close every open argument.
/// Deriving the tail from the head means any head, however it is mutated,
/// decodes into a complete tree without reading past the end of the gene.
///
/// # Sharing
///
/// A genome is immutable once built. Wrap it in an `Arc` and hand clones of the
/// `Arc` to the operators, individuals and population of a run.
///
/// # Example
///
/// ```
/// use gep_engine::engines::generation::Genome;
///
/// let genome = Genome::new(
///     vec!["a".to_string()],
///     vec!["+".to_string(), "-".to_string(), "*".to_string()],
///     2,
///     15,
/// ).unwrap();
/// assert_eq!(genome.tail_length(), 16);
/// assert_eq!(genome.gene_length(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    terminals: Vec<String>,
    functions: Vec<String>,
    max_arity: usize,
    head_length: usize,
    tail_length: usize,
}

impl Genome {
    pub fn new(
        terminals: Vec<String>,
        functions: Vec<String>,
        max_arity: usize,
        head_length: usize,
    ) -> Result<Self> {
        if terminals.is_empty() {
            return Err(GepError::InvalidGenome("terminal alphabet is empty".to_string()));
        }
        if functions.is_empty() {
            return Err(GepError::InvalidGenome("function alphabet is empty".to_string()));
        }
        if max_arity == 0 {
            return Err(GepError::InvalidGenome("max arity must be at least 1".to_string()));
        }
        if head_length == 0 {
            return Err(GepError::InvalidGenome("head length must be at least 1".to_string()));
        }

        let mut seen = HashSet::new();
        for name in terminals.iter().chain(functions.iter()) {
            if name.is_empty() {
                return Err(GepError::InvalidGenome("symbol names must not be empty".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(GepError::InvalidGenome(format!("duplicate symbol '{}'", name)));
            }
        }

        let tail_length = head_length * (max_arity - 1) + 1;

        Ok(Self {
            terminals,
            functions,
            max_arity,
            head_length,
            tail_length,
        })
    }

    pub fn head_length(&self) -> usize {
        self.head_length
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    pub fn gene_length(&self) -> usize {
        self.head_length + self.tail_length
    }

    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    /// Size of the full alphabet (terminals and functions)
    pub fn size(&self) -> usize {
        self.terminals.len() + self.functions.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn terminal(&self, index: usize) -> Option<&str> {
        self.terminals.get(index).map(String::as_str)
    }

    pub fn function(&self, index: usize) -> Option<&str> {
        self.functions.get(index).map(String::as_str)
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn is_function(&self, symbol: Symbol) -> bool {
        matches!(symbol, Symbol::Function(i) if i < self.functions.len())
    }

    /// Whether the symbol indexes into one of this genome's alphabets.
    pub fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(i) => i < self.terminals.len(),
            Symbol::Function(i) => i < self.functions.len(),
        }
    }

    pub fn shape(&self) -> GeneShape {
        GeneShape::new(self.head_length, self.gene_length())
    }

    /// Map an index over the full alphabet to a symbol.
    ///
    /// Functions occupy `[0, function_count)`, terminals follow.
    pub fn alphabet_symbol(&self, index: usize) -> Option<Symbol> {
        let nf = self.functions.len();
        if index < nf {
            Some(Symbol::Function(index))
        } else if index < self.size() {
            Some(Symbol::Terminal(index - nf))
        } else {
            None
        }
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<Symbol> {
        if let Some(i) = self.functions.iter().position(|f| f == name) {
            return Some(Symbol::Function(i));
        }
        self.terminals
            .iter()
            .position(|t| t == name)
            .map(Symbol::Terminal)
    }

    pub fn name_of(&self, symbol: Symbol) -> Option<&str> {
        match symbol {
            Symbol::Terminal(i) => self.terminal(i),
            Symbol::Function(i) => self.function(i),
        }
    }

    /// Uniform draw over the full alphabet
    pub fn random_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        let v = rng.gen_range(0..self.size());
        self.alphabet_symbol(v).unwrap_or(Symbol::Terminal(0))
    }

    pub fn random_terminal<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        Symbol::Terminal(rng.gen_range(0..self.terminals.len()))
    }

    pub fn random_function<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        Symbol::Function(rng.gen_range(0..self.functions.len()))
    }

    /// Generate a grammar-valid chromosome of `gene_count` genes.
    ///
    /// Each head position flips a fair coin between a random function and a
    /// random terminal; tail positions are always random terminals.
    pub fn random_chromosome<R: Rng + ?Sized>(&self, gene_count: usize, rng: &mut R) -> Result<Chromosome> {
        if gene_count == 0 {
            return Err(GepError::Construction("gene count must be positive".to_string()));
        }

        let mut symbols = Vec::with_capacity(gene_count * self.gene_length());
        for _ in 0..gene_count {
            for _ in 0..self.head_length {
                let symbol = if rng.gen_range(0..2) == 0 {
                    self.random_function(rng)
                } else {
                    self.random_terminal(rng)
                };
                symbols.push(symbol);
            }
            for _ in 0..self.tail_length {
                symbols.push(self.random_terminal(rng));
            }
        }

        Chromosome::from_parts(symbols, self.shape())
    }

    /// Check a symbol sequence against the grammar and wrap it as a chromosome.
    pub fn chromosome(&self, symbols: Vec<Symbol>) -> Result<Chromosome> {
        if let Some(bad) = symbols.iter().find(|s| !self.contains(**s)) {
            return Err(GepError::Construction(format!("symbol {:?} is not in the alphabet", bad)));
        }

        let chromosome = Chromosome::from_parts(symbols, self.shape())?;
        if let Some(position) = chromosome.first_tail_violation() {
            return Err(GepError::Construction(format!(
                "function symbol in tail at position {}",
                position
            )));
        }
        Ok(chromosome)
    }

    /// Parse a chromosome written with symbol names.
    ///
    /// Whitespace-separated names are used when the text contains whitespace;
    /// otherwise every character is one symbol.
    pub fn parse_chromosome(&self, text: &str) -> Result<Chromosome> {
        let tokens: Vec<String> = if text.split_whitespace().nth(1).is_some() {
            text.split_whitespace().map(str::to_string).collect()
        } else {
            text.trim().chars().map(|c| c.to_string()).collect()
        };

        let symbols = tokens
            .iter()
            .map(|token| {
                self.symbol_by_name(token)
                    .ok_or_else(|| GepError::Construction(format!("unknown symbol '{}'", token)))
            })
            .collect::<Result<Vec<_>>>()?;

        self.chromosome(symbols)
    }

    /// Render a chromosome with symbol names.
    ///
    /// Names are concatenated when every name is a single character and
    /// space-separated otherwise, so the output parses back.
    pub fn render(&self, chromosome: &Chromosome) -> String {
        let single_char = self
            .terminals
            .iter()
            .chain(self.functions.iter())
            .all(|name| name.chars().count() == 1);
        let names: Vec<&str> = chromosome
            .symbols()
            .iter()
            .map(|s| self.name_of(*s).unwrap_or("?"))
            .collect();

        if single_char {
            names.concat()
        } else {
            names.join(" ")
        }
    }
}
