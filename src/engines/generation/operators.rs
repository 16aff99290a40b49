use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::genome::Genome;
use crate::error::{GepError, Result};
use crate::types::Symbol;
use rand::Rng;
use std::sync::Arc;

/// The seven operator probabilities of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatorRates {
    pub mutation: f64,
    pub one_point: f64,
    pub two_point: f64,
    pub gene_recombination: f64,
    pub is_transposition: f64,
    pub ris_transposition: f64,
    pub gene_transposition: f64,
}

/// Which recombination to apply once `crossover_rate()` has fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecombinationKind {
    OnePoint,
    TwoPoint,
    Gene,
}

/// Mutation, transposition and recombination over chromosomes of one genome.
///
/// Every operator takes its chromosome(s) by reference and returns new
/// values of the same length. Heads may receive any symbol; tails only ever
/// receive terminals. Randomness is drawn from the `rng` passed to each call,
/// so a seeded generator replays a run exactly.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    genome: Arc<Genome>,
    rates: OperatorRates,
}

/// Out-of-range (or NaN) probabilities become 1.0.
fn clamp_probability(name: &str, p: f64) -> f64 {
    if (0.0..=1.0).contains(&p) {
        p
    } else {
        log::debug!("{} probability {} outside [0, 1], using 1.0", name, p);
        1.0
    }
}

impl GeneticOperators {
    pub fn new(genome: Arc<Genome>) -> Self {
        Self {
            genome,
            rates: OperatorRates::default(),
        }
    }

    pub fn with_rates(genome: Arc<Genome>, rates: OperatorRates) -> Self {
        let mut ops = Self::new(genome);
        ops.set_rates(rates);
        ops
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn rates(&self) -> OperatorRates {
        self.rates
    }

    pub fn set_rates(&mut self, rates: OperatorRates) {
        self.set_mutation_rate(rates.mutation);
        self.set_one_point_rate(rates.one_point);
        self.set_two_point_rate(rates.two_point);
        self.set_gene_recombination_rate(rates.gene_recombination);
        self.set_is_transposition_rate(rates.is_transposition);
        self.set_ris_transposition_rate(rates.ris_transposition);
        self.set_gene_transposition_rate(rates.gene_transposition);
    }

    pub fn mutation_rate(&self) -> f64 {
        self.rates.mutation
    }

    pub fn set_mutation_rate(&mut self, p: f64) {
        self.rates.mutation = clamp_probability("mutation", p);
    }

    pub fn one_point_rate(&self) -> f64 {
        self.rates.one_point
    }

    pub fn set_one_point_rate(&mut self, p: f64) {
        self.rates.one_point = clamp_probability("one-point recombination", p);
    }

    pub fn two_point_rate(&self) -> f64 {
        self.rates.two_point
    }

    pub fn set_two_point_rate(&mut self, p: f64) {
        self.rates.two_point = clamp_probability("two-point recombination", p);
    }

    pub fn gene_recombination_rate(&self) -> f64 {
        self.rates.gene_recombination
    }

    pub fn set_gene_recombination_rate(&mut self, p: f64) {
        self.rates.gene_recombination = clamp_probability("gene recombination", p);
    }

    pub fn is_transposition_rate(&self) -> f64 {
        self.rates.is_transposition
    }

    pub fn set_is_transposition_rate(&mut self, p: f64) {
        self.rates.is_transposition = clamp_probability("IS transposition", p);
    }

    pub fn ris_transposition_rate(&self) -> f64 {
        self.rates.ris_transposition
    }

    pub fn set_ris_transposition_rate(&mut self, p: f64) {
        self.rates.ris_transposition = clamp_probability("RIS transposition", p);
    }

    pub fn gene_transposition_rate(&self) -> f64 {
        self.rates.gene_transposition
    }

    pub fn set_gene_transposition_rate(&mut self, p: f64) {
        self.rates.gene_transposition = clamp_probability("gene transposition", p);
    }

    /// Chance that any recombination happens at all
    pub fn crossover_rate(&self) -> f64 {
        self.rates.one_point + self.rates.two_point + self.rates.gene_recombination
    }

    /// Pick a recombination kind in proportion to the three rates.
    ///
    /// Falls back to one-point when all three rates are zero.
    pub fn choose_recombination<R: Rng + ?Sized>(&self, rng: &mut R) -> RecombinationKind {
        let total = self.crossover_rate();
        if total <= 0.0 {
            return RecombinationKind::OnePoint;
        }

        let spin = rng.gen::<f64>() * total;
        if spin < self.rates.one_point {
            RecombinationKind::OnePoint
        } else if spin < self.rates.one_point + self.rates.two_point {
            RecombinationKind::TwoPoint
        } else {
            RecombinationKind::Gene
        }
    }

    pub fn recombine<R: Rng + ?Sized>(
        &self,
        kind: RecombinationKind,
        first: &Chromosome,
        second: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        match kind {
            RecombinationKind::OnePoint => self.one_point_recombination(first, second, rng),
            RecombinationKind::TwoPoint => self.two_point_recombination(first, second, rng),
            RecombinationKind::Gene => self.gene_recombination(first, second, rng),
        }
    }

    /// Point mutation, repeated `mutations` times.
    ///
    /// Each round picks a gene, a head offset and a symbol from the full
    /// alphabet. Tail positions are never targeted.
    pub fn mutate<R: Rng + ?Sized>(&self, chromosome: &Chromosome, mutations: usize, rng: &mut R) -> Chromosome {
        let shape = chromosome.shape();
        let mut symbols = chromosome.symbols().to_vec();

        for _ in 0..mutations {
            let gene = rng.gen_range(0..chromosome.gene_count());
            let offset = rng.gen_range(0..shape.head_length());
            let symbol = self.genome.random_symbol(rng);
            symbols[shape.position(gene, offset)] = symbol;
        }

        chromosome.rebuilt(symbols)
    }

    /// Insertion-sequence transposition.
    ///
    /// Copies a random run of `[1, head_length)` symbols from anywhere in the
    /// chromosome into the head of a random gene at an offset in
    /// `[1, head_length)`; the gene root is never a target. The head shifts
    /// right and whatever overflows the head is dropped; the tail is not
    /// touched.
    pub fn is_transpose<R: Rng + ?Sized>(&self, chromosome: &Chromosome, rng: &mut R) -> Chromosome {
        let head_length = chromosome.shape().head_length();
        if head_length < 2 {
            return chromosome.clone();
        }

        let is_length = rng.gen_range(1..head_length);
        let is_start = rng.gen_range(0..=chromosome.len() - is_length);
        let sequence = &chromosome.symbols()[is_start..is_start + is_length];

        let gene = rng.gen_range(0..chromosome.gene_count());
        let offset = rng.gen_range(1..head_length);

        let head = insert_truncated(chromosome.head(gene), offset, sequence);
        chromosome.with_head(gene, &head)
    }

    /// Root insertion-sequence transposition.
    ///
    /// Scans the head of a random gene from a random offset for a function
    /// symbol. The run starting there becomes the new start of the head (the
    /// root included) and the old head follows it, truncated to the head
    /// length. The run length is drawn in `[1, gene_length - start + 1]` and
    /// clamped to the rest of the gene, so a long run can replace the whole
    /// head. Returns the input unchanged when the scan finds no function.
    pub fn ris_transpose<R: Rng + ?Sized>(&self, chromosome: &Chromosome, rng: &mut R) -> Chromosome {
        let shape = chromosome.shape();
        let head_length = shape.head_length();

        let gene_index = rng.gen_range(0..chromosome.gene_count());
        let gene = chromosome.gene(gene_index);
        let scan_from = rng.gen_range(0..head_length);

        let start = match (scan_from..head_length).find(|&i| gene[i].is_function()) {
            Some(start) => start,
            None => return chromosome.clone(),
        };

        let remaining = shape.gene_length() - start;
        let drawn = rng.gen_range(1..=remaining + 1);
        let ris_length = drawn.min(remaining);
        let sequence = &gene[start..start + ris_length];

        let head = insert_truncated(chromosome.head(gene_index), 0, sequence);
        chromosome.with_head(gene_index, &head)
    }

    /// Swap two whole genes of one chromosome.
    ///
    /// Mono-genic chromosomes and coincident draws return the input.
    pub fn gene_transpose<R: Rng + ?Sized>(&self, chromosome: &Chromosome, rng: &mut R) -> Chromosome {
        let gene_count = chromosome.gene_count();
        if gene_count == 1 {
            return chromosome.clone();
        }

        let first = rng.gen_range(0..gene_count);
        let second = rng.gen_range(0..gene_count);
        swap_genes(chromosome, first, second)
    }

    /// Exchange the suffixes of two chromosomes after one random cut.
    pub fn one_point_recombination<R: Rng + ?Sized>(
        &self,
        first: &Chromosome,
        second: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        ensure_same_length(first, second)?;

        let cut = rng.gen_range(0..first.len());
        let (a, b) = exchange_suffixes(first.symbols(), second.symbols(), cut);
        Ok((first.rebuilt(a), second.rebuilt(b)))
    }

    /// Exchange the segment between two random cuts.
    pub fn two_point_recombination<R: Rng + ?Sized>(
        &self,
        first: &Chromosome,
        second: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        ensure_same_length(first, second)?;

        let p1 = rng.gen_range(0..first.len());
        let p2 = rng.gen_range(0..first.len());
        let (lo, hi) = if p1 > p2 { (p2, p1) } else { (p1, p2) };

        let (a, b) = exchange_segments(first.symbols(), second.symbols(), lo, hi);
        Ok((first.rebuilt(a), second.rebuilt(b)))
    }

    /// Exchange one randomly chosen gene of each chromosome.
    ///
    /// The two gene indices are drawn independently. Mono-genic pairs are
    /// simply swapped.
    pub fn gene_recombination<R: Rng + ?Sized>(
        &self,
        first: &Chromosome,
        second: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        ensure_same_shape(first, second)?;

        if first.is_monogenic() && second.is_monogenic() {
            return Ok((second.clone(), first.clone()));
        }

        let g1 = rng.gen_range(0..first.gene_count());
        let g2 = rng.gen_range(0..second.gene_count());
        Ok((first.with_gene(g1, second.gene(g2)), second.with_gene(g2, first.gene(g1))))
    }
}

fn ensure_same_shape(first: &Chromosome, second: &Chromosome) -> Result<()> {
    if first.shape() != second.shape() {
        return Err(GepError::ShapeMismatch {
            expected: format!("{:?}", first.shape()),
            actual: format!("{:?}", second.shape()),
        });
    }
    Ok(())
}

fn ensure_same_length(first: &Chromosome, second: &Chromosome) -> Result<()> {
    ensure_same_shape(first, second)?;
    if first.len() != second.len() {
        return Err(GepError::ShapeMismatch {
            expected: format!("chromosome of length {}", first.len()),
            actual: format!("chromosome of length {}", second.len()),
        });
    }
    Ok(())
}

/// `region[..at] ++ sequence ++ region[at..]`, cut back to `region.len()`.
pub(crate) fn insert_truncated<T: Clone>(region: &[T], at: usize, sequence: &[T]) -> Vec<T> {
    region[..at]
        .iter()
        .chain(sequence.iter())
        .chain(region[at..].iter())
        .take(region.len())
        .cloned()
        .collect()
}

/// Swap everything from `cut` onward.
pub(crate) fn exchange_suffixes<T: Clone>(a: &[T], b: &[T], cut: usize) -> (Vec<T>, Vec<T>) {
    let mut first = a[..cut].to_vec();
    first.extend_from_slice(&b[cut..]);
    let mut second = b[..cut].to_vec();
    second.extend_from_slice(&a[cut..]);
    (first, second)
}

/// Swap `[lo, hi)`; `lo == hi` exchanges nothing.
pub(crate) fn exchange_segments<T: Clone>(a: &[T], b: &[T], lo: usize, hi: usize) -> (Vec<T>, Vec<T>) {
    let mut first = a.to_vec();
    let mut second = b.to_vec();
    first[lo..hi].clone_from_slice(&b[lo..hi]);
    second[lo..hi].clone_from_slice(&a[lo..hi]);
    (first, second)
}

pub(crate) fn swap_genes(chromosome: &Chromosome, first: usize, second: usize) -> Chromosome {
    if first == second {
        return chromosome.clone();
    }
    let lower: Vec<Symbol> = chromosome.gene(first).to_vec();
    chromosome
        .with_gene(first, chromosome.gene(second))
        .with_gene(second, &lower)
}
