use crate::engines::evaluation::expression::Decoder;
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::genome::Genome;
use crate::error::{GepError, Result};
use rand::Rng;
use std::sync::Arc;

/// One member of a population: a chromosome of `gene_count` genes written
/// in a shared genome.
///
/// Decoding is not baked in; pass any `Decoder` to `express`.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    chromosome: Chromosome,
    genome: Arc<Genome>,
    gene_count: usize,
}

impl Individual {
    pub fn new(genome: Arc<Genome>, gene_count: usize, chromosome: Chromosome) -> Result<Self> {
        if gene_count == 0 {
            return Err(GepError::Construction("gene count must be positive".to_string()));
        }
        check_shape(&genome, gene_count, &chromosome)?;

        Ok(Self {
            chromosome,
            genome,
            gene_count,
        })
    }

    /// Seed an individual with a random grammar-valid chromosome.
    pub fn random<R: Rng + ?Sized>(genome: Arc<Genome>, gene_count: usize, rng: &mut R) -> Result<Self> {
        let chromosome = genome.random_chromosome(gene_count, rng)?;
        Self::new(genome, gene_count, chromosome)
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Replace the chromosome wholesale; the shape must not change.
    pub fn set_chromosome(&mut self, chromosome: Chromosome) -> Result<()> {
        check_shape(&self.genome, self.gene_count, &chromosome)?;
        self.chromosome = chromosome;
        Ok(())
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn gene_count(&self) -> usize {
        self.gene_count
    }

    /// Decode into one expression root per gene.
    pub fn express<D: Decoder>(&self, decoder: &D) -> Result<Vec<D::Node>> {
        decoder.decode(&self.genome, &self.chromosome)
    }
}

fn check_shape(genome: &Genome, gene_count: usize, chromosome: &Chromosome) -> Result<()> {
    if chromosome.shape() != genome.shape() {
        return Err(GepError::Construction(format!(
            "chromosome gene shape {:?} does not match genome {:?}",
            chromosome.shape(),
            genome.shape()
        )));
    }
    if chromosome.len() % genome.gene_length() != 0 {
        return Err(GepError::Construction("Chromosome wrong length".to_string()));
    }
    if chromosome.len() != gene_count * genome.gene_length() {
        return Err(GepError::Construction(format!(
            "expected {} genes, chromosome holds {}",
            gene_count,
            chromosome.gene_count()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genome() -> Arc<Genome> {
        Arc::new(Genome::new(vec!["a".to_string()], vec!["+".to_string()], 2, 2).unwrap())
    }

    #[test]
    fn test_construction_checks() {
        let genome = genome();
        let one_gene = genome.parse_chromosome("+aaaa").unwrap();

        assert!(Individual::new(Arc::clone(&genome), 1, one_gene.clone()).is_ok());
        assert!(Individual::new(Arc::clone(&genome), 0, one_gene.clone()).is_err());
        assert!(Individual::new(Arc::clone(&genome), 2, one_gene).is_err());
    }

    #[test]
    fn test_foreign_shape_rejected() {
        let genome = genome();
        let other = Genome::new(vec!["a".to_string()], vec!["+".to_string()], 2, 3).unwrap();
        let foreign = other.parse_chromosome("+aaaaaa").unwrap();
        assert!(Individual::new(genome, 1, foreign).is_err());
    }

    #[test]
    fn test_random_and_set_chromosome() {
        let genome = genome();
        let mut rng = StdRng::seed_from_u64(3);
        let mut individual = Individual::random(Arc::clone(&genome), 2, &mut rng).unwrap();
        assert_eq!(individual.chromosome().gene_count(), 2);

        let replacement = genome.parse_chromosome("+aaaa+aaaa").unwrap();
        individual.set_chromosome(replacement.clone()).unwrap();
        assert_eq!(individual.chromosome(), &replacement);

        let wrong = genome.parse_chromosome("+aaaa").unwrap();
        assert!(individual.set_chromosome(wrong).is_err());
        assert_eq!(individual.chromosome(), &replacement);
    }
}
