use crate::engines::generation::genome::Genome;
use crate::engines::generation::individual::Individual;
use crate::engines::generation::sampler::Sampler;
use crate::error::{CapacityExceeded, GepError, Result};
use rand::RngCore;
use std::sync::Arc;

/// Fixed-capacity collection of individuals with elitist generational
/// replacement.
pub struct Population {
    sampler: Box<dyn Sampler>,
    individuals: Vec<Individual>,
    genome: Arc<Genome>,
    capacity: usize,
}

impl Population {
    pub fn new(sampler: Box<dyn Sampler>, capacity: usize, genome: Arc<Genome>) -> Result<Self> {
        if capacity == 0 {
            return Err(GepError::Construction("population capacity must be positive".to_string()));
        }

        Ok(Self {
            sampler,
            individuals: Vec::with_capacity(capacity),
            genome,
            capacity,
        })
    }

    /// Append an individual while there is room.
    ///
    /// A full population hands the individual back inside the error.
    pub fn add(&mut self, individual: Individual) -> std::result::Result<(), CapacityExceeded> {
        if self.individuals.len() >= self.capacity {
            return Err(CapacityExceeded {
                capacity: self.capacity,
                rejected: Box::new(individual),
            });
        }
        self.individuals.push(individual);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.individuals.len() >= self.capacity
    }

    pub fn genome(&self) -> &Arc<Genome> {
        &self.genome
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Slots can be rewritten but not added or removed.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Replace the whole collection at once.
    pub fn replace_individuals(&mut self, individuals: Vec<Individual>) -> Result<()> {
        if individuals.len() > self.capacity {
            return Err(GepError::Selection(format!(
                "{} individuals exceed capacity {}",
                individuals.len(),
                self.capacity
            )));
        }
        self.individuals = individuals;
        Ok(())
    }

    /// Build the next generation.
    ///
    /// The individual at `best_index` always survives into slot 0; the rest
    /// come from the sampler, whose last draw is dropped to keep the size
    /// unchanged. The old collection is swapped out in one step.
    pub fn select(&mut self, weights: &[f64], best_index: usize, rng: &mut dyn RngCore) -> Result<()> {
        if weights.len() != self.individuals.len() {
            return Err(GepError::Selection(format!(
                "{} weights for {} individuals",
                weights.len(),
                self.individuals.len()
            )));
        }
        let best = self.individuals.get(best_index).ok_or_else(|| {
            GepError::Selection(format!(
                "best index {} out of range for {} individuals",
                best_index,
                self.individuals.len()
            ))
        })?;

        let indices = self.sampler.sample(weights, rng);

        let mut next = Vec::with_capacity(self.individuals.len());
        next.push(best.clone());
        for &i in indices.iter().take(indices.len().saturating_sub(1)) {
            let chosen = self.individuals.get(i).ok_or_else(|| {
                GepError::Selection(format!("sampler returned index {} out of range", i))
            })?;
            next.push(chosen.clone());
        }

        self.individuals = next;
        Ok(())
    }
}
