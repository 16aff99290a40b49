use crate::config::EvolutionConfig;
use crate::engines::evaluation::expression::{Decoder, ExpressionNode};
use crate::engines::evaluation::fitness::{best_index, proportional_weights, Fitness};
use crate::engines::generation::{
    genome::Genome,
    hall_of_fame::{EliteExpression, HallOfFame},
    individual::Individual,
    operators::GeneticOperators,
    population::Population,
    progress::ProgressCallback,
};
use crate::error::{GepError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one `EvolutionEngine::run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generations: usize,
    pub target_fitness: f64,
    pub target_reached: bool,
    pub best_fitness: f64,
    pub best_formula: String,
    pub best_chromosome: String,
    /// Best score of each generation
    pub history: Vec<f64>,
    pub hall_of_fame: Vec<EliteExpression>,
}

/// Drives generational GEP: score, select elitistically, then vary.
pub struct EvolutionEngine<D: Decoder> {
    config: EvolutionConfig,
    genome: Arc<Genome>,
    operators: GeneticOperators,
    decoder: D,
    fitness: Fitness,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

impl<D> EvolutionEngine<D>
where
    D: Decoder,
    D::Node: ExpressionNode<Value = f64>,
{
    pub fn new(config: EvolutionConfig, operators: GeneticOperators, decoder: D, fitness: Fitness) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            genome: Arc::clone(operators.genome()),
            hall_of_fame: HallOfFame::new(config.hall_of_fame_size),
            config,
            operators,
            decoder,
            fitness,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<RunSummary> {
        let mut population = self.initialize_population()?;
        let target = self
            .config
            .target_fitness
            .unwrap_or_else(|| self.fitness.perfect_score());

        log::info!(
            "Starting run: population {}, {} generations, gene length {}, {} cases, target {}",
            population.capacity(),
            self.config.max_generations,
            self.genome.gene_length(),
            self.fitness.cases().len(),
            target
        );

        let mut history = Vec::with_capacity(self.config.max_generations);
        let mut best: Option<(Individual, f64, String)> = None;
        let mut target_reached = false;

        for generation in 0..self.config.max_generations {
            callback.on_generation_start(generation);

            let (scores, formulas) = self.evaluate_population(&population, generation, &mut callback)?;
            let best_idx = best_index(&scores)
                .ok_or_else(|| GepError::Selection("population is empty".to_string()))?;
            let best_fitness = scores[best_idx];

            let improved = best.as_ref().map_or(true, |(_, f, _)| best_fitness > *f);
            if improved {
                log::info!(
                    "Generation {}: new best {:.6} {}",
                    generation,
                    best_fitness,
                    formulas[best_idx]
                );
            }
            if let Some(individual) = population.get(best_idx) {
                best = Some((individual.clone(), best_fitness, formulas[best_idx].clone()));
            }
            history.push(best_fitness);

            callback.on_generation_complete(generation, best_fitness, self.hall_of_fame.len());

            if best_fitness >= target {
                log::info!("Target fitness {} reached in generation {}", target, generation);
                target_reached = true;
                break;
            }
            if generation + 1 == self.config.max_generations {
                break;
            }

            let weights = proportional_weights(&scores);
            population.select(&weights, best_idx, &mut self.rng)?;
            self.vary(&mut population)?;
        }

        let (best_individual, best_fitness, best_formula) =
            best.ok_or_else(|| GepError::Configuration("no generation was run".to_string()))?;

        log::info!(
            "Run finished after {} generations, best fitness {:.6}",
            history.len(),
            best_fitness
        );

        Ok(RunSummary {
            generations: history.len(),
            target_fitness: target,
            target_reached,
            best_fitness,
            best_formula,
            best_chromosome: self.genome.render(best_individual.chromosome()),
            history,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
        })
    }

    /// Fill a population to capacity with random individuals.
    fn initialize_population(&mut self) -> Result<Population> {
        let sampler = self.config.sampler.build(self.config.weight_tolerance);
        let mut population = Population::new(sampler, self.config.population_size, Arc::clone(&self.genome))?;

        while !population.is_full() {
            let individual = Individual::random(Arc::clone(&self.genome), self.config.gene_count, &mut self.rng)?;
            if let Err(full) = population.add(individual) {
                log::debug!("{}", full);
                break;
            }
        }
        Ok(population)
    }

    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        population: &Population,
        generation: usize,
        callback: &mut C,
    ) -> Result<(Vec<f64>, Vec<String>)> {
        let total = population.len();
        let mut scores = Vec::with_capacity(total);
        let mut formulas = Vec::with_capacity(total);

        for (i, individual) in population.individuals().iter().enumerate() {
            let roots = individual.express(&self.decoder)?;
            let score = self.fitness.evaluate(&roots);
            let formula = self.fitness.linking().formula(&roots);

            self.hall_of_fame.try_add(EliteExpression {
                formula: formula.clone(),
                chromosome: self.genome.render(individual.chromosome()),
                fitness: score,
                generation,
            });
            callback.on_individual_evaluated(i + 1, total);

            scores.push(score);
            formulas.push(formula);
        }

        log::debug!(
            "Generation {} scored {} individuals, mean {:.4}",
            generation,
            total,
            scores.iter().sum::<f64>() / total.max(1) as f64
        );
        Ok((scores, formulas))
    }

    /// Apply the operators to every slot but the elite in slot 0.
    ///
    /// Order per slot: mutation, IS, RIS, gene transposition, then
    /// recombination with a partner other than the slot and the elite.
    fn vary(&mut self, population: &mut Population) -> Result<()> {
        let n = population.len();
        let ops = &self.operators;
        let rng = &mut self.rng;

        for i in 1..n {
            let mut chromosome = population.individuals()[i].chromosome().clone();

            if rng.gen::<f64>() < ops.mutation_rate() {
                chromosome = ops.mutate(&chromosome, self.config.mutations_per_individual, rng);
            }
            if rng.gen::<f64>() < ops.is_transposition_rate() {
                chromosome = ops.is_transpose(&chromosome, rng);
            }
            if rng.gen::<f64>() < ops.ris_transposition_rate() {
                chromosome = ops.ris_transpose(&chromosome, rng);
            }
            if rng.gen::<f64>() < ops.gene_transposition_rate() {
                chromosome = ops.gene_transpose(&chromosome, rng);
            }

            if n >= 3 && rng.gen::<f64>() < ops.crossover_rate() {
                let mut partner = rng.gen_range(1..n - 1);
                if partner >= i {
                    partner += 1;
                }
                let kind = ops.choose_recombination(rng);
                let mate = population.individuals()[partner].chromosome().clone();
                let (child, other) = ops.recombine(kind, &chromosome, &mate, rng)?;
                population.individuals_mut()[partner].set_chromosome(other)?;
                chromosome = child;
            }

            population.individuals_mut()[i].set_chromosome(chromosome)?;
        }
        Ok(())
    }
}
