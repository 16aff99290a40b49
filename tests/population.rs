use gep_engine::engines::generation::{
    Genome, Individual, Population, RouletteWheelSampler, Sampler, SamplerKind,
    StochasticUniversalSampler,
};
use gep_engine::GepError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn genome() -> Arc<Genome> {
    Arc::new(
        Genome::new(
            vec!["a".to_string(), "b".to_string()],
            vec!["+".to_string(), "*".to_string(), "-".to_string()],
            2,
            5,
        )
        .unwrap(),
    )
}

fn filled(capacity: usize, kind: SamplerKind, rng: &mut StdRng) -> Population {
    let genome = genome();
    let mut population = Population::new(kind.build(1e-8), capacity, Arc::clone(&genome)).unwrap();
    for _ in 0..capacity {
        population.add(Individual::random(Arc::clone(&genome), 2, rng).unwrap()).unwrap();
    }
    population
}

#[test]
fn test_full_population_hands_back_rejected_individual() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut population = filled(3, SamplerKind::RouletteWheel, &mut rng);
    assert!(population.is_full());

    let extra = Individual::random(population.genome().clone(), 2, &mut rng).unwrap();
    let err = population.add(extra.clone()).unwrap_err();
    assert_eq!(err.capacity, 3);
    assert_eq!(*err.rejected, extra);
    assert_eq!(population.len(), 3);
}

#[test]
fn test_select_keeps_elite_in_first_slot() {
    for kind in [SamplerKind::RouletteWheel, SamplerKind::StochasticUniversal] {
        let mut rng = StdRng::seed_from_u64(9);
        let mut population = filled(8, kind, &mut rng);
        let elite = population.get(5).cloned().unwrap();
        let before: Vec<Individual> = population.individuals().to_vec();

        let weights = vec![0.125; 8];
        population.select(&weights, 5, &mut rng).unwrap();

        assert_eq!(population.len(), 8);
        assert_eq!(population.get(0), Some(&elite));
        assert!(population.individuals().iter().all(|i| before.contains(i)));
    }
}

#[test]
fn test_select_follows_weights() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut population = filled(6, SamplerKind::RouletteWheel, &mut rng);
    let favourite = population.get(2).cloned().unwrap();

    let weights = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
    population.select(&weights, 0, &mut rng).unwrap();

    assert!(population.individuals()[1..].iter().all(|i| *i == favourite));
}

#[test]
fn test_select_rejects_bad_arguments() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut population = filled(4, SamplerKind::RouletteWheel, &mut rng);

    assert!(matches!(
        population.select(&[0.5, 0.5], 0, &mut rng),
        Err(GepError::Selection(_))
    ));
    assert!(matches!(
        population.select(&[0.25; 4], 4, &mut rng),
        Err(GepError::Selection(_))
    ));
    assert_eq!(population.len(), 4);
}

#[test]
fn test_sampler_kinds_build_matching_samplers() {
    let mut rng = StdRng::seed_from_u64(12);
    let weights = [0.1, 0.2, 0.3, 0.4];

    let samplers: Vec<Box<dyn Sampler>> = vec![
        SamplerKind::RouletteWheel.build(1e-8),
        SamplerKind::StochasticUniversal.build(1e-8),
        Box::new(RouletteWheelSampler::default()),
        Box::new(StochasticUniversalSampler::new()),
    ];
    for sampler in samplers {
        let draws = sampler.sample(&weights, &mut rng);
        assert_eq!(draws.len(), weights.len());
        assert!(draws.iter().all(|&i| i < weights.len()));
    }
}

#[test]
fn test_zero_capacity_rejected() {
    assert!(matches!(
        Population::new(SamplerKind::RouletteWheel.build(1e-8), 0, genome()),
        Err(GepError::Construction(_))
    ));
}
