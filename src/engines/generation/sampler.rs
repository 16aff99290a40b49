use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Turns selection weights into index draws with replacement.
///
/// The result has one entry per weight; each entry indexes into `weights`.
pub trait Sampler: Send + Sync {
    fn sample(&self, weights: &[f64], rng: &mut dyn RngCore) -> Vec<usize>;
}

/// Fitness-proportional sampling by inverse CDF
#[derive(Debug, Clone, Copy)]
pub struct RouletteWheelSampler {
    tolerance: f64,
}

impl RouletteWheelSampler {
    pub const DEFAULT_TOLERANCE: f64 = 1e-8;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for RouletteWheelSampler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl Sampler for RouletteWheelSampler {
    fn sample(&self, weights: &[f64], rng: &mut dyn RngCore) -> Vec<usize> {
        if weights.is_empty() {
            return Vec::new();
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > self.tolerance {
            // best effort: keep sampling against the weights as given
            log::warn!("Weight sum outside tolerance ({})", total);
        }

        let last = weights.len() - 1;
        (0..weights.len())
            .map(|_| {
                let spin = rng.gen::<f64>();
                let mut accum = 0.0;
                for (i, w) in weights.iter().enumerate() {
                    if spin == accum || spin < accum + w {
                        return i;
                    }
                    accum += w;
                }
                last
            })
            .collect()
    }
}

/// Per-slot uniform selection.
///
/// Only the number of weights is used: every slot is an independent uniform
/// draw over the indices, not the single-pointer spacing of textbook
/// stochastic universal sampling. Runs tuned against this distribution rely on
/// it staying that way.
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticUniversalSampler;

impl StochasticUniversalSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Sampler for StochasticUniversalSampler {
    fn sample(&self, weights: &[f64], rng: &mut dyn RngCore) -> Vec<usize> {
        let n = weights.len();
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplerKind {
    RouletteWheel,
    StochasticUniversal,
}

impl SamplerKind {
    pub fn build(&self, tolerance: f64) -> Box<dyn Sampler> {
        match self {
            SamplerKind::RouletteWheel => Box::new(RouletteWheelSampler::new(tolerance)),
            SamplerKind::StochasticUniversal => Box::new(StochasticUniversalSampler::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{LevelFilter, Log, Metadata, Record};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Mutex, Once};

    /// Keeps every warning emitted by the test binary.
    struct RecordingLogger;

    static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static INIT: Once = Once::new();

    impl Log for RecordingLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                RECORDS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    fn install_logger() {
        INIT.call_once(|| {
            let _ = log::set_logger(&RecordingLogger);
            log::set_max_level(LevelFilter::Warn);
        });
    }

    fn warned(fragment: &str) -> bool {
        RECORDS.lock().unwrap().iter().any(|message| message.contains(fragment))
    }

    #[test]
    fn test_roulette_output_shape() {
        let sampler = RouletteWheelSampler::default();
        let mut rng = StdRng::seed_from_u64(42);
        let weights = vec![0.1, 0.2, 0.3, 0.4];

        let indices = sampler.sample(&weights, &mut rng);
        assert_eq!(indices.len(), weights.len());
        assert!(indices.iter().all(|&i| i < weights.len()));
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let sampler = RouletteWheelSampler::default();
        let mut rng = StdRng::seed_from_u64(1);
        let weights = vec![0.0, 1.0, 0.0];

        for _ in 0..20 {
            assert!(sampler.sample(&weights, &mut rng).iter().all(|&i| i == 1));
        }
    }

    #[test]
    fn test_roulette_tracks_weights() {
        let sampler = RouletteWheelSampler::default();
        let mut rng = StdRng::seed_from_u64(99);
        let weights = vec![0.9, 0.1];

        let mut hits = [0usize; 2];
        for _ in 0..500 {
            for i in sampler.sample(&weights, &mut rng) {
                hits[i] += 1;
            }
        }
        assert!(hits[0] > hits[1] * 4);
    }

    #[test]
    fn test_roulette_out_of_tolerance_still_samples() {
        install_logger();
        let sampler = RouletteWheelSampler::new(1e-6);
        let mut rng = StdRng::seed_from_u64(7);
        let weights = vec![3.0, 5.0, 0.25];

        let indices = sampler.sample(&weights, &mut rng);
        assert_eq!(indices.len(), 3);
        assert!(indices.iter().all(|&i| i < 3));
        assert!(warned("Weight sum outside tolerance (8.25)"));

        // weights far below one fall through to the last index
        let tiny = vec![0.0, 0.0, 0.0];
        assert_eq!(sampler.sample(&tiny, &mut rng), vec![2, 2, 2]);
    }

    #[test]
    fn test_empty_weights() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(RouletteWheelSampler::default().sample(&[], &mut rng).is_empty());
        assert!(StochasticUniversalSampler.sample(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_stochastic_universal_ignores_weight_values() {
        let sampler = StochasticUniversalSampler::new();
        let weights = vec![1.0, 0.0, 0.0, 0.0];

        let mut seen = [false; 4];
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let indices = sampler.sample(&weights, &mut rng);
            assert_eq!(indices.len(), 4);
            for i in indices {
                seen[i] = true;
            }
        }
        // zero-weight slots are still drawn
        assert!(seen.iter().all(|&s| s));
    }
}
