pub mod genome;
pub mod chromosome;
pub mod individual;
pub mod operators;
pub mod sampler;
pub mod population;
pub mod gene_consumer;
pub mod semantic_mapper;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::Genome;
pub use chromosome::{Chromosome, GeneShape};
pub use individual::Individual;
pub use operators::{GeneticOperators, OperatorRates, RecombinationKind};
pub use sampler::{RouletteWheelSampler, Sampler, SamplerKind, StochasticUniversalSampler};
pub use population::Population;
pub use gene_consumer::GeneConsumer;
pub use semantic_mapper::SemanticMapper;
pub use hall_of_fame::{EliteExpression, HallOfFame};
pub use evolution_engine::{EvolutionEngine, RunSummary};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage,
    SilentProgressCallback,
};
