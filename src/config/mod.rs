pub mod traits;
pub mod genome;
pub mod evolution;
pub mod operators;
pub mod fitness;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use genome::GenomeConfig;
pub use evolution::EvolutionConfig;
pub use operators::OperatorConfig;
pub use fitness::FitnessConfig;
pub use traits::ConfigSection;
