pub mod expression;
pub mod fitness;

pub use expression::{Decoder, ExpressionNode};
pub use fitness::{Fitness, GeneLinking, TestCase};
