pub mod traits;
pub mod primitives;
pub mod registry;
pub mod arithmetic;

pub use arithmetic::{ArithmeticDecoder, ArithmeticExpression};
pub use registry::FunctionRegistry;
pub use traits::Primitive;
