pub mod core;

pub use self::core::{GeneratorError, GeneratorResult};
