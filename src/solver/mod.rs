pub mod generator;
pub mod layout;

pub use generator::{GenerationResult, Generator, GeneratorOptions};
pub use layout::{Layout, Placement, PosSet};
