pub mod outcome;
pub mod task;

pub use outcome::*;
pub use task::*;
