pub mod handler;
pub mod sink;

pub use handler::*;
pub use sink::*;
