pub mod messages;

mod darts;

pub use darts::*;
