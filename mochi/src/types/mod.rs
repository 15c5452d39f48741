pub mod constant;
pub mod params;
pub mod verdict;

pub use verdict::{Verdict, VerdictResult};
