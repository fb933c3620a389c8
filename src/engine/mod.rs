pub mod calculator;
pub mod normalize;

pub use calculator::{assess, score};
pub use normalize::normalize;
