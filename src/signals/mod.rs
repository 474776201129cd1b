pub mod dedup;
pub mod evaluator;

pub use dedup::DedupRegistry;
pub use evaluator::evaluate;
