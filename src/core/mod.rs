pub mod analyzer;
pub mod context;
pub mod scheduler;
