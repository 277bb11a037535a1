pub mod category;
pub mod stats;
pub mod strategy;
pub mod task;
