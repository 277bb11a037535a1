pub mod board;
pub mod progress;
