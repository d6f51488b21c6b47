pub mod compose;
pub mod input;
pub mod queue;
pub mod result;
