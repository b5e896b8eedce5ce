pub mod arena;
pub mod recency_queue;

pub use arena::{NodeArena, NodeId};
pub use recency_queue::RecencyQueue;
