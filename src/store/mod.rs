//! In-memory stores fed by the REST gateway

pub mod boards;
pub mod tasks;

pub use boards::BoardStore;
pub use tasks::{MoveUndo, TaskStore};
