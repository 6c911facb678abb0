//! Game of Life engine.
//!
//! Sparse storage of alive cells on an unbounded plane, generation stepping,
//! pattern seeding and the session record a driver owns.

pub mod alive_set;
pub mod rule;
pub mod step;
pub mod pattern;
pub mod session;
pub mod viewport;

pub use alive_set::AliveSet;
pub use step::{next_generation, neighbor_count, StepEngine, StepReport};
pub use pattern::Pattern;
pub use session::{Session, SessionSnapshot};
pub use viewport::Viewport;
