//! # Systems Module
//!
//! Secondary game systems surrounding the merge loop: the energy economy,
//! the bonus inventory, the reward wheel, and snapshot persistence.

pub mod bonus;
pub mod energy;
pub mod save;
pub mod wheel;

pub use bonus::*;
pub use energy::*;
pub use save::*;
pub use wheel::*;
