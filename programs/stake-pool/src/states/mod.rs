pub mod events;
pub mod pool;
pub mod stakeholder;

pub use events::*;
pub use pool::*;
pub use stakeholder::*;
