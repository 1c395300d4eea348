pub mod adherence;
pub mod detention;

pub use adherence::*;
pub use detention::*;
