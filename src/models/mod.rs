pub mod load;
pub mod dock;
pub mod appointment;
pub mod caller;

pub use load::*;
pub use dock::*;
pub use appointment::*;
pub use caller::*;
