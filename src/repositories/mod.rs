pub mod load_records;
pub mod block_list;
pub mod memory;

pub use load_records::*;
pub use block_list::*;
pub use memory::*;
