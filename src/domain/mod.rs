mod entry;
mod filter;
mod pagination;
mod statement;

pub use entry::*;
pub use filter::*;
pub use pagination::*;
pub use statement::*;
