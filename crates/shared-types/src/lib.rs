pub mod error;
pub mod query;
pub mod search;

pub use error::*;
pub use query::*;
pub use search::*;
