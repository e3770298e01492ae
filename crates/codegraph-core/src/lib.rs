pub mod error;
pub mod raw;
pub mod shared;
pub mod types;

pub use error::*;
pub use raw::*;
pub use shared::*;
pub use types::*;
