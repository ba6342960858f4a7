pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{LanternError, LanternResult};
