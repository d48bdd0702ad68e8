pub mod error;
pub mod types;

#[cfg(feature = "rental")]
pub mod rental;

#[cfg(feature = "format")]
pub mod format;

pub use error::InvestError;
pub use types::*;

/// Standard result type for all rental-invest operations
pub type InvestResult<T> = Result<T, InvestError>;
