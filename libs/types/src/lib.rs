//! Types library for the single-asset vault
//!
//! Value types shared by the vault contract core and its read-side indexer.
//! Everything here is plain data: no state, no I/O.
//!
//! # Modules
//! - `ids`: 20-byte account addresses
//! - `numeric`: Raw token amounts and display formatting
//! - `fee`: Basis-point fee rates
//! - `errors`: Parse/validation errors for the above

pub mod ids;
pub mod numeric;
pub mod fee;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::fee::*;
    pub use crate::errors::*;
}
