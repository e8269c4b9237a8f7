//! fastexchange Common Types
//!
//! Currency and crypto-token values with kind-checked arithmetic, plus the
//! error taxonomy shared by the rate and transfer clients.
//!
//! Values of different kinds never mix: adding, subtracting or comparing a
//! USD value with a EUR value fails with [`Error::KindMismatch`]. Moving an
//! amount between kinds is always an explicit conversion with a rate.

pub mod error;
pub mod monetary;
pub mod token;

pub use error::*;
pub use monetary::*;
pub use token::*;
