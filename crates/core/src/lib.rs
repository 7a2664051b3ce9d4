//! `moneyflow-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, content-derived identifiers and the clock abstraction.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock, epoch_seconds};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DepositSignature, TransferCode};
pub use value_object::ValueObject;
