//! # Spur Testkit
//!
//! Example record types and helpers for exercising the Spur engine.
//!
//! This crate provides:
//! - [`KeyBuf`], a builder for fixed-width byte-sortable index keys
//! - [`words`], an English number-word codec whose encoded bytes sort in
//!   spelled-out order, handy for generating records whose indexes sort
//!   differently from one another
//! - [`Person`], [`Quantity`], and [`PlainId`], record types implementing
//!   [`spur_core::Record`] the way an application would

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod key;
mod person;
mod plain;
mod quantity;
pub mod words;

pub use key::KeyBuf;
pub use person::{Person, IDX_PERSON_FIRST, IDX_PERSON_ID, IDX_PERSON_LAST};
pub use plain::PlainId;
pub use quantity::{Quantity, IDX_QUANTITY_ID, IDX_QUANTITY_WORDS};
