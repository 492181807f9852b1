/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronSwift Core
//!
//! Core types, traits, and error definitions for the IronSwift SWIFT MT field codec.
//!
//! This crate provides the fundamental building blocks used across all IronSwift crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Tag types**: `Tag`, `TagBlock`, and the `TagSource` trait
//! - **Value types**: `Currency`, `Country`, `Bic`, `Number`
//! - **Conversions**: Total parse/format functions between component text and typed values

pub mod convert;
pub mod error;
pub mod tag;
pub mod types;

pub use error::{ComponentError, ConfigError, DecodeError, Result, SwiftError};
pub use tag::{Tag, TagBlock, TagSource};
pub use types::{Bic, Country, Currency, Number};
