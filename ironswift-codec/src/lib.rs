/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # IronSwift Codec
//!
//! Grammar-driven decoding and encoding of SWIFT MT field values.
//!
//! This crate provides a single parametric codec that serves every field tag,
//! with the per-field differences carried by a `FieldGrammar`.
//!
//! ## Features
//!
//! - **Zero-copy decoding**: Components are slices of the raw value
//! - **SIMD-accelerated**: Uses `memchr::memmem` for separator search
//! - **Canonical encoding**: Absent optional components never leave a dangling separator
//! - **Field instances**: Positional, labelled and typed component access
//! - **Lookup helpers**: Find and parse fields in any `TagSource`
//! - **JSON**: Flat camelCase object per field

pub mod codec;
pub mod config;
mod decoder;
mod encoder;
pub mod field;
pub mod json;
pub mod lookup;

pub use codec::{Components, FieldCodec};
pub use config::{CodecConfig, LineOverflow};
pub use field::Field;
