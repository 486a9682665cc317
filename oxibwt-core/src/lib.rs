//! # OxiBWT Core
//!
//! Core components shared by the OxiBWT block transforms.
//!
//! - [`error`]: Error types
//! - [`traits`]: The [`ByteTransform`] trait implemented by every transform
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Caller pipeline                                         │
//! │     block segmentation, entropy coding, framing        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Transforms (oxibwt-transform)                           │
//! │     Burrows-Wheeler, Sorted Rank                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     TransformError, ByteTransform                       │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

pub use error::{Result, TransformError};
pub use traits::ByteTransform;
