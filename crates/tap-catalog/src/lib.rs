// SPDX-License-Identifier: MIT OR Apache-2.0
//! tap-catalog
//!
//! The static tool catalog and the name normalizer that every layer of the
//! policy pipeline relies on to compare tool references consistently.
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// The immutable tool registry.
pub mod catalog;
/// Trim/lowercase/alias name canonicalization.
pub mod normalize;

pub use catalog::Catalog;
pub use normalize::{normalize, normalize_list};
