//! Mask policy and value redactor for envveil.
//!
//! This crate is the leaf of the envveil workspace: a pure mapping from a
//! secret value and a [`MaskPolicy`] to the string displayed in its place.
//! It never touches documents, features, or host state; the overlay engine
//! in `ev-overlay` drives it.
//!
//! # Key Properties
//!
//! - **Length-preserving**: the masked string has the same character count
//!   as the value, so overlays line up with the text they cover.
//! - **Fail-closed**: a malformed partial shape degrades to full masking,
//!   never to showing more of the value.
//! - **Quote-aware**: quote-delimited values are masked inside their quotes;
//!   the quotes themselves stay visible.
//!
//! # Example
//!
//! ```
//! use ev_redact::{mask_value, MaskPolicy, PartialMask};
//!
//! let full = MaskPolicy::default();
//! assert_eq!(mask_value("hunter2", &full), "*******");
//!
//! let partial = MaskPolicy::with_partial('*', PartialMask::default());
//! assert_eq!(mask_value("secret123", &partial), "sec***123");
//! ```

pub mod error;
pub mod mask;
pub mod policy;

pub use error::{RedactError, Result};
pub use mask::{mask_token, mask_value, requote};
pub use policy::{MaskPolicy, PartialMask};
