//! Overlay engine for envveil.
//!
//! This crate decides what a host editor shows in place of secret values:
//! it locates `(key, value)` tuples in raw lines, tracks which consumers
//! are currently subject to redaction and which line is temporarily
//! revealed, and turns document text into render instructions the host
//! applies as a non-destructive overlay. The underlying document is never
//! mutated; the surrounding tool keeps resolving the real values.
//!
//! # Key Pieces
//!
//! - [`parse_line`]: one raw line → optional `(key, value)` tuple.
//! - [`FeatureState`]: per-consumer enablement with a startup snapshot for
//!   the asymmetric toggle-all.
//! - [`RevealTracker`]: single-line reveal sessions ended by qualifying
//!   interactions.
//! - [`planner`]: document text → [`RenderInstruction`]s, whole-document
//!   or in bounded chunks.
//! - [`VeilEngine`]: the single controller owning all of the above, plus
//!   the command surface and the preview interception contract.
//!
//! # Example
//!
//! ```
//! use ev_config::Settings;
//! use ev_overlay::{DocumentId, Feature, VeilEngine};
//!
//! let engine = VeilEngine::new(&Settings::default());
//! let plan = engine.plan_document(
//!     DocumentId(1),
//!     ["DB_HOST=localhost", "# comment"],
//!     Feature::Files,
//! );
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan[0].text, "*********");
//! ```

pub mod command;
pub mod engine;
pub mod error;
pub mod feature;
pub mod intercept;
pub mod parser;
pub mod planner;
pub mod recognize;
pub mod reveal;

pub use command::{parse_command, CommandOutcome, VeilCommand};
pub use engine::{DocumentSource, OverlaySink, VeilEngine};
pub use error::{OverlayError, Result};
pub use feature::{Feature, FeatureState, ToggleOutcome};
pub use intercept::{PreviewRequest, PreviewVerdict};
pub use parser::{parse_line, ParsedLine};
pub use planner::{plan, plan_slice, OverlayStyle, RenderInstruction};
pub use recognize::EnvFileMatcher;
pub use reveal::{DocumentId, Interaction, RevealTracker};
