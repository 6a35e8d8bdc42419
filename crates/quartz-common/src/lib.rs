//! Shared foundation types for the Quartz compiler.
//!
//! Every compiler phase that reports on source text uses the byte-offset
//! [`Span`] defined here; human-readable line/column positions are derived
//! on demand through [`LineIndex`].

pub mod span;

pub use span::{LineIndex, Span};
