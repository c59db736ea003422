//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns that sit in front of the
//! catalogue routes. Currently only trace identifier assignment.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
