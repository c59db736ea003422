//! Inbound adapters that translate external requests into endpoint calls
//! while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`].

pub mod http;
