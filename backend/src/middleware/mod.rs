//! HTTP middleware shared across inbound adapters.

pub mod trace;

pub use trace::Trace;
