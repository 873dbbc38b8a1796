//! Outbound adapters for driven collaborators (databases).

pub mod persistence;
