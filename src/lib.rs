//! Stateless shortest-path computation over OpenFlow network topologies.
//!
//! Each request carries its own topology; nothing survives between requests.

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod odl;
pub mod server;
pub mod topology;
pub mod types;

/// Canonical node identifier inside a built topology.
pub type NodeId = String;
