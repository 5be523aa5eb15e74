//! Cordon Scheduler - Filter stage of Pod to Node placement
//!
//! This crate provides:
//! - The filter plugin contract and status model
//! - Node snapshots and the cluster-state handle given to plugins
//! - In-tree filters (node unschedulable, node name, node selector,
//!   taint toleration, resource fit)
//! - A framework that runs the filters in order and reports feasible nodes

pub mod config;
pub mod error;
pub mod filter;
pub mod framework;
pub mod plugins;
pub mod registry;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use config::{FrameworkConfig, PluginSpec};
pub use error::{Result, SchedulerError};
pub use filter::{FilterPlugin, Handle, Plugin, PluginFactory, SnapshotHandle};
pub use framework::Framework;
pub use registry::Registry;
pub use status::{Code, Status};
pub use types::{FilterOutcome, FilterReport, NodeInfo};
