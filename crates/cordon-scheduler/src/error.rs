// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Scheduler error type
///
/// Rejections are never errors; they travel as [`crate::Status`] values.
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    /// No suitable nodes found
    #[error("No suitable nodes found for pod {pod_name}: {reason}")]
    #[diagnostic(
        code(scheduler::no_suitable_nodes),
        help("Check node schedulability, taints, selectors and resources against the pod")
    )]
    NoSuitableNodes {
        pod_name: String,
        reason: String,
    },

    /// Enabled plugin has no registered factory
    #[error("Unknown filter plugin: {name}")]
    #[diagnostic(
        code(scheduler::unknown_plugin),
        help("Run `cordon plugins` to list the registered filter plugins")
    )]
    UnknownPlugin {
        name: String,
    },

    /// Plugin registered or enabled twice
    #[error("Filter plugin {name} is listed more than once")]
    #[diagnostic(
        code(scheduler::duplicate_plugin),
        help("Each filter plugin may appear only once")
    )]
    DuplicatePlugin {
        name: String,
    },

    /// Plugin factory refused to build the plugin
    #[error("Failed to construct plugin {plugin}: {message}")]
    #[diagnostic(
        code(scheduler::plugin_construction),
        help("Fix the plugin arguments in the framework configuration")
    )]
    PluginConstruction {
        plugin: String,
        message: String,
    },

    /// Framework configuration is invalid
    #[error("Invalid framework configuration: {message}")]
    #[diagnostic(
        code(scheduler::invalid_config),
        help("{suggestion}")
    )]
    InvalidConfig {
        message: String,
        suggestion: String,
    },

    /// The filter pass was cancelled before every node was evaluated
    #[error("Filter pass cancelled after {evaluated} of {total} nodes")]
    #[diagnostic(
        code(scheduler::cancelled),
        help("The scheduling attempt was cancelled; it will be retried on the next cycle")
    )]
    Cancelled {
        evaluated: usize,
        total: usize,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    #[diagnostic(
        code(scheduler::internal_error),
        help("This is likely a bug. Please report it")
    )]
    InternalError {
        message: String,
    },
}

/// Result type for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

impl SchedulerError {
    /// Create a NoSuitableNodes error
    pub fn no_suitable_nodes(pod_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoSuitableNodes {
            pod_name: pod_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownPlugin error
    pub fn unknown_plugin(name: impl Into<String>) -> Self {
        Self::UnknownPlugin { name: name.into() }
    }

    /// Create a DuplicatePlugin error
    pub fn duplicate_plugin(name: impl Into<String>) -> Self {
        Self::DuplicatePlugin { name: name.into() }
    }

    /// Create a PluginConstruction error
    pub fn plugin_construction(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PluginConstruction {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an InternalError
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
