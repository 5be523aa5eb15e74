//! Cordon Core - Fundamental types shared by the Cordon admission framework
//!
//! This crate provides:
//! - Kubernetes object re-exports (Pod, Node, Taint, Toleration)
//! - Well-known taints and pure toleration matching
//! - Resource quantity parsing
//! - Manifest loading (JSON, YAML, multi-document, v1 List)
//! - Error types with miette diagnostics

pub mod error;
pub mod manifest;
pub mod resources;
pub mod taints;
pub mod types;

// Re-export commonly used types
pub use error::{CordonError, Result};
pub use manifest::{load_objects, parse_objects, ManifestFormat};
pub use resources::{is_valid_name, Resource, ResourceError, ResourceQuantities};
pub use taints::{TaintEffect, TAINT_NODE_UNSCHEDULABLE};
pub use types::GroupVersionKind;

// Re-export k8s-openapi types for convenience
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{Node, NodeSpec, Pod, PodSpec, Taint, Toleration};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Serialize a resource to pretty JSON
pub fn to_json_pretty<T: serde::Serialize>(resource: &T) -> Result<String> {
    serde_json::to_string_pretty(resource).map_err(|e| {
        CordonError::serialization_error(
            format!("Failed to serialize to JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Serialize a resource to YAML
pub fn to_yaml<T: serde::Serialize>(resource: &T) -> Result<String> {
    serde_yaml::to_string(resource).map_err(|e| {
        CordonError::serialization_error(
            format!("Failed to serialize to YAML: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a value from YAML
pub fn from_yaml<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_yaml::from_str(data).map_err(|e| {
        CordonError::serialization_error(
            format!("Failed to deserialize from YAML: {}", e),
            Some(Box::new(e)),
        )
    })
}
