use crate::status::Status;
use crate::types::NodeInfo;
use crate::Result;
use cordon_core::Pod;
use std::sync::Arc;

/// Common surface of every plugin
pub trait Plugin: Send + Sync {
    /// Name used in configuration and diagnostics
    fn name(&self) -> &str;
}

/// An admission rule evaluated for each (pod, node) pair.
///
/// Implementations must be pure: no mutation of the pod or node, no state
/// carried between calls, no I/O. The framework calls the same instance
/// from several threads at once.
pub trait FilterPlugin: Plugin {
    /// Decide whether `node_info` can host `pod`.
    ///
    /// `node_info` always has a node set; calling with an empty snapshot
    /// panics. `pod` may be a zero value.
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status;
}

/// Read-only cluster state handed to every plugin factory
pub trait Handle: Send + Sync {
    /// Snapshots of every node in this attempt
    fn node_infos(&self) -> &[NodeInfo];

    /// Snapshot of one node by name
    fn node_info(&self, name: &str) -> Option<&NodeInfo> {
        self.node_infos()
            .iter()
            .find(|info| info.try_node().and_then(|n| n.metadata.name.as_deref()) == Some(name))
    }
}

/// Handle over a fixed set of node snapshots
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    nodes: Vec<NodeInfo>,
}

impl SnapshotHandle {
    pub fn new(nodes: Vec<NodeInfo>) -> Self {
        Self { nodes }
    }
}

impl Handle for SnapshotHandle {
    fn node_infos(&self) -> &[NodeInfo] {
        &self.nodes
    }
}

/// Uniform constructor signature for filter plugins.
///
/// `args` is the plugin's optional configuration block; plugins that take no
/// arguments ignore it, as they may ignore the handle.
pub type PluginFactory =
    fn(args: Option<&serde_json::Value>, handle: Arc<dyn Handle>) -> Result<Arc<dyn FilterPlugin>>;

#[cfg(test)]
mod tests {
    use super::*;
    use cordon_core::Node;

    fn node_info(name: &str) -> NodeInfo {
        let mut node = Node::default();
        node.metadata.name = Some(name.to_string());
        NodeInfo::from_node(node)
    }

    #[test]
    fn test_snapshot_handle_lookup() {
        let handle = SnapshotHandle::new(vec![node_info("a"), node_info("b")]);
        assert_eq!(handle.node_infos().len(), 2);
        assert_eq!(handle.node_info("b").map(|i| i.node_name()), Some("b"));
        assert!(handle.node_info("c").is_none());
    }

    #[test]
    fn test_handle_skips_empty_snapshots() {
        let handle = SnapshotHandle::new(vec![NodeInfo::new(), node_info("a")]);
        assert!(handle.node_info("a").is_some());
    }
}
