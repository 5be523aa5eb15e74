use crate::filter::{FilterPlugin, Handle, Plugin};
use crate::status::Status;
use crate::types::NodeInfo;
use crate::Result;
use cordon_core::taints::{tolerations_tolerate_taint, unschedulable_taint};
use cordon_core::Pod;
use std::sync::Arc;
use tracing::trace;

/// Plugin name
pub const NAME: &str = "NodeUnschedulable";

/// Reason reported when the node is cordoned and the pod does not tolerate it
pub const ERR_REASON_UNSCHEDULABLE: &str = "node is unschedulable";

/// Filter rejecting nodes with `spec.unschedulable` set, unless the pod
/// tolerates `node.kubernetes.io/unschedulable:NoSchedule`
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeUnschedulable;

impl NodeUnschedulable {
    /// Factory; takes no arguments and never fails
    pub fn new(
        _args: Option<&serde_json::Value>,
        _handle: Arc<dyn Handle>,
    ) -> Result<Arc<dyn FilterPlugin>> {
        Ok(Arc::new(NodeUnschedulable))
    }
}

impl Plugin for NodeUnschedulable {
    fn name(&self) -> &str {
        NAME
    }
}

impl FilterPlugin for NodeUnschedulable {
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status {
        if !node_info.is_unschedulable() {
            return Status::success();
        }

        let tolerations = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.tolerations.as_deref())
            .unwrap_or_default();

        if tolerations_tolerate_taint(tolerations, &unschedulable_taint()) {
            trace!(
                "Pod tolerates unschedulable node {}",
                node_info.node_name()
            );
            return Status::success();
        }

        Status::unresolvable(ERR_REASON_UNSCHEDULABLE)
    }
}
