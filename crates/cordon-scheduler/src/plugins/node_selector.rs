use crate::filter::{FilterPlugin, Handle, Plugin};
use crate::status::Status;
use crate::types::NodeInfo;
use crate::Result;
use cordon_core::Pod;
use std::sync::Arc;
use tracing::trace;

/// Plugin name
pub const NAME: &str = "NodeSelector";

pub const ERR_REASON: &str = "node(s) didn't match Pod's node affinity/selector";

/// Filter for `spec.nodeSelector`: every pair must be a node label
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeSelector;

impl NodeSelector {
    pub fn new(
        _args: Option<&serde_json::Value>,
        _handle: Arc<dyn Handle>,
    ) -> Result<Arc<dyn FilterPlugin>> {
        Ok(Arc::new(NodeSelector))
    }
}

impl Plugin for NodeSelector {
    fn name(&self) -> &str {
        NAME
    }
}

impl FilterPlugin for NodeSelector {
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status {
        // No selector = pass
        let Some(selector) = pod.spec.as_ref().and_then(|s| s.node_selector.as_ref()) else {
            return Status::success();
        };

        let labels = node_info.node().metadata.labels.as_ref();

        for (key, value) in selector {
            if labels.and_then(|l| l.get(key)) != Some(value) {
                trace!(
                    "Node {} lacks selector label {}={}",
                    node_info.node_name(),
                    key,
                    value
                );
                return Status::unresolvable(ERR_REASON);
            }
        }

        Status::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SnapshotHandle;
    use cordon_core::{Node, PodSpec};
    use std::collections::BTreeMap;

    fn node_info(labels: &[(&str, &str)]) -> NodeInfo {
        let mut node = Node::default();
        node.metadata.name = Some("node1".to_string());
        node.metadata.labels = Some(
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        NodeInfo::from_node(node)
    }

    fn pod_with_selector(selector: &[(&str, &str)]) -> Pod {
        let mut pod = Pod::default();
        pod.spec = Some(PodSpec {
            node_selector: Some(
                selector
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Default::default()
        });
        pod
    }

    #[test]
    fn test_node_selector() {
        let plugin = NodeSelector::new(None, Arc::new(SnapshotHandle::default())).unwrap();
        let node = node_info(&[("disk", "ssd"), ("zone", "a")]);

        assert!(plugin.filter(&Pod::default(), &node).is_success());
        assert!(plugin
            .filter(&pod_with_selector(&[("disk", "ssd")]), &node)
            .is_success());
        assert_eq!(
            plugin.filter(&pod_with_selector(&[("disk", "hdd")]), &node),
            Status::unresolvable(ERR_REASON)
        );
        assert!(plugin
            .filter(&pod_with_selector(&[("gpu", "true")]), &node)
            .is_unresolvable());
    }
}
