use crate::filter::{FilterPlugin, Handle, Plugin};
use crate::status::Status;
use crate::types::NodeInfo;
use crate::Result;
use cordon_core::Pod;
use std::sync::Arc;

/// Plugin name
pub const NAME: &str = "NodeName";

pub const ERR_REASON: &str = "node(s) didn't match the requested node name";

/// Filter for pods pinned to a node through `spec.nodeName`
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeName;

impl NodeName {
    pub fn new(
        _args: Option<&serde_json::Value>,
        _handle: Arc<dyn Handle>,
    ) -> Result<Arc<dyn FilterPlugin>> {
        Ok(Arc::new(NodeName))
    }
}

impl Plugin for NodeName {
    fn name(&self) -> &str {
        NAME
    }
}

impl FilterPlugin for NodeName {
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status {
        let requested = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.node_name.as_deref())
            .filter(|name| !name.is_empty());

        match requested {
            Some(name) if name != node_info.node_name() => Status::unresolvable(ERR_REASON),
            _ => Status::success(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SnapshotHandle;
    use cordon_core::{Node, PodSpec};

    fn node_info(name: &str) -> NodeInfo {
        let mut node = Node::default();
        node.metadata.name = Some(name.to_string());
        NodeInfo::from_node(node)
    }

    fn pod_for(node_name: Option<&str>) -> Pod {
        let mut pod = Pod::default();
        pod.spec = Some(PodSpec {
            node_name: node_name.map(str::to_string),
            ..Default::default()
        });
        pod
    }

    #[test]
    fn test_node_name() {
        let plugin = NodeName::new(None, Arc::new(SnapshotHandle::default())).unwrap();

        assert!(plugin.filter(&pod_for(None), &node_info("a")).is_success());
        assert!(plugin.filter(&pod_for(Some("")), &node_info("a")).is_success());
        assert!(plugin.filter(&pod_for(Some("a")), &node_info("a")).is_success());
        assert_eq!(
            plugin.filter(&pod_for(Some("b")), &node_info("a")),
            Status::unresolvable(ERR_REASON)
        );
    }
}
