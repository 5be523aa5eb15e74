use crate::filter::{FilterPlugin, Handle, Plugin};
use crate::status::Status;
use crate::types::NodeInfo;
use crate::Result;
use cordon_core::taints::{find_untolerated_taint, is_hard_taint};
use cordon_core::Pod;
use std::sync::Arc;

/// Plugin name
pub const NAME: &str = "TaintToleration";

/// Filter for NoSchedule and NoExecute node taints.
///
/// PreferNoSchedule taints are left to scoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaintToleration;

impl TaintToleration {
    pub fn new(
        _args: Option<&serde_json::Value>,
        _handle: Arc<dyn Handle>,
    ) -> Result<Arc<dyn FilterPlugin>> {
        Ok(Arc::new(TaintToleration))
    }
}

impl Plugin for TaintToleration {
    fn name(&self) -> &str {
        NAME
    }
}

impl FilterPlugin for TaintToleration {
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status {
        // No taints = pass
        let Some(taints) = node_info.node().spec.as_ref().and_then(|s| s.taints.as_deref()) else {
            return Status::success();
        };

        let tolerations = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.tolerations.as_deref())
            .unwrap_or_default();

        match find_untolerated_taint(taints, tolerations, is_hard_taint) {
            Some(taint) => Status::unresolvable(format!(
                "node(s) had untolerated taint {{{}: {}}}",
                taint.key,
                taint.value.as_deref().unwrap_or_default()
            )),
            None => Status::success(),
        }
    }
}
