use crate::filter::{FilterPlugin, Handle, Plugin};
use crate::status::{Code, Status};
use crate::types::NodeInfo;
use crate::{Result, SchedulerError};
use cordon_core::{Pod, ResourceQuantities};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Plugin name
pub const NAME: &str = "NodeResourcesFit";

const CPU: &str = "cpu";
const MEMORY: &str = "memory";

/// Arguments accepted in the framework configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeResourcesFitArgs {
    /// Resources this filter does not check (`cpu`, `memory`)
    #[serde(default)]
    pub ignored_resources: Vec<String>,
}

/// Filter for pod resource requests against node allocatable.
///
/// Insufficiency is `Unschedulable` rather than unresolvable: capacity frees
/// up as other pods finish.
#[derive(Debug, Default, Clone)]
pub struct NodeResourcesFit {
    check_cpu: bool,
    check_memory: bool,
}

impl NodeResourcesFit {
    pub fn new(
        args: Option<&serde_json::Value>,
        _handle: Arc<dyn Handle>,
    ) -> Result<Arc<dyn FilterPlugin>> {
        let args: NodeResourcesFitArgs = match args {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| SchedulerError::plugin_construction(NAME, e.to_string()))?,
            None => NodeResourcesFitArgs::default(),
        };

        Ok(Arc::new(Self::with_args(&args)?))
    }

    pub fn with_args(args: &NodeResourcesFitArgs) -> Result<Self> {
        let mut plugin = Self {
            check_cpu: true,
            check_memory: true,
        };

        for resource in &args.ignored_resources {
            match resource.as_str() {
                CPU => plugin.check_cpu = false,
                MEMORY => plugin.check_memory = false,
                other => {
                    return Err(SchedulerError::plugin_construction(
                        NAME,
                        format!("unsupported ignored resource '{}'", other),
                    ))
                }
            }
        }

        Ok(plugin)
    }
}

impl Plugin for NodeResourcesFit {
    fn name(&self) -> &str {
        NAME
    }
}

impl FilterPlugin for NodeResourcesFit {
    fn filter(&self, pod: &Pod, node_info: &NodeInfo) -> Status {
        let request = match ResourceQuantities::pod_requests(pod) {
            Ok(request) => request,
            Err(e) => return Status::from_error(&e),
        };

        if request == ResourceQuantities::default() {
            return Status::success();
        }

        let allocatable = match node_info
            .node()
            .status
            .as_ref()
            .and_then(|s| s.allocatable.as_ref())
            .map(ResourceQuantities::from_k8s_resource_map)
            .transpose()
        {
            Ok(allocatable) => allocatable.unwrap_or_default(),
            Err(e) => return Status::from_error(&e),
        };

        let in_use = node_info.requested();

        debug!(
            "Node {} has CPU: {}/{} milli, Memory: {}/{} bytes in use; pod requests {} milli, {} bytes",
            node_info.node_name(),
            in_use.cpu_millicores,
            allocatable.cpu_millicores,
            in_use.memory_bytes,
            allocatable.memory_bytes,
            request.cpu_millicores,
            request.memory_bytes
        );

        let total = in_use + request;
        let mut reasons = Vec::new();

        if self.check_cpu
            && request.cpu_millicores > 0
            && total.cpu_millicores > allocatable.cpu_millicores
        {
            reasons.push("Insufficient cpu");
        }

        if self.check_memory
            && request.memory_bytes > 0
            && total.memory_bytes > allocatable.memory_bytes
        {
            reasons.push("Insufficient memory");
        }

        if reasons.is_empty() {
            Status::success()
        } else {
            Status::new(Code::Unschedulable, reasons)
        }
    }
}
