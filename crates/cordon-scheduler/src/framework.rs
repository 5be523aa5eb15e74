use crate::config::FrameworkConfig;
use crate::filter::{FilterPlugin, Handle};
use crate::registry::Registry;
use crate::types::{FilterOutcome, FilterReport, NodeInfo};
use crate::{Result, SchedulerError};
use cordon_core::{Pod, Resource};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Ordered set of filter plugins run against candidate nodes
pub struct Framework {
    filters: Vec<Arc<dyn FilterPlugin>>,
    handle: Arc<dyn Handle>,
    parallelism: usize,
}

impl Framework {
    /// Build every enabled filter through its registered factory.
    ///
    /// Fails without a partial framework if any plugin is unknown, listed
    /// twice, or refuses its arguments.
    pub fn new(registry: &Registry, config: &FrameworkConfig, handle: Arc<dyn Handle>) -> Result<Self> {
        config.validate()?;

        let mut seen = HashSet::new();
        let mut filters = Vec::with_capacity(config.filters.len());

        for spec in &config.filters {
            if !seen.insert(spec.name.as_str()) {
                return Err(SchedulerError::duplicate_plugin(&spec.name));
            }

            let factory = registry
                .get(&spec.name)
                .ok_or_else(|| SchedulerError::unknown_plugin(&spec.name))?;

            let plugin = factory(spec.args.as_ref(), handle.clone())?;
            debug!("Constructed filter plugin {}", plugin.name());
            filters.push(plugin);
        }

        Ok(Self {
            filters,
            handle,
            parallelism: config.parallelism,
        })
    }

    /// Names of the filters in evaluation order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run the filters against one node, stopping at the first non-success
    pub fn run_filter_plugins(&self, pod: &Pod, node_info: &NodeInfo) -> FilterOutcome {
        let node_name = node_info.node_name();

        for filter in &self.filters {
            let status = filter.filter(pod, node_info);
            if status.is_success() {
                continue;
            }

            if status.is_error() {
                warn!(
                    "Filter {} failed to evaluate node {}: {}",
                    filter.name(),
                    node_name,
                    status.message()
                );
            } else {
                debug!(
                    "Node {} filtered out by {}: {}",
                    node_name,
                    filter.name(),
                    status
                );
            }

            return FilterOutcome::stopped(node_name, filter.name(), status);
        }

        FilterOutcome::pass(node_name)
    }

    /// Evaluate every node, checking `cancel` before each one
    pub fn find_feasible_nodes(
        &self,
        pod: &Pod,
        nodes: &[NodeInfo],
        cancel: &CancellationToken,
    ) -> Result<FilterReport> {
        let mut report = FilterReport::default();

        for (evaluated, node_info) in nodes.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(SchedulerError::Cancelled {
                    evaluated,
                    total: nodes.len(),
                });
            }
            report.record(self.run_filter_plugins(pod, node_info));
        }

        self.log_report(pod, &report);
        Ok(report)
    }

    /// Evaluate every node in the handle's snapshot
    pub fn find_feasible_nodes_in_snapshot(
        &self,
        pod: &Pod,
        cancel: &CancellationToken,
    ) -> Result<FilterReport> {
        self.find_feasible_nodes(pod, self.handle.node_infos(), cancel)
    }

    /// Same as [`Framework::find_feasible_nodes`], spread over blocking
    /// worker tasks. The report lists nodes in input order.
    ///
    /// On cancellation every worker is still awaited, so `evaluated` counts
    /// the nodes finished across all chunks.
    pub async fn find_feasible_nodes_concurrent(
        self: &Arc<Self>,
        pod: Arc<Pod>,
        nodes: Arc<[NodeInfo]>,
        cancel: CancellationToken,
    ) -> Result<FilterReport> {
        let total = nodes.len();
        let chunk_size = total.div_ceil(self.parallelism).max(1);

        let mut workers = Vec::new();
        for start in (0..total).step_by(chunk_size) {
            let end = (start + chunk_size).min(total);
            let framework = Arc::clone(self);
            let pod = Arc::clone(&pod);
            let nodes = Arc::clone(&nodes);
            let cancel = cancel.clone();

            workers.push(tokio::task::spawn_blocking(move || {
                let mut outcomes = Vec::with_capacity(end - start);
                for node_info in &nodes[start..end] {
                    if cancel.is_cancelled() {
                        return Err(outcomes.len());
                    }
                    outcomes.push(framework.run_filter_plugins(&pod, node_info));
                }
                Ok(outcomes)
            }));
        }

        let mut chunks = Vec::with_capacity(workers.len());
        let mut evaluated = 0;
        let mut cancelled = false;
        for worker in workers {
            match worker.await {
                Ok(Ok(outcomes)) => {
                    evaluated += outcomes.len();
                    chunks.push(outcomes);
                }
                Ok(Err(done)) => {
                    evaluated += done;
                    cancelled = true;
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => {
                    return Err(SchedulerError::internal_error(format!(
                        "Filter worker failed: {}",
                        e
                    )))
                }
            }
        }

        if cancelled {
            return Err(SchedulerError::Cancelled { evaluated, total });
        }

        let mut report = FilterReport::default();
        for outcome in chunks.into_iter().flatten() {
            report.record(outcome);
        }

        self.log_report(&pod, &report);
        Ok(report)
    }

    fn log_report(&self, pod: &Pod, report: &FilterReport) {
        info!(
            "Pod {}: {} feasible, {} unschedulable, {} unresolvable, {} errors",
            pod.name_or_unknown(),
            report.feasible.len(),
            report.unschedulable.len(),
            report.unresolvable.len(),
            report.errors.len()
        );
    }
}
