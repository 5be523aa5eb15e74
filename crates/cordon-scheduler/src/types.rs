use crate::status::{Code, Status};
use cordon_core::{Node, Pod, Resource, ResourceQuantities};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of one node for the duration of a filter pass.
///
/// Built fresh for every scheduling attempt by the code that drives the
/// framework; filters only ever see `&NodeInfo`.
#[derive(Debug, Clone, Default)]
pub struct NodeInfo {
    node: Option<Node>,
    pods: Vec<Pod>,
    requested: ResourceQuantities,
}

impl NodeInfo {
    /// Empty snapshot with no node attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `node` with no pods placed on it
    pub fn from_node(node: Node) -> Self {
        let mut info = Self::new();
        info.set_node(node);
        info
    }

    /// Attach the node this snapshot describes
    pub fn set_node(&mut self, node: Node) {
        self.node = Some(node);
    }

    /// Account a pod already placed on the node
    pub fn add_pod(&mut self, pod: Pod) -> cordon_core::Result<()> {
        self.requested += ResourceQuantities::pod_requests(&pod)?;
        self.pods.push(pod);
        Ok(())
    }

    /// The node behind this snapshot.
    ///
    /// # Panics
    ///
    /// Panics if no node was set. Running filters against an empty snapshot
    /// is a bug in the caller, not a scheduling outcome.
    pub fn node(&self) -> &Node {
        match &self.node {
            Some(node) => node,
            None => panic!("NodeInfo has no node set; call set_node before running filters"),
        }
    }

    pub fn try_node(&self) -> Option<&Node> {
        self.node.as_ref()
    }

    /// Node name; panics like [`NodeInfo::node`] when no node is set
    pub fn node_name(&self) -> &str {
        self.node().name_or_unknown()
    }

    /// `spec.unschedulable`, absent meaning schedulable
    pub fn is_unschedulable(&self) -> bool {
        self.node()
            .spec
            .as_ref()
            .and_then(|spec| spec.unschedulable)
            .unwrap_or(false)
    }

    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    /// Sum of requests of pods already on the node
    pub fn requested(&self) -> ResourceQuantities {
        self.requested
    }
}

/// Result of running the filter chain for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    /// Node name
    pub node_name: String,
    /// Plugin that rejected the node, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Final status of the chain
    pub status: Status,
}

impl FilterOutcome {
    /// Outcome of a node that passed every filter
    pub fn pass(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            plugin: None,
            status: Status::success(),
        }
    }

    /// Outcome of a node stopped by `plugin`
    pub fn stopped(node_name: impl Into<String>, plugin: impl Into<String>, status: Status) -> Self {
        Self {
            node_name: node_name.into(),
            plugin: Some(plugin.into()),
            status,
        }
    }
}

/// Aggregate result of a filter pass over all candidate nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    /// Nodes that passed every filter, in input order
    pub feasible: Vec<String>,
    /// Rejected for now; may be retried on a later attempt
    pub unschedulable: Vec<FilterOutcome>,
    /// Excluded from this attempt entirely
    pub unresolvable: Vec<FilterOutcome>,
    /// A filter could not evaluate the node
    pub errors: Vec<FilterOutcome>,
}

impl FilterReport {
    /// File an outcome under its severity
    pub fn record(&mut self, outcome: FilterOutcome) {
        match outcome.status.code() {
            Code::Success => self.feasible.push(outcome.node_name),
            Code::Unschedulable => self.unschedulable.push(outcome),
            Code::UnschedulableAndUnresolvable => self.unresolvable.push(outcome),
            Code::Error => self.errors.push(outcome),
        }
    }

    /// Number of nodes evaluated
    pub fn evaluated(&self) -> usize {
        self.feasible.len() + self.unschedulable.len() + self.unresolvable.len() + self.errors.len()
    }

    pub fn has_feasible(&self) -> bool {
        !self.feasible.is_empty()
    }

    /// Rejected and errored outcomes, in the order they are reported
    pub fn failures(&self) -> impl Iterator<Item = &FilterOutcome> {
        self.errors
            .iter()
            .chain(&self.unresolvable)
            .chain(&self.unschedulable)
    }

    /// Human-readable diagnosis, e.g.
    /// `0/3 nodes are available: 1 Insufficient cpu, 2 node is unschedulable.`
    ///
    /// Reasons are counted per node and listed alphabetically.
    pub fn summary(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for outcome in self.failures() {
            for reason in outcome.status.reasons() {
                *counts.entry(reason.as_str()).or_default() += 1;
            }
        }

        let head = format!(
            "{}/{} nodes are available",
            self.feasible.len(),
            self.evaluated()
        );

        if counts.is_empty() {
            return format!("{}.", head);
        }

        let details: Vec<String> = counts
            .into_iter()
            .map(|(reason, count)| format!("{} {}", count, reason))
            .collect();
        format!("{}: {}.", head, details.join(", "))
    }
}
