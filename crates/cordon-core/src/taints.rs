//! Well-known taints and toleration matching.
//!
//! Everything here is a pure function over immutable Kubernetes values so
//! filter plugins can share it without coordination.

use k8s_openapi::api::core::v1::{Taint, Toleration};
use std::fmt;
use std::str::FromStr;

/// Taint key representing a node marked unschedulable (`spec.unschedulable`)
pub const TAINT_NODE_UNSCHEDULABLE: &str = "node.kubernetes.io/unschedulable";

/// Taint key representing a node whose Ready condition is False
pub const TAINT_NODE_NOT_READY: &str = "node.kubernetes.io/not-ready";

/// Toleration operator: value must match
pub const TOLERATION_OP_EQUAL: &str = "Equal";

/// Toleration operator: key presence is enough
pub const TOLERATION_OP_EXISTS: &str = "Exists";

/// Effect of a taint on pods that do not tolerate it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaintEffect {
    /// Do not place new pods on the node
    NoSchedule,
    /// Try to avoid placing new pods on the node
    PreferNoSchedule,
    /// Evict running pods and do not place new ones
    NoExecute,
}

impl TaintEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaintEffect::NoSchedule => "NoSchedule",
            TaintEffect::PreferNoSchedule => "PreferNoSchedule",
            TaintEffect::NoExecute => "NoExecute",
        }
    }

    /// Whether the filter stage must honor this effect.
    /// PreferNoSchedule only influences scoring.
    pub fn is_hard(&self) -> bool {
        matches!(self, TaintEffect::NoSchedule | TaintEffect::NoExecute)
    }
}

impl fmt::Display for TaintEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaintEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NoSchedule" => Ok(TaintEffect::NoSchedule),
            "PreferNoSchedule" => Ok(TaintEffect::PreferNoSchedule),
            "NoExecute" => Ok(TaintEffect::NoExecute),
            other => Err(format!("Unknown taint effect: {}", other)),
        }
    }
}

/// Build a taint value with no value and no timestamp
pub fn taint(key: impl Into<String>, effect: TaintEffect) -> Taint {
    Taint {
        key: key.into(),
        effect: effect.as_str().to_string(),
        ..Default::default()
    }
}

/// The taint implied by `node.spec.unschedulable == true`
pub fn unschedulable_taint() -> Taint {
    taint(TAINT_NODE_UNSCHEDULABLE, TaintEffect::NoSchedule)
}

/// Whether a single toleration tolerates a taint.
///
/// - an empty effect tolerates every effect, otherwise effects must be equal
/// - an empty key tolerates every key, otherwise keys must be equal
/// - `Exists` ignores the value; `Equal` (or no operator) compares values,
///   treating an absent value as the empty string
/// - any other operator tolerates nothing
pub fn toleration_tolerates_taint(toleration: &Toleration, taint: &Taint) -> bool {
    let effect = toleration.effect.as_deref().unwrap_or_default();
    if !effect.is_empty() && effect != taint.effect {
        return false;
    }

    let key = toleration.key.as_deref().unwrap_or_default();
    if !key.is_empty() && key != taint.key {
        return false;
    }

    match toleration.operator.as_deref().unwrap_or_default() {
        "" | TOLERATION_OP_EQUAL => {
            toleration.value.as_deref().unwrap_or_default()
                == taint.value.as_deref().unwrap_or_default()
        }
        TOLERATION_OP_EXISTS => true,
        _ => false,
    }
}

/// Whether any toleration in the list tolerates the taint
pub fn tolerations_tolerate_taint(tolerations: &[Toleration], taint: &Taint) -> bool {
    tolerations
        .iter()
        .any(|toleration| toleration_tolerates_taint(toleration, taint))
}

/// First taint selected by `include` that no toleration tolerates
pub fn find_untolerated_taint<'a, F>(
    taints: &'a [Taint],
    tolerations: &[Toleration],
    include: F,
) -> Option<&'a Taint>
where
    F: Fn(&Taint) -> bool,
{
    taints
        .iter()
        .filter(|taint| include(*taint))
        .find(|taint| !tolerations_tolerate_taint(tolerations, taint))
}

/// Include only NoSchedule and NoExecute taints
pub fn is_hard_taint(taint: &Taint) -> bool {
    TaintEffect::from_str(&taint.effect)
        .map(|effect| effect.is_hard())
        .unwrap_or(false)
}
