//! In-tree filter plugins.

pub mod node_name;
pub mod node_resources_fit;
pub mod node_selector;
pub mod node_unschedulable;
pub mod taint_toleration;

pub use node_name::NodeName;
pub use node_resources_fit::{NodeResourcesFit, NodeResourcesFitArgs};
pub use node_selector::NodeSelector;
pub use node_unschedulable::NodeUnschedulable;
pub use taint_toleration::TaintToleration;

use crate::filter::PluginFactory;

/// Every in-tree filter with its factory, in default evaluation order.
///
/// Cheap metadata checks come first so most rejections never reach the
/// resource arithmetic.
pub fn in_tree() -> Vec<(&'static str, PluginFactory)> {
    vec![
        (node_unschedulable::NAME, NodeUnschedulable::new as PluginFactory),
        (node_name::NAME, NodeName::new as PluginFactory),
        (node_selector::NAME, NodeSelector::new as PluginFactory),
        (taint_toleration::NAME, TaintToleration::new as PluginFactory),
        (node_resources_fit::NAME, NodeResourcesFit::new as PluginFactory),
    ]
}
