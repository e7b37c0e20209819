//! The layout tree as reported by i3

use crate::utils::deserialize_null_default;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Type alias used for syntax compatibility
pub(crate) type NodeId = u64;

/// The mark i3 users conventionally put on sticky windows
pub(crate) const STICKY_MARK: &str = "_sticky";

// ============================= NodeType ============================= [[[

/// The kind of a [`Node`] in the tree
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub(crate) enum NodeType {
    /// The single top of the tree
    #[serde(rename = "root")]
    #[strum(serialize = "root")]
    Root,
    /// A physical (or the internal `__i3`) output
    #[serde(rename = "output")]
    #[strum(serialize = "output")]
    Output,
    /// A workspace living on an output
    #[serde(rename = "workspace")]
    #[strum(serialize = "workspace")]
    Workspace,
    /// A split container or a window
    #[serde(rename = "con")]
    #[strum(serialize = "con")]
    Con,
    /// Wrapper around a floating window
    #[serde(rename = "floating_con")]
    #[strum(serialize = "floating_con")]
    FloatingCon,
    /// Area reserved for bars
    #[serde(rename = "dockarea")]
    #[strum(serialize = "dockarea")]
    Dockarea,
}

impl Default for NodeType {
    fn default() -> Self {
        Self::Con
    }
}

// ]]] === NodeType ===

// ============================== Layout ============================== [[[

/// How the children of a [`Node`] are arranged
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub(crate) enum Layout {
    /// Children side by side
    #[serde(rename = "splith")]
    #[strum(serialize = "splith")]
    SplitH,
    /// Children on top of each other
    #[serde(rename = "splitv")]
    #[strum(serialize = "splitv")]
    SplitV,
    /// Children as tabs
    #[serde(rename = "tabbed")]
    #[strum(serialize = "tabbed")]
    Tabbed,
    /// Children stacked with one title bar each
    #[serde(rename = "stacked")]
    #[strum(serialize = "stacked")]
    Stacked,
    /// Layout of a dock area
    #[serde(rename = "dockarea")]
    #[strum(serialize = "dockarea")]
    Dockarea,
    /// Layout of an output
    #[serde(rename = "output")]
    #[strum(serialize = "output")]
    Output,
}

impl Default for Layout {
    fn default() -> Self {
        Self::SplitH
    }
}

// ]]] === Layout ===

// ========================== FullscreenMode ========================== [[[

/// Fullscreen state of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub(crate) enum FullscreenMode {
    /// Not fullscreen
    Off,
    /// Fullscreen on its output
    Output,
    /// Fullscreen across every output
    Global,
}

impl Default for FullscreenMode {
    fn default() -> Self {
        Self::Off
    }
}

impl From<u8> for FullscreenMode {
    fn from(mode: u8) -> Self {
        match mode {
            0 => Self::Off,
            1 => Self::Output,
            _ => Self::Global,
        }
    }
}

impl From<FullscreenMode> for u8 {
    fn from(mode: FullscreenMode) -> Self {
        match mode {
            FullscreenMode::Off => 0,
            FullscreenMode::Output => 1,
            FullscreenMode::Global => 2,
        }
    }
}

// ]]] === FullscreenMode ===

/// X11 properties of the window held by a [`Node`]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WindowProperties {
    /// `WM_CLASS` class part
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) class:    String,
    /// `WM_CLASS` instance part
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) instance: String,
    /// `_NET_WM_NAME`
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) title:    String,
}

// =============================== Node =============================== [[[

/// A single element of the layout tree
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Node {
    /// Unique `id` of the [`Node`] within one snapshot
    pub(crate) id:                NodeId,
    /// Kind of the [`Node`]
    #[serde(rename = "type")]
    pub(crate) node_type:         NodeType,
    /// Window title or workspace name
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) name:              String,
    /// Workspace number, if the workspace name starts with one
    pub(crate) num:               Option<i32>,
    /// Arrangement of the primary children
    pub(crate) layout:            Layout,
    /// Is this the focused [`Node`]?
    pub(crate) focused:           bool,
    /// Does the window demand attention?
    pub(crate) urgent:            bool,
    /// Fullscreen state
    pub(crate) fullscreen_mode:   FullscreenMode,
    /// Free-form labels
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) marks:             Vec<String>,
    /// X11 window id, if this [`Node`] holds a window
    pub(crate) window:            Option<u64>,
    /// Properties of the held window
    #[serde(deserialize_with = "deserialize_null_default")]
    pub(crate) window_properties: WindowProperties,
    /// Focus order of the children, most recent first
    pub(crate) focus:             Vec<NodeId>,
    /// Tiled children
    pub(crate) nodes:             Vec<Node>,
    /// Floating children
    pub(crate) floating_nodes:    Vec<Node>,
}

impl Node {
    /// Tiled children followed by floating children, each tagged with whether it
    /// comes from the floating list
    pub(crate) fn children(&self) -> impl Iterator<Item = (&Self, bool)> {
        self.nodes
            .iter()
            .map(|n| (n, false))
            .chain(self.floating_nodes.iter().map(|n| (n, true)))
    }

    /// Number of tiled and floating children
    pub(crate) fn child_count(&self) -> usize {
        self.nodes.len() + self.floating_nodes.len()
    }

    /// Is this [`Node`] marked as sticky?
    pub(crate) fn is_sticky(&self) -> bool {
        self.marks.iter().any(|m| m == STICKY_MARK)
    }

    /// Is this an i3 internal workspace such as the scratchpad?
    pub(crate) fn is_internal(&self) -> bool {
        self.name.starts_with("__")
    }
} // ]]] === Node ===

#[cfg(test)]
impl Node {
    /// Create a childless [`Node`]
    pub(crate) fn new(id: NodeId, node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            id,
            node_type,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper adding a tiled child
    #[must_use]
    pub(crate) fn with_child(mut self, child: Self) -> Self {
        self.nodes.push(child);
        self
    }

    /// Builder-style helper adding a floating child
    #[must_use]
    pub(crate) fn with_floating(mut self, child: Self) -> Self {
        self.floating_nodes.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{FullscreenMode, Layout, Node, NodeType};
    use std::str::FromStr;

    #[test]
    fn deserialize_i3_node() {
        let json = r#"{
            "id": 94180365621568,
            "type": "con",
            "name": null,
            "layout": "tabbed",
            "focused": false,
            "urgent": true,
            "fullscreen_mode": 1,
            "marks": ["a"],
            "window": null,
            "window_properties": {"class": "Alacritty", "instance": null},
            "nodes": [],
            "floating_nodes": [],
            "sticky": false,
            "rect": {"x": 0, "y": 0, "width": 10, "height": 10}
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, 94_180_365_621_568);
        assert_eq!(node.node_type, NodeType::Con);
        assert_eq!(node.name, "");
        assert_eq!(node.layout, Layout::Tabbed);
        assert!(node.urgent);
        assert_eq!(node.fullscreen_mode, FullscreenMode::Output);
        assert_eq!(node.window_properties.class, "Alacritty");
        assert_eq!(node.window_properties.instance, "");
    }

    #[test]
    fn missing_fields_default() {
        let node: Node = serde_json::from_str(r#"{"id": 1, "type": "floating_con"}"#).unwrap();
        assert_eq!(node.node_type, NodeType::FloatingCon);
        assert!(node.marks.is_empty());
        assert_eq!(node.fullscreen_mode, FullscreenMode::Off);
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn kind_names() {
        assert_eq!(NodeType::FloatingCon.as_ref(), "floating_con");
        assert_eq!(NodeType::from_str("workspace").unwrap(), NodeType::Workspace);
        assert_eq!(Layout::SplitV.to_string(), "splitv");
    }

    #[test]
    fn children_order() {
        let node = Node::new(1, NodeType::Workspace, "1")
            .with_floating(Node::new(4, NodeType::FloatingCon, ""))
            .with_child(Node::new(2, NodeType::Con, "a"))
            .with_child(Node::new(3, NodeType::Con, "b"));

        let order = node
            .children()
            .map(|(n, floating)| (n.id, floating))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(2, false), (3, false), (4, true)]);
    }

    #[test]
    fn sticky_mark() {
        let mut node = Node::new(1, NodeType::Con, "");
        assert!(!node.is_sticky());
        node.marks.push(String::from("_sticky"));
        assert!(node.is_sticky());
    }
}

// vim: ft=rust:et:sw=4:ts=2:sts=4:tw=99:fdm=marker:fmr=[[[,]]]:
