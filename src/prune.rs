//! Trimming the tree down to the interesting workspaces

use crate::{
    error::Error,
    render::FocusedPath,
    tree::{Node, NodeType},
};
use std::mem;

/// Something that cuts parts off a tree
pub(crate) trait Pruner {
    /// Return the part of `root` that should be displayed
    fn prune(&self, root: Node) -> Result<Node, Error>;
}

/// Keep only the workspaces accepted by `keep`
///
/// Outputs and containers that end up without a workspace are removed, and so
/// are dock areas and internal workspaces. The root is always kept.
fn retain_workspaces<F: Fn(&Node) -> bool>(mut root: Node, keep: &F) -> Node {
    /// Prune the subtree below `node`, `None` when nothing is left
    fn retain<F: Fn(&Node) -> bool>(mut node: Node, keep: &F) -> Option<Node> {
        match node.node_type {
            NodeType::Workspace => (!node.is_internal() && keep(&node)).then(|| node),
            NodeType::Dockarea => None,
            _ => {
                node.nodes = prune_children(mem::take(&mut node.nodes), keep);
                (!node.nodes.is_empty()).then(|| node)
            },
        }
    }

    /// Prune every child
    fn prune_children<F: Fn(&Node) -> bool>(nodes: Vec<Node>, keep: &F) -> Vec<Node> {
        nodes.into_iter().filter_map(|n| retain(n, keep)).collect()
    }

    root.nodes = prune_children(mem::take(&mut root.nodes), keep);
    root
}

/// Number of workspaces in the tree
fn count_workspaces(node: &Node) -> usize {
    if node.node_type == NodeType::Workspace {
        return 1;
    }
    node.children().map(|(child, _)| count_workspaces(child)).sum()
}

/// Shows only the workspace holding the focused window
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FocusedWorkspace;

impl Pruner for FocusedWorkspace {
    fn prune(&self, root: Node) -> Result<Node, Error> {
        let path = FocusedPath::find(&root);
        let pruned = retain_workspaces(root, &|ws: &Node| path.contains(ws.id));

        if count_workspaces(&pruned) == 0 {
            return Err(Error::NoFocusedWorkspace);
        }
        Ok(pruned)
    }
}

/// Shows every workspace that holds at least one window
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct NonEmptyWorkspaces;

impl Pruner for NonEmptyWorkspaces {
    fn prune(&self, root: Node) -> Result<Node, Error> {
        Ok(retain_workspaces(root, &|ws: &Node| ws.child_count() > 0))
    }
}

/// Shows a single workspace, found by name or number
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamedWorkspace(pub(crate) String);

impl Pruner for NamedWorkspace {
    fn prune(&self, root: Node) -> Result<Node, Error> {
        let name = self.0.as_str();
        let pruned = retain_workspaces(root, &|ws: &Node| {
            ws.name == name || ws.num.map_or(false, |num| num.to_string() == name)
        });

        if count_workspaces(&pruned) == 0 {
            return Err(Error::WorkspaceNotFound(self.0.clone()));
        }
        Ok(pruned)
    }
}

/// Leaves the tree untouched
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Raw;

impl Pruner for Raw {
    fn prune(&self, root: Node) -> Result<Node, Error> {
        Ok(root)
    }
}

/// Create the [`Pruner`] selected by `name`
///
/// `focused`, `all` and `raw` are keywords, everything else names a workspace
pub(crate) fn new_pruner(name: &str) -> Box<dyn Pruner> {
    log::debug!("pruning with '{}'", name);
    match name {
        "" | "focused" => Box::new(FocusedWorkspace),
        "all" => Box::new(NonEmptyWorkspaces),
        "raw" => Box::new(Raw),
        other => Box::new(NamedWorkspace(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::{count_workspaces, new_pruner};
    use crate::{
        error::Error,
        fetch::{Fetcher, FromFake},
        tree::{Node, NodeType},
    };

    fn mock() -> Node {
        FromFake.fetch().unwrap()
    }

    /// Names of the workspaces left in the tree
    fn workspaces(node: &Node) -> Vec<String> {
        if node.node_type == NodeType::Workspace {
            return vec![node.name.clone()];
        }
        node.children().flat_map(|(child, _)| workspaces(child)).collect()
    }

    fn contains_type(node: &Node, node_type: NodeType) -> bool {
        node.node_type == node_type || node.children().any(|(c, _)| contains_type(c, node_type))
    }

    #[test]
    fn focused() {
        let tree = new_pruner("focused").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["1"]);
        assert!(!contains_type(&tree, NodeType::Dockarea));

        // root -> eDP-1 -> content -> workspace
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].name, "eDP-1");
        assert_eq!(tree.nodes[0].nodes[0].name, "content");
    }

    #[test]
    fn empty_name_is_focused() {
        let tree = new_pruner("").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["1"]);
    }

    #[test]
    fn focused_without_focus() {
        let root = Node::new(1, NodeType::Root, "")
            .with_child(Node::new(2, NodeType::Workspace, "1"));
        assert!(matches!(
            new_pruner("focused").prune(root),
            Err(Error::NoFocusedWorkspace)
        ));
    }

    #[test]
    fn all_non_empty() {
        let tree = new_pruner("all").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["1", "2", "3: media", "9"]);
        assert_eq!(tree.nodes.len(), 2);
    }

    #[test]
    fn by_name_or_number() {
        let tree = new_pruner("2").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["2"]);

        let tree = new_pruner("3").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["3: media"]);

        let tree = new_pruner("3: media").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["3: media"]);

        // empty workspaces can still be asked for
        let tree = new_pruner("4").prune(mock()).unwrap();
        assert_eq!(workspaces(&tree), vec!["4"]);
    }

    #[test]
    fn internal_workspaces_are_hidden() {
        assert!(matches!(
            new_pruner("__i3_scratch").prune(mock()),
            Err(Error::WorkspaceNotFound(_))
        ));
    }

    #[test]
    fn unknown_workspace() {
        match new_pruner("42").prune(mock()) {
            Err(Error::WorkspaceNotFound(name)) => assert_eq!(name, "42"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn raw() {
        let tree = new_pruner("raw").prune(mock()).unwrap();
        assert_eq!(tree, mock());
        assert_eq!(count_workspaces(&tree), 6);
    }
}
