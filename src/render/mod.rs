//! Drawing the tree onto a terminal

pub(crate) mod color;
pub(crate) mod format;

use self::{color::Painter, format::Formatter};
use crate::{
    config::{Branches, Config},
    error::Error,
    tree::{Node, NodeId, NodeType},
    utils::wants_color,
};
use itertools::Itertools;
use std::{
    collections::HashSet,
    io::{self, Write},
};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Something that can display a tree
pub(crate) trait Renderer {
    /// Render a complete tree
    fn render(&mut self, root: &Node) -> io::Result<()>;
}

// ============================ FocusedPath =========================== [[[

/// Identifiers of the focused node and all of its ancestors
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FocusedPath(HashSet<NodeId>);

impl FocusedPath {
    /// Find the path from `root` to the focused node. Empty if nothing is
    /// focused
    pub(crate) fn find(root: &Node) -> Self {
        let mut path = HashSet::new();
        Self::collect(root, &mut path);
        Self(path)
    }

    /// Add `node` to `path` if it is, or contains, the focused node
    fn collect(node: &Node, path: &mut HashSet<NodeId>) -> bool {
        if node.focused {
            path.insert(node.id);
            return true;
        }

        // Tiled children are searched before floating ones
        if node.children().any(|(child, _)| Self::collect(child, path)) {
            path.insert(node.id);
            return true;
        }

        false
    }

    /// Is the node with `id` on the path?
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    /// Number of nodes on the path
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Is anything focused at all?
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
} // ]]] === FocusedPath ===

/// The connector drawn in front of a node's type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker<'a> {
    /// `├` or `└`
    connector: &'a str,
    /// The horizontal run following the connector
    run:       &'a str,
    /// Is this the last sibling?
    last:      bool,
}

impl<'a> Marker<'a> {
    /// Marker of a child that is (or is not) the last of its siblings
    fn new(branches: &'a Branches, last: bool) -> Self {
        Self {
            connector: if last {
                &branches.connect_v
            } else {
                &branches.connect_h
            },
            run: &branches.horizontal,
            last,
        }
    }

    /// Are there no characters to draw?
    fn is_empty(&self) -> bool {
        self.connector.is_empty() && self.run.is_empty()
    }
}

/// Everything a line depends on besides the node itself
#[derive(Debug, Clone)]
struct Frame<'a> {
    /// Trunks of the ancestors
    prefix:          String,
    /// The node's own connector, `None` for the root
    marker:          Option<Marker<'a>>,
    /// Depth in the tree
    level:           usize,
    /// Does the node come from its parent's floating list?
    is_floating:     bool,
    /// Is a later sibling on the focused path?
    focused_sibling: bool,
}

// ============================== Console ============================= [[[

/// Prints the tree as indented text, one node per line
#[derive(Debug)]
pub(crate) struct Console<'a, W: Write> {
    /// Where the lines are written to
    out:       W,
    /// Configuration being rendered with
    config:    &'a Config,
    /// Color capability
    painter:   Painter,
    /// Builds the labels of every line
    formatter: Formatter<'a>,
}

impl<'a, W: Write> Console<'a, W> {
    /// Create a new [`Console`]
    pub(crate) fn new(out: W, config: &'a Config, painter: Painter) -> Self {
        Self {
            out,
            config,
            painter,
            formatter: Formatter::new(config, painter),
        }
    }

    /// Draw a connector, highlighting it when it leads towards the focused node
    fn draw_marker(&self, marker: Option<Marker<'_>>, on_path: bool, focused_sibling: bool) -> String {
        let marker = match marker {
            Some(m) if !m.is_empty() => m,
            _ => return String::new(),
        };
        let focus = &self.config.formatting.focus_branches;
        let plain = &self.config.formatting.tree_branches;

        if on_path {
            let whole = format!("{}{}", marker.connector, marker.run);
            self.painter.paint(&whole, focus).to_string()
        } else if focused_sibling {
            // Only the connector, the focused node is further down
            format!(
                "{}{}",
                self.painter.paint(marker.connector, focus),
                self.painter.paint(marker.run, plain)
            )
        } else {
            let whole = format!("{}{}", marker.connector, marker.run);
            self.painter.paint(&whole, plain).to_string()
        }
    }

    /// Prefix inherited by the children of the node described by `frame`
    fn child_prefix(&self, frame: &Frame<'_>) -> String {
        match frame.marker {
            Some(marker) if !marker.last => {
                let vertical = &self.config.display.branches.vertical;
                let formatting = &self.config.formatting;
                let trunk = self.painter.paint(
                    vertical,
                    if frame.focused_sibling {
                        &formatting.focus_branches
                    } else {
                        &formatting.tree_branches
                    },
                );
                format!("{}{}  ", frame.prefix, trunk)
            },
            // The root is never drawn with a trunk in front of it
            _ if frame.level == 0 => String::new(),
            _ => format!("{}   ", frame.prefix),
        }
    }

    /// Print `node` and everything below it
    fn print(&mut self, node: &Node, frame: &Frame<'_>, path: &FocusedPath) -> io::Result<()> {
        let config = self.config;
        let marker = self.draw_marker(frame.marker, path.contains(node.id), frame.focused_sibling);

        // A floating wrapper is shown on the same line as its window
        if node.node_type == NodeType::FloatingCon && node.nodes.len() == 1 {
            let child = &node.nodes[0];
            let ftype = self.formatter.format_type(node, child.focused, true);
            let details = self.formatter.format_details(child, true);
            return writeln!(self.out, "{}{}{}{}", frame.prefix, marker, ftype, details);
        }

        let ftype = self.formatter.format_type(node, node.focused, frame.is_floating);
        let flayout = self.formatter.format_layout(node, node.focused);
        let details = self.formatter.format_details(node, frame.is_floating);
        writeln!(self.out, "{}{}{}{}{}", frame.prefix, marker, ftype, flayout, details)?;

        let children = node.children().collect::<Vec<_>>();
        let prefix = self.child_prefix(frame);

        for (i, (child, is_floating)) in children.iter().enumerate() {
            let focused_sibling = children[i + 1..].iter().any(|(n, _)| path.contains(n.id));
            let child_frame = Frame {
                prefix: prefix.clone(),
                marker: Some(Marker::new(&config.display.branches, i + 1 == children.len())),
                level: frame.level + 1,
                is_floating: *is_floating,
                focused_sibling,
            };
            self.print(child, &child_frame, path)?;
        }

        Ok(())
    }
} // ]]] === Console ===

#[cfg(test)]
impl<W: Write> Console<'_, W> {
    /// Give back the output sink
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for Console<'_, W> {
    fn render(&mut self, root: &Node) -> io::Result<()> {
        let path = FocusedPath::find(root);
        log::trace!("{} nodes on the focused path", path.len());
        if path.is_empty() {
            log::debug!("no focused node in the tree");
        }

        let frame = Frame {
            prefix:          String::new(),
            marker:          None,
            level:           0,
            is_floating:     false,
            focused_sibling: false,
        };
        self.print(root, &frame, &path)?;
        self.out.flush()
    }
}

// =========================== RenderStrategy ========================= [[[

/// Where and how the tree is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub(crate) enum RenderStrategy {
    /// Colored console output
    #[strum(serialize = "console")]
    Console,
    /// Console output without any escape sequence
    #[strum(serialize = "no-color")]
    NoColor,
}

impl RenderStrategy {
    /// Parse a strategy name
    pub(crate) fn from_name(name: &str) -> Result<Self, Error> {
        name.parse().map_err(|_| Error::UnknownStrategy {
            kind:      "render",
            name:      name.to_owned(),
            available: Self::iter().join(", "),
        })
    }

    /// The color capability of this strategy
    pub(crate) fn painter(self) -> Painter {
        match self {
            Self::Console => Painter::new(wants_color()),
            Self::NoColor => Painter::new(false),
        }
    }

    /// Create a [`Renderer`] writing to `out`
    pub(crate) fn renderer<'a, W: Write + 'a>(
        self,
        out: W,
        config: &'a Config,
    ) -> Box<dyn Renderer + 'a> {
        let painter = self.painter();
        log::debug!("rendering with '{}', colors: {}", self, painter.enabled());
        Box::new(Console::new(out, config, painter))
    }
} // ]]] === RenderStrategy ===

#[cfg(test)]
mod tests {
    use super::{Console, FocusedPath, RenderStrategy, Renderer};
    use crate::{
        config::{Config, NodeFormat},
        error::Error,
        render::color::Painter,
        tree::{FullscreenMode, Node, NodeType},
        utils::strip_ansi,
    };

    fn render(root: &Node, config: &Config, colors: bool) -> String {
        let mut console = Console::new(Vec::new(), config, Painter::new(colors));
        console.render(root).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    fn focused(mut node: Node) -> Node {
        node.focused = true;
        node
    }

    /// root -> workspace -> focused `term`
    fn simple_tree() -> Node {
        Node::new(1, NodeType::Root, "").with_child(
            Node::new(2, NodeType::Workspace, "")
                .with_child(focused(Node::new(3, NodeType::Con, "term"))),
        )
    }

    /// root
    /// ├── output a
    /// │   └── workspace 1
    /// │       ├── con x
    /// │       └── con y
    /// └── output b
    ///     └── workspace 2
    ///         ├── con z (focused)
    ///         └── fcon (floating)
    fn two_outputs() -> Node {
        let mut float = Node::new(31, NodeType::FloatingCon, "");
        float.nodes.push(Node::new(32, NodeType::Con, "popup"));

        Node::new(1, NodeType::Root, "root")
            .with_child(
                Node::new(10, NodeType::Output, "a").with_child(
                    Node::new(11, NodeType::Workspace, "1")
                        .with_child(Node::new(12, NodeType::Con, "x"))
                        .with_child(Node::new(13, NodeType::Con, "y")),
                ),
            )
            .with_child(
                Node::new(20, NodeType::Output, "b").with_child(
                    Node::new(21, NodeType::Workspace, "2")
                        .with_child(focused(Node::new(22, NodeType::Con, "z")))
                        .with_floating(float),
                ),
            )
    }

    #[test]
    fn focused_path() {
        let path = FocusedPath::find(&two_outputs());
        assert_eq!(path.len(), 4);
        for id in [1, 20, 21, 22] {
            assert!(path.contains(id), "{} should be on the path", id);
        }
        for id in [10, 11, 12, 13, 31, 32] {
            assert!(!path.contains(id), "{} should not be on the path", id);
        }
    }

    #[test]
    fn focused_path_through_floating() {
        let mut float = Node::new(3, NodeType::FloatingCon, "");
        float.nodes.push(focused(Node::new(4, NodeType::Con, "")));
        let root = Node::new(1, NodeType::Root, "").with_child(
            Node::new(2, NodeType::Workspace, "")
                .with_child(Node::new(5, NodeType::Con, ""))
                .with_floating(float),
        );

        let path = FocusedPath::find(&root);
        assert_eq!(path.len(), 4);
        assert!(path.contains(3) && path.contains(4) && !path.contains(5));
    }

    #[test]
    fn nothing_focused() {
        let mut root = two_outputs();
        root.nodes[1].nodes[0].nodes[0].focused = false;
        assert!(FocusedPath::find(&root).is_empty());
    }

    #[test]
    fn simple_tree_plain() {
        let out = render(&simple_tree(), &Config::default(), false);
        assert_eq!(
            out,
            "[root][splith]\n\
             └──[workspace][splith]\n   \
             └──[con] term\n"
        );
    }

    #[test]
    fn simple_tree_colored() {
        let out = render(&simple_tree(), &Config::default(), true);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);

        // Every marker is on the path, so all of them are highlighted
        assert!(lines[1].starts_with("\x1b[38;5;80;1m└──\x1b[0m"));
        assert_eq!(
            lines[2],
            "   \x1b[38;5;80;1m└──\x1b[0m\
             \x1b[1m[\x1b[0m\x1b[34;1mcon\x1b[0m\x1b[1m]\x1b[0m term"
        );
    }

    #[test]
    fn tree_structure() {
        let out = render(&two_outputs(), &Config::default(), false);
        assert_eq!(
            out,
            "[root][splith] root\n\
             ├──[output][splith] a\n\
             │  └──[workspace][splith] 1\n\
             │     ├──[con] x\n\
             │     └──[con] y\n\
             └──[output][splith] b\n   \
             └──[workspace][splith] 2\n      \
             ├──[con] z\n      \
             └──[fcon] 󰭽 popup\n"
        );
    }

    #[test]
    fn sibling_before_focused_path() {
        let out = render(&two_outputs(), &Config::default(), true);
        let lines = out.lines().collect::<Vec<_>>();

        // output a is not on the path but output b follows it: only the
        // connector is highlighted
        assert!(lines[1].starts_with("\x1b[38;5;80;1m├\x1b[0m──"));
        // and the trunk below it too
        assert!(lines[2].starts_with("\x1b[38;5;80;1m│\x1b[0m  └──"));
        // output b is on the path
        assert!(lines[5].starts_with("\x1b[38;5;80;1m└──\x1b[0m"));
        // the focused window has a later sibling, but is itself on the path
        assert!(lines[7].starts_with("      \x1b[38;5;80;1m├──\x1b[0m"));
        // the floating window is after the focused one
        assert!(lines[8].starts_with("      └──"));
    }

    #[test]
    fn floating_wrapper_is_collapsed() {
        let out = render(&two_outputs(), &Config::default(), false);
        assert!(!out.contains("[con] popup"));
        assert_eq!(out.matches("popup").count(), 1);
    }

    #[test]
    fn floating_wrapper_without_single_child() {
        let empty = Node::new(3, NodeType::FloatingCon, "");
        let mut double = Node::new(4, NodeType::FloatingCon, "");
        double.nodes.push(Node::new(5, NodeType::Con, "a"));
        double.nodes.push(Node::new(6, NodeType::Con, "b"));
        let root = Node::new(1, NodeType::Root, "")
            .with_child(Node::new(2, NodeType::Workspace, "").with_floating(empty).with_floating(double));

        let mut config = Config::default();
        config.display.show_icons = false;
        let out = render(&root, &config, false);
        assert_eq!(
            out,
            "[root][splith]\n\
             └──[workspace]\n   \
             ├──[fcon]\n   \
             └──[fcon][splith]\n      \
             ├──[con] a\n      \
             └──[con] b\n"
        );
    }

    #[test]
    fn collapsed_wrapper_uses_child_details() {
        let mut window = focused(Node::new(3, NodeType::Con, "mpv"));
        window.window_properties.class = String::from("mpv");
        window.fullscreen_mode = FullscreenMode::Output;
        window.nodes.push(Node::new(4, NodeType::Con, "hidden"));
        let mut float = Node::new(2, NodeType::FloatingCon, "wrapper");
        float.nodes.push(window);
        let root = Node::new(1, NodeType::Root, "").with_floating(float);

        let mut config = Config::default();
        config.icons.fullscreen.icon = String::from("F");
        config.icons.floating.icon = String::from("L");
        let out = render(&root, &config, false);
        assert_eq!(out, "[root]\n└──[fcon] F L (mpv) mpv\n");
    }

    #[test]
    fn all_details_hidden() {
        let mut config = Config::default();
        config.display.show_icons = false;
        config.display.show_marks = false;
        config.display.show_window_class = false;
        config.display.show_window_titles = false;

        let mut tree = two_outputs();
        tree.nodes[0].nodes[0].nodes[0].marks = vec![String::from("m")];
        tree.nodes[0].nodes[0].nodes[0].urgent = true;

        let out = render(&tree, &config, false);
        assert_eq!(
            out,
            "[root][splith]\n\
             ├──[output][splith]\n\
             │  └──[workspace][splith]\n\
             │     ├──[con]\n\
             │     └──[con]\n\
             └──[output][splith]\n   \
             └──[workspace][splith]\n      \
             ├──[con]\n      \
             └──[fcon]\n"
        );
    }

    #[test]
    fn no_escapes_without_color() {
        let mut tree = two_outputs();
        tree.nodes[0].nodes[0].nodes[0].marks = vec![String::from("a"), String::from("b")];
        tree.nodes[0].nodes[0].nodes[0].urgent = true;

        let colored = render(&tree, &Config::default(), true);
        let plain = render(&tree, &Config::default(), false);
        assert!(colored.contains('\x1b'));
        assert!(!plain.contains('\x1b'));
        assert_eq!(strip_ansi(&colored).unwrap(), plain);
    }

    #[test]
    fn rendering_is_idempotent() {
        let tree = two_outputs();
        let config = Config::default();
        assert_eq!(render(&tree, &config, true), render(&tree, &config, true));
    }

    #[test]
    fn custom_branches() {
        let mut config = Config::default();
        config.display.branches.connect_h = String::from("|-");
        config.display.branches.connect_v = String::from("`-");
        config.display.branches.horizontal = String::from("-");
        config.display.branches.vertical = String::from("|");

        let out = render(&two_outputs(), &config, true);
        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[1].starts_with("\x1b[38;5;80;1m|-\x1b[0m-"));
        assert!(strip_ansi(&out).unwrap().contains("\n|  `--[workspace]"));
    }

    #[test]
    fn unfocused_branches_and_brackets_have_their_own_format() {
        let mut config = Config::default();
        config.formatting.tree_branches = NodeFormat::fg(9);
        config.formatting.brackets = NodeFormat::fg(3);
        config.formatting.con = NodeFormat::default();

        let out = render(&two_outputs(), &config, true);
        let lines = out.lines().collect::<Vec<_>>();
        // connector highlighted, the run in the plain branch format
        assert!(lines[1].starts_with("\x1b[38;5;80;1m├\x1b[0m\x1b[90m──\x1b[0m"));
        // neither on the path nor before it
        assert_eq!(
            lines[3],
            "\x1b[38;5;80;1m│\x1b[0m     \x1b[90m├──\x1b[0m\x1b[32m[\x1b[0mcon\x1b[32m]\x1b[0m x"
        );
    }

    #[test]
    fn strategies() {
        assert_eq!(RenderStrategy::from_name("console").unwrap(), RenderStrategy::Console);
        assert_eq!(RenderStrategy::from_name("no-color").unwrap(), RenderStrategy::NoColor);
        assert!(!RenderStrategy::NoColor.painter().enabled());

        match RenderStrategy::from_name("html") {
            Err(Error::UnknownStrategy { name, available, .. }) => {
                assert_eq!(name, "html");
                assert_eq!(available, "console, no-color");
            },
            other => panic!("unexpected: {:?}", other),
        }
    }
}

// vim: ft=rust:et:sw=4:ts=2:sts=4:tw=99:fdm=marker:fmr=[[[,]]]:
