//! Labels and window details printed for every node

use super::color::Painter;
use crate::{
    config::{Config, IconConfig, NodeFormat},
    tree::{FullscreenMode, Node, NodeType},
};
use itertools::Itertools;
use std::borrow::Cow;

/// Longest title printed before it is truncated
pub(crate) const MAX_TITLE_LEN: usize = 80;

/// Appended to a truncated title
const ELLIPSIS: &str = "...";

/// Short label of a floating container
const FLOATING_LABEL: &str = "fcon";

/// Shorten `title` to [`MAX_TITLE_LEN`] characters, ending it with an ellipsis
pub(crate) fn truncate_title(title: &str) -> Cow<'_, str> {
    if title.chars().count() <= MAX_TITLE_LEN {
        return Cow::Borrowed(title);
    }

    let keep = MAX_TITLE_LEN - ELLIPSIS.chars().count();
    Cow::Owned(title.chars().take(keep).chain(ELLIPSIS.chars()).collect())
}

/// Builds the type, layout and detail pieces of a line
#[derive(Debug, Clone, Copy)]
pub(crate) struct Formatter<'a> {
    /// Configuration being rendered with
    config:  &'a Config,
    /// Color capability
    painter: Painter,
}

impl<'a> Formatter<'a> {
    /// Create a new [`Formatter`]
    pub(crate) const fn new(config: &'a Config, painter: Painter) -> Self {
        Self { config, painter }
    }

    /// Wrap a non-empty label in brackets, bold ones if `focused`
    fn wrap_brackets(&self, s: &str, focused: bool) -> String {
        if s.is_empty() {
            return String::new();
        }
        let fmt = &self.config.formatting;
        let format = if focused {
            fmt.focus_brackets.bold()
        } else {
            fmt.brackets
        };
        format!(
            "{}{}{}",
            self.painter.paint("[", &format),
            s,
            self.painter.paint("]", &format)
        )
    }

    /// Format registered for a node kind
    fn type_format(&self, node_type: NodeType) -> &NodeFormat {
        let fmt = &self.config.formatting;
        match node_type {
            NodeType::Root => &fmt.root,
            NodeType::Output => &fmt.output,
            NodeType::Workspace => &fmt.workspace,
            NodeType::Con => &fmt.con,
            NodeType::FloatingCon => &fmt.float_con,
            NodeType::Dockarea => &fmt.default,
        }
    }

    /// The bracketed type label, e.g. `[workspace]` or `[fcon]`
    pub(crate) fn format_type(&self, node: &Node, is_focused: bool, is_floating: bool) -> String {
        let label = match node.node_type {
            NodeType::FloatingCon => FLOATING_LABEL,
            NodeType::Con if is_floating => FLOATING_LABEL,
            _ => node.node_type.as_ref(),
        };

        let mut format = *self.type_format(node.node_type);
        if is_focused {
            format = format.merge(&self.config.formatting.focus_type).bold();
        }

        self.wrap_brackets(&self.painter.paint(label, &format).to_string(), is_focused)
    }

    /// The bracketed layout label, empty for nodes without tiled children
    pub(crate) fn format_layout(&self, node: &Node, is_focused: bool) -> String {
        if node.nodes.is_empty() {
            return String::new();
        }

        let layout = self
            .painter
            .paint(node.layout.as_ref(), &self.config.formatting.window_layout)
            .to_string();
        self.wrap_brackets(&layout, is_focused)
    }

    /// Status icons that apply to `node`, each preceded by a space
    fn format_icons(&self, node: &Node, is_floating: bool) -> String {
        let icons = &self.config.icons;
        let floating = is_floating || node.node_type == NodeType::FloatingCon;

        [
            (&icons.fullscreen, node.fullscreen_mode != FullscreenMode::Off),
            (&icons.floating, floating),
            (&icons.sticky, node.is_sticky()),
            (&icons.urgent, node.urgent),
        ]
        .into_iter()
        .filter(|(icon, applies)| icon.enabled && *applies)
        .map(|(icon, _)| self.format_icon(icon))
        .collect()
    }

    /// A single icon in its own format
    fn format_icon(&self, icon: &IconConfig) -> String {
        format!(" {}", self.painter.paint(&icon.icon, &icon.format()))
    }

    /// Icons, window class, title and marks of `node`, each preceded by a space
    pub(crate) fn format_details(&self, node: &Node, is_floating: bool) -> String {
        let display = &self.config.display;
        let formatting = &self.config.formatting;
        let mut details = String::new();

        if display.show_icons {
            details.push_str(&self.format_icons(node, is_floating));
        }

        let class = &node.window_properties.class;
        if display.show_window_class && node.node_type == NodeType::Con && !class.is_empty() {
            let format = if node.focused {
                &formatting.focus_class
            } else {
                &formatting.window_class
            };
            let class = format!("({})", class);
            details.push(' ');
            details.push_str(&self.painter.paint(&class, format).to_string());
        }

        if display.show_window_titles && !node.name.is_empty() {
            let title = truncate_title(&node.name);
            details.push(' ');
            details.push_str(&self.painter.paint(&title, &formatting.window_title).to_string());
        }

        if display.show_marks && !node.marks.is_empty() {
            let marks = format!("[{}]", node.marks.iter().join(", "));
            details.push(' ');
            details.push_str(&self.painter.paint(&marks, &formatting.window_marks).to_string());
        }

        details
    }
}
