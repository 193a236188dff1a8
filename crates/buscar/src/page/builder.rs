//! Fluent construction of page snapshots.
//!
//! The builder walks the document once in reading order, assembling the
//! node arena and the linear text projection together: visible text
//! contributions are separated by single spaces, text-less elements carry
//! an empty span at their document position, containers end up spanning
//! everything they contain.

use crate::pattern::FindSpot;

use super::{Attrs, NodeId, NodeKind, PageNode, PageSnapshot};

/// Builder for [`PageSnapshot`].
#[derive(Debug, Default)]
pub struct PageBuilder {
    nodes: Vec<PageNode>,
    text: String,
    stack: Vec<usize>,
    hidden_depth: usize,
}

impl PageBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn append_text(&mut self, text: &str) -> FindSpot {
        if text.is_empty() {
            let at = self.text.len();
            return FindSpot::new(at, at);
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let start = self.text.len();
        self.text.push_str(text);
        FindSpot::new(start, self.text.len())
    }

    fn add(&mut self, kind: NodeKind, attrs: Attrs, text: &str) -> NodeId {
        let visible = !attrs.hidden && self.hidden_depth == 0;
        let span = if visible {
            self.append_text(text)
        } else {
            FindSpot::new(self.text.len(), self.text.len())
        };
        let index = self.nodes.len();
        self.nodes.push(PageNode {
            kind,
            parent: self.stack.last().map(|i| NodeId(*i as u32)),
            attrs,
            text: text.to_string(),
            visible,
            span,
            document_index: index,
            row: None,
            column: None,
        });
        NodeId(index as u32)
    }

    fn begin(&mut self, kind: NodeKind, attrs: Attrs, text: &str) {
        let hidden = attrs.hidden;
        let id = self.add(kind, attrs, text);
        self.stack.push(id.0 as usize);
        if hidden {
            self.hidden_depth += 1;
        }
    }

    fn end(&mut self) {
        let index = self.stack.pop().expect("end() without matching container");
        if self.nodes[index].attrs.hidden {
            self.hidden_depth -= 1;
        }
        // a container spans everything it contains
        let mut start = usize::MAX;
        let mut end = 0;
        for node in &self.nodes[index..] {
            if !node.span.is_empty() {
                start = start.min(node.span.start);
                end = end.max(node.span.end);
            }
        }
        self.nodes[index].span = if start == usize::MAX {
            FindSpot::new(self.text.len(), self.text.len())
        } else {
            FindSpot::new(start, end)
        };
    }

    /// Add a paragraph of text
    #[must_use]
    pub fn paragraph(mut self, text: impl AsRef<str>) -> Self {
        self.add(NodeKind::Paragraph, Attrs::new(), text.as_ref());
        self
    }

    /// Add a heading
    #[must_use]
    pub fn heading(mut self, text: impl AsRef<str>) -> Self {
        self.add(NodeKind::Heading, Attrs::new(), text.as_ref());
        self
    }

    /// Add an inline text run
    #[must_use]
    pub fn text_run(mut self, text: impl AsRef<str>) -> Self {
        self.add(NodeKind::TextRun, Attrs::new(), text.as_ref());
        self
    }

    /// Add a single-line text input
    #[must_use]
    pub fn text_input(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::TextInput, attrs, "");
        self
    }

    /// Add a password input
    #[must_use]
    pub fn password_input(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::PasswordInput, attrs, "");
        self
    }

    /// Add a text area
    #[must_use]
    pub fn textarea(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::Textarea, attrs, "");
        self
    }

    /// Add a file upload input
    #[must_use]
    pub fn file_input(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::FileInput, attrs, "");
        self
    }

    /// Add a checkbox
    #[must_use]
    pub fn checkbox(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::Checkbox, attrs, "");
        self
    }

    /// Add a radio button
    #[must_use]
    pub fn radio(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::RadioButton, attrs, "");
        self
    }

    /// Add a push button with its visible text
    #[must_use]
    pub fn button(mut self, text: impl AsRef<str>, attrs: Attrs) -> Self {
        self.add(NodeKind::Button, attrs, text.as_ref());
        self
    }

    /// Add a hyperlink with its visible text
    #[must_use]
    pub fn anchor(mut self, text: impl AsRef<str>, attrs: Attrs) -> Self {
        self.add(NodeKind::Anchor, attrs, text.as_ref());
        self
    }

    /// Add an image
    #[must_use]
    pub fn image(mut self, attrs: Attrs) -> Self {
        self.add(NodeKind::Image, attrs, "");
        self
    }

    /// Add a button wrapping nested content (typically an image)
    #[must_use]
    pub fn button_wrapping(mut self, attrs: Attrs, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::Button, attrs, "");
        self = build(self);
        self.end();
        self
    }

    /// Add an anchor wrapping nested content
    #[must_use]
    pub fn anchor_wrapping(mut self, attrs: Attrs, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::Anchor, attrs, "");
        self = build(self);
        self.end();
        self
    }

    /// Add a label element (point it at a control with `Attrs::for_id`)
    #[must_use]
    pub fn label(mut self, text: impl AsRef<str>, attrs: Attrs) -> Self {
        self.add(NodeKind::Label, attrs, text.as_ref());
        self
    }

    /// Add a label wrapping its control
    #[must_use]
    pub fn label_wrapping(
        mut self,
        text: impl AsRef<str>,
        attrs: Attrs,
        build: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.begin(NodeKind::Label, attrs, text.as_ref());
        self = build(self);
        self.end();
        self
    }

    /// Add a select with its options
    #[must_use]
    pub fn select(mut self, attrs: Attrs, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::Select, attrs, "");
        self = build(self);
        self.end();
        self
    }

    /// Add an option (inside a `select` closure)
    #[must_use]
    pub fn option(mut self, text: impl AsRef<str>, attrs: Attrs) -> Self {
        self.add(NodeKind::OptionItem, attrs, text.as_ref());
        self
    }

    /// Add a table
    #[must_use]
    pub fn table(mut self, attrs: Attrs, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::Table, attrs, "");
        self = build(self);
        self.end();
        self
    }

    /// Add a table row (inside a `table` closure)
    #[must_use]
    pub fn row(mut self, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::TableRow, Attrs::new(), "");
        self = build(self);
        self.end();
        self
    }

    /// Add a table cell (inside a `row` closure)
    #[must_use]
    pub fn cell(mut self, build: impl FnOnce(Self) -> Self) -> Self {
        self.begin(NodeKind::TableCell, Attrs::new(), "");
        self = build(self);
        self.end();
        self
    }

    /// Add a table cell holding plain text
    #[must_use]
    pub fn cell_text(self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref().to_string();
        self.cell(|b| b.text_run(text))
    }

    /// Add an element of no particular kind
    #[must_use]
    pub fn other(mut self, text: impl AsRef<str>, attrs: Attrs) -> Self {
        self.add(NodeKind::Other, attrs, text.as_ref());
        self
    }

    /// Produce the immutable snapshot.
    #[must_use]
    pub fn finish(mut self) -> PageSnapshot {
        assert!(self.stack.is_empty(), "unbalanced container in page builder");
        self.assign_table_coordinates();
        PageSnapshot::from_parts(self.nodes, self.text)
    }

    fn assign_table_coordinates(&mut self) {
        let tables: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Table)
            .map(|(i, _)| i)
            .collect();
        for table in tables {
            let rows: Vec<usize> = self.children_of(table, NodeKind::TableRow);
            for (row_number, row) in rows.iter().enumerate() {
                let cells: Vec<usize> = self.children_of(*row, NodeKind::TableCell);
                for (column_number, cell) in cells.iter().enumerate() {
                    self.nodes[*cell].row = Some(row_number + 1);
                    self.nodes[*cell].column = Some(column_number + 1);
                }
            }
        }
    }

    fn children_of(&self, parent: usize, kind: NodeKind) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent == Some(NodeId(parent as u32)) && n.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }
}
