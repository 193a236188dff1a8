//! Immutable page snapshots: an arena of node descriptors plus one linear
//! visible-text projection.
//!
//! The matching algorithms never observe a live document. A snapshot is
//! built once per resolution pass (normally by the rendering collaborator
//! through [`PageBuilder`]); every query here is read-only. Node
//! references are compact arena indices, so "same underlying node" is a
//! plain index comparison.

mod builder;

pub use builder::PageBuilder;

use serde::{Deserialize, Serialize};

use crate::pattern::FindSpot;

/// Compact node identifier (index into the snapshot arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The element kind of a snapshot node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Block of plain text
    Paragraph,
    /// Heading text
    Heading,
    /// Inline text run
    TextRun,
    /// Single-line text input
    TextInput,
    /// Password input
    PasswordInput,
    /// Multi-line text area
    Textarea,
    /// File upload input
    FileInput,
    /// Checkbox
    Checkbox,
    /// Radio button
    RadioButton,
    /// Drop-down select
    Select,
    /// Option inside a select
    OptionItem,
    /// Push button
    Button,
    /// Hyperlink
    Anchor,
    /// Image
    Image,
    /// Label element
    Label,
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
    /// Anything else
    Other,
}

impl NodeKind {
    /// Whether this element is a form control (its text never serves as
    /// labeling text for a neighbour).
    #[must_use]
    pub const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::PasswordInput
                | Self::Textarea
                | Self::FileInput
                | Self::Checkbox
                | Self::RadioButton
                | Self::Select
                | Self::OptionItem
                | Self::Button
        )
    }

    /// Whether this element's own text can label a nearby control.
    #[must_use]
    pub const fn is_labeling_text(self) -> bool {
        matches!(
            self,
            Self::Paragraph | Self::Heading | Self::TextRun | Self::Label | Self::TableCell
        )
    }

    /// Stable tag name used in candidate descriptions.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Paragraph => "HtmlParagraph",
            Self::Heading => "HtmlHeading",
            Self::TextRun => "HtmlText",
            Self::TextInput => "HtmlTextInput",
            Self::PasswordInput => "HtmlPasswordInput",
            Self::Textarea => "HtmlTextArea",
            Self::FileInput => "HtmlFileInput",
            Self::Checkbox => "HtmlCheckBox",
            Self::RadioButton => "HtmlRadioButton",
            Self::Select => "HtmlSelect",
            Self::OptionItem => "HtmlOption",
            Self::Button => "HtmlButton",
            Self::Anchor => "HtmlAnchor",
            Self::Image => "HtmlImage",
            Self::Label => "HtmlLabel",
            Self::Table => "HtmlTable",
            Self::TableRow => "HtmlTableRow",
            Self::TableCell => "HtmlTableCell",
            Self::Other => "HtmlElement",
        }
    }
}

/// The attributes the matcher family consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attrs {
    /// `id` attribute
    pub id: Option<String>,
    /// `name` attribute
    pub name: Option<String>,
    /// `alt` attribute (images)
    pub alt: Option<String>,
    /// `title` attribute (images)
    pub title: Option<String>,
    /// `src` attribute (images)
    pub src: Option<String>,
    /// `for` attribute (labels)
    pub for_id: Option<String>,
    /// `aria-label` attribute
    pub aria_label: Option<String>,
    /// Element is not rendered (display:none and friends)
    pub hidden: bool,
}

impl Attrs {
    /// Empty attribute set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `id` attribute
    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    /// Set the `name` attribute
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Set the `alt` attribute
    #[must_use]
    pub fn alt(mut self, value: impl Into<String>) -> Self {
        self.alt = Some(value.into());
        self
    }

    /// Set the `title` attribute
    #[must_use]
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    /// Set the `src` attribute
    #[must_use]
    pub fn src(mut self, value: impl Into<String>) -> Self {
        self.src = Some(value.into());
        self
    }

    /// Set the `for` attribute
    #[must_use]
    pub fn for_id(mut self, value: impl Into<String>) -> Self {
        self.for_id = Some(value.into());
        self
    }

    /// Set the `aria-label` attribute
    #[must_use]
    pub fn aria_label(mut self, value: impl Into<String>) -> Self {
        self.aria_label = Some(value.into());
        self
    }

    /// Mark the element as not rendered
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One node descriptor in the snapshot arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageNode {
    /// Element kind
    pub kind: NodeKind,
    /// Parent node, if any
    pub parent: Option<NodeId>,
    /// Attributes relevant to matching
    pub attrs: Attrs,
    /// The node's own visible text (empty for controls without text)
    pub text: String,
    /// Whether the node is rendered
    pub visible: bool,
    /// The node's span in the text projection; containers cover their
    /// descendants, text-less nodes carry an empty span at their position
    pub span: FindSpot,
    /// Position in document order
    pub document_index: usize,
    /// 1-based row number (table cells only)
    pub row: Option<usize>,
    /// 1-based column number (table cells only)
    pub column: Option<usize>,
}

/// A read-only snapshot of a rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    nodes: Vec<PageNode>,
    text: String,
}

impl PageSnapshot {
    pub(crate) fn from_parts(nodes: Vec<PageNode>, text: String) -> Self {
        Self { nodes, text }
    }

    /// Start building a snapshot
    #[must_use]
    pub fn builder() -> PageBuilder {
        PageBuilder::new()
    }

    /// Number of nodes in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node descriptor behind an id
    #[must_use]
    pub fn node(&self, id: NodeId) -> &PageNode {
        &self.nodes[id.0 as usize]
    }

    /// The whole linear visible-text projection
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The node's span in the text projection
    #[must_use]
    pub fn position_of(&self, id: NodeId) -> FindSpot {
        self.node(id).span
    }

    /// Projection text strictly before the node
    #[must_use]
    pub fn text_before(&self, id: NodeId) -> &str {
        &self.text[..self.node(id).span.start]
    }

    /// Projection text up to and including the node's own span
    #[must_use]
    pub fn text_before_including_self(&self, id: NodeId) -> &str {
        &self.text[..self.node(id).span.end]
    }

    /// The node's visible text (containers include descendants)
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> &str {
        let span = self.node(id).span;
        &self.text[span.start..span.end]
    }

    /// The node's visible text with every nested form control's text
    /// stripped out.
    #[must_use]
    pub fn as_text_without_form_controls(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let own = &self.node(id).text;
        if !own.is_empty() {
            parts.push(own);
        }
        for desc in self.descendants(id) {
            let node = self.node(desc);
            if node.visible && !node.kind.is_form_control() && !node.text.is_empty() {
                parts.push(&node.text);
            }
        }
        parts.join(" ")
    }

    /// Nearest preceding non-form-control text run, clipped at byte
    /// offset `from` of the projection.
    #[must_use]
    pub fn label_text_before(&self, id: NodeId, from: usize) -> Option<&str> {
        let target_start = self.node(id).span.start;
        for index in (0..id.0 as usize).rev() {
            let node = &self.nodes[index];
            if !node.visible || !node.kind.is_labeling_text() || node.text.is_empty() {
                continue;
            }
            if node.span.end > target_start {
                continue;
            }
            if node.span.end <= from {
                return None;
            }
            let start = node.span.start.max(from);
            return Some(&self.text[start..node.span.end]);
        }
        None
    }

    /// Nearest following non-form-control text run.
    #[must_use]
    pub fn label_text_after(&self, id: NodeId) -> Option<&str> {
        let target_end = self.node(id).span.end;
        for node in self.nodes.iter().skip(id.0 as usize + 1) {
            if !node.visible || !node.kind.is_labeling_text() || node.text.is_empty() {
                continue;
            }
            if node.span.start < target_end {
                continue;
            }
            return Some(&self.text[node.span.start..node.span.end]);
        }
        None
    }

    /// Visible nodes in document order
    pub fn visible_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.visible)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// Visible nodes in reverse document order (bottom-up)
    pub fn visible_nodes_bottom_up(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.visible)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// All nodes in document order, visible or not
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Find a node by its `id` attribute
    #[must_use]
    pub fn node_by_id(&self, html_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.attrs.id.as_deref() == Some(html_id))
            .map(|i| NodeId(i as u32))
    }

    /// Whether `ancestor` is a (transitive) ancestor of `node`
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.node(p).parent;
        }
        false
    }

    /// Direct and transitive children of a node, in document order
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.all_nodes()
            .filter(|n| self.is_ancestor(id, *n))
            .collect()
    }

    /// Images nested anywhere inside a node, in document order
    #[must_use]
    pub fn descendant_images(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.node(*n).kind == NodeKind::Image)
            .collect()
    }

    /// Labels associated with a node: `for`-references first, then
    /// wrapping label ancestors.
    #[must_use]
    pub fn labels_for(&self, id: NodeId) -> Vec<NodeId> {
        let mut labels = Vec::new();
        if let Some(html_id) = self.node(id).attrs.id.as_deref() {
            for (index, node) in self.nodes.iter().enumerate() {
                if node.kind == NodeKind::Label && node.attrs.for_id.as_deref() == Some(html_id) {
                    labels.push(NodeId(index as u32));
                }
            }
        }
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            if self.node(p).kind == NodeKind::Label {
                labels.push(p);
            }
            current = self.node(p).parent;
        }
        labels
    }

    /// Enclosing table cells, innermost first.
    #[must_use]
    pub fn cell_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut cells = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            if self.node(p).kind == NodeKind::TableCell {
                cells.push(p);
            }
            current = self.node(p).parent;
        }
        cells
    }

    /// The table a cell belongs to.
    #[must_use]
    pub fn table_of_cell(&self, cell: NodeId) -> Option<NodeId> {
        let mut current = self.node(cell).parent;
        while let Some(p) = current {
            if self.node(p).kind == NodeKind::Table {
                return Some(p);
            }
            current = self.node(p).parent;
        }
        None
    }

    /// Text of the first-row cell in the same column (the column header).
    #[must_use]
    pub fn column_header(&self, cell: NodeId) -> Option<String> {
        let table = self.table_of_cell(cell)?;
        let column = self.node(cell).column?;
        self.header_cell(table, 1, column)
    }

    /// Text of the first-column cell in the same row (the row header).
    #[must_use]
    pub fn row_header(&self, cell: NodeId) -> Option<String> {
        let table = self.table_of_cell(cell)?;
        let row = self.node(cell).row?;
        self.header_cell(table, row, 1)
    }

    fn header_cell(&self, table: NodeId, row: usize, column: usize) -> Option<String> {
        self.all_nodes()
            .find(|n| {
                let node = self.node(*n);
                node.kind == NodeKind::TableCell
                    && node.row == Some(row)
                    && node.column == Some(column)
                    && self.table_of_cell(*n) == Some(table)
            })
            .map(|n| self.as_text(n).to_string())
    }

    /// Human-readable node description used in diagnostics.
    #[must_use]
    pub fn describe(&self, id: NodeId) -> String {
        let node = self.node(id);
        let mut out = String::from("[");
        out.push_str(node.kind.tag_name());
        if !node.text.is_empty() {
            out.push_str(&format!(" '{}'", node.text));
        }
        if let Some(html_id) = node.attrs.id.as_deref() {
            out.push_str(&format!(" (id='{html_id}')"));
        }
        if let Some(name) = node.attrs.name.as_deref() {
            out.push_str(&format!(" (name='{name}')"));
        }
        out.push(']');
        out
    }
}
