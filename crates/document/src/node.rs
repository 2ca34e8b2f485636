//! Composite document tree
//!
//! A report body is a tree of [`DocumentNode`]s. Leaves carry a single line of
//! content; sections carry a heading, optional content and ordered children.
//!
//! ```text
//! = SALES DETAIL =
//! Detail of all transactions
//! Laptop: Quantity: 5 | Total: 1020.00 EUR
//! == Accessories ==
//! Router: Quantity: 20 | Total: 216.00 EUR
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};

/// Terminal node: `name: content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub name: String,
    pub content: String,
}

/// Composite node owning an ordered list of children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub content: Option<String>,
    level: u32,
    children: Vec<DocumentNode>,
}

/// A node of the report tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DocumentNode {
    Leaf(Leaf),
    Section(Section),
}

impl Leaf {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn write(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push_str(": ");
        out.push_str(&self.content);
    }
}

impl Section {
    /// Top-level section (level 1)
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, 1)
    }

    /// Section at a given nesting level; levels below 1 are raised to 1
    pub fn with_level(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            content: None,
            level: level.max(1),
            children: Vec::new(),
        }
    }

    /// Set the section's own content line
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a child while building
    pub fn with_child(mut self, child: impl Into<DocumentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    pub fn add_child(&mut self, child: impl Into<DocumentNode>) {
        self.children.push(child.into());
    }

    /// Remove the first child equal to `child`
    pub fn remove_child(&mut self, child: &DocumentNode) -> Option<DocumentNode> {
        let index = self.children.iter().position(|c| c == child)?;
        Some(self.children.remove(index))
    }

    pub fn remove_child_at(&mut self, index: usize) -> Option<DocumentNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn child(&self, index: usize) -> Option<&DocumentNode> {
        self.children.get(index)
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    fn write_heading(&self, out: &mut String) {
        let marker = "=".repeat(self.level as usize);
        out.push_str(&marker);
        out.push(' ');
        out.push_str(&self.name);
        out.push(' ');
        out.push_str(&marker);
        out.push('\n');

        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(content);
            out.push('\n');
        }
    }
}

impl From<Leaf> for DocumentNode {
    fn from(leaf: Leaf) -> Self {
        DocumentNode::Leaf(leaf)
    }
}

impl From<Section> for DocumentNode {
    fn from(section: Section) -> Self {
        DocumentNode::Section(section)
    }
}

impl DocumentNode {
    pub fn leaf(name: impl Into<String>, content: impl Into<String>) -> Self {
        DocumentNode::Leaf(Leaf::new(name, content))
    }

    pub fn section(name: impl Into<String>) -> Self {
        DocumentNode::Section(Section::new(name))
    }

    pub fn name(&self) -> &str {
        match self {
            DocumentNode::Leaf(leaf) => &leaf.name,
            DocumentNode::Section(section) => &section.name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DocumentNode::Leaf(_))
    }

    /// Children in order; always empty for a leaf
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Leaf(_) => &[],
            DocumentNode::Section(section) => section.children(),
        }
    }

    /// Append a child. Leaves reject structural mutation.
    pub fn add_child(&mut self, child: impl Into<DocumentNode>) -> DocumentResult<()> {
        match self {
            DocumentNode::Leaf(leaf) => Err(DocumentError::unsupported(&leaf.name, "add_child")),
            DocumentNode::Section(section) => {
                section.add_child(child);
                Ok(())
            }
        }
    }

    /// Remove the first child equal to `child`, returning it when found.
    /// Leaves reject structural mutation.
    pub fn remove_child(&mut self, child: &DocumentNode) -> DocumentResult<Option<DocumentNode>> {
        match self {
            DocumentNode::Leaf(leaf) => {
                Err(DocumentError::unsupported(&leaf.name, "remove_child"))
            }
            DocumentNode::Section(section) => Ok(section.remove_child(child)),
        }
    }

    pub fn remove_child_at(&mut self, index: usize) -> DocumentResult<Option<DocumentNode>> {
        match self {
            DocumentNode::Leaf(leaf) => {
                Err(DocumentError::unsupported(&leaf.name, "remove_child"))
            }
            DocumentNode::Section(section) => Ok(section.remove_child_at(index)),
        }
    }

    /// Child at `index`; `None` when out of range or when called on a leaf
    pub fn child(&self, index: usize) -> Option<&DocumentNode> {
        self.children().get(index)
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Render the subtree.
    ///
    /// A section emits its heading, its content line, then each child's
    /// rendering followed by a newline. Traversal uses an explicit stack so
    /// deeply nested trees do not grow the call stack.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let root = match self {
            DocumentNode::Leaf(leaf) => {
                leaf.write(&mut out);
                return out;
            }
            DocumentNode::Section(section) => section,
        };

        root.write_heading(&mut out);
        let mut stack: Vec<(&Section, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let section = frame.0;
            let next = section.children.get(frame.1);
            frame.1 += 1;

            match next {
                Some(DocumentNode::Leaf(leaf)) => {
                    leaf.write(&mut out);
                    out.push('\n');
                }
                Some(DocumentNode::Section(child)) => {
                    child.write_heading(&mut out);
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    // a finished child section is followed by its separator
                    if !stack.is_empty() {
                        out.push('\n');
                    }
                }
            }
        }

        out
    }
}
