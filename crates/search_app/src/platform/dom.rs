//! Minimal retained element tree.
//!
//! Top-level elements are addressed by a fixed id; their children are plain
//! [`Node`]s that are only ever replaced wholesale. The renderer produces
//! [`DomCommand`]s and the terminal front-end reads the resulting tree.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(&'static str);

impl ElementId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Anonymous child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// Text of every leaf in document order, blanks included.
    pub fn text_lines(&self) -> Vec<&str> {
        if self.children.is_empty() {
            return vec![self.text.as_str()];
        }
        self.children.iter().flat_map(Node::text_lines).collect()
    }
}

/// Addressable element: class set, text, input value and child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    classes: BTreeSet<&'static str>,
    text: String,
    value: String,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    ClearChildren {
        id: ElementId,
    },
    AppendChild {
        id: ElementId,
        node: Node,
    },
    SetClass {
        id: ElementId,
        class: &'static str,
        enabled: bool,
    },
    SetText {
        id: ElementId,
        text: String,
    },
    SetValue {
        id: ElementId,
        value: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("no element with id `{0}`")]
    UnknownElement(ElementId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ElementId, element: Element) {
        self.elements.insert(id, element);
    }

    #[allow(dead_code)]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn apply(&mut self, command: DomCommand) -> Result<(), DomError> {
        match command {
            DomCommand::ClearChildren { id } => self.get_mut(id)?.children.clear(),
            DomCommand::AppendChild { id, node } => self.get_mut(id)?.children.push(node),
            DomCommand::SetClass { id, class, enabled } => {
                let classes = &mut self.get_mut(id)?.classes;
                if enabled {
                    classes.insert(class);
                } else {
                    classes.remove(class);
                }
            }
            DomCommand::SetText { id, text } => self.get_mut(id)?.text = text,
            DomCommand::SetValue { id, value } => self.get_mut(id)?.value = value,
        }
        Ok(())
    }

    pub fn children(&self, id: ElementId) -> Result<&[Node], DomError> {
        Ok(&self.get(id)?.children)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|element| element.classes.contains(class))
    }

    pub fn text(&self, id: ElementId) -> Result<&str, DomError> {
        Ok(&self.get(id)?.text)
    }

    pub fn value(&self, id: ElementId) -> Result<&str, DomError> {
        Ok(&self.get(id)?.value)
    }

    fn get(&self, id: ElementId) -> Result<&Element, DomError> {
        self.elements.get(&id).ok_or(DomError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, DomError> {
        self.elements
            .get_mut(&id)
            .ok_or(DomError::UnknownElement(id))
    }
}
