//! A small display tree for regions that are mutated after creation
//!
//! Most markup is produced by templates. Regions whose content is attached
//! by a lifecycle callback (the comments widget) are built as an [`Element`]
//! tree instead, then serialized into the page.

use std::fmt::{self, Write};

use crate::helpers::html_escape;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, Option<String>)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value for the same name
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, Some(value.to_string()));
        self
    }

    /// Set a boolean attribute (`async`, `defer`, ...)
    pub fn flag(mut self, name: &str) -> Self {
        self.set_attr(name, None);
        self
    }

    fn set_attr(&mut self, name: &str, value: Option<String>) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Append a child element
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
impl Element {
    /// Value of an attribute; boolean attributes yield `Some("")`
    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub(crate) fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Direct children with the given tag
    pub(crate) fn children_by_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |el| el.tag == tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            match value {
                Some(value) => write!(f, " {}=\"{}\"", name, html_escape(value))?,
                None => write!(f, " {}", name)?,
            }
        }
        f.write_char('>')?;

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
