//! Minimal retained SVG element tree.
//!
//! The gauge exclusively owns its subtree (dial path, value path,
//! label) and mutates attributes in place between frames; nothing else
//! reads or writes it. Serialization is deterministic: attributes are
//! written in insertion order.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<SvgElement>,
}

impl SvgElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute for construction time.
    pub fn with_attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Insert or replace an attribute, keeping its original position
    /// when replacing.
    pub fn set_attr(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn append(&mut self, child: SvgElement) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[SvgElement] {
        &self.children
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut SvgElement> {
        self.children.get_mut(index)
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_into(value, out);
            out.push('"');
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            escape_into(text, out);
        }
        for child in &self.children {
            child.write(out);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

impl fmt::Display for SvgElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out);
        f.write_str(&out)
    }
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_self_closes() {
        let path = SvgElement::new("path").with_attr("d", "M 0 0");
        assert_eq!(path.to_string(), "<path d=\"M 0 0\"/>");
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut path = SvgElement::new("path")
            .with_attr("class", "value")
            .with_attr("d", "M 0 0");
        path.set_attr("d", "M 1 1");
        assert_eq!(path.attr("d"), Some("M 1 1"));
        assert_eq!(path.to_string(), "<path class=\"value\" d=\"M 1 1\"/>");
    }

    #[test]
    fn nested_children_and_text_serialize_in_order() {
        let mut svg = SvgElement::new("svg").with_attr("viewBox", "0 0 100 100");
        svg.append(SvgElement::new("path").with_attr("class", "dial"));
        let mut label = SvgElement::new("text");
        label.set_text("42.0");
        svg.append(label);
        assert_eq!(
            svg.to_string(),
            "<svg viewBox=\"0 0 100 100\"><path class=\"dial\"/><text>42.0</text></svg>"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        let el = SvgElement::new("text").with_attr("data-label", "a<b&\"c\"");
        assert_eq!(
            el.to_string(),
            "<text data-label=\"a&lt;b&amp;&quot;c&quot;\"/>"
        );
    }
}
