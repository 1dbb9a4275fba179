//! Element trees for the content region.
//!
//! Views describe their output as a tree of [`Node`]s. Event listeners are
//! plain message values of type `M`; the router decides what a message means
//! when the listener fires.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Nav,
    H2,
    H3,
    P,
    Ul,
    Li,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    Form,
    Input,
    Select,
    SelectOption,
    Textarea,
    Button,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Nav => "nav",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Form => "form",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::SelectOption => "option",
            Tag::Textarea => "textarea",
            Tag::Button => "button",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    Input,
    Change,
}

impl EventKind {
    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "click" => Some(EventKind::Click),
            "submit" => Some(EventKind::Submit),
            "input" => Some(EventKind::Input),
            "change" => Some(EventKind::Change),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attr<M> {
    Class(String),
    On(EventKind, M),
    Plain(String, String),
}

/// Untyped attribute value, for building attributes from key/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue<M> {
    Str(String),
    Handler(M),
}

impl<M> Attr<M> {
    /// `class` sets the class, `on<event>` with a handler registers a
    /// listener, anything else with a string value is a plain attribute.
    pub fn from_pair(key: &str, value: AttrValue<M>) -> Result<Self> {
        match value {
            AttrValue::Str(v) if key == "class" => Ok(Attr::Class(v)),
            AttrValue::Str(v) => Ok(Attr::Plain(key.to_string(), v)),
            AttrValue::Handler(msg) => {
                let suffix = key.strip_prefix("on").ok_or_else(|| {
                    Error::InvalidAttribute(format!("handler bound to '{key}'"))
                })?;
                let kind = EventKind::from_suffix(suffix)
                    .ok_or_else(|| Error::InvalidAttribute(format!("unknown event '{suffix}'")))?;
                Ok(Attr::On(kind, msg))
            }
        }
    }
}

pub fn class<M>(name: &str) -> Attr<M> {
    Attr::Class(name.to_string())
}

pub fn attr<M>(name: &str, value: impl Into<String>) -> Attr<M> {
    Attr::Plain(name.to_string(), value.into())
}

pub fn id<M>(value: &str) -> Attr<M> {
    attr("id", value)
}

pub fn on<M>(kind: EventKind, msg: M) -> Attr<M> {
    Attr::On(kind, msg)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node<M> {
    Element(Element<M>),
    Text(String),
    /// Raw content inserted verbatim. Trusted input only.
    Markup(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element<M> {
    pub tag: Tag,
    pub class: Option<String>,
    attrs: Vec<(String, String)>,
    listeners: Vec<(EventKind, M)>,
    pub children: Vec<Node<M>>,
}

/// Children passed to [`el`]: a string is raw markup, a list is appended
/// node by node.
#[derive(Debug, Clone, PartialEq)]
pub enum Children<M> {
    Markup(String),
    Nodes(Vec<Node<M>>),
}

impl<M> From<&str> for Children<M> {
    fn from(s: &str) -> Self {
        Children::Markup(s.to_string())
    }
}

impl<M> From<String> for Children<M> {
    fn from(s: String) -> Self {
        Children::Markup(s)
    }
}

impl<M> From<Vec<Node<M>>> for Children<M> {
    fn from(nodes: Vec<Node<M>>) -> Self {
        Children::Nodes(nodes)
    }
}

impl<M> From<()> for Children<M> {
    fn from(_: ()) -> Self {
        Children::Nodes(Vec::new())
    }
}

impl<M> From<&str> for Node<M> {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl<M> From<String> for Node<M> {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

pub fn text<M>(s: impl Into<String>) -> Node<M> {
    Node::Text(s.into())
}

/// Build one element from a tag, its attributes and its children.
pub fn el<M>(
    tag: Tag,
    attrs: impl IntoIterator<Item = Attr<M>>,
    children: impl Into<Children<M>>,
) -> Node<M> {
    let mut element = Element {
        tag,
        class: None,
        attrs: Vec::new(),
        listeners: Vec::new(),
        children: Vec::new(),
    };
    for a in attrs {
        match a {
            Attr::Class(c) => element.class = Some(c),
            Attr::On(kind, msg) => element.listeners.push((kind, msg)),
            Attr::Plain(k, v) => element.set_attr(&k, v),
        }
    }
    element.children = match children.into() {
        Children::Markup(s) => vec![Node::Markup(s)],
        Children::Nodes(nodes) => nodes,
    };
    Node::Element(element)
}

impl<M> Element<M> {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: String) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|part| part == name))
    }

    pub fn listener(&self, kind: EventKind) -> Option<&M> {
        self.listeners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, m)| m)
    }
}

impl<M> Node<M> {
    pub fn element(&self) -> Option<&Element<M>> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Append a child. Text and markup nodes have no children, so this is a
    /// no-op for them.
    pub fn append(&mut self, child: Node<M>) {
        if let Node::Element(e) = self {
            e.children.push(child);
        }
    }

    pub fn find(&self, pred: &dyn Fn(&Element<M>) -> bool) -> Option<&Element<M>> {
        let Node::Element(e) = self else {
            return None;
        };
        if pred(e) {
            return Some(e);
        }
        e.children.iter().find_map(|c| c.find(pred))
    }

    fn find_mut(&mut self, pred: &dyn Fn(&Element<M>) -> bool) -> Option<&mut Element<M>> {
        let Node::Element(e) = self else {
            return None;
        };
        if pred(e) {
            return Some(e);
        }
        e.children.iter_mut().find_map(|c| c.find_mut(pred))
    }

    #[cfg(test)]
    pub fn find_by_id(&self, id: &str) -> Option<&Element<M>> {
        self.find(&|e| e.attr("id") == Some(id))
    }

    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element<M>> {
        self.find(&|e| e.attr(name) == Some(value))
    }

    /// Swap the children of the element with the given id. Returns false when
    /// no such element exists.
    pub fn replace_children(&mut self, id: &str, children: Vec<Node<M>>) -> bool {
        match self.find_mut(&|e| e.attr("id") == Some(id)) {
            Some(e) => {
                e.children = children;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        match self {
            Node::Element(e) => 1 + e.children.iter().map(Node::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) | Node::Markup(s) => s.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Save,
    }

    #[test]
    fn test_attributes_are_dispatched() {
        let node: Node<Msg> = el(
            Tag::Button,
            [class("btn"), attr("type", "submit"), on(EventKind::Click, Msg::Save)],
            "Add",
        );
        let e = node.element().unwrap();
        assert!(e.has_class("btn"));
        assert_eq!(e.attr("type"), Some("submit"));
        assert_eq!(e.listener(EventKind::Click), Some(&Msg::Save));
        assert_eq!(e.listener(EventKind::Submit), None);
    }

    #[test]
    fn test_from_pair_follows_key_rules() {
        let a = Attr::<Msg>::from_pair("class", AttrValue::Str("card".into())).unwrap();
        assert_eq!(a, Attr::Class("card".into()));

        let a = Attr::from_pair("onsubmit", AttrValue::Handler(Msg::Save)).unwrap();
        assert_eq!(a, Attr::On(EventKind::Submit, Msg::Save));

        // A string under an "on" key is just an attribute.
        let a = Attr::<Msg>::from_pair("onclick", AttrValue::Str("x".into())).unwrap();
        assert_eq!(a, Attr::Plain("onclick".into(), "x".into()));
    }

    #[test]
    fn test_from_pair_rejects_bad_handlers() {
        assert!(Attr::from_pair("onhover", AttrValue::Handler(Msg::Save)).is_err());
        assert!(Attr::from_pair("name", AttrValue::Handler(Msg::Save)).is_err());
    }

    #[test]
    fn test_string_children_are_raw_markup() {
        let node: Node<Msg> = el(Tag::Div, [], "<b>kept</b>");
        assert_eq!(
            node.element().unwrap().children,
            vec![Node::Markup("<b>kept</b>".into())]
        );
    }

    #[test]
    fn test_list_children_wrap_strings_as_text() {
        let node: Node<Msg> = el(
            Tag::Ul,
            [],
            vec![el(Tag::Li, [], vec![text("one")]), "two".into()],
        );
        let e = node.element().unwrap();
        assert_eq!(e.children.len(), 2);
        assert_eq!(e.children[1], Node::Text("two".into()));
        assert_eq!(node.text_content(), "onetwo");
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn test_later_plain_attribute_wins() {
        let node: Node<Msg> = el(Tag::Input, [attr("value", "0"), attr("value", "5")], ());
        assert_eq!(node.element().unwrap().attr("value"), Some("5"));
    }

    #[test]
    fn test_find_and_replace_children() {
        let mut node: Node<Msg> = el(
            Tag::Div,
            [class("card")],
            vec![el(Tag::H2, [], "Dealers"), el(Tag::Div, [id("dealer-list")], ())],
        );
        assert!(node.find_by_id("dealer-list").is_some());
        assert!(node.replace_children("dealer-list", vec![text("Rahim")]));
        assert_eq!(node.find_by_id("dealer-list").unwrap().children.len(), 1);
        assert!(!node.replace_children("missing", vec![]));
        node.append(text("tail"));
        assert!(node.text_content().ends_with("tail"));
    }
}
