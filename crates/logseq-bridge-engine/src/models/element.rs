//! In-memory host tree: a `markup5ever_rcdom` DOM, parsed and serialized
//! with `html5ever`, wrapped so it can stand in for a rendered outline.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{
    Attribute, LocalName, ParseOpts, QualName, ns, parse_document, serialize,
    serialize::SerializeOpts, serialize::TraversalScope,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::render::{Decoration, EntryNode, Fragment, StyleClass};

/// Attribute that marks an element as an outline entry.
pub const DATA_LINE: &str = "data-line";

const LINE_BREAK_TAG: &str = "br";

/// Markup is parsed inside a list item, the context an entry's children live in.
const ENTRY_CONTEXT: (&str, &str) = ("<ul><li>", "</li></ul>");

/// An element node of the tree.
///
/// Cloning copies the whole subtree. Two elements are equal when they
/// serialize to the same markup.
pub struct Element(Handle);

fn create_element(tag: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(Vec::new()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn is_text(node: &Handle) -> bool {
    matches!(node.data, NodeData::Text { .. })
}

/// Appends the text of `from` to `into`; both must be text nodes.
fn merge_text(into: &Handle, from: &Handle) {
    if let (NodeData::Text { contents: target }, NodeData::Text { contents: source }) =
        (&into.data, &from.data)
    {
        target.borrow_mut().push_tendril(&source.borrow());
    }
}

/// Appends `child` under `parent`, folding text into a trailing text node.
fn append(parent: &Handle, child: Handle) {
    let last = parent.children.borrow().last().cloned();
    if let Some(last) = last
        && is_text(&last)
        && is_text(&child)
    {
        merge_text(&last, &child);
        return;
    }
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

fn find_first(node: &Handle, tag: &str) -> Option<Handle> {
    node.children.borrow().iter().find_map(|child| {
        if element_name(child) == Some(tag) {
            Some(child.clone())
        } else {
            find_first(child, tag)
        }
    })
}

/// Parses `markup` as the content of a list item and returns its top-level
/// nodes, detached from the parse tree.
fn parse_entry_content(markup: &str) -> Vec<Handle> {
    let (open, close) = ENTRY_CONTEXT;
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .one(format!("{open}{markup}{close}"));
    // Taken out before `dom` drops: dropping a node empties its descendants.
    find_first(&dom.document, "li")
        .map(|li| std::mem::take(&mut *li.children.borrow_mut()))
        .unwrap_or_default()
}

/// Copies element and text nodes; other node kinds are left out.
fn deep_copy(node: &Handle) -> Option<Handle> {
    let copy = match &node.data {
        NodeData::Element { name, attrs, .. } => Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data: NodeData::Element {
                name: name.clone(),
                attrs: RefCell::new(attrs.borrow().clone()),
                template_contents: Default::default(),
                mathml_annotation_xml_integration_point: false,
            },
        }),
        NodeData::Text { contents } => create_text(&contents.borrow()),
        _ => return None,
    };
    for child in node.children.borrow().iter() {
        if let Some(child) = deep_copy(child) {
            append(&copy, child);
        }
    }
    Some(copy)
}

fn collect_text(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            out.push_str(&contents.borrow());
        }
        collect_text(child, out);
    }
}

fn serialize_node(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(e) = serialize(&mut output, &SerializableHandle::from(node.clone()), opts) {
        log::warn!("HTML serialization failed: {e}");
    }
    String::from_utf8_lossy(&output).into_owned()
}

/// Visits every element below `node` that carries `data-line`, parents
/// before the entries nested in them. Children are read after `f` returns,
/// so entries created by `f` are visited too.
fn visit_entries(node: &Handle, f: &mut dyn FnMut(&mut Element)) {
    let children: Vec<Handle> = node.children.borrow().clone();
    for child in children {
        if element_name(&child).is_none() {
            continue;
        }
        let mut el = Element(child);
        if el.is_entry() {
            f(&mut el);
        }
        visit_entries(&el.0, f);
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self(create_element(tag))
    }

    /// A `<li>` entry for the given zero-based source line.
    pub fn entry(line: usize) -> Self {
        Self::new("li").with_attr(DATA_LINE, &line.to_string())
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    pub fn push(&mut self, child: Element) {
        append(&self.0, child.0);
    }

    /// Appends text, merging it into a trailing text node.
    pub fn push_text(&mut self, text: &str) {
        append(&self.0, create_text(text));
    }

    /// Parses `markup` and appends the resulting nodes.
    pub fn push_markup(&mut self, markup: &str) {
        for node in parse_entry_content(markup) {
            append(&self.0, node);
        }
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        let NodeData::Element { attrs, .. } = &self.0.data else {
            return None;
        };
        attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let NodeData::Element { attrs, .. } = &self.0.data else {
            return;
        };
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
            Some(attr) => attr.value = value.to_string().into(),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.to_string().into(),
            }),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.attr(DATA_LINE).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn add_class_name(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", &joined);
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.0, &mut out);
        out
    }

    pub fn inner_html(&self) -> String {
        serialize_node(&self.0, TraversalScope::ChildrenOnly(None))
    }

    pub fn outer_html(&self) -> String {
        serialize_node(&self.0, TraversalScope::IncludeNode)
    }

    pub fn visit_entries_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        visit_entries(&self.0, f);
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        match deep_copy(&self.0) {
            Some(copy) => Self(copy),
            None => Self::new("div"),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.outer_html() == other.outer_html()
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.outer_html()).finish()
    }
}

impl EntryNode for Element {
    fn text_content(&self) -> String {
        Element::text_content(self)
    }

    fn inner_markup(&self) -> String {
        self.inner_html()
    }

    fn set_inner_markup(&mut self, markup: String) {
        let nodes = parse_entry_content(&markup);
        self.0.children.borrow_mut().clear();
        for node in nodes {
            append(&self.0, node);
        }
    }

    fn for_each_text_child(&mut self, f: &mut dyn FnMut(&mut String)) {
        let children: Vec<Handle> = self.0.children.borrow().clone();
        for child in &children {
            if let NodeData::Text { contents } = &child.data {
                let mut value = contents.borrow().to_string();
                f(&mut value);
                *contents.borrow_mut() = value.into();
            }
        }
        self.0.children.borrow_mut().retain(
            |child| !matches!(&child.data, NodeData::Text { contents } if contents.borrow().is_empty()),
        );
    }

    fn prepend(&mut self, decorations: &[Decoration]) {
        let markup: String = decorations.iter().map(|d| d.to_markup()).collect();
        let mut nodes = parse_entry_content(&markup);
        for node in &nodes {
            node.parent.set(Some(Rc::downgrade(&self.0)));
        }
        let mut children = self.0.children.borrow_mut();
        nodes.append(&mut children);
        *children = nodes;
    }

    fn remove_line_break(&mut self) {
        let mut children = self.0.children.borrow_mut();
        let Some(i) = children
            .iter()
            .position(|child| element_name(child) == Some(LINE_BREAK_TAG))
        else {
            return;
        };
        children.remove(i);
        if i > 0 && i < children.len() && is_text(&children[i - 1]) && is_text(&children[i]) {
            let after = children.remove(i);
            merge_text(&children[i - 1], &after);
        }
    }

    fn add_class(&mut self, class: StyleClass) {
        self.add_class_name(class.as_str());
    }

    fn for_each_sub_entry(&mut self, f: &mut dyn FnMut(&mut dyn EntryNode)) {
        visit_entries(&self.0, &mut |el| f(el));
    }
}

impl Fragment for Element {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&mut dyn EntryNode)) {
        if self.is_entry() {
            f(self);
        }
        visit_entries(&self.0, &mut |el| f(el));
    }
}
