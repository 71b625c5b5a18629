use super::node::EntryNode;

/// What the host knows about the document being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Path of the source document, when the host has one.
    pub source_path: Option<String>,
}

/// A rendered document fragment as handed over by the host.
pub trait Fragment {
    /// Calls `f` with every entry in document order, parents before the
    /// entries nested inside them.
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&mut dyn EntryNode));
}

/// Render hook: invoked once per rendered fragment, mutates it in place.
pub trait PostProcessor: Send + Sync {
    fn process(&self, fragment: &mut dyn Fragment, ctx: &RenderContext);
}
