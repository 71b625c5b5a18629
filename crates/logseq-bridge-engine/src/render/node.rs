use crate::transform::TaskType;

/// CSS classes the renderer attaches to entries and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    /// A finished (done or canceled) task.
    Complete,
    /// An open task, and every sub-entry nested under any task.
    Incomplete,
    /// The keyword label placed next to an open task's checkbox.
    StatusLabel,
}

impl StyleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleClass::Complete => "logseq-complete-task",
            StyleClass::Incomplete => "logseq-incomplete-task",
            StyleClass::StatusLabel => "logseq-status-task",
        }
    }
}

/// Markup the renderer prepends to a task entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Checkbox { checked: bool },
    KeywordLabel(TaskType),
}

impl Decoration {
    /// Serialized form, for hosts that work on markup strings.
    pub fn to_markup(self) -> String {
        match self {
            Decoration::Checkbox { checked: false } => r#"<input type="checkbox">"#.to_string(),
            Decoration::Checkbox { checked: true } => {
                r#"<input type="checkbox" checked>"#.to_string()
            }
            Decoration::KeywordLabel(task) => format!(
                r#"<span class="{}">{task}</span>"#,
                StyleClass::StatusLabel.as_str()
            ),
        }
    }
}

/// What the renderer may do to a host-owned entry.
///
/// The host keeps ownership of the node; the renderer only borrows it for
/// the duration of one [`EntryRenderer::render`](super::EntryRenderer::render) call.
pub trait EntryNode {
    /// Visible text of the entry and everything under it.
    fn text_content(&self) -> String;

    /// Serialized children of the entry.
    fn inner_markup(&self) -> String;

    /// Replaces the entry's children with the nodes `markup` parses to.
    fn set_inner_markup(&mut self, markup: String);

    /// Calls `f` with the value of each direct text child, allowing edits.
    fn for_each_text_child(&mut self, f: &mut dyn FnMut(&mut String));

    /// Inserts `decorations` before the existing children, keeping their order.
    fn prepend(&mut self, decorations: &[Decoration]);

    /// Removes the first line-break element among the direct children and
    /// joins the text on either side of it.
    fn remove_line_break(&mut self);

    fn add_class(&mut self, class: StyleClass);

    /// Calls `f` with every nested entry below this one (not with `self`).
    fn for_each_sub_entry(&mut self, f: &mut dyn FnMut(&mut dyn EntryNode));
}
