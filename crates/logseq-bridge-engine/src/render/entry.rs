use crate::transform::{TaskType, has_properties, is_block, rewrite_block, strip_property_tokens};

use super::hooks::{Fragment, PostProcessor, RenderContext};
use super::node::{Decoration, EntryNode, StyleClass};

/// Which passes the renderer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Task keywords become checkboxes, labels and style classes.
    pub tasks: bool,
    /// `#+BEGIN_X` blocks become blockquotes.
    pub admonitions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tasks: true,
            admonitions: true,
        }
    }
}

/// Rewrites one rendered entry at a time.
#[derive(Debug, Clone, Default)]
pub struct EntryRenderer {
    options: RenderOptions,
}

impl EntryRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Applies the admonition rewrite, then the task decoration for the
    /// entry's keyword. Entries without a keyword are left alone.
    pub fn render(&self, entry: &mut dyn EntryNode) {
        if self.options.admonitions {
            let markup = entry.inner_markup();
            if is_block(&markup) {
                entry.set_inner_markup(rewrite_block(&markup));
            }
        }

        if !self.options.tasks {
            return;
        }

        let task = TaskType::classify(&entry.text_content());
        match task {
            TaskType::Done => {
                strip_task_markup(entry, task);
                entry.prepend(&[Decoration::Checkbox { checked: true }]);
                // Styled as open like its children, with `complete` on top.
                apply_group_style(entry, StyleClass::Incomplete);
                entry.add_class(StyleClass::Complete);
            }
            TaskType::Todo | TaskType::Later => {
                strip_task_markup(entry, task);
                entry.prepend(&[
                    Decoration::Checkbox { checked: false },
                    Decoration::KeywordLabel(task),
                ]);
                apply_group_style(entry, StyleClass::Incomplete);
            }
            // In-progress tasks keep whatever styling the host gives them.
            TaskType::Doing => {
                strip_task_markup(entry, task);
                entry.prepend(&[
                    Decoration::Checkbox { checked: false },
                    Decoration::KeywordLabel(task),
                ]);
            }
            TaskType::Canceled => {
                strip_task_markup(entry, task);
                apply_group_style(entry, StyleClass::Complete);
            }
            TaskType::Unknown => {}
        }
    }
}

/// Removes the first line break, then the first keyword occurrence from
/// text children that start with it, then every property token.
fn strip_task_markup(entry: &mut dyn EntryNode, task: TaskType) {
    entry.remove_line_break();
    let keyword = task.keyword();
    entry.for_each_text_child(&mut |value| {
        if let Some(kw) = keyword
            && value.starts_with(kw)
        {
            *value = value.replacen(kw, "", 1);
        }
        if has_properties(value) {
            *value = strip_property_tokens(value);
        }
    });
}

/// Sub-entries are never completed along with their parent.
fn apply_group_style(entry: &mut dyn EntryNode, class: StyleClass) {
    entry.add_class(class);
    entry.for_each_sub_entry(&mut |sub| sub.add_class(StyleClass::Incomplete));
}

impl PostProcessor for EntryRenderer {
    fn process(&self, fragment: &mut dyn Fragment, ctx: &RenderContext) {
        let mut rendered = 0usize;
        fragment.for_each_entry(&mut |entry| {
            self.render(entry);
            rendered += 1;
        });
        log::debug!(
            "rendered {rendered} entries from {}",
            ctx.source_path.as_deref().unwrap_or("<unknown>")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Element;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn entry(text: &str) -> Element {
        Element::entry(0).with_text(text)
    }

    fn with_sub_entry(parent: Element, text: &str) -> Element {
        parent.with_child(Element::new("ul").with_child(Element::entry(1).with_text(text)))
    }

    fn rendered(mut el: Element) -> Element {
        EntryRenderer::default().render(&mut el);
        el
    }

    #[test]
    fn todo_gets_checkbox_and_label() {
        let el = rendered(entry("TODO buy milk"));
        assert_snapshot!(
            el.outer_html(),
            @r#"<li data-line="0" class="logseq-incomplete-task"><input type="checkbox"><span class="logseq-status-task">TODO</span> buy milk</li>"#
        );
    }

    #[test]
    fn done_strips_keyword_and_timestamp() {
        let el = rendered(with_sub_entry(entry("DONE done:: 1700000000000 task"), "sub task"));
        assert_snapshot!(
            el.outer_html(),
            @r#"<li data-line="0" class="logseq-incomplete-task logseq-complete-task"><input type="checkbox" checked="">  task<ul><li data-line="1" class="logseq-incomplete-task">sub task</li></ul></li>"#
        );
    }

    #[test]
    fn done_children_are_never_complete() {
        let mut el = entry("DONE parent").with_child(
            Element::new("ul").with_child(
                Element::entry(1)
                    .with_text("child")
                    .with_child(Element::new("ul").with_child(Element::entry(2).with_text("grandchild"))),
            ),
        );
        EntryRenderer::default().render(&mut el);

        assert!(el.has_class(StyleClass::Complete.as_str()));
        assert!(el.has_class(StyleClass::Incomplete.as_str()));
        el.visit_entries_mut(&mut |sub| {
            assert!(sub.has_class(StyleClass::Incomplete.as_str()));
            assert!(!sub.has_class(StyleClass::Complete.as_str()));
        });
    }

    #[test]
    fn later_is_styled_like_todo() {
        let el = rendered(entry("LATER read later:: 1700000000000"));
        assert!(el.has_class(StyleClass::Incomplete.as_str()));
        assert_eq!(el.text_content(), "LATER read ");
    }

    #[test]
    fn doing_gets_no_group_style() {
        let el = rendered(with_sub_entry(entry("DOING focus"), "step"));
        assert_eq!(el.attr("class"), None);
        assert_eq!(el.text_content(), "DOING focusstep");
        assert!(el.inner_html().ends_with(r#"<ul><li data-line="1">step</li></ul>"#));
    }

    #[test]
    fn canceled_is_complete_without_checkbox() {
        let el = rendered(entry("CANCELED trip collapsed:: true"));
        assert_snapshot!(
            el.outer_html(),
            @r#"<li data-line="0" class="logseq-complete-task"> trip </li>"#
        );
    }

    #[test]
    fn canceled_children_are_incomplete() {
        let mut el = rendered(with_sub_entry(entry("CANCELED trip"), "pack"));
        assert_eq!(
            el.attr("class").as_deref(),
            Some(StyleClass::Complete.as_str())
        );
        let mut classes = Vec::new();
        el.visit_entries_mut(&mut |sub| classes.push(sub.attr("class")));
        assert_eq!(classes, vec![Some(StyleClass::Incomplete.as_str().to_string())]);
    }

    #[test]
    fn unknown_entry_is_untouched() {
        let before = entry("just a note collapsed:: true");
        assert_eq!(rendered(before.clone()), before);
    }

    #[test]
    fn keyword_is_removed_from_each_text_child_starting_with_it() {
        let el = rendered(
            entry("TODO call")
                .with_child(Element::new("em").with_text("mum"))
                .with_text("TODO later id:: 64b0c6a2-91f3-4d2e-8a1b-0c9d8e7f6a5b"),
        );
        assert_eq!(el.text_content(), "TODO callmum later ");
        assert_eq!(
            el.inner_html(),
            r#"<input type="checkbox"><span class="logseq-status-task">TODO</span> call<em>mum</em> later "#
        );
    }

    #[test]
    fn line_break_before_properties_is_removed() {
        let el = rendered(
            entry("TODO x")
                .with_child(Element::new("br"))
                .with_text("todo:: 1700000000000"),
        );
        assert_eq!(
            el.inner_html(),
            r#"<input type="checkbox"><span class="logseq-status-task">TODO</span> x"#
        );
    }

    #[test]
    fn only_the_first_line_break_is_removed() {
        let el = rendered(
            entry("TODO a")
                .with_child(Element::new("br"))
                .with_text("b")
                .with_child(Element::new("br"))
                .with_text("c"),
        );
        assert!(el.inner_html().ends_with("</span> ab<br>c"));
    }

    #[test]
    fn literal_line_break_text_is_kept() {
        let el = rendered(entry("TODO a <br> b"));
        assert_eq!(el.text_content(), "TODO a <br> b");
        assert!(el.inner_html().ends_with("</span> a &lt;br&gt; b"));
    }

    #[test]
    fn property_split_by_line_break_is_removed() {
        let el = rendered(
            entry("DONE todo:: 123456")
                .with_child(Element::new("br"))
                .with_text("7890123 rest"),
        );
        assert_eq!(el.text_content(), "  rest");
        assert!(!has_properties(&el.inner_html()));
    }

    #[test]
    fn admonition_block_is_rewritten() {
        let el = rendered(entry("#+BEGIN_WARNING careful #+END_WARNING"));
        assert_eq!(el.inner_html(), "<blockquote> ☟ careful </blockquote>");
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn task_inside_admonition_entry_is_still_decorated() {
        let el = rendered(entry("TODO #+BEGIN_QUOTE wise words #+END_QUOTE"));
        assert_eq!(
            el.inner_html(),
            r#"<input type="checkbox"><span class="logseq-status-task">TODO</span> <blockquote> ☟ wise words </blockquote>"#
        );
    }

    #[test]
    fn done_admonition_still_styles_nested_entries() {
        let mut root = Element::new("ul").with_child(with_sub_entry(
            entry("DONE #+BEGIN_QUOTE x #+END_QUOTE"),
            "child",
        ));
        EntryRenderer::default().process(&mut root, &RenderContext::default());

        assert_snapshot!(
            root.inner_html(),
            @r#"<li data-line="0" class="logseq-incomplete-task logseq-complete-task"><input type="checkbox" checked=""> <blockquote> ☟ x </blockquote><ul><li data-line="1" class="logseq-incomplete-task">child</li></ul></li>"#
        );

        let mut visited = 0;
        root.for_each_entry(&mut |_| visited += 1);
        assert_eq!(visited, 2);
    }

    #[test]
    fn disabled_passes_are_skipped() {
        let renderer = EntryRenderer::new(RenderOptions {
            tasks: false,
            admonitions: false,
        });
        let before = entry("TODO #+BEGIN_QUOTE x #+END_QUOTE");
        let mut el = before.clone();
        renderer.render(&mut el);
        assert_eq!(el, before);
    }

    #[test]
    fn rendering_twice_strips_nothing_further() {
        let mut el = entry("DONE done:: 1700000000000 task");
        let renderer = EntryRenderer::default();
        renderer.render(&mut el);
        let once = el.clone();
        renderer.render(&mut el);
        assert_eq!(el, once);
    }

    #[test]
    fn post_processor_renders_every_entry() {
        let mut root = Element::new("ul")
            .with_child(entry("TODO one"))
            .with_child(Element::entry(1).with_text("DONE two"));
        EntryRenderer::default().process(&mut root, &RenderContext::default());

        let mut classes = Vec::new();
        root.visit_entries_mut(&mut |el| classes.push(el.attr("class")));
        assert_eq!(
            classes,
            vec![
                Some("logseq-incomplete-task".to_string()),
                Some("logseq-incomplete-task logseq-complete-task".to_string()),
            ]
        );
    }
}
