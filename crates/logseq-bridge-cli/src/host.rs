//! Reference host: renders markdown the way an editor preview would, with a
//! `data-line` on every list item, then hands the tree to the plugin hooks.

use logseq_bridge_engine::{DATA_LINE, Element, HookRegistry, RenderContext};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// Byte offsets at which each source line starts.
fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn open_element(tag: &Tag<'_>, line: usize) -> Element {
    match tag {
        Tag::Item => Element::entry(line),
        Tag::Paragraph => Element::new("p"),
        Tag::Heading { level, .. } => Element::new(heading_tag(*level)),
        Tag::BlockQuote(_) => Element::new("blockquote"),
        Tag::CodeBlock(_) => Element::new("pre"),
        Tag::List(None) => Element::new("ul"),
        Tag::List(Some(1)) => Element::new("ol"),
        Tag::List(Some(start)) => Element::new("ol").with_attr("start", &start.to_string()),
        Tag::Emphasis => Element::new("em"),
        Tag::Strong => Element::new("strong"),
        Tag::Strikethrough => Element::new("del"),
        Tag::Link { dest_url, .. } => Element::new("a").with_attr("href", dest_url),
        Tag::Image { dest_url, .. } => Element::new("img").with_attr("src", dest_url),
        _ => Element::new("span"),
    }
}

fn close_into_parent(stack: &mut Vec<Element>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(el) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.push(el);
    }
}

/// Builds the rendered element tree for `source` under a `<div>` root.
pub fn build_tree(source: &str) -> Element {
    let starts = line_starts(source);
    let line_of = |offset: usize| starts.partition_point(|&s| s <= offset).saturating_sub(1);

    let mut stack = vec![Element::new("div")];
    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(tag) => stack.push(open_element(&tag, line_of(range.start))),
            Event::End(_) => close_into_parent(&mut stack),
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&text);
                }
            }
            Event::Code(code) => {
                if let Some(top) = stack.last_mut() {
                    top.push(Element::new("code").with_text(&code));
                }
            }
            // Each event is parsed on its own, so an inline tag pair does
            // not wrap the text between its two events.
            Event::Html(html) | Event::InlineHtml(html) => {
                if let Some(top) = stack.last_mut() {
                    top.push_markup(&html);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(top) = stack.last_mut() {
                    top.push(Element::new("br"));
                }
            }
            Event::Rule => {
                if let Some(top) = stack.last_mut() {
                    top.push(Element::new("hr"));
                }
            }
            _ => {}
        }
    }

    // Unbalanced tails fold into their parents.
    while stack.len() > 1 {
        close_into_parent(&mut stack);
    }
    stack.pop().unwrap_or_else(|| Element::new("div"))
}

/// Renders `source` and runs every registered post-processor over it.
pub fn render_document(host: &HookRegistry, source: &str, ctx: &RenderContext) -> String {
    let mut root = build_tree(source);
    host.render(&mut root, ctx);
    root.inner_html()
}

/// One `line:start..end style` row per overlay token, in line order.
pub fn token_rows(host: &HookRegistry, source: &str) -> Vec<String> {
    source
        .lines()
        .enumerate()
        .flat_map(|(n, line)| {
            host.tokenize(line)
                .into_iter()
                .map(move |(span, style)| format!("{n}:{}..{} {style}", span.start, span.end))
        })
        .collect()
}
