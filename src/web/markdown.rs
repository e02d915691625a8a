//! Markdown to HTML for chat bubbles.

use pulldown_cmark::{html, Event, Options, Parser};

/// Renders `input` as HTML. Raw HTML in the source is shown as text, never
/// passed through.
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
