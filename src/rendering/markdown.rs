use pulldown_cmark::{html, Event, Options, Parser};

/// Render a raw Markdown string to sanitized HTML.
///
/// Supports GitHub Flavored Markdown (GFM) features: tables,
/// footnotes, strikethrough, task lists, and smart punctuation.
/// Raw HTML embedded in the Markdown is dropped, and links with
/// unsafe schemes (e.g. `javascript:`) are removed.
pub fn render_markdown(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options)
        .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)));
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    sanitize_html(&html_output)
}

/// Sanitize stored HTML before it is sent to a browser.
pub fn sanitize_html(raw: &str) -> String {
    ammonia::Builder::default()
        .link_rel(None)
        .add_tags(["input"])
        .add_tag_attributes("input", ["type", "checked", "disabled"])
        .add_tag_attributes("code", ["class"])
        .clean(raw)
        .to_string()
}

/// Render `markdown` when present and non-empty, otherwise sanitize `fallback_html`.
pub fn render_preferring_markdown(markdown: Option<&str>, fallback_html: &str) -> String {
    match markdown {
        Some(md) if !md.trim().is_empty() => render_markdown(md),
        _ => sanitize_html(fallback_html),
    }
}
