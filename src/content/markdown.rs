//! Markdown rendering with class-based syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Theme used to generate `pygment.css` for the highlighted spans
pub const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with syntax highlighting
///
/// Code blocks are emitted as `<span class="...">` runs so that colours
/// live in the stylesheet rather than in every page.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code.take() {
                        let highlighted = self.highlight_code(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, source)) = code.as_mut() {
                        source.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );
        let mut failed = false;
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!("Highlighting {} block failed: {}", lang, e);
                failed = true;
                break;
            }
        }

        let body = if failed {
            html_escape(code)
        } else {
            generator.finalize()
        };

        format!(
            r#"<div class="highlight"><pre><code class="language-{}">{}</code></pre></div>"#,
            html_escape(lang),
            body
        )
    }

    /// Stylesheet matching the spans emitted by `render`
    pub fn highlight_css(&self) -> String {
        self.theme_set
            .themes
            .get(HIGHLIGHT_THEME)
            .or_else(|| self.theme_set.themes.values().next())
            .and_then(|theme| css_for_theme_with_class_style(theme, ClassStyle::Spaced).ok())
            .unwrap_or_default()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref SHARED: MarkdownRenderer = MarkdownRenderer::new();
}

/// Render with a process-wide renderer, for callers that don't hold one
pub fn markdown_to_html(text: &str) -> String {
    SHARED.render(text)
}

/// First paragraph of rendered HTML, used when a post has no `Summary`
pub fn first_paragraph(html: &str) -> String {
    match (html.find("<p>"), html.find("</p>")) {
        (Some(start), Some(end)) if start < end => html[start..end + 4].to_string(),
        _ => String::new(),
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
