//! Code block rendering.
//!
//! Wraps a body in `<figure class='code'>`, adds the caption, and renders
//! the code either through a [`Highlighter`] or as a plain line-numbered
//! table. A failing highlighter is logged and never surfaces to the caller.

use std::error::Error;
use std::fmt::Write;

use crate::highlight::{HighlightError, Highlighter, SyntectHighlighter};
use crate::params::{ParsedParameters, parse};

/// Caller-supplied markup placed around the rendered figure.
///
/// Both strings are passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decorations {
    /// Markup placed before the figure.
    pub prefix: Option<String>,
    /// Markup placed after the figure.
    pub suffix: Option<String>,
}

impl Decorations {
    fn wrap(&self, figure: String) -> String {
        match (&self.prefix, &self.suffix) {
            (None, None) => figure,
            (prefix, suffix) => format!(
                "{}{figure}{}",
                prefix.as_deref().unwrap_or_default(),
                suffix.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Render a code block body with already interpreted parameters.
///
/// # Example
///
/// ```
/// use octoblock_codeblock::{Decorations, HighlightError, parse, render};
///
/// let no_highlighting = |_: &str, _: &str| -> Result<String, HighlightError> {
///     Err(HighlightError::Other("offline".to_owned()))
/// };
/// let html = render(
///     "<sarcasm>Ooooh</sarcasm>",
///     &parse("lang:xml"),
///     &no_highlighting,
///     &Decorations::default(),
/// );
/// assert!(html.starts_with("<figure class='code'>"));
/// assert!(html.contains("&lt;sarcasm>Ooooh&lt;/sarcasm>"));
/// ```
#[must_use]
pub fn render(
    body: &str,
    params: &ParsedParameters,
    highlighter: &dyn Highlighter,
    decorations: &Decorations,
) -> String {
    let mut figure = String::from("<figure class='code'>");

    if let Some(caption) = &params.caption {
        figure.push_str(caption);
    }

    match highlight(body, params, highlighter) {
        Some(markup) => figure.push_str(&markup),
        None => tableize(&escape_lt(body.trim()), &mut figure),
    }

    figure.push_str("</figure>");
    decorations.wrap(figure)
}

/// Run the highlighter if a file type is known, logging any failure.
fn highlight(
    body: &str,
    params: &ParsedParameters,
    highlighter: &dyn Highlighter,
) -> Option<String> {
    let file_type = params.file_type.as_deref()?;

    match highlighter.highlight(body, file_type) {
        Ok(markup) => Some(markup),
        Err(err) => {
            tracing::warn!(
                error = %err,
                details = ?err,
                cause = %cause_chain(&err),
                file_type,
                body,
                params = %params.raw,
                "Highlighting failed, rendering plain code"
            );
            None
        }
    }
}

fn cause_chain(err: &HighlightError) -> String {
    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes.join(": ")
}

/// Escape `<` so unhighlighted source cannot open markup.
fn escape_lt(code: &str) -> String {
    code.replace('<', "&lt;")
}

/// Render code as a two-column table: line numbers and lines.
fn tableize(code: &str, out: &mut String) {
    let mut gutter = String::new();
    let mut lines = String::new();

    for (index, line) in code.split_inclusive('\n').enumerate() {
        writeln!(gutter, "<span class='line-number'>{}</span>", index + 1).unwrap();
        write!(lines, "<span class='line'>{line}</span>").unwrap();
    }

    write!(
        out,
        "<div class='highlight'><table><tr>\
         <td class='gutter'><pre class='line-numbers'>{gutter}</pre></td>\
         <td class='code'><pre><code>{lines}</code></pre></td>\
         </tr></table></div>"
    )
    .unwrap();
}

/// Interprets directive parameters and renders bodies with a fixed
/// highlighter and decorations.
///
/// # Example
///
/// ```
/// use octoblock_codeblock::{CodeBlockRenderer, Decorations, SyntectHighlighter};
///
/// let renderer = CodeBlockRenderer::new(SyntectHighlighter).with_decorations(Decorations {
///     prefix: Some("<div class='wrap'>".to_owned()),
///     suffix: Some("</div>".to_owned()),
/// });
/// let html = renderer.render("greeting.rb", "puts 'hello'");
/// assert!(html.starts_with("<div class='wrap'><figure class='code'>"));
/// assert!(html.ends_with("</figure></div>"));
/// ```
#[derive(Clone, Debug)]
pub struct CodeBlockRenderer<H = SyntectHighlighter> {
    highlighter: H,
    decorations: Decorations,
    highlighting: bool,
}

impl Default for CodeBlockRenderer {
    fn default() -> Self {
        Self::new(SyntectHighlighter)
    }
}

impl<H: Highlighter> CodeBlockRenderer<H> {
    /// Create a renderer using the given highlighter and no decorations.
    #[must_use]
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            decorations: Decorations::default(),
            highlighting: true,
        }
    }

    /// Turn highlighting off to always render the plain line-numbered table.
    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlighting = enabled;
        self
    }

    /// Set the prefix and suffix placed around every rendered figure.
    #[must_use]
    pub fn with_decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Interpret `raw_params` and render `body`.
    #[must_use]
    pub fn render(&self, raw_params: &str, body: &str) -> String {
        self.render_parsed(body, &parse(raw_params))
    }

    /// Render `body` with already interpreted parameters.
    #[must_use]
    pub fn render_parsed(&self, body: &str, params: &ParsedParameters) -> String {
        if self.highlighting {
            return render(body, params, &self.highlighter, &self.decorations);
        }

        let plain = ParsedParameters {
            file_type: None,
            ..params.clone()
        };
        render(body, &plain, &self.highlighter, &self.decorations)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    fn upper(code: &str, file_type: &str) -> Result<String, HighlightError> {
        Ok(format!("<pre class='{file_type}'>{}</pre>", code.to_uppercase()))
    }

    fn broken(_code: &str, file_type: &str) -> Result<String, HighlightError> {
        Err(HighlightError::UnknownFileType(file_type.to_owned()))
    }

    fn render_plain(body: &str, raw: &str) -> String {
        render(body, &parse(raw), &broken, &Decorations::default())
    }

    #[test]
    fn test_plain_without_caption() {
        let html = render_plain("<sarcasm>Ooooh, sarcasm... How original!</sarcasm>", "");
        assert_eq!(
            html,
            "<figure class='code'><div class='highlight'><table><tr>\
             <td class='gutter'><pre class='line-numbers'>\
             <span class='line-number'>1</span>\n</pre></td>\
             <td class='code'><pre><code><span class='line'>\
             &lt;sarcasm>Ooooh, sarcasm... How original!&lt;/sarcasm>\
             </span></code></pre></td>\
             </tr></table></div></figure>"
        );
    }

    #[test]
    fn test_plain_trims_and_numbers_lines() {
        let html = render_plain("\n\n  first\nsecond\n\n", "");
        assert!(html.contains(
            "<span class='line-number'>1</span>\n<span class='line-number'>2</span>\n</pre>"
        ));
        assert!(html.contains("<span class='line'>first\n</span><span class='line'>second</span>"));
        assert!(!html.contains("<span class='line-number'>3</span>"));
    }

    #[test]
    fn test_plain_empty_body() {
        let html = render_plain("", "");
        assert!(html.starts_with("<figure class='code'>"));
        assert!(html.ends_with("</figure>"));
        assert!(!html.contains("line-number'>1"));
    }

    #[test]
    fn test_caption_precedes_code() {
        let html = render_plain("x", "Listing one");
        assert!(html.starts_with(
            "<figure class='code'><figcaption><span>Listing one</span></figcaption>\
             <div class='highlight'>"
        ));
    }

    #[test]
    fn test_highlighted_path() {
        let html = render(
            "puts 1",
            &parse("example.rb"),
            &upper,
            &Decorations::default(),
        );
        assert_eq!(
            html,
            "<figure class='code'><figcaption><span>example.rb</span></figcaption>\
             <pre class='rb'>PUTS 1</pre></figure>"
        );
    }

    #[test]
    fn test_highlighter_receives_untrimmed_body() {
        let echo =
            |code: &str, _: &str| -> Result<String, HighlightError> { Ok(format!("[{code}]")) };
        let html = render("\n  x\n", &parse("lang:rb"), &echo, &Decorations::default());
        assert_eq!(html, "<figure class='code'>[\n  x\n]</figure>");
    }

    #[test]
    fn test_highlighter_not_called_without_file_type() {
        let panicking = |_: &str, _: &str| -> Result<String, HighlightError> {
            panic!("highlighter must not be called")
        };
        let params = parse("no file type here");
        let html = render("a < b", &params, &panicking, &Decorations::default());
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    #[traced_test]
    fn test_failing_highlighter_falls_back_and_logs() {
        let html = render_plain("List<String> names;", "Names.java");
        assert!(html.contains("<figcaption><span>Names.java</span></figcaption>"));
        assert!(html.contains("List&lt;String> names;"));
        assert!(html.ends_with("</figure>"));
        assert!(logs_contain("Highlighting failed, rendering plain code"));
        assert!(logs_contain("no syntax found for file type `java`"));
        assert!(logs_contain("Names.java"));
    }

    #[test]
    fn test_decorations_wrap_figure() {
        let decorations = Decorations {
            prefix: Some("<notextile>".to_owned()),
            suffix: Some("</notextile>".to_owned()),
        };
        let html = render("x", &parse(""), &broken, &decorations);
        assert!(html.starts_with("<notextile><figure class='code'>"));
        assert!(html.ends_with("</figure></notextile>"));
    }

    #[test]
    fn test_prefix_only() {
        let decorations = Decorations {
            prefix: Some("{{ not parsed }}".to_owned()),
            suffix: None,
        };
        let html = render("x", &parse(""), &broken, &decorations);
        assert!(html.starts_with("{{ not parsed }}<figure class='code'>"));
        assert!(html.ends_with("</figure>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let params = parse("Caption file.rb http://example.com/x more");
        let decorations = Decorations {
            prefix: Some("<p>".to_owned()),
            suffix: Some("</p>".to_owned()),
        };
        let first = render("a <b> c", &params, &broken, &decorations);
        let second = render("a <b> c", &params, &broken, &decorations);
        assert_eq!(first, second);

        let first = render("a <b> c", &params, &upper, &decorations);
        let second = render("a <b> c", &params, &upper, &decorations);
        assert_eq!(first, second);
    }

    #[test]
    fn test_renderer_parses_and_renders() {
        let renderer = CodeBlockRenderer::new(upper);
        let html = renderer.render("lang:sh Install", "echo hi");
        assert_eq!(
            html,
            "<figure class='code'><figcaption><span>Install</span></figcaption>\
             <pre class='sh'>ECHO HI</pre></figure>"
        );
    }

    #[test]
    fn test_renderer_without_highlighting_skips_highlighter() {
        let renderer = CodeBlockRenderer::new(upper).with_highlighting(false);
        let html = renderer.render("lang:sh Install", "echo <hi>");
        assert!(
            html.starts_with("<figure class='code'><figcaption><span>Install</span></figcaption>")
        );
        assert!(html.contains("<span class='line'>echo &lt;hi></span>"));
        assert!(!html.contains("ECHO"));
    }

    #[test]
    fn test_renderer_with_syntect_unknown_type_falls_back() {
        let renderer = CodeBlockRenderer::new(SyntectHighlighter);
        let html = renderer.render("data.unknownext", "<x>");
        assert!(html.contains("&lt;x>"));
        assert!(html.contains("class='line-numbers'"));
    }

    #[test]
    fn test_escape_lt_only() {
        assert_eq!(escape_lt("<a href=\"x\">&</a>"), "&lt;a href=\"x\">&&lt;/a>");
    }
}
