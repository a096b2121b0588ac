//! Syntax highlighting seam.
//!
//! The renderer treats highlighting as an optional enrichment: anything
//! implementing [`Highlighter`] may fail, and the renderer falls back to
//! plain output when it does.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Bundled syntect grammars, loaded once on first use.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Error returned by a [`Highlighter`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HighlightError {
    /// No grammar is registered for the file type.
    #[error("no syntax found for file type `{0}`")]
    UnknownFileType(String),

    /// The grammar failed while tokenizing a line.
    #[error("syntax highlighting failed")]
    Syntax(#[from] syntect::Error),

    /// Any other highlighter failure.
    #[error("{0}")]
    Other(String),
}

/// Turns source text into highlighted markup for a file type.
///
/// Closures with the same signature implement this trait, which keeps test
/// doubles short:
///
/// ```
/// use octoblock_codeblock::{HighlightError, Highlighter};
///
/// let shouting = |code: &str, _file_type: &str| -> Result<String, HighlightError> {
///     Ok(code.to_uppercase())
/// };
/// assert_eq!(shouting.highlight("puts 1", "rb").unwrap(), "PUTS 1");
/// ```
pub trait Highlighter {
    /// Highlight `code` as `file_type`.
    fn highlight(&self, code: &str, file_type: &str) -> Result<String, HighlightError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Result<String, HighlightError>,
{
    fn highlight(&self, code: &str, file_type: &str) -> Result<String, HighlightError> {
        self(code, file_type)
    }
}

/// Highlighter backed by syntect's default grammars.
///
/// Emits CSS classes rather than inline colours so that the site's
/// stylesheet decides the theme.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntectHighlighter;

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, file_type: &str) -> Result<String, HighlightError> {
        let syntax = SYNTAX_SET
            .find_syntax_by_token(file_type)
            .ok_or_else(|| HighlightError::UnknownFileType(file_type.to_owned()))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!(
            "<div class='highlight'><pre><code class='{file_type}'>{}</code></pre></div>",
            generator.finalize()
        ))
    }
}
