//! `codeblock` directive source.
//!
//! Builds and reads the textual form
//!
//! ```text
//! {% codeblock PARAMS %}
//! BODY
//! {% endcodeblock %}
//! ```
//!
//! Template engines cannot cope with `{`, `%` or `}` inside the tag
//! parameters, so those are rejected when a directive is built.

use std::sync::LazyLock;

use regex::Regex;

use crate::highlight::Highlighter;
use crate::render::CodeBlockRenderer;

/// Opening tag with its parameters.
static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{%\s*codeblock\b([^%]*)%\}").unwrap());

/// Closing tag at the end of the source.
static CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%\s*endcodeblock\s*%\}\s*$").unwrap());

/// Characters template engines reserve inside tag parameters.
const FORBIDDEN: [char; 3] = ['{', '%', '}'];

/// Error building or reading a `codeblock` directive.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// Parameters contain template delimiters.
    #[error("codeblock parameters cannot contain % or {{ or }}: {0:?}")]
    ForbiddenCharacters(String),

    /// Source does not start with `{% codeblock ... %}`.
    #[error("missing opening {{% codeblock %}} tag")]
    MissingOpen,

    /// Source does not end with `{% endcodeblock %}`.
    #[error("missing closing {{% endcodeblock %}} tag")]
    MissingClose,
}

/// A `codeblock` directive: tag parameters plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlockDirective {
    params: String,
    body: String,
}

impl CodeBlockDirective {
    /// Create a directive, rejecting parameters that contain `{`, `%` or `}`.
    ///
    /// # Example
    ///
    /// ```
    /// use octoblock_codeblock::CodeBlockDirective;
    ///
    /// let params = "Gist1.java https://gist.github.com/1";
    /// let directive = CodeBlockDirective::new(params, "class A {}").unwrap();
    /// assert_eq!(
    ///     directive.to_source(),
    ///     "{% codeblock Gist1.java https://gist.github.com/1 %}\nclass A {}\n{% endcodeblock %}\n"
    /// );
    /// assert!(CodeBlockDirective::new("{% oops %}", "").is_err());
    /// ```
    pub fn new(
        params: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DirectiveError> {
        let params = params.into();
        if params.contains(FORBIDDEN) {
            return Err(DirectiveError::ForbiddenCharacters(params));
        }

        Ok(Self {
            params: params.trim().to_owned(),
            body: body.into(),
        })
    }

    /// Read a directive back from its source text.
    ///
    /// One newline directly after the opening tag and one directly before
    /// the closing tag belong to the markers, not to the body.
    pub fn parse(source: &str) -> Result<Self, DirectiveError> {
        let open = OPEN_RE.captures(source).ok_or(DirectiveError::MissingOpen)?;
        let (params, rest) = match (open.get(1), open.get(0)) {
            (Some(params), Some(tag)) => (params.as_str(), &source[tag.end()..]),
            _ => return Err(DirectiveError::MissingOpen),
        };

        let close = CLOSE_RE.find(rest).ok_or(DirectiveError::MissingClose)?;
        let body = &rest[..close.start()];
        let body = body.strip_prefix('\n').unwrap_or(body);
        let body = body.strip_suffix('\n').unwrap_or(body);

        Self::new(params, body)
    }

    /// Tag parameters, trimmed.
    #[must_use]
    pub fn params(&self) -> &str {
        &self.params
    }

    /// Body between the tags.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Directive source text.
    #[must_use]
    pub fn to_source(&self) -> String {
        if self.params.is_empty() {
            format!("{{% codeblock %}}\n{}\n{{% endcodeblock %}}\n", self.body)
        } else {
            format!(
                "{{% codeblock {} %}}\n{}\n{{% endcodeblock %}}\n",
                self.params, self.body
            )
        }
    }

    /// Interpret the parameters and render the body.
    #[must_use]
    pub fn render<H: Highlighter>(&self, renderer: &CodeBlockRenderer<H>) -> String {
        renderer.render(&self.params, &self.body)
    }
}
