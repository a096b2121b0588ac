//! Codeblock parameter interpretation.
//!
//! Interprets the free-form parameter string of a `codeblock` directive:
//!
//! ```text
//! {% codeblock [title] [url] [link text] [lang:type] %}
//! ```
//!
//! The grammar is a heuristic. An explicit `lang:` annotation is removed
//! first, then the remaining text is tried against an ordered list of
//! matchers and the first one that succeeds decides the caption shape.

use std::sync::LazyLock;

use regex::Regex;

/// Label used for the caption link when no link text follows the URL.
const DEFAULT_LINK_LABEL: &str = "link";

/// Explicit file type annotation: `lang:rb`.
static LANG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s*lang:(\S+)").unwrap());

/// Caption, whitespace, absolute or root-relative URL, optional link text.
///
/// The caption group is greedy, so the last URL-shaped token wins.
static CAPTION_URL_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(\S.*)\s+(https?://\S+|/\S+)\s*(.*)$").unwrap()
});

/// A single URL-shaped token and nothing else.
static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?://\S+|/\S+)$").unwrap());

/// Word characters after the last dot that sits between word characters.
static FILE_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s).*\w\.(\w+)").unwrap());

/// Interpreted `codeblock` parameters.
///
/// # Example
///
/// ```
/// use octoblock_codeblock::parse;
///
/// let params = parse("Time to be Awesome! awesome.rb");
/// assert_eq!(params.file_type.as_deref(), Some("rb"));
/// assert_eq!(
///     params.caption.as_deref(),
///     Some("<figcaption><span>Time to be Awesome! awesome.rb</span></figcaption>")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedParameters {
    /// Highlighter file type, from `lang:` or inferred from the title.
    pub file_type: Option<String>,
    /// Caption markup (`<figcaption>` with an optional link).
    pub caption: Option<String>,
    /// Caption text the markup was built from.
    pub title: Option<String>,
    /// Parameter string as written in the directive.
    pub raw: String,
}

/// Link rendered after the caption text.
#[derive(Debug)]
struct CaptionLink<'a> {
    href: &'a str,
    label: &'a str,
}

/// Result of a successful structural match.
#[derive(Debug)]
struct CaptionMatch<'a> {
    text: &'a str,
    link: Option<CaptionLink<'a>>,
    /// Whether `text` may be scanned for a file extension.
    infers_file_type: bool,
}

impl CaptionMatch<'_> {
    fn to_markup(&self) -> String {
        match &self.link {
            Some(link) => format!(
                "<figcaption><span>{}</span><a href='{}'>{}</a></figcaption>",
                self.text, link.href, link.label
            ),
            None => format!("<figcaption><span>{}</span></figcaption>", self.text),
        }
    }

    fn file_type(&self) -> Option<&str> {
        if !self.infers_file_type {
            return None;
        }
        FILE_EXTENSION_RE
            .captures(self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

type Matcher = fn(&str) -> Option<CaptionMatch<'_>>;

/// Structural matchers in priority order.
const MATCHERS: [Matcher; 3] = [caption_url_title, bare_url, caption_only];

fn caption_url_title(text: &str) -> Option<CaptionMatch<'_>> {
    let caps = CAPTION_URL_TITLE_RE.captures(text)?;
    let caption = caps.get(1)?.as_str().trim_end();
    let href = caps.get(2)?.as_str();
    let label = caps
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_LINK_LABEL);

    Some(CaptionMatch {
        text: caption,
        link: Some(CaptionLink { href, label }),
        infers_file_type: true,
    })
}

fn bare_url(text: &str) -> Option<CaptionMatch<'_>> {
    let url = text.trim();
    if !BARE_URL_RE.is_match(url) {
        return None;
    }

    // URLs are full of dots that are not file extensions.
    Some(CaptionMatch {
        text: url,
        link: Some(CaptionLink {
            href: url,
            label: DEFAULT_LINK_LABEL,
        }),
        infers_file_type: false,
    })
}

fn caption_only(text: &str) -> Option<CaptionMatch<'_>> {
    let caption = text.trim();
    if caption.is_empty() {
        return None;
    }

    Some(CaptionMatch {
        text: caption,
        link: None,
        infers_file_type: true,
    })
}

/// Interpret a raw `codeblock` parameter string.
///
/// Never fails: text that matches nothing leaves every field empty.
#[must_use]
pub fn parse(raw: &str) -> ParsedParameters {
    let annotated = LANG_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned());
    let text = LANG_RE.replacen(raw, 1, "");

    let matched = MATCHERS.iter().find_map(|matcher| matcher(&*text));

    let file_type = annotated.or_else(|| {
        matched
            .as_ref()
            .and_then(CaptionMatch::file_type)
            .map(str::to_owned)
    });

    ParsedParameters {
        file_type,
        caption: matched.as_ref().map(CaptionMatch::to_markup),
        title: matched.map(|m| m.text.to_owned()),
        raw: raw.to_owned(),
    }
}
