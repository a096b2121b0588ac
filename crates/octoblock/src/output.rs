//! Terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Rendered markup goes to stdout, diagnostics to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            red: Style::new().red(),
        }
    }

    /// Print rendered markup.
    pub(crate) fn markup(&self, html: &str) -> std::io::Result<()> {
        self.out.write_line(html.trim_end_matches('\n'))
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
