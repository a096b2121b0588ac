//! Codeblock directive interpretation and rendering.
//!
//! This crate turns a `codeblock` directive (free-form parameters plus a
//! body) into a `<figure class='code'>` block:
//!
//! - [`parse`]: interprets the parameter string into a file type and caption
//! - [`render`]: renders the body, highlighted when possible, plain otherwise
//! - [`CodeBlockRenderer`]: bundles a [`Highlighter`] with [`Decorations`]
//! - [`CodeBlockDirective`]: builds and reads the directive source text
//!
//! # Example
//!
//! ```
//! use octoblock_codeblock::{CodeBlockRenderer, SyntectHighlighter};
//!
//! let renderer = CodeBlockRenderer::new(SyntectHighlighter);
//! let html = renderer.render(
//!     "Got pain? painrelief.sh http://site.com/painrelief.sh Download it!",
//!     "$ rm -rf ~/PAIN",
//! );
//! assert!(html.contains("<a href='http://site.com/painrelief.sh'>Download it!</a>"));
//! ```

mod directive;
mod highlight;
mod params;
mod render;

pub use directive::{CodeBlockDirective, DirectiveError};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use params::{ParsedParameters, parse};
pub use render::{CodeBlockRenderer, Decorations, render};
