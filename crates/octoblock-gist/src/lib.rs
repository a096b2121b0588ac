//! Gist embedding for octoblock.
//!
//! Resolves `[owner/]id [filename]` references against a gist host,
//! downloads the raw file and renders it as a captioned codeblock linked
//! back to the gist page.
//!
//! # Example
//!
//! ```no_run
//! use octoblock_codeblock::{CodeBlockRenderer, SyntectHighlighter};
//! use octoblock_gist::{GistResolver, GistTag, UreqClient};
//!
//! let tag = GistTag::new(
//!     GistResolver::new(UreqClient::default()),
//!     CodeBlockRenderer::new(SyntectHighlighter),
//! );
//! let html = tag.render("jbrains/4111662 TestingIoFailure.java");
//! println!("{html}");
//! ```

mod client;
mod consts;
mod error;
mod reference;
mod resolver;
mod tag;

pub use client::{HttpClient, HttpResponse, UreqClient};
pub use consts::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::GistError;
pub use reference::{GistReference, ReferenceError};
pub use resolver::{FetchOutcome, GistResolver};
pub use tag::{GistFile, GistTag};
