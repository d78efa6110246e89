/// Daily reading acquisition: fetch the page, parse it, cache the result
///
/// The pipeline is cache lookup, then one HTTP GET, then a layout-specific
/// parser, then a best-effort cache write. Every failure degrades to "no
/// reading" at the [`ContentFetcher`] boundary.

pub mod rules;
pub mod parser;
pub mod source;
pub mod cache;
pub mod fetcher;

pub use parser::*;
pub use source::*;
pub use cache::*;
pub use fetcher::*;

use thiserror::Error;

/// Errors from retrieving the content page
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Content source returned HTTP {status}")]
    Status { status: u16 },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(e) if e.is_timeout())
    }
}

/// A page that does not match the layout a parser expects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{parser} parser could not read page: {reason}")]
pub struct Unparseable {
    pub parser: &'static str,
    pub reason: &'static str,
}
