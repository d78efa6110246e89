/// Page parsers turning the raw content page into a [`Reading`]
///
/// One implementation exists per known page layout. A layout change on the
/// content site means adding a parser here and selecting it through
/// [`PageLayout`]; callers only see [`ReadingParser`].

use std::sync::LazyLock;
use chrono::NaiveDate;
use regex::Regex;

use crate::content::rules;
use crate::content::Unparseable;
use crate::domain::Reading;

/// Trait implemented by every page-layout parser
///
/// Parsing is pure: the same page and date always give the same result, and
/// a mismatch is reported as [`Unparseable`], never a panic.
pub trait ReadingParser: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Extract a reading from `html`, stamped with `date`
    fn parse(&self, html: &str, date: NaiveDate) -> Result<Reading, Unparseable>;
}

/// Known layouts of the content page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    /// Body bounded by the citation line and the "Just for Today:" marker
    #[default]
    Current,
    /// Older layout with one table cell per body paragraph
    Legacy,
}

impl PageLayout {
    pub fn parser(self) -> Box<dyn ReadingParser> {
        match self {
            PageLayout::Current => Box::new(MarkerParser),
            PageLayout::Legacy => Box::new(TableCellParser),
        }
    }
}

/// Parser for the current page layout
///
/// The body is everything between the citation line (or, without one, the
/// quote) and the "Just for Today:" marker. Title, quote, citation and the
/// closing excerpt fall back to empty strings; a missing body region makes
/// the whole page unparseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerParser;

impl ReadingParser for MarkerParser {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn parse(&self, html: &str, date: NaiveDate) -> Result<Reading, Unparseable> {
        let unparseable = |reason| Unparseable { parser: self.name(), reason };

        let title = rules::title(html);
        let quote = rules::quote(html);
        let reference = rules::reference(html);

        let anchor = reference
            .as_ref()
            .or(quote.as_ref())
            .map(|field| field.end)
            .ok_or_else(|| unparseable("no citation or quote to anchor the body"))?;
        let marker = rules::marker(html, anchor)
            .ok_or_else(|| unparseable("\"Just for Today:\" marker not found"))?;
        let body = rules::body(html, anchor, marker)
            .ok_or_else(|| unparseable("body region is empty"))?;
        let just_for_today = rules::just_for_today(html, marker).unwrap_or_default();

        tracing::debug!("Parsed reading for {} ({} body chars)", date, body.chars().count());

        Ok(Reading::new(
            date,
            title.map(|f| f.text).unwrap_or_default(),
            quote.map(|f| f.text).unwrap_or_default(),
            reference.map(|f| f.text).unwrap_or_default(),
            body,
            just_for_today,
        ))
    }
}

static LEFT_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<td align="left">(.*?)</td>"#).expect("valid regex"));

/// Suffix that marks a body paragraph cell in the legacy layout
const PARAGRAPH_END: &str = "<br><br>";

/// Parser for the legacy table layout
///
/// Body paragraphs are left-aligned cells ending in a double line break;
/// the quote, citation and "Just for Today" cells are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCellParser;

impl TableCellParser {
    fn paragraphs(html: &str) -> Vec<String> {
        LEFT_CELL_RE
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .filter_map(|cell| cell.as_str().trim_end().strip_suffix(PARAGRAPH_END))
            .filter(|cell| {
                !cell.contains("\"<i>")
                    && !cell.contains("Basic Text")
                    && rules::marker(cell, 0).is_none()
            })
            .map(rules::to_text)
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl ReadingParser for TableCellParser {
    fn name(&self) -> &'static str {
        "table-cell"
    }

    fn parse(&self, html: &str, date: NaiveDate) -> Result<Reading, Unparseable> {
        let unparseable = |reason| Unparseable { parser: self.name(), reason };

        let marker = rules::marker(html, 0)
            .ok_or_else(|| unparseable("\"Just for Today:\" marker not found"))?;
        let paragraphs = Self::paragraphs(html);
        if paragraphs.is_empty() {
            return Err(unparseable("no body paragraphs found"));
        }

        let just_for_today = rules::just_for_today(html, marker).unwrap_or_default();

        Ok(Reading::new(
            date,
            rules::title(html).map(|f| f.text).unwrap_or_default(),
            rules::quote(html).map(|f| f.text).unwrap_or_default(),
            rules::reference(html).map(|f| f.text).unwrap_or_default(),
            paragraphs.join("\n\n"),
            just_for_today,
        ))
    }
}
