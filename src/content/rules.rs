/// Field extraction rules shared by the page parsers
///
/// Each rule is independent, takes the raw page, and returns `None` when its
/// marker is missing. Parsers combine the rules into a [`Reading`] and decide
/// which missing fields are fatal.
///
/// [`Reading`]: crate::domain::Reading

use std::sync::LazyLock;
use regex::{Captures, Regex};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid regex"));

static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"<i>(.*?)</i>""#).expect("valid regex"));

/// Text node ending in a page citation such as "Basic Text p. 89"
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)>\s*([^<]*?\bp\.\s*\d+)").expect("valid regex"));

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)just for today:").expect("valid regex"));

/// Text right after the marker, up to the end of its line or cell
static JUST_FOR_TODAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(?:</b>|</strong>)?(.*?)(?:<br\s*/?>|</p>|</td>|$)").expect("valid regex")
});

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").expect("valid regex"));

/// Named entities decoded in extracted text; `&amp;` goes last
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// An extracted field and the byte offset in the page where its match ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub end: usize,
}

/// Byte span of the "Just for Today:" marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub start: usize,
    pub end: usize,
}

fn first_capture(re: &Regex, html: &str) -> Option<Field> {
    let caps = re.captures(html)?;
    let whole = caps.get(0)?;
    let text = to_text(caps.get(1)?.as_str());
    Some(Field { text, end: whole.end() })
}

pub fn title(html: &str) -> Option<Field> {
    first_capture(&TITLE_RE, html)
}

pub fn quote(html: &str) -> Option<Field> {
    first_capture(&QUOTE_RE, html)
}

pub fn reference(html: &str) -> Option<Field> {
    let caps = REFERENCE_RE.captures(html)?;
    let citation = caps.get(1)?;
    Some(Field {
        text: to_text(citation.as_str()),
        end: citation.end(),
    })
}

/// First marker at or after byte offset `from`
pub fn marker(html: &str, from: usize) -> Option<Marker> {
    MARKER_RE.find_at(html, from).map(|m| Marker {
        start: m.start(),
        end: m.end(),
    })
}

/// Normalised body text between `anchor` and the marker; `None` when blank
pub fn body(html: &str, anchor: usize, marker: Marker) -> Option<String> {
    let region = html.get(anchor..marker.start)?;
    let text = to_text(region);
    (!text.is_empty()).then_some(text)
}

pub fn just_for_today(html: &str, marker: Marker) -> Option<String> {
    let rest = html.get(marker.end..)?;
    let caps = JUST_FOR_TODAY_RE.captures(rest)?;
    let text = to_text(caps.get(1)?.as_str());
    (!text.is_empty()).then_some(text)
}

/// Line breaks become newlines, other tags are dropped, entities decoded,
/// surrounding whitespace trimmed
pub fn to_text(fragment: &str) -> String {
    let with_newlines = BREAK_RE.replace_all(fragment, "\n");
    let stripped = TAG_RE.replace_all(&with_newlines, "");
    decode_entities(&stripped).trim().to_string()
}

pub fn decode_entities(text: &str) -> String {
    let mut decoded = NUMERIC_ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                _ => None,
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    for (entity, replacement) in NAMED_ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}
