//! Token table mapping sorted-letter keys to canonical tag names

use std::collections::HashMap;
use std::sync::OnceLock;

pub const IMPORT_TAG: &str = "import";
pub const EXPORT_TAG: &str = "export";
pub const CHILDREN_TAG: &str = "children";

/// Canonical name chosen instead of the default under a given ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub parent: &'static str,
    pub value: &'static str,
}

/// One decodable tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEntry {
    pub default: &'static str,
    pub alternative: Option<Alternative>,
}

impl TokenEntry {
    const fn plain(default: &'static str) -> Self {
        TokenEntry {
            default,
            alternative: None,
        }
    }

    const fn under(default: &'static str, parent: &'static str, value: &'static str) -> Self {
        TokenEntry {
            default,
            alternative: Some(Alternative { parent, value }),
        }
    }

    /// Lookup key of this entry, derived from its default name
    pub fn key(&self) -> String {
        sorted_letters(self.default)
    }
}

/// Lower-case a tag name and sort its characters
pub fn sorted_letters(name: &str) -> String {
    let mut chars: Vec<char> = name.to_lowercase().chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Every tag the converter understands.
///
/// `dt`/`td`, `rt`/`tr` and `br`/`rb` share their letters, so the element
/// that only makes sense inside a specific parent is the alternative.
pub const TOKENS: &[TokenEntry] = &[
    TokenEntry::plain("a"),
    TokenEntry::plain("abbr"),
    TokenEntry::plain("address"),
    TokenEntry::plain("area"),
    TokenEntry::plain("article"),
    TokenEntry::plain("aside"),
    TokenEntry::plain("audio"),
    TokenEntry::plain("b"),
    TokenEntry::plain("base"),
    TokenEntry::plain("bdi"),
    TokenEntry::plain("bdo"),
    TokenEntry::plain("blockquote"),
    TokenEntry::plain("body"),
    TokenEntry::under("br", "ruby", "rb"),
    TokenEntry::plain("button"),
    TokenEntry::plain("canvas"),
    TokenEntry::plain("caption"),
    TokenEntry::plain("cite"),
    TokenEntry::plain("code"),
    TokenEntry::plain("col"),
    TokenEntry::plain("colgroup"),
    TokenEntry::plain("data"),
    TokenEntry::plain("datalist"),
    TokenEntry::plain("dd"),
    TokenEntry::plain("del"),
    TokenEntry::plain("details"),
    TokenEntry::plain("dfn"),
    TokenEntry::plain("dialog"),
    TokenEntry::plain("div"),
    TokenEntry::plain("dl"),
    TokenEntry::under("td", "dl", "dt"),
    TokenEntry::plain("em"),
    TokenEntry::plain("embed"),
    TokenEntry::plain("fieldset"),
    TokenEntry::plain("figcaption"),
    TokenEntry::plain("figure"),
    TokenEntry::plain("footer"),
    TokenEntry::plain("form"),
    TokenEntry::plain("h1"),
    TokenEntry::plain("h2"),
    TokenEntry::plain("h3"),
    TokenEntry::plain("h4"),
    TokenEntry::plain("h5"),
    TokenEntry::plain("h6"),
    TokenEntry::plain("head"),
    TokenEntry::plain("header"),
    TokenEntry::plain("hgroup"),
    TokenEntry::plain("hr"),
    TokenEntry::plain("html"),
    TokenEntry::plain("i"),
    TokenEntry::plain("iframe"),
    TokenEntry::plain("input"),
    TokenEntry::plain("ins"),
    TokenEntry::plain("kbd"),
    TokenEntry::plain("label"),
    TokenEntry::plain("legend"),
    TokenEntry::plain("li"),
    TokenEntry::plain("link"),
    TokenEntry::plain("main"),
    TokenEntry::plain("map"),
    TokenEntry::plain("mark"),
    TokenEntry::plain("meta"),
    TokenEntry::plain("meter"),
    TokenEntry::plain("nav"),
    TokenEntry::plain("noscript"),
    TokenEntry::plain("object"),
    TokenEntry::plain("ol"),
    TokenEntry::plain("optgroup"),
    TokenEntry::plain("option"),
    TokenEntry::plain("output"),
    TokenEntry::plain("p"),
    TokenEntry::plain("param"),
    TokenEntry::plain("picture"),
    TokenEntry::plain("pre"),
    TokenEntry::plain("progress"),
    TokenEntry::plain("q"),
    TokenEntry::plain("rp"),
    TokenEntry::under("tr", "ruby", "rt"),
    TokenEntry::plain("ruby"),
    TokenEntry::plain("s"),
    TokenEntry::plain("samp"),
    TokenEntry::plain("script"),
    TokenEntry::plain("section"),
    TokenEntry::plain("select"),
    TokenEntry::plain("small"),
    TokenEntry::plain("source"),
    TokenEntry::plain("span"),
    TokenEntry::plain("strong"),
    TokenEntry::plain("style"),
    TokenEntry::plain("sub"),
    TokenEntry::plain("summary"),
    TokenEntry::plain("sup"),
    TokenEntry::plain("table"),
    TokenEntry::plain("tbody"),
    TokenEntry::plain("template"),
    TokenEntry::plain("textarea"),
    TokenEntry::plain("tfoot"),
    TokenEntry::plain("th"),
    TokenEntry::plain("thead"),
    TokenEntry::plain("time"),
    TokenEntry::plain("title"),
    TokenEntry::plain("track"),
    TokenEntry::plain("u"),
    TokenEntry::plain("ul"),
    TokenEntry::plain("var"),
    TokenEntry::plain("video"),
    TokenEntry::plain("wbr"),
    TokenEntry::plain("img"),
    TokenEntry::plain("svg"),
    TokenEntry::plain("math"),
    TokenEntry::plain("search"),
    TokenEntry::plain("slot"),
    // Deprecated and non-standard elements
    TokenEntry::plain("acronym"),
    TokenEntry::plain("applet"),
    TokenEntry::plain("basefont"),
    TokenEntry::plain("bgsound"),
    TokenEntry::plain("big"),
    TokenEntry::plain("blink"),
    TokenEntry::plain("center"),
    TokenEntry::plain("content"),
    TokenEntry::plain("decorator"),
    TokenEntry::plain("dir"),
    TokenEntry::plain("element"),
    TokenEntry::plain("font"),
    TokenEntry::plain("frame"),
    TokenEntry::plain("frameset"),
    TokenEntry::plain("isindex"),
    TokenEntry::plain("keygen"),
    TokenEntry::plain("listing"),
    TokenEntry::plain("marquee"),
    TokenEntry::plain("menu"),
    TokenEntry::plain("menuitem"),
    TokenEntry::plain("nobr"),
    TokenEntry::plain("noframes"),
    TokenEntry::plain("plaintext"),
    TokenEntry::plain("portal"),
    TokenEntry::plain("rtc"),
    TokenEntry::plain("shadow"),
    TokenEntry::plain("spacer"),
    TokenEntry::plain("strike"),
    TokenEntry::plain("tt"),
    TokenEntry::plain("xmp"),
    // Module tags
    TokenEntry::plain(IMPORT_TAG),
    TokenEntry::plain(EXPORT_TAG),
    TokenEntry::plain(CHILDREN_TAG),
];

fn token_index() -> &'static HashMap<String, &'static TokenEntry> {
    static INDEX: OnceLock<HashMap<String, &'static TokenEntry>> = OnceLock::new();
    INDEX.get_or_init(|| TOKENS.iter().map(|entry| (entry.key(), entry)).collect())
}

/// Find the table entry for an already normalized key
pub fn lookup(key: &str) -> Option<&'static TokenEntry> {
    token_index().get(key).copied()
}
