// src/extractors/fields.rs
//
// Field lookups shared by the entity parsers. Each lookup is a plain function
// over a candidate block returning an optional value; parsers chain them in
// priority order with `first_match`.

// --- Imports ---
use crate::extractors::cell::{collapse_whitespace, joined_text};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// One lookup over a candidate block.
pub type Strategy<T> = for<'a> fn(ElementRef<'a>) -> Option<T>;

/// Runs `strategies` in order and returns the first value found.
pub fn first_match<T>(block: ElementRef, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(block))
}

// --- Constants ---
/// Tokens that mark a short span as a person's name.
const HONORIFICS: [&str; 4] = ["prof", "dr", "mr", "ms"];

/// Longer spans are sentences, not names.
const MAX_NAME_WORDS: usize = 6;

/// Most senior label first; the first one present wins.
const ROLE_LABELS: [&str; 4] = [
    "Assistant Professor",
    "Associate Professor",
    "Professor",
    "Dept. Head",
];

const RESEARCH_MARKER: &str = "Research";

// --- CSS Selectors (Lazy Static) ---
// Most specific heading first.
static NAME_HEADING_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["h6", "h5", "h4", "h3"]
        .iter()
        .map(|tag| Selector::parse(tag).expect("Failed to compile heading selector"))
        .collect()
});

static INLINE_NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span, a").expect("Failed to compile INLINE_NAME_SELECTOR")
});

pub(crate) static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a").expect("Failed to compile ANCHOR_SELECTOR")
});

static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to compile IMAGE_SELECTOR")
});

pub(crate) static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR")
});

static LIST_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul").expect("Failed to compile LIST_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR")
});

// --- Regex Patterns (Lazy Static) ---
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+91[\s-]?\d{3}[\s-]?\d{3}[\s-]?\d{4}").expect("Failed to compile PHONE_RE")
});

// [at], [At], [AT], (at) and friends.
static OBFUSCATED_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\[(]at[\])]").expect("Failed to compile OBFUSCATED_AT_RE")
});

// --- Name ---
pub fn heading_name(block: ElementRef) -> Option<String> {
    NAME_HEADING_SELECTORS.iter().find_map(|selector| {
        block
            .select(selector)
            .map(joined_text)
            .find(|text| !text.is_empty())
    })
}

fn has_honorific(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .any(|token| HONORIFICS.contains(&token.as_str()))
}

/// A short span or link carrying an honorific token, e.g. "Dr. A. Sharma".
pub fn honorific_name(block: ElementRef) -> Option<String> {
    block
        .select(&INLINE_NAME_SELECTOR)
        .map(joined_text)
        .find(|text| {
            !text.is_empty()
                && text.split_whitespace().count() <= MAX_NAME_WORDS
                && has_honorific(text)
        })
}

/// Visible text of the first anchor in the block.
pub fn first_anchor_name(block: ElementRef) -> Option<String> {
    block
        .select(&ANCHOR_SELECTOR)
        .next()
        .map(joined_text)
        .filter(|text| !text.is_empty())
}

// --- Email ---
/// Rewrites the obfuscated `@` variants the site uses.
pub fn deobfuscate_email(raw: &str) -> String {
    OBFUSCATED_AT_RE
        .replace_all(raw.trim(), "@")
        .replace("at]", "@")
}

fn trim_email_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, ',' | ';' | '.' | '(' | ')' | '<' | '>' | '"' | '\''))
}

/// Every address in `text` under `domain`, de-obfuscated, in order, without repeats.
pub fn scan_emails(text: &str, domain: &str) -> Vec<String> {
    let suffix = format!("@{}", domain);
    let mut emails: Vec<String> = Vec::new();
    for token in text.replace(':', " ").split_whitespace() {
        let candidate = deobfuscate_email(token);
        let candidate = trim_email_punctuation(&candidate);
        if candidate.contains(&suffix) && !emails.iter().any(|e| e == candidate) {
            emails.push(candidate.to_string());
        }
    }
    emails
}

/// Address behind a `mailto:` href, if the href carries one.
pub fn mailto_email(anchor: ElementRef) -> Option<String> {
    let href = anchor.value().attr("href")?.trim();
    let address = href.strip_prefix("mailto:")?;
    let address = address.split('?').next().unwrap_or("");
    let address = deobfuscate_email(address);
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}

/// `mailto:` href first; otherwise the anchor text, if it reads as an address.
pub fn anchor_email(anchor: ElementRef) -> Option<String> {
    mailto_email(anchor).or_else(|| {
        let text = deobfuscate_email(&joined_text(anchor));
        if text.contains('@') {
            Some(text)
        } else {
            None
        }
    })
}

// --- Phone / role / research ---
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_role(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    ROLE_LABELS
        .iter()
        .find(|label| lowered.contains(&label.to_lowercase()))
        .map(|label| label.to_string())
}

/// Everything after the first "Research", split on `;` and `,`.
pub fn research_after_marker(text: &str) -> Vec<String> {
    let Some((_, rest)) = text.split_once(RESEARCH_MARKER) else {
        return Vec::new();
    };
    rest.replace(':', "")
        .split([';', ','])
        .map(collapse_whitespace)
        .filter(|area| !area.is_empty())
        .collect()
}

/// Item texts of the first list in the block.
pub fn list_items(block: ElementRef) -> Vec<String> {
    block
        .select(&LIST_SELECTOR)
        .next()
        .map(|list| {
            list.select(&LIST_ITEM_SELECTOR)
                .map(joined_text)
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

// --- Labelled segments ---
/// Text between `label` and the nearest of `next_labels`, or the end.
/// A colon after the label is skipped.
pub fn labeled_segment(text: &str, label: &str, next_labels: &[&str]) -> Option<String> {
    let start = text.find(label)? + label.len();
    let rest = text[start..].trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest);

    let end = next_labels
        .iter()
        .filter_map(|next| rest.find(next))
        .min()
        .unwrap_or(rest.len());

    let segment = collapse_whitespace(&rest[..end]);
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

// --- Links / images ---
/// First link with an absolute `http(s)` target.
pub fn absolute_link(block: ElementRef) -> Option<String> {
    block
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| href.starts_with("http"))
        .map(str::to_string)
}

/// Source of the first image with a non-empty `src`.
pub fn first_image(block: ElementRef) -> Option<String> {
    block
        .select(&IMAGE_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

pub fn has_image(block: ElementRef) -> bool {
    block.select(&IMAGE_SELECTOR).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn block(html: &Html) -> ElementRef<'_> {
        let div = Selector::parse("div").unwrap();
        html.select(&div).next().unwrap()
    }

    #[test]
    fn test_email_deobfuscation_variants() {
        for raw in ["x[at]iiserb.ac.in", "x[At]iiserb.ac.in", "x[AT]iiserb.ac.in", "x(at)iiserb.ac.in", "xat]iiserb.ac.in"] {
            assert_eq!(deobfuscate_email(raw), "x@iiserb.ac.in", "input {}", raw);
        }
    }

    #[test]
    fn test_scan_emails_filters_domain_and_repeats() {
        let text = "Email: a[at]iiserb.ac.in, b@gmail.com; a@iiserb.ac.in c(At)iiserb.ac.in.";
        assert_eq!(
            scan_emails(text, "iiserb.ac.in"),
            vec!["a@iiserb.ac.in", "c@iiserb.ac.in"]
        );
    }

    #[test]
    fn test_anchor_email_fallbacks() {
        let html = Html::parse_fragment(
            r#"<div><a href="mailto:p[at]iiserb.ac.in">mail</a><a href="">q[at]iiserb.ac.in</a><a href="">no address</a></div>"#,
        );
        let anchors: Vec<_> = block(&html).select(&ANCHOR_SELECTOR).collect();
        assert_eq!(anchor_email(anchors[0]).as_deref(), Some("p@iiserb.ac.in"));
        assert_eq!(anchor_email(anchors[1]).as_deref(), Some("q@iiserb.ac.in"));
        assert_eq!(anchor_email(anchors[2]), None);
    }

    #[test]
    fn test_phone_and_role() {
        assert_eq!(
            find_phone("Ph: +91-755-269-1234 / +91 755 269 9999").as_deref(),
            Some("+91-755-269-1234")
        );
        assert_eq!(find_phone("Ph: 0755 2691234"), None);
        // "Professor" also appears, but the more specific label wins.
        assert_eq!(
            find_role("Associate Professor and Dept. Head").as_deref(),
            Some("Associate Professor")
        );
        assert_eq!(find_role("visiting scholar"), None);
    }

    #[test]
    fn test_research_after_marker() {
        assert_eq!(
            research_after_marker("Dr. X Research Interests: Climate; Hydrology,  Remote sensing ,"),
            vec!["Interests Climate", "Hydrology", "Remote sensing"]
        );
        assert!(research_after_marker("no marker").is_empty());
    }

    #[test]
    fn test_labeled_segment() {
        let text = "Year of Joining: 2021 Supervisor Name: Dr. Y Email: y[At]iiserb.ac.in";
        let labels = ["Year of Joining", "Supervisor", "Email"];
        assert_eq!(labeled_segment(text, "Year of Joining", &labels).as_deref(), Some("2021"));
        assert_eq!(labeled_segment(text, "Supervisor Name", &labels).as_deref(), Some("Dr. Y"));
        assert_eq!(labeled_segment(text, "Email", &labels).as_deref(), Some("y[At]iiserb.ac.in"));
        assert_eq!(labeled_segment(text, "Homepage", &labels), None);
        assert_eq!(labeled_segment("Supervisor:", "Supervisor", &labels), None);
    }

    #[test]
    fn test_name_strategies() {
        let html = Html::parse_fragment(
            r#"<div><span>Welcome to the department of earth and environmental sciences, Dr. everyone</span>
                 <span>Prof. Anil Kumar</span><h4>Heading Name</h4></div>"#,
        );
        let b = block(&html);
        assert_eq!(heading_name(b).as_deref(), Some("Heading Name"));
        assert_eq!(honorific_name(b).as_deref(), Some("Prof. Anil Kumar"));
        let strategies: [Strategy<String>; 2] = [honorific_name, heading_name];
        assert_eq!(first_match(b, &strategies).as_deref(), Some("Prof. Anil Kumar"));
    }

    #[test]
    fn test_honorific_needs_whole_token() {
        let html = Html::parse_fragment("<div><span>Address drawer items</span></div>");
        assert_eq!(honorific_name(block(&html)), None);
    }

    #[test]
    fn test_links_images_lists() {
        let html = Html::parse_fragment(
            r#"<div><a href="/rel">r</a><a href=" https://abs.example/ ">a</a>
                 <img src=""><img src="pic.png"><ul><li>One</li><li> </li><li>Two</li></ul></div>"#,
        );
        let b = block(&html);
        assert_eq!(absolute_link(b).as_deref(), Some("https://abs.example/"));
        assert_eq!(first_image(b).as_deref(), Some("pic.png"));
        assert!(has_image(b));
        assert_eq!(list_items(b), vec!["One", "Two"]);
    }
}
