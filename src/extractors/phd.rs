// src/extractors/phd.rs

// --- Imports ---
use crate::extractors::cell::joined_text;
use crate::extractors::fields::{self, Strategy, ANCHOR_SELECTOR, PARAGRAPH_SELECTOR};
use crate::records::{dedupe_by_identity, MemberRecord, RecordKind};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

const NAME_STRATEGIES: [Strategy<String>; 1] = [fields::first_anchor_name];

pub(crate) const YEAR_LABEL: &str = "Year of Joining";
pub(crate) const EMAIL_LABEL: &str = "Email";
pub(crate) const SUPERVISOR_LABELS: [&str; 2] = ["Supervisor Name", "Supervisor"];

/// Labels that end the value of the label before them.
pub(crate) const MEMBER_LABELS: [&str; 5] =
    ["Year of Joining", "Supervisor", "Email", "Weblink", "Homepage"];

// Each student sits in its own hosted-site text box.
static STUDENT_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.tyJCtd").expect("Failed to compile STUDENT_BLOCK_SELECTOR")
});

pub(crate) fn year_of_joining(text: &str) -> Option<String> {
    fields::labeled_segment(text, YEAR_LABEL, &MEMBER_LABELS)
}

pub(crate) fn supervisor(text: &str) -> Option<String> {
    SUPERVISOR_LABELS
        .iter()
        .filter(|label| text.contains(*label))
        .find_map(|label| fields::labeled_segment(text, label, &MEMBER_LABELS))
}

/// First whitespace-delimited token after "Email", if it reads as an address.
pub(crate) fn labeled_email(text: &str) -> Option<String> {
    let segment = fields::labeled_segment(text, EMAIL_LABEL, &MEMBER_LABELS)?;
    let token = segment.split_whitespace().next()?;
    let address = fields::deobfuscate_email(token);
    if address.contains('@') {
        Some(address)
    } else {
        None
    }
}

/// Email from the first anchor of a paragraph that mentions "Email",
/// falling back to the text after the label.
fn paragraph_email(paragraph: ElementRef, text: &str) -> Option<String> {
    paragraph
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(fields::anchor_email)
        .or_else(|| labeled_email(text))
}

/// Builds a student record from one text box; boxes without a name link
/// are layout, not students.
pub fn parse_student_block(block: ElementRef) -> Option<MemberRecord> {
    let name = fields::first_match(block, &NAME_STRATEGIES)?;

    let mut paragraphs: Vec<(ElementRef, String)> = block
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| (p, joined_text(p)))
        .collect();
    if paragraphs.is_empty() {
        paragraphs.push((block, joined_text(block)));
    }

    let year_of_joining = paragraphs.iter().find_map(|(_, text)| year_of_joining(text));
    let supervisor = paragraphs.iter().find_map(|(_, text)| supervisor(text));
    let email = paragraphs
        .iter()
        .filter(|(_, text)| text.contains(EMAIL_LABEL))
        .find_map(|(p, text)| paragraph_email(*p, text));

    Some(MemberRecord {
        kind: RecordKind::PhdStudent,
        name,
        year_of_joining,
        supervisor,
        emails: email.into_iter().collect(),
        homepage: fields::absolute_link(block),
        image_url: fields::first_image(block),
    })
}

pub fn extract_phd_students(document: &Html) -> Vec<MemberRecord> {
    let blocks: Vec<ElementRef> = document.select(&STUDENT_BLOCK_SELECTOR).collect();
    tracing::debug!("Found {} PhD candidate blocks", blocks.len());

    let records = dedupe_by_identity(blocks.into_iter().filter_map(parse_student_block));
    tracing::info!("Retained {} PhD student records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::markup::normalize;

    #[test]
    fn test_student_block() {
        let document = normalize(
            r#"<div class="tyJCtd">
                 <p><a href="https://sites.example/asha">Asha Verma</a></p>
                 <p>Year of Joining: 2021</p>
                 <p>Supervisor: Dr. Rao</p>
                 <p>Email: <a href="">asha21[at]iiserb.ac.in</a></p>
               </div>
               <div class="tyJCtd"><img src="https://img.example/asha.jpg"></div>"#,
        );
        let students = extract_phd_students(&document);
        assert_eq!(students.len(), 1);

        let asha = &students[0];
        assert_eq!(asha.kind, RecordKind::PhdStudent);
        assert_eq!(asha.name, "Asha Verma");
        assert_eq!(asha.year_of_joining.as_deref(), Some("2021"));
        assert_eq!(asha.supervisor.as_deref(), Some("Dr. Rao"));
        assert_eq!(asha.emails, vec!["asha21@iiserb.ac.in"]);
        assert_eq!(asha.homepage.as_deref(), Some("https://sites.example/asha"));
        assert_eq!(asha.image_url, None);
    }

    #[test]
    fn test_mailto_preferred_and_bad_anchor_ignored() {
        let document = normalize(
            r#"<div class="tyJCtd"><a href="/">Kiran</a><img src="k.png">
                 <p>Email: <a href="mailto:kiran[at]iiserb.ac.in">write</a></p></div>
               <div class="tyJCtd"><a href="/">Nila</a>
                 <p>Email: <a href="">not listed</a></p></div>"#,
        );
        let students = extract_phd_students(&document);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].emails, vec!["kiran@iiserb.ac.in"]);
        assert_eq!(students[0].homepage, None);
        assert_eq!(students[0].image_url.as_deref(), Some("k.png"));
        assert!(students[1].emails.is_empty());
    }

    #[test]
    fn test_blocks_without_name_link_are_skipped() {
        let document = normalize(
            r#"<div class="tyJCtd"><h2>PhD Students</h2><p>Year of Joining: 2020</p></div>"#,
        );
        assert!(extract_phd_students(&document).is_empty());
    }

    #[test]
    fn test_label_helpers() {
        let text = "Year of Joining: 2019 Supervisor Name: Prof. K Email: k[At]iiserb.ac.in";
        assert_eq!(year_of_joining(text).as_deref(), Some("2019"));
        assert_eq!(supervisor(text).as_deref(), Some("Prof. K"));
        assert_eq!(labeled_email(text).as_deref(), Some("k@iiserb.ac.in"));
        assert_eq!(labeled_email("Email: on request"), None);
    }
}
