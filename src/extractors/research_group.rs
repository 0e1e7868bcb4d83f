// src/extractors/research_group.rs

// --- Imports ---
use crate::extractors::cell::{collapse_whitespace, joined_text};
use crate::extractors::fields;
use crate::records::{dedupe_by_identity, ResearchGroupRecord};
use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.research-container").expect("Failed to compile CONTAINER_SELECTOR")
});

static HALF_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.one_half").expect("Failed to compile HALF_SELECTOR")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h3").expect("Failed to compile TITLE_SELECTOR")
});

/// The two sides of a group entry.
#[derive(Debug, Clone, Copy)]
pub struct GroupHalves<'a> {
    pub image: ElementRef<'a>,
    pub text: ElementRef<'a>,
}

/// Picks the image half and the text half by content, not by position: the
/// site renders image-left and image-right entries interchangeably.
///
/// The image half is the first half holding an image with a source (or, if
/// none has one, any image at all). The text half is the first other half
/// without an image, or failing that the first other half.
pub fn classify_halves<'a>(halves: &[ElementRef<'a>]) -> Option<GroupHalves<'a>> {
    let image_index = halves
        .iter()
        .position(|half| fields::first_image(*half).is_some())
        .or_else(|| halves.iter().position(|half| fields::has_image(*half)))?;

    let others = || {
        halves
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != image_index)
            .map(|(_, half)| *half)
    };
    let text = others()
        .find(|half| !fields::has_image(*half))
        .or_else(|| others().next())?;

    Some(GroupHalves {
        image: halves[image_index],
        text,
    })
}

/// Direct child paragraphs of the text half, then its loose text nodes,
/// each group in document order, joined with single spaces.
pub fn assemble_description(text_half: ElementRef) -> String {
    let paragraphs = text_half
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "p")
        .map(joined_text);
    let loose_text = text_half.children().filter_map(|child| match child.value() {
        Node::Text(text) => Some(collapse_whitespace(text)),
        _ => None,
    });

    let parts: Vec<String> = paragraphs
        .chain(loose_text)
        .filter(|part| !part.is_empty())
        .collect();
    collapse_whitespace(&parts.join(" "))
}

/// Builds a group record from one container. Containers without an image
/// half, a text half, or a title yield nothing.
pub fn parse_group_container(container: ElementRef) -> Option<ResearchGroupRecord> {
    let halves: Vec<ElementRef> = container.select(&HALF_SELECTOR).collect();
    let Some(GroupHalves { image, text }) = classify_halves(&halves) else {
        tracing::trace!("Research container with {} halves has no image/text pair", halves.len());
        return None;
    };

    let title = text
        .select(&TITLE_SELECTOR)
        .next()
        .map(joined_text)
        .filter(|title| !title.is_empty())?;

    let description = assemble_description(text);

    Some(ResearchGroupRecord {
        title,
        image_url: fields::first_image(image),
        description: (!description.is_empty()).then_some(description),
        topics: fields::list_items(text),
        homepage: fields::absolute_link(text),
    })
}

pub fn extract_research_groups(document: &Html) -> Vec<ResearchGroupRecord> {
    let containers: Vec<ElementRef> = document.select(&CONTAINER_SELECTOR).collect();
    tracing::debug!("Found {} research group containers", containers.len());

    let records = dedupe_by_identity(containers.into_iter().filter_map(parse_group_container));
    tracing::info!("Retained {} research group records", records.len());
    records
}
