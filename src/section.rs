//! Section locator: find the container describing one platform's release.
//!
//! Vendor markup nesting changes between page revisions, so the locator does
//! not follow a fixed path. It anchors on a platform-marker text node whose
//! parent also mentions the companion phrase, then climbs a bounded number of
//! ancestors until one holds both an artefact link and a labelled checksum.
//! The first such ancestor wins, which keeps the section tight when several
//! platform blocks are siblings.

use crate::patterns::SectionPatterns;
use log::{debug, trace};
use scraper::{ElementRef, Html};
use std::iter::successors;

/// A borrowed view of the element holding one platform's release block.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    element: ElementRef<'a>,
}

impl<'a> Section<'a> {
    /// The underlying container element.
    #[must_use]
    pub const fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Tag name of the container, for diagnostics.
    #[must_use]
    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Text content of the container, one space between text nodes.
    #[must_use]
    pub fn text(&self) -> String {
        element_text(self.element)
    }

    /// Values of `attribute` on descendant anchors, in document order.
    pub fn link_values<'s>(&self, attribute: &'s str) -> impl Iterator<Item = &'a str> + 's
    where
        'a: 's,
    {
        anchor_values(self.element, attribute)
    }
}

/// What a container must hold to count as the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// An artefact link and a labelled checksum.
    LinkAndChecksum,
    /// An artefact link only.
    LinkOnly,
}

/// Locate the section for the platform described by `patterns`.
///
/// Returns `None` when no marker text node has the companion phrase in its
/// parent, or when no ancestor within the ascent bound holds both an artefact
/// link and a checksum.
///
/// # Examples
///
/// ```
/// use ica_detect::{PlatformProfile, SectionPatterns, locate};
/// use scraper::Html;
///
/// let patterns = SectionPatterns::compile(&PlatformProfile::red_hat()).unwrap();
/// let document = Html::parse_document("<p>Ubuntu Full Package</p>");
/// assert!(locate(&document, &patterns).is_none());
/// ```
#[must_use]
pub fn locate<'a>(document: &'a Html, patterns: &SectionPatterns) -> Option<Section<'a>> {
    locate_with(document, patterns, Containment::LinkAndChecksum)
}

/// Locate a section using the given containment rule.
///
/// [`Containment::LinkOnly`] finds the block a checksum-less page revision
/// would use, so callers can still report the version and URL it carries.
#[must_use]
pub fn locate_with<'a>(
    document: &'a Html,
    patterns: &SectionPatterns,
    containment: Containment,
) -> Option<Section<'a>> {
    document
        .root_element()
        .descendants()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| patterns.is_platform_marker(text))
        })
        .filter_map(|node| node.parent().and_then(ElementRef::wrap))
        .filter(|parent| {
            let confirmed = patterns.has_companion_marker(&element_text(*parent));
            trace!(
                "{} marker in <{}>; companion present: {confirmed}",
                patterns.name(),
                parent.value().name()
            );
            confirmed
        })
        .find_map(|parent| ascend(parent, patterns, containment))
        .map(|element| {
            debug!(
                "located {} section in <{}> ({containment:?})",
                patterns.name(),
                element.value().name()
            );
            Section { element }
        })
}

/// Climb from `start` and return the first container that qualifies.
fn ascend<'a>(
    start: ElementRef<'a>,
    patterns: &SectionPatterns,
    containment: Containment,
) -> Option<ElementRef<'a>> {
    successors(Some(start), |element| element.parent().and_then(ElementRef::wrap))
        .take(patterns.max_ascent())
        .find(|container| qualifies(*container, patterns, containment))
}

fn qualifies(
    container: ElementRef<'_>,
    patterns: &SectionPatterns,
    containment: Containment,
) -> bool {
    let has_link = anchor_values(container, patterns.link_attribute())
        .any(|value| patterns.is_artefact_link(value));
    let qualified = match containment {
        Containment::LinkOnly => has_link,
        Containment::LinkAndChecksum => {
            has_link && patterns.find_checksum(&element_text(container)).is_some()
        }
    };
    trace!(
        "<{}>: artefact link {has_link}, qualifies {qualified}",
        container.value().name()
    );
    qualified
}

/// Text nodes are joined with a space so that adjacent elements never fuse
/// into one token.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn anchor_values<'a, 's>(
    element: ElementRef<'a>,
    attribute: &'s str,
) -> impl Iterator<Item = &'a str> + 's
where
    'a: 's,
{
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|candidate| candidate.value().name() == "a")
        .filter_map(move |anchor| anchor.value().attr(attribute))
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
