use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::{
    error::{StructureError, StructureResult},
    util::{descendants_named, trimmed_text},
};

static PREVIOUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bPrevious\b").unwrap());

/// Highest page number offered by the page's navigation bar.
///
/// The bar has no machine-readable total. It is anchored on the "Previous"
/// label: the `<div>` holding the label is followed by a `<div>` of page
/// links, and the last of those links is the last page. A label sitting
/// directly in a `<div>` with no `<div>` above it uses that `<div>`. Condensed bars
/// ("1 2 3 … 47") still end in the last page, so ellipses need no handling.
pub fn find_last_page(document: &Html) -> StructureResult<u32> {
    let label = document
        .root_element()
        .descendants()
        .find(|node| node.value().as_text().is_some_and(|t| PREVIOUS.is_match(t)))
        .ok_or(StructureError::NoPreviousLabel)?;

    let parent = label
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or(StructureError::NoLabelParent)?;

    let container = parent
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "div")
        .or_else(|| (parent.value().name() == "div").then_some(parent))
        .ok_or(StructureError::NoPaginationContainer)?;

    let link_group = container
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "div")
        .ok_or(StructureError::NoPageLinkGroup)?;

    let last = descendants_named(link_group, "a")
        .last()
        .ok_or(StructureError::NoPageLinks)?;

    let text = trimmed_text(last);
    match text.parse::<u32>() {
        Ok(n) if n > 0 && text.bytes().all(|b| b.is_ascii_digit()) => {
            tracing::debug!(target: "pagination", "last page: {n}");
            Ok(n)
        }
        _ => Err(StructureError::BadLastPage(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(inner: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><table><tbody><tr><td>row</td></tr></tbody></table>{inner}</body></html>"
        ))
    }

    const NAV: &str = r#"<nav class="tw-flex">
        <div class="-tw-mt-px tw-flex tw-w-0 tw-flex-1">
            <a href="?page=0"><svg></svg> Previous </a>
        </div>
        <div class="md:tw-flex">
            <a href="?page=1">1</a>
            <a href="?page=2">2</a>
            <span>…</span>
            <a href="?page=47"> 47 </a>
        </div>
        <div class="tw-flex tw-justify-end"><a href="?page=2">Next</a></div>
    </nav>"#;

    #[test]
    fn last_link_is_last_page() {
        assert_eq!(find_last_page(&nav(NAV)), Ok(47));
    }

    #[test]
    fn ellipsis_link_is_not_last() {
        let html = nav(r#"<div><div><span>previous</span></div><div>
            <a>1</a><a>2</a><a>…</a><a>47</a></div></div>"#);
        assert_eq!(find_last_page(&html), Ok(47));
    }

    #[test]
    fn label_match_is_case_insensitive_whole_word() {
        let html = nav(r#"<p>Previously admitted</p>
            <div><div><b>« PREVIOUS</b></div><div><a>1</a><a>3</a></div></div>"#);
        assert_eq!(find_last_page(&html), Ok(3));
    }

    #[test]
    fn missing_label() {
        let html = nav("<div><div><a>1</a><a>2</a></div></div>");
        assert_eq!(find_last_page(&html), Err(StructureError::NoPreviousLabel));
    }

    #[test]
    fn label_outside_any_div() {
        let html = nav("<nav><a>Previous</a></nav><div><a>9</a></div>");
        assert_eq!(find_last_page(&html), Err(StructureError::NoPaginationContainer));
    }

    #[test]
    fn label_directly_in_outermost_div() {
        let html = nav("<nav><div>Previous</div><div><a>1</a><a>12</a></div></nav>");
        assert_eq!(find_last_page(&html), Ok(12));
    }

    #[test]
    fn no_link_group() {
        let html = nav("<div><span>Previous</span></div><p><a>2</a></p>");
        assert_eq!(find_last_page(&html), Err(StructureError::NoPageLinkGroup));
    }

    #[test]
    fn link_group_without_links() {
        let html = nav("<div><span>Previous</span></div><div><span>1</span></div>");
        assert_eq!(find_last_page(&html), Err(StructureError::NoPageLinks));
    }

    #[test]
    fn non_numeric_last_link() {
        let html = nav("<div><span>Previous</span></div><div><a>1</a><a>Next</a></div>");
        assert_eq!(
            find_last_page(&html),
            Err(StructureError::BadLastPage("Next".to_owned()))
        );

        let html = nav("<div><span>Previous</span></div><div><a>+4</a></div>");
        assert_eq!(find_last_page(&html), Err(StructureError::BadLastPage("+4".to_owned())));

        let html = nav("<div><span>Previous</span></div><div><a>0</a></div>");
        assert_eq!(find_last_page(&html), Err(StructureError::BadLastPage("0".to_owned())));
    }
}
