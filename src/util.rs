use scraper::ElementRef;

/// Concatenates every text node below `element`, each trimmed on its own.
#[inline]
pub fn trimmed_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

/// Blank strings are treated as absent.
#[inline]
pub fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// [`trimmed_text`], or `None` when nothing but whitespace is left.
#[inline]
pub fn field_text(element: ElementRef) -> Option<String> {
    non_empty(trimmed_text(element))
}

/// Direct element children of `element` with the given tag name, in order.
pub fn children_named<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .child_elements()
        .filter(move |child| child.value().name() == name)
}

/// Descendants of `element` (excluding itself) with the given tag name, in
/// document order.
pub fn descendants_named<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == name)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    #[test]
    fn trimmed_text_joins_trimmed_fragments() {
        let html = Html::parse_fragment("<p>  Stanford <b> University </b>\n</p>");
        let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(trimmed_text(p), "StanfordUniversity");
    }

    #[test]
    fn blank_text_is_unset() {
        let html = Html::parse_fragment("<p>   \n <span> </span></p>");
        let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(field_text(p), None);
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".to_owned()).as_deref(), Some("x"));
    }

    #[test]
    fn direct_children_only() {
        let html = Html::parse_fragment("<div id=a><div>1</div><span><div>2</div></span><div>3</div></div>");
        let a = html.select(&Selector::parse("#a").unwrap()).next().unwrap();
        let direct: Vec<_> = children_named(a, "div").map(trimmed_text).collect();
        assert_eq!(direct, ["1", "3"]);
        let all: Vec<_> = descendants_named(a, "div").map(trimmed_text).collect();
        assert_eq!(all, ["1", "2", "3"]);
    }
}
