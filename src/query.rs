//! Survey search URLs.
//!
//! The survey endpoint is always queried with the full parameter set, blank
//! filters included, so an omitted parameter never has to be told apart from
//! an explicitly empty one.

use core::{fmt, str::FromStr};

use thiserror::Error;
use url::{form_urlencoded, Url};

/// Degree filter offered by the survey search form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Degree {
    #[default]
    Any,
    PsyD,
    Ind,
    Other,
    EdD,
    Jd,
    Mba,
    Mfa,
    Masters,
    PhD,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown degree {0:?}")]
pub struct UnknownDegree(pub String);

impl Degree {
    /// In the order of the interactive menu (entry `n` is `ALL[n - 1]`).
    pub const ALL: [Self; 10] = [
        Self::Any,
        Self::PsyD,
        Self::Ind,
        Self::Other,
        Self::EdD,
        Self::Jd,
        Self::Mba,
        Self::Mfa,
        Self::Masters,
        Self::PhD,
    ];

    /// Value sent as the `degree` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::PsyD => "PsyD",
            Self::Ind => "IND",
            Self::Other => "Other",
            Self::EdD => "EdD",
            Self::Jd => "JD",
            Self::Mba => "MBA",
            Self::Mfa => "MFA",
            Self::Masters => "Masters",
            Self::PhD => "PhD",
        }
    }

    /// Looks up a 1-based menu choice.
    #[must_use]
    pub fn from_menu(choice: &str) -> Option<Self> {
        let n = choice.trim().parse::<usize>().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("[none]"),
            d => f.write_str(d.as_str()),
        }
    }
}

impl FromStr for Degree {
    type Err = UnknownDegree;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDegree(s.to_owned()))
    }
}

/// The user's search filters. Fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyQuery {
    pub institution: String,
    pub program: String,
    pub degree: Degree,
}

/// Search URL for page 1 of `query` under `endpoint`.
///
/// Any query string already on `endpoint` is replaced; path, host and
/// fragment are kept.
#[must_use]
pub fn build_base_url(endpoint: &Url, query: &SurveyQuery) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().clear().extend_pairs([
        ("q", ""),
        ("sort", "newest"),
        ("institution", &*query.institution),
        ("program", &*query.program),
        ("degree", query.degree.as_str()),
        ("season", ""),
        ("decision", ""),
        ("decision_start", ""),
        ("decision_end", ""),
        ("added_start", ""),
        ("added_end", ""),
        ("page", "1"),
    ]);
    url
}

/// `base` with its `page` parameter set to `page`.
///
/// Every other parameter is kept verbatim and in place. Repeated `page`
/// parameters collapse into one at the position of the first; a missing one
/// is appended.
#[must_use]
pub fn build_page_url(base: &Url, page: u32) -> Url {
    let page = format!("page={page}");
    let mut replaced = false;
    let mut segments = Vec::new();
    for segment in base.query().unwrap_or_default().split('&') {
        if segment.is_empty() {
            continue;
        }
        if is_page_param(segment) {
            if !replaced {
                segments.push(&*page);
                replaced = true;
            }
        } else {
            segments.push(segment);
        }
    }
    if !replaced {
        segments.push(&*page);
    }

    let mut url = base.clone();
    url.set_query(Some(&segments.join("&")));
    url
}

fn is_page_param(segment: &str) -> bool {
    let key = segment.split_once('=').map_or(segment, |(k, _)| k);
    form_urlencoded::parse(key.as_bytes())
        .next()
        .is_some_and(|(k, _)| k == "page")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://www.thegradcafe.com/survey/").unwrap()
    }

    fn query(institution: &str, program: &str, degree: Degree) -> SurveyQuery {
        SurveyQuery {
            institution: institution.to_owned(),
            program: program.to_owned(),
            degree,
        }
    }

    #[test]
    fn base_url_sends_every_parameter() {
        let url = build_base_url(&endpoint(), &query("MIT", "", Degree::PhD));
        assert_eq!(
            url.as_str(),
            "https://www.thegradcafe.com/survey/?q=&sort=newest&institution=MIT&program=&degree=PhD\
             &season=&decision=&decision_start=&decision_end=&added_start=&added_end=&page=1"
        );
        let q = url.query().unwrap();
        assert!(q.contains("institution=MIT"));
        assert!(q.contains("degree=PhD"));
        assert!(q.contains("&program=&"));
    }

    #[test]
    fn base_url_encodes_free_text() {
        let url = build_base_url(&endpoint(), &query("Texas A&M", "Computer Science", Degree::Any));
        let q = url.query().unwrap();
        assert!(q.contains("institution=Texas+A%26M"));
        assert!(q.contains("program=Computer+Science"));
        assert!(q.contains("&degree=&"));

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 12);
        assert_eq!(pairs[2].1, "Texas A&M");
    }

    #[test]
    fn page_url_replaces_in_place() {
        let base = Url::parse("https://example.org/s/?a=1&page=3&b=%20x%2B#frag").unwrap();
        let url = build_page_url(&base, 7);
        assert_eq!(url.as_str(), "https://example.org/s/?a=1&page=7&b=%20x%2B#frag");
    }

    #[test]
    fn page_url_appends_when_missing() {
        let base = Url::parse("http://example.org/s?x=y").unwrap();
        assert_eq!(build_page_url(&base, 2).as_str(), "http://example.org/s?x=y&page=2");

        let bare = Url::parse("http://example.org/s").unwrap();
        assert_eq!(build_page_url(&bare, 1).as_str(), "http://example.org/s?page=1");
    }

    #[test]
    fn page_url_collapses_duplicates() {
        let base = Url::parse("http://example.org/?page=1&q=a&pa%67e=9&page=").unwrap();
        assert_eq!(build_page_url(&base, 4).as_str(), "http://example.org/?page=4&q=a");
    }

    #[test]
    fn page_urls_differ_only_in_page() {
        let base = build_base_url(&endpoint(), &query("U of T", "Math & Stats", Degree::Masters));
        let p2 = build_page_url(&base, 2);
        let p47 = build_page_url(&base, 47);
        assert_eq!(build_page_url(&p2, 47), p47);
        assert_eq!(build_page_url(&p47, 2), p2);

        let strip = |u: &Url| u.as_str().replace("page=2", "page=N").replace("page=47", "page=N");
        assert_eq!(strip(&p2), strip(&p47));
        assert_eq!(p2.query_pairs().filter(|(k, _)| k == "page").count(), 1);
    }

    #[test]
    fn degree_parsing() {
        assert_eq!("phd".parse::<Degree>(), Ok(Degree::PhD));
        assert_eq!(" IND ".parse::<Degree>(), Ok(Degree::Ind));
        assert_eq!("".parse::<Degree>(), Ok(Degree::Any));
        assert_eq!("none".parse::<Degree>(), Ok(Degree::Any));
        assert_eq!("BSc".parse::<Degree>(), Err(UnknownDegree("BSc".to_owned())));
    }

    #[test]
    fn degree_menu() {
        assert_eq!(Degree::from_menu("1"), Some(Degree::Any));
        assert_eq!(Degree::from_menu(" 10\n"), Some(Degree::PhD));
        assert_eq!(Degree::from_menu("9"), Some(Degree::Masters));
        assert_eq!(Degree::from_menu("0"), None);
        assert_eq!(Degree::from_menu("11"), None);
        assert_eq!(Degree::from_menu("PhD"), None);
    }
}
