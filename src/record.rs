use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Column order of the CSV output.
pub const HEADERS: [&str; 10] = [
    "School", "Program", "Level", "Added on", "Decision", "GPA", "GRE V", "GRE Q", "GRE AW",
    "Comment",
];

/// One admissions result, flattened from its group of table rows.
///
/// Every field is display text taken from the page; nothing is validated.
/// `None` means the markup had no (non-blank) value for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "School")]
    pub school: Option<String>,
    #[serde(rename = "Program")]
    pub program: Option<String>,
    #[serde(rename = "Level")]
    pub level: Option<String>,
    #[serde(rename = "Added on")]
    pub added_on: Option<String>,
    #[serde(rename = "Decision")]
    pub decision: Option<String>,
    #[serde(rename = "GPA")]
    pub gpa: Option<String>,
    #[serde(rename = "GRE V")]
    pub gre_v: Option<String>,
    #[serde(rename = "GRE Q")]
    pub gre_q: Option<String>,
    #[serde(rename = "GRE AW")]
    pub gre_aw: Option<String>,
    // not part of the CSV layout
    #[serde(skip)]
    pub gre: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
}

/// A score reported in the metrics row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Gpa,
    GreV,
    GreQ,
    GreAw,
    Gre,
}

// Order matters: the general GRE pattern would also accept sub-score text.
static PATTERNS: LazyLock<[(Metric, Regex); 5]> = LazyLock::new(|| {
    [
        (Metric::Gpa, Regex::new(r"(?i)GPA\D*(\d+\.?\d*)").unwrap()),
        (Metric::GreV, Regex::new(r"(?i)GRE\s+V\s*(\d+)").unwrap()),
        (Metric::GreQ, Regex::new(r"(?i)GRE\s+Q\s*(\d+)").unwrap()),
        (Metric::GreAw, Regex::new(r"(?i)GRE\s+AW\s*(\d+\.?\d*)").unwrap()),
        (Metric::Gre, Regex::new(r"(?i)GRE\s*(\d+)").unwrap()),
    ]
});

impl Metric {
    /// The first metric whose pattern matches `text`, with its value.
    #[must_use]
    pub fn classify(text: &str) -> Option<(Self, &str)> {
        PATTERNS.iter().find_map(|(metric, re)| {
            let value = re.captures(text)?.get(1)?.as_str();
            Some((*metric, value))
        })
    }
}

impl Record {
    pub fn set_metric(&mut self, metric: Metric, value: String) {
        let slot = match metric {
            Metric::Gpa => &mut self.gpa,
            Metric::GreV => &mut self.gre_v,
            Metric::GreQ => &mut self.gre_q,
            Metric::GreAw => &mut self.gre_aw,
            Metric::Gre => &mut self.gre,
        };
        *slot = Some(value);
    }
}
