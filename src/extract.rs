//! Survey results table to [`Record`]s.
//!
//! A result is rendered as a primary row, optionally followed by a metrics
//! row and then a comment row. Both continuation rows carry the
//! [`BORDERLESS`] class; a row without it starts the next result.

use scraper::{ElementRef, Html};

use crate::{
    error::{StructureError, StructureResult},
    record::{Metric, Record},
    util::{children_named, descendants_named, field_text, trimmed_text},
};

/// Class marking a row as the continuation of the result above it.
pub const BORDERLESS: &str = "tw-border-none";

/// Position of the cursor within one row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Primary,
    Metrics,
    Comment,
    Done,
}

impl Expect {
    /// Offers the row under the cursor (if any) to the current state.
    ///
    /// Returns the next state and whether `row` was consumed into `record`.
    pub fn step(self, row: Option<ElementRef>, record: &mut Record) -> (Self, bool) {
        match (self, row) {
            (Self::Primary, Some(row)) => {
                read_primary(row, record);
                (Self::Metrics, true)
            }
            (Self::Metrics, Some(row)) if is_borderless(row) => {
                read_metrics(row, record);
                (Self::Comment, true)
            }
            (Self::Comment, Some(row)) if is_borderless(row) => {
                read_comment(row, record);
                (Self::Done, true)
            }
            _ => (Self::Done, false),
        }
    }
}

/// Every result on a survey page, in page order.
///
/// The table is found as the first `<tbody>` after the first `<tr>` of the
/// document. An empty body yields no records.
pub fn extract_records(document: &Html) -> StructureResult<Vec<Record>> {
    let tbody = results_body(document)?;
    let rows = children_named(tbody, "tr").collect::<Vec<_>>();

    let mut records = Vec::new();
    let mut rest = &rows[..];
    while !rest.is_empty() {
        let (record, used) = next_group(rest);
        tracing::trace!(target: "extract", "group of {used} rows: {record:?}");
        records.push(record);
        rest = &rest[used.max(1)..];
    }

    tracing::debug!(target: "extract", "{} rows -> {} records", rows.len(), records.len());
    Ok(records)
}

/// Builds one record from the front of `rows`, returning it with the number
/// of rows it took.
pub fn next_group(rows: &[ElementRef]) -> (Record, usize) {
    let mut record = Record::default();
    let mut state = Expect::Primary;
    let mut used = 0;
    while state != Expect::Done {
        let (next, consumed) = state.step(rows.get(used).copied(), &mut record);
        used += usize::from(consumed);
        state = next;
    }
    (record, used)
}

fn results_body(document: &Html) -> StructureResult<ElementRef<'_>> {
    let root = document.root_element();
    let anchor = descendants_named(root, "tr")
        .next()
        .ok_or(StructureError::NoAnchorRow)?;

    root.descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tbody")
        .ok_or(StructureError::NoTableBody)
}

fn is_borderless(row: ElementRef) -> bool {
    row.value().classes().any(|c| c == BORDERLESS)
}

fn read_primary(row: ElementRef, record: &mut Record) {
    let cells = children_named(row, "td").take(4).collect::<Vec<_>>();

    // the first <div> only lays out the badge
    if let Some(&school) = cells.first() {
        record.school = descendants_named(school, "div").nth(1).and_then(field_text);
    }

    if let Some(program) = cells.get(1).and_then(|&c| descendants_named(c, "div").next()) {
        let mut spans = descendants_named(program, "span");
        record.program = spans.next().and_then(field_text);
        record.level = spans.next().and_then(field_text);
    }

    record.added_on = cells.get(2).copied().and_then(field_text);

    // "Accepted on 3/15" -> "Accepted"
    record.decision = cells.get(3).and_then(|c| {
        c.text()
            .collect::<String>()
            .split_whitespace()
            .next()
            .map(ToOwned::to_owned)
    });
}

fn read_metrics(row: ElementRef, record: &mut Record) {
    let Some(cell) = descendants_named(row, "td").next() else {
        return;
    };
    let Some(container) = descendants_named(cell, "div").find(|d| d.attr("class").is_some())
    else {
        return;
    };

    for item in children_named(container, "div") {
        let text = trimmed_text(item);
        if let Some((metric, value)) = Metric::classify(&text) {
            record.set_metric(metric, value.to_owned());
        }
    }
}

fn read_comment(row: ElementRef, record: &mut Record) {
    record.comment = descendants_named(row, "td")
        .next()
        .and_then(|td| descendants_named(td, "p").next())
        .and_then(field_text);
}
