use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    query::SurveyQuery,
    record::{Record, HEADERS},
};

/// `<institution>_<program>_<degree>_<DDMMYYYY>.csv`, blank filters left out.
///
/// Spaces and path separators in the filters become `_`.
#[must_use]
pub fn file_name(query: &SurveyQuery, date: NaiveDate) -> String {
    let mut parts = [&*query.institution, &*query.program, query.degree.as_str()]
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.replace([' ', '/', '\\'], "_"))
        .collect::<Vec<_>>();
    parts.push(date.format("%d%m%Y").to_string());
    parts.join("_") + ".csv"
}

/// Writes `records` as CSV with a header row, unset fields left empty.
pub fn write_records<W: io::Write>(writer: W, records: &[Record]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `records` to `dir/name`, creating `dir` if needed.
pub fn save(dir: &Path, name: &str, records: &[Record]) -> csv::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    write_records(BufWriter::new(File::create(&path)?), records)?;
    tracing::info!(target: "output", "\x1b[36m{} records -> {}\x1b[0m", records.len(), path.display());
    Ok(path)
}
