use crate::domain::model::{CourseEntry, MarksEntry};
use crate::utils::error::Result;
use crate::utils::parse::parse_grade_value;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(default)]
    name: Option<String>,
    credits: f64,
    grade: String,
}

/// Reads `obtained,total` rows.
pub fn read_marks<R: Read>(reader: R) -> Result<Vec<MarksEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let entries = csv_reader
        .deserialize::<MarksEntry>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
    tracing::debug!(rows = entries.len(), "Read subject marks");
    Ok(entries)
}

/// Reads `name,credits,grade` rows; `grade` may be a letter or a grade point.
pub fn read_courses<R: Read>(reader: R, lenient: bool) -> Result<Vec<CourseEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut courses = Vec::new();
    for row in csv_reader.deserialize::<CourseRow>() {
        let row = row?;
        courses.push(CourseEntry {
            name: row.name.filter(|n| !n.is_empty()),
            credits: row.credits,
            grade: parse_grade_value(&row.grade, lenient)?,
        });
    }
    tracing::debug!(rows = courses.len(), "Read courses");
    Ok(courses)
}

pub fn read_marks_file<P: AsRef<Path>>(path: P) -> Result<Vec<MarksEntry>> {
    let file = std::fs::File::open(path)?;
    read_marks(file)
}

pub fn read_courses_file<P: AsRef<Path>>(path: P, lenient: bool) -> Result<Vec<CourseEntry>> {
    let file = std::fs::File::open(path)?;
    read_courses(file, lenient)
}
