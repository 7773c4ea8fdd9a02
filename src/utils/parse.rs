//! Text to typed input. Everything the engines receive passes through here
//! when it originates from a user.

use crate::domain::model::{CourseEntry, GradeLetter, GradeValue, MarksEntry};
use crate::utils::error::{CalcError, Result};
use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator pattern is valid"));

pub fn parse_number(field_name: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_number(field_name, text, "value is required"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(CalcError::invalid_number(
            field_name,
            text,
            "value must be a finite number",
        )),
        Err(_) => Err(CalcError::invalid_number(field_name, text, "not a number")),
    }
}

/// Numbers separated by commas, spaces or new lines.
pub fn parse_sample(text: &str) -> Result<Vec<f64>> {
    let values = SEPARATORS
        .split(text)
        .filter(|token| !token.is_empty())
        .map(|token| parse_number("sample", token))
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(CalcError::empty_input("sample"));
    }
    Ok(values)
}

/// `obtained/total`, e.g. `45/50`.
pub fn parse_marks_entry(text: &str) -> Result<MarksEntry> {
    let (obtained, total) = text.split_once('/').ok_or_else(|| {
        CalcError::invalid_number("subject marks", text, "expected obtained/total")
    })?;
    Ok(MarksEntry::new(
        parse_number("obtained marks", obtained)?,
        parse_number("total marks", total)?,
    ))
}

/// Unknown letters fail unless `lenient`, in which case they score as F.
pub fn parse_grade_letter(text: &str, lenient: bool) -> Result<GradeLetter> {
    match GradeLetter::from_symbol(text) {
        Some(letter) => Ok(letter),
        None if lenient => {
            tracing::warn!(grade = text, "Unrecognized grade letter scored as F (0.0)");
            Ok(GradeLetter::F)
        }
        None => Err(CalcError::invalid_number(
            "grade",
            text,
            "expected one of A+, A, A-, B+, B, B-, C+, C, C-, D+, D, D-, F",
        )),
    }
}

/// A letter such as `B+` or a numeric grade point such as `3.7`.
pub fn parse_grade_value(text: &str, lenient: bool) -> Result<GradeValue> {
    let trimmed = text.trim();
    if trimmed.parse::<f64>().is_ok() {
        return parse_number("grade point", trimmed).map(GradeValue::Point);
    }
    parse_grade_letter(trimmed, lenient).map(GradeValue::Letter)
}

/// `credits:grade` with an optional `name=` prefix, e.g. `Physics=4:B+` or `3:3.7`.
pub fn parse_course_entry(text: &str, lenient: bool) -> Result<CourseEntry> {
    let (name, rest) = match text.split_once('=') {
        Some((name, rest)) => (Some(name.trim().to_string()), rest),
        None => (None, text),
    };
    let (credits, grade) = rest.split_once(':').ok_or_else(|| {
        CalcError::invalid_number("course", text, "expected credits:grade")
    })?;

    Ok(CourseEntry {
        name: name.filter(|n| !n.is_empty()),
        credits: parse_number("credits", credits)?,
        grade: parse_grade_value(grade, lenient)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_mixed_separators() {
        let values = parse_sample("5, 10 15\n20,,25\t").unwrap();
        assert_eq!(values, vec![5.0, 10.0, 15.0, 20.0, 25.0]);
    }

    #[test]
    fn test_parse_sample_rejects_bad_token() {
        assert!(matches!(
            parse_sample("1, two, 3"),
            Err(CalcError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_sample("1, inf"),
            Err(CalcError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_sample_empty() {
        assert!(matches!(parse_sample(" , \n"), Err(CalcError::EmptyInput { .. })));
        assert!(matches!(parse_sample(""), Err(CalcError::EmptyInput { .. })));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("principal", " 10000 ").unwrap(), 10000.0);
        assert!(parse_number("principal", "").is_err());
        assert!(parse_number("principal", "abc").is_err());
        assert!(parse_number("principal", "NaN").is_err());
    }

    #[test]
    fn test_parse_marks_entry() {
        assert_eq!(parse_marks_entry("45/50").unwrap(), MarksEntry::new(45.0, 50.0));
        assert!(parse_marks_entry("45").is_err());
        assert!(parse_marks_entry("x/50").is_err());
    }

    #[test]
    fn test_parse_course_entry() {
        let course = parse_course_entry("Physics=4:b+", false).unwrap();
        assert_eq!(course.name.as_deref(), Some("Physics"));
        assert_eq!(course.credits, 4.0);
        assert_eq!(course.grade, GradeValue::Letter(GradeLetter::BPlus));

        let custom = parse_course_entry("3:3.7", false).unwrap();
        assert_eq!(custom.name, None);
        assert_eq!(custom.grade, GradeValue::Point(3.7));
    }

    #[test]
    fn test_unknown_letter_strict_and_lenient() {
        assert!(matches!(
            parse_course_entry("3:E", false),
            Err(CalcError::InvalidNumber { .. })
        ));
        let lenient = parse_course_entry("3:E", true).unwrap();
        assert_eq!(lenient.grade, GradeValue::Letter(GradeLetter::F));
    }
}
