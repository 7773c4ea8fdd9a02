use crate::domain::model::{CourseEntry, GpaMode, GpaResult, GradeValue};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{
    ensure_representable, validate_non_empty, validate_non_negative, validate_range,
};

pub const MIN_GRADE_POINT: f64 = 0.0;
pub const MAX_GRADE_POINT: f64 = 4.0;

/// Credit-weighted grade-point average.
///
/// CGPA and SGPA accept only letter grades, mapped through the fixed table.
/// CUSTOM takes grade points directly; letters are still honoured there.
pub fn compute_gpa(entries: &[CourseEntry], mode: GpaMode) -> Result<GpaResult> {
    validate_non_empty("courses", entries)?;

    let mut total_credits = 0.0;
    let mut weighted_points = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        let point = grade_point_for(index, entry, mode)?;
        total_credits += entry.credits;
        weighted_points += entry.credits * point;
    }

    ensure_representable("total credits", total_credits)?;
    ensure_representable("weighted grade points", weighted_points)?;
    if total_credits == 0.0 {
        return Err(CalcError::degenerate("credits"));
    }

    let gpa = weighted_points / total_credits;
    ensure_representable("gpa", gpa)?;
    tracing::debug!(
        mode = mode.label(),
        courses = entries.len(),
        total_credits,
        gpa,
        "Computed GPA"
    );

    Ok(GpaResult {
        mode,
        gpa,
        total_credits,
    })
}

fn grade_point_for(index: usize, entry: &CourseEntry, mode: GpaMode) -> Result<f64> {
    let label = course_label(index, entry);
    validate_non_negative(&format!("{} credits", label), entry.credits)?;

    match (entry.grade, mode) {
        (GradeValue::Letter(letter), _) => Ok(letter.grade_point()),
        (GradeValue::Point(point), GpaMode::Custom) => {
            validate_range(
                &format!("{} grade point", label),
                point,
                MIN_GRADE_POINT,
                MAX_GRADE_POINT,
            )?;
            Ok(point)
        }
        (GradeValue::Point(point), _) => Err(CalcError::invalid_number(
            &format!("{} grade", label),
            point,
            &format!("{} mode expects a letter grade", mode.label()),
        )),
    }
}

fn course_label(index: usize, entry: &CourseEntry) -> String {
    match &entry.name {
        Some(name) => name.clone(),
        None => format!("course {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GradeLetter;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weighted_average_of_letters() {
        let courses = [
            CourseEntry::with_letter(3.0, GradeLetter::A),
            CourseEntry::with_letter(3.0, GradeLetter::B),
        ];
        let result = compute_gpa(&courses, GpaMode::Cgpa).unwrap();
        assert_abs_diff_eq!(result.gpa, 3.5, epsilon = 1e-12);
        assert_eq!(result.total_credits, 6.0);
    }

    #[test]
    fn test_cgpa_and_sgpa_agree() {
        let courses = [
            CourseEntry::with_letter(4.0, GradeLetter::BPlus),
            CourseEntry::with_letter(2.0, GradeLetter::CMinus),
            CourseEntry::with_letter(1.0, GradeLetter::F),
        ];
        let cgpa = compute_gpa(&courses, GpaMode::Cgpa).unwrap();
        let sgpa = compute_gpa(&courses, GpaMode::Sgpa).unwrap();
        assert_eq!(cgpa.gpa, sgpa.gpa);
    }

    #[test]
    fn test_custom_mode_uses_points() {
        let courses = [
            CourseEntry::with_point(3.0, 3.9),
            CourseEntry::with_point(1.0, 2.5),
        ];
        let result = compute_gpa(&courses, GpaMode::Custom).unwrap();
        assert_abs_diff_eq!(result.gpa, (3.0 * 3.9 + 2.5) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_mode_accepts_letters() {
        let courses = [
            CourseEntry::with_letter(3.0, GradeLetter::A),
            CourseEntry::with_point(1.0, 2.0),
        ];
        let result = compute_gpa(&courses, GpaMode::Custom).unwrap();
        assert_abs_diff_eq!(result.gpa, 3.5, epsilon = 1e-12);
        assert_eq!(result.total_credits, 4.0);
    }

    #[test]
    fn test_overflowing_credits_fail_closed() {
        let courses = [
            CourseEntry::with_letter(1e308, GradeLetter::A),
            CourseEntry::with_letter(1e308, GradeLetter::B),
        ];
        assert!(matches!(
            compute_gpa(&courses, GpaMode::Cgpa),
            Err(CalcError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_custom_point_out_of_range() {
        let courses = [CourseEntry::with_point(3.0, 4.5)];
        assert!(matches!(
            compute_gpa(&courses, GpaMode::Custom),
            Err(CalcError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_point_rejected_in_letter_mode() {
        let courses = [CourseEntry::with_point(3.0, 3.0)];
        assert!(matches!(
            compute_gpa(&courses, GpaMode::Sgpa),
            Err(CalcError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_zero_credits_is_degenerate() {
        let courses = [CourseEntry::with_letter(0.0, GradeLetter::A)];
        assert!(matches!(
            compute_gpa(&courses, GpaMode::Cgpa),
            Err(CalcError::DegenerateAggregate { .. })
        ));
    }

    #[test]
    fn test_empty_and_negative_credits() {
        assert!(matches!(
            compute_gpa(&[], GpaMode::Cgpa),
            Err(CalcError::EmptyInput { .. })
        ));
        let courses = [CourseEntry::with_letter(-3.0, GradeLetter::A).named("Physics")];
        match compute_gpa(&courses, GpaMode::Cgpa) {
            Err(CalcError::OutOfRange { field, .. }) => assert_eq!(field, "Physics credits"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
