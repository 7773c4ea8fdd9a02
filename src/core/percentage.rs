use crate::domain::model::{LetterGrade, MarksEntry, PercentageResult};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{
    ensure_representable, validate_non_empty, validate_non_negative, validate_positive,
};

/// Maps a percentage onto the six grade bands. Boundaries belong to the higher band.
pub fn grade_from_percentage(percentage: f64) -> LetterGrade {
    if percentage >= 90.0 {
        LetterGrade::APlus
    } else if percentage >= 80.0 {
        LetterGrade::A
    } else if percentage >= 70.0 {
        LetterGrade::B
    } else if percentage >= 60.0 {
        LetterGrade::C
    } else if percentage >= 50.0 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

pub fn compute_simple_percentage(obtained: f64, total: f64) -> Result<PercentageResult> {
    validate_positive("total marks", total)?;
    validate_entry(0, &MarksEntry::new(obtained, total))?;

    let percentage = obtained / total * 100.0;
    ensure_representable("percentage", percentage)?;
    tracing::debug!(obtained, total, percentage, "Computed percentage");

    Ok(PercentageResult {
        percentage,
        grade: grade_from_percentage(percentage),
    })
}

/// Percentage over several subjects: sum of obtained over sum of totals.
pub fn compute_aggregate_percentage(entries: &[MarksEntry]) -> Result<PercentageResult> {
    validate_non_empty("subjects", entries)?;

    let mut total_obtained = 0.0;
    let mut total_maximum = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        validate_entry(index, entry)?;
        total_obtained += entry.obtained;
        total_maximum += entry.total;
    }

    ensure_representable("total obtained marks", total_obtained)?;
    ensure_representable("total marks", total_maximum)?;
    if total_maximum == 0.0 {
        return Err(CalcError::degenerate("total marks"));
    }

    let percentage = total_obtained / total_maximum * 100.0;
    ensure_representable("percentage", percentage)?;
    tracing::debug!(
        subjects = entries.len(),
        total_obtained,
        total_maximum,
        percentage,
        "Computed aggregate percentage"
    );

    Ok(PercentageResult {
        percentage,
        grade: grade_from_percentage(percentage),
    })
}

fn validate_entry(index: usize, entry: &MarksEntry) -> Result<()> {
    let obtained_field = format!("subject {} obtained marks", index + 1);
    let total_field = format!("subject {} total marks", index + 1);

    validate_non_negative(&obtained_field, entry.obtained)?;
    validate_non_negative(&total_field, entry.total)?;
    if entry.obtained > entry.total {
        return Err(CalcError::out_of_range(
            &obtained_field,
            entry.obtained,
            "obtained marks cannot exceed total marks",
        ));
    }
    Ok(())
}
