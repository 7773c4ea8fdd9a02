use crate::adapters::csv_input::{read_courses_file, read_marks_file};
use crate::config::{CliConfig, Command, Settings};
use crate::core::coin::{CoinTosser, MAX_FLIPS_PER_CALL};
use crate::core::gpa::compute_gpa;
use crate::core::loan::compute_loan;
use crate::core::percentage::{compute_aggregate_percentage, compute_simple_percentage};
use crate::core::statistics::compute_statistics;
use crate::domain::model::{
    CoinSide, CourseEntry, GpaResult, LoanResult, MarksEntry, PercentageResult, StatisticsResult,
    TossStats,
};
use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::format::{format_currency, format_fixed, format_mode, format_percent};
use crate::utils::parse::{parse_course_entry, parse_marks_entry, parse_number, parse_sample};
use crate::utils::validation::validate_range;
use serde::Serialize;

/// Runs one subcommand and returns the text to print.
pub fn run(cli: &CliConfig) -> Result<String> {
    let settings = cli.settings()?;
    let renderer = Renderer::new(&settings, cli.json);

    match &cli.command {
        Command::Loan {
            principal,
            rate,
            months,
        } => {
            let result = compute_loan(
                parse_number("principal", principal)?,
                parse_number("annual rate", rate)?,
                *months,
            )?;
            renderer.loan(&result)
        }
        Command::Percent { obtained, total } => {
            let result = compute_simple_percentage(
                parse_number("obtained marks", obtained)?,
                parse_number("total marks", total)?,
            )?;
            renderer.percentage(&result)
        }
        Command::Aggregate { subjects, file } => {
            let mut entries: Vec<MarksEntry> = match file {
                Some(path) => read_marks_file(path)?,
                None => Vec::new(),
            };
            for subject in subjects {
                entries.push(parse_marks_entry(subject)?);
            }
            let result = compute_aggregate_percentage(&entries)?;
            renderer.percentage(&result)
        }
        Command::Gpa {
            mode,
            courses,
            file,
            lenient_grades,
        } => {
            let settings = settings.clone().with_lenient_grades(*lenient_grades);
            let lenient = settings.lenient_grades();
            let mut entries: Vec<CourseEntry> = match file {
                Some(path) => read_courses_file(path, lenient)?,
                None => Vec::new(),
            };
            for course in courses {
                entries.push(parse_course_entry(course, lenient)?);
            }
            let result = compute_gpa(&entries, *mode)?;
            renderer.gpa(&result)
        }
        Command::Stats { values, file } => {
            let mut text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => String::new(),
            };
            for value in values {
                text.push(' ');
                text.push_str(value);
            }
            let sample = parse_sample(&text)?;
            let result = compute_statistics(&sample)?;
            renderer.statistics(&result)
        }
        Command::Toss { count, seed } => {
            validate_range("toss count", *count, 1, MAX_FLIPS_PER_CALL)?;
            let settings = settings.clone().with_coin_seed(*seed);
            let sides = match settings.coin_seed() {
                Some(seed) => toss(CoinTosser::seeded(seed), *count),
                None => toss(CoinTosser::new(), *count),
            };
            renderer.toss(&sides.0, &sides.1)
        }
    }
}

fn toss<R: rand::Rng>(mut tosser: CoinTosser<R>, count: u64) -> (Vec<CoinSide>, TossStats) {
    let sides = tosser.flip_many(count);
    (sides, tosser.stats())
}

struct Renderer<'a> {
    settings: &'a Settings,
    json: bool,
}

#[derive(Serialize)]
struct TossReport<'a> {
    flips: &'a [CoinSide],
    heads: u64,
    tails: u64,
    heads_percent: f64,
    tails_percent: f64,
}

impl<'a> Renderer<'a> {
    fn new(settings: &'a Settings, json: bool) -> Self {
        Self { settings, json }
    }

    fn emit<T: Serialize>(&self, value: &T, lines: Vec<(&str, String)>) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(value)?);
        }
        let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        Ok(lines
            .into_iter()
            .map(|(label, value)| format!("{:<width$}  {}", label, value, width = width))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn loan(&self, result: &LoanResult) -> Result<String> {
        let symbol = self.settings.currency_symbol();
        let outcome = if result.profit_loss < 0.0 { "loss" } else { "even" };
        self.emit(
            result,
            vec![
                ("Monthly Payment", format_currency(result.monthly_payment, symbol)),
                ("Total Payment", format_currency(result.total_payment, symbol)),
                ("Total Interest", format_currency(result.total_interest, symbol)),
                (
                    "Profit/Loss",
                    format!("{} ({})", format_currency(result.profit_loss.abs(), symbol), outcome),
                ),
            ],
        )
    }

    fn percentage(&self, result: &PercentageResult) -> Result<String> {
        self.emit(
            result,
            vec![
                (
                    "Percentage",
                    format_percent(result.percentage, self.settings.precision()),
                ),
                ("Grade", result.grade.to_string()),
            ],
        )
    }

    fn gpa(&self, result: &GpaResult) -> Result<String> {
        self.emit(
            result,
            vec![
                (result.mode.label(), format_fixed(result.gpa, self.settings.precision())),
                (
                    "Total Credits",
                    format_fixed(result.total_credits, self.settings.precision()),
                ),
            ],
        )
    }

    fn statistics(&self, result: &StatisticsResult) -> Result<String> {
        let p = self.settings.precision();
        self.emit(
            result,
            vec![
                ("Mean", format_fixed(result.mean, p)),
                ("Median", format_fixed(result.median, p)),
                ("Mode", format_mode(&result.mode, p)),
                ("Range", format_fixed(result.range, p)),
                ("Standard Deviation", format_fixed(result.standard_deviation, p)),
                ("Variance", format_fixed(result.variance, p)),
                ("Sum", format_fixed(result.sum, p)),
                ("Count", result.count.to_string()),
            ],
        )
    }

    fn toss(&self, sides: &[CoinSide], stats: &TossStats) -> Result<String> {
        let report = TossReport {
            flips: sides,
            heads: stats.heads,
            tails: stats.tails,
            heads_percent: stats.heads_percent(),
            tails_percent: stats.tails_percent(),
        };
        let last = sides
            .last()
            .map(|side| side.to_string())
            .unwrap_or_else(|| "-".to_string());
        self.emit(
            &report,
            vec![
                ("Result", last),
                ("Flips", stats.flip_count().to_string()),
                (
                    "Heads",
                    format!("{} ({})", stats.heads, format_percent(stats.heads_percent(), 1)),
                ),
                (
                    "Tails",
                    format!("{} ({})", stats.tails, format_percent(stats.tails_percent(), 1)),
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> Result<String> {
        let mut argv = vec!["multi-calc"];
        argv.extend_from_slice(args);
        run(&CliConfig::parse_from(argv))
    }

    #[test]
    fn test_loan_defaults() {
        let output = run_args(&["loan"]).unwrap();
        assert!(output.contains("Monthly Payment  $299.71"));
        assert!(output.contains("Total Interest   $789.52"));
        assert!(output.contains("(loss)"));
    }

    #[test]
    fn test_percent_with_grade() {
        let output = run_args(&["percent", "45", "50"]).unwrap();
        assert!(output.contains("90.00%"));
        assert!(output.contains("A+"));
    }

    #[test]
    fn test_gpa_letters() {
        let output = run_args(&["gpa", "3:A", "3:B"]).unwrap();
        assert!(output.contains("CGPA"));
        assert!(output.contains("3.50"));
    }

    #[test]
    fn test_gpa_unknown_letter_needs_lenient_flag() {
        assert!(run_args(&["gpa", "3:A", "3:E"]).is_err());
        let output = run_args(&["gpa", "--lenient-grades", "3:A", "3:E"]).unwrap();
        assert!(output.contains("2.00"));
    }

    #[test]
    fn test_stats_json() {
        let output = run_args(&["--json", "stats", "5,10,15", "20", "25"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 5);
        assert_eq!(value["mean"], 15.0);
        assert_eq!(value["mode"], "no_mode");
    }

    #[test]
    fn test_stats_precision_override() {
        let output = run_args(&["--precision", "3", "stats", "5", "10", "15", "20", "25"]).unwrap();
        assert!(output.contains("7.071"));
    }

    #[test]
    fn test_toss_seeded_is_reproducible() {
        let first = run_args(&["toss", "-n", "20", "--seed", "3"]).unwrap();
        let second = run_args(&["toss", "-n", "20", "--seed", "3"]).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Flips"));
    }

    #[test]
    fn test_toss_count_is_bounded() {
        let too_many = (MAX_FLIPS_PER_CALL + 1).to_string();
        assert!(matches!(
            run_args(&["toss", "-n", &too_many, "--seed", "1"]),
            Err(crate::utils::error::CalcError::OutOfRange { .. })
        ));
        assert!(run_args(&["toss", "-n", "0"]).is_err());
        assert!(run_args(&["toss", "-n", "1", "--seed", "1"]).is_ok());
    }

    #[test]
    fn test_aggregate_zero_totals_fail() {
        assert!(run_args(&["aggregate", "0/0", "0/0"]).is_err());
        assert!(run_args(&["aggregate"]).is_err());
    }
}
