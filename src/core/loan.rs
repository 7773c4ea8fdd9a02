use crate::domain::model::{LoanInput, LoanResult};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_negative, validate_positive, Validate};

/// Fixed-rate, fixed-term amortized loan payment.
///
/// The monthly rate is `annual_rate_percent / 100 / 12`. A zero rate divides
/// the principal evenly over the term and accrues no interest.
pub fn compute_loan(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<LoanResult> {
    LoanInput {
        principal,
        annual_rate_percent,
        term_months,
    }
    .compute()
}

impl Validate for LoanInput {
    fn validate(&self) -> Result<()> {
        validate_positive("principal", self.principal)?;
        validate_non_negative("annual rate", self.annual_rate_percent)?;
        if self.term_months == 0 {
            return Err(CalcError::out_of_range(
                "loan term",
                self.term_months,
                "term must be at least one month",
            ));
        }
        Ok(())
    }
}

impl LoanInput {
    pub fn compute(&self) -> Result<LoanResult> {
        self.validate()?;

        let p = self.principal;
        let n = self.term_months as f64;
        let r = self.annual_rate_percent / 100.0 / 12.0;

        let result = if r == 0.0 {
            let monthly_payment = p / n;
            LoanResult {
                monthly_payment,
                total_payment: monthly_payment * n,
                total_interest: 0.0,
                profit_loss: 0.0,
            }
        } else {
            // (1+r)^n - 1 via exp_m1/ln_1p keeps tiny rates from cancelling to zero.
            let growth_minus_one = (n * r.ln_1p()).exp_m1();
            let growth = growth_minus_one + 1.0;
            let monthly_payment = p * (r * growth) / growth_minus_one;
            let total_payment = monthly_payment * n;
            let total_interest = total_payment - p;
            LoanResult {
                monthly_payment,
                total_payment,
                total_interest,
                profit_loss: -total_interest,
            }
        };

        let representable = [
            result.monthly_payment,
            result.total_payment,
            result.total_interest,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !representable {
            return Err(CalcError::out_of_range(
                "loan",
                format!("{} @ {}% x {}", p, self.annual_rate_percent, self.term_months),
                "payment is not representable for these inputs",
            ));
        }

        tracing::debug!(
            principal = p,
            rate = self.annual_rate_percent,
            term = self.term_months,
            monthly_payment = result.monthly_payment,
            "Computed loan"
        );

        Ok(result)
    }
}
