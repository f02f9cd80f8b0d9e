use super::types::{FundId, GrowthResult, Period, RetirementInputs, RetirementResult, RetirementYear};

const DAYS_PER_YEAR: f64 = 365.0;

/// Compounds `investment` at an annualized `rate_percent` over the period's day count,
/// scaled as a fraction of a 365-day year.
pub fn project(investment: f64, rate_percent: f64, period: Period) -> f64 {
    let annual_rate = rate_percent / 100.0;
    investment * (1.0 + annual_rate).powf(f64::from(period.days()) / DAYS_PER_YEAR)
}

/// Same as [`project`] but keyed by the period code (`1d`, `7d`, `1m`, `3m`, `6m`, `1y`).
/// An unrecognised code projects to zero rather than to the invested amount.
pub fn project_code(investment: f64, rate_percent: f64, period_code: &str) -> f64 {
    match Period::from_code(period_code) {
        Some(period) => project(investment, rate_percent, period),
        None => 0.0,
    }
}

pub fn percentage_growth(investment: f64, final_amount: f64) -> f64 {
    (final_amount - investment) / investment * 100.0
}

/// Projects every fund over the same horizon, in the order given, and flags the best
/// performer(s). Amounts are reported to the cent.
pub fn project_funds(
    investment: f64,
    period_code: &str,
    rates: &[(FundId, f64)],
) -> Vec<GrowthResult> {
    let mut results: Vec<GrowthResult> = rates
        .iter()
        .map(|&(fund, rate)| {
            let final_amount = project_code(investment, rate, period_code);
            GrowthResult {
                fund,
                final_amount: round_cents(final_amount),
                percentage_growth: round_cents(percentage_growth(investment, final_amount)),
                is_max: false,
            }
        })
        .collect();
    flag_max_growth(&mut results);
    results
}

// Equality against the maximum: every tied entry is flagged. A NaN growth poisons the
// maximum, so nothing is flagged in that case.
fn flag_max_growth(results: &mut [GrowthResult]) {
    if results.iter().any(|r| r.percentage_growth.is_nan()) {
        return;
    }
    let max_growth = results
        .iter()
        .map(|r| r.percentage_growth)
        .fold(f64::NEG_INFINITY, f64::max);
    for result in results.iter_mut() {
        result.is_max = result.percentage_growth == max_growth;
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn retirement_schedule(inputs: &RetirementInputs) -> Vec<RetirementYear> {
    let growth = 1.0 + inputs.inflation_rate / 100.0;
    let mut annual_expenses = inputs.monthly_expenses * 12.0;
    let mut cumulative_total = 0.0;
    let mut schedule = Vec::with_capacity(inputs.years as usize);
    for year in 1..=inputs.years {
        cumulative_total += annual_expenses;
        schedule.push(RetirementYear {
            year,
            annual_expenses,
            cumulative_total,
        });
        annual_expenses *= growth;
    }
    schedule
}

/// Lump sum needed to cover `years` of expenses, where year one is un-inflated and
/// each later year compounds inflation once more. Zero years needs nothing.
pub fn project_retirement(monthly_expenses: f64, inflation_rate: f64, years: u32) -> f64 {
    run_retirement(&RetirementInputs {
        monthly_expenses,
        inflation_rate,
        years,
    })
    .total_amount_needed
}

pub fn run_retirement(inputs: &RetirementInputs) -> RetirementResult {
    let schedule = retirement_schedule(inputs);
    let total_amount_needed = schedule.last().map_or(0.0, |y| y.cumulative_total);
    RetirementResult {
        total_amount_needed,
        schedule,
    }
}
