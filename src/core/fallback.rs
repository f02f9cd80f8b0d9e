use serde::Serialize;

use super::types::{FundId, RatesResponse};

pub const FETCH_FAILED_WARNING: &str = "Failed to fetch fund rates. Please try again later.";

/// Static per-fund rates used whenever a live rate is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackRates {
    pub capital_fixed_income: f64,
    pub sucorinvest_monthly_income: f64,
    pub avrist_prime_income: f64,
    pub insight_money: f64,
}

impl Default for FallbackRates {
    fn default() -> Self {
        Self {
            capital_fixed_income: 7.00,
            sucorinvest_monthly_income: 7.50,
            avrist_prime_income: 7.75,
            insight_money: 7.00,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRate {
    pub fund: FundId,
    pub rate: f64,
    pub source: RateSource,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRates {
    pub rates: Vec<ResolvedRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ResolvedRates {
    pub fn pairs(&self) -> Vec<(FundId, f64)> {
        self.rates.iter().map(|r| (r.fund, r.rate)).collect()
    }

    pub fn get(&self, fund: FundId) -> Option<&ResolvedRate> {
        self.rates.iter().find(|r| r.fund == fund)
    }
}

impl FallbackRates {
    pub fn rate_for(&self, fund: FundId) -> f64 {
        match fund {
            FundId::CapitalFixedIncome => self.capital_fixed_income,
            FundId::SucorinvestMonthlyIncome => self.sucorinvest_monthly_income,
            FundId::AvristPrimeIncome => self.avrist_prime_income,
            FundId::InsightMoney => self.insight_money,
        }
    }

    /// Resolves one usable rate per fund. `None` means the rate source could not be
    /// reached at all. Within a response, absent, NaN and zero values are all treated as
    /// missing, so a genuine 0% rate also falls back.
    pub fn resolve(&self, response: Option<&RatesResponse>) -> ResolvedRates {
        let rates = FundId::ALL
            .iter()
            .map(|&fund| match response.and_then(|r| r.get(fund)) {
                Some(rate) if !is_missing(rate) => ResolvedRate {
                    fund,
                    rate,
                    source: RateSource::Live,
                },
                _ => ResolvedRate {
                    fund,
                    rate: self.rate_for(fund),
                    source: RateSource::Fallback,
                },
            })
            .collect();
        ResolvedRates {
            rates,
            warning: response
                .is_none()
                .then(|| FETCH_FAILED_WARNING.to_string()),
        }
    }
}

fn is_missing(rate: f64) -> bool {
    rate == 0.0 || rate.is_nan()
}
