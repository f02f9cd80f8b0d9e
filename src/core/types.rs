use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FundId {
    CapitalFixedIncome,
    SucorinvestMonthlyIncome,
    AvristPrimeIncome,
    InsightMoney,
}

impl FundId {
    pub const ALL: [FundId; 4] = [
        FundId::CapitalFixedIncome,
        FundId::SucorinvestMonthlyIncome,
        FundId::AvristPrimeIncome,
        FundId::InsightMoney,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FundId::CapitalFixedIncome => "capitalFixedIncome",
            FundId::SucorinvestMonthlyIncome => "sucorinvestMonthlyIncome",
            FundId::AvristPrimeIncome => "avristPrimeIncome",
            FundId::InsightMoney => "insightMoney",
        }
    }
}

impl std::fmt::Display for FundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundCategory {
    MoneyMarket,
    FixedIncome,
}

/// Investment horizon offered by the growth calculator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::OneDay,
        Period::SevenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
    ];

    pub fn from_code(code: &str) -> Option<Period> {
        Period::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::SevenDays => "7d",
            Period::OneMonth => "1m",
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Period::OneDay => 1,
            Period::SevenDays => 7,
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResult {
    pub fund: FundId,
    pub final_amount: f64,
    pub percentage_growth: f64,
    pub is_max: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RetirementInputs {
    pub monthly_expenses: f64,
    pub inflation_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementYear {
    pub year: u32,
    pub annual_expenses: f64,
    pub cumulative_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub total_amount_needed: f64,
    pub schedule: Vec<RetirementYear>,
}

/// Wire shape of the rate endpoint. Fields are optional so a consumer can read a partial
/// or foreign payload; a NaN rate serializes as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatesResponse {
    pub capital_fixed_income_rate: Option<f64>,
    pub sucorinvest_monthly_income_rate: Option<f64>,
    pub avrist_prime_income_rate: Option<f64>,
    pub insight_money_rate: Option<f64>,
}

impl RatesResponse {
    pub fn get(&self, fund: FundId) -> Option<f64> {
        match fund {
            FundId::CapitalFixedIncome => self.capital_fixed_income_rate,
            FundId::SucorinvestMonthlyIncome => self.sucorinvest_monthly_income_rate,
            FundId::AvristPrimeIncome => self.avrist_prime_income_rate,
            FundId::InsightMoney => self.insight_money_rate,
        }
    }

    pub fn set(&mut self, fund: FundId, rate: f64) {
        let slot = match fund {
            FundId::CapitalFixedIncome => &mut self.capital_fixed_income_rate,
            FundId::SucorinvestMonthlyIncome => &mut self.sucorinvest_monthly_income_rate,
            FundId::AvristPrimeIncome => &mut self.avrist_prime_income_rate,
            FundId::InsightMoney => &mut self.insight_money_rate,
        };
        *slot = Some(rate);
    }

    pub fn is_empty(&self) -> bool {
        FundId::ALL.iter().all(|fund| self.get(*fund).is_none())
    }
}
