use crate::core::{FundCategory, FundId};

use super::extract::{FieldLocator, StructuralPath};

/// Rate cell on a makmur.id fund page: sixth stat block, second value inside it.
pub const MAKMUR_RATE_PATH: StructuralPath = StructuralPath {
    outer: ".i16srfg8",
    outer_index: 5,
    inner: ".t1fc9lxw",
    inner_index: 1,
};

#[derive(Debug, Clone, Copy)]
pub struct FundDescriptor {
    pub id: FundId,
    pub name: &'static str,
    pub category: FundCategory,
    pub url: &'static str,
    pub locator: &'static (dyn FieldLocator + Sync),
}

pub static FUNDS: [FundDescriptor; 4] = [
    FundDescriptor {
        id: FundId::CapitalFixedIncome,
        name: "Capital Fixed Income Fund",
        category: FundCategory::FixedIncome,
        url: "https://www.makmur.id/id/reksadana/pendapatan-tetap/capital-fixed-income-fund-09e63e2f2630",
        locator: &MAKMUR_RATE_PATH,
    },
    FundDescriptor {
        id: FundId::SucorinvestMonthlyIncome,
        name: "Sucorinvest Monthly Income Fund",
        category: FundCategory::FixedIncome,
        url: "https://www.makmur.id/id/reksadana/pendapatan-tetap/sucorinvest-monthly-income-fund-8717da0cc7a0",
        locator: &MAKMUR_RATE_PATH,
    },
    FundDescriptor {
        id: FundId::AvristPrimeIncome,
        name: "Avrist Prime Income Fund",
        category: FundCategory::FixedIncome,
        url: "https://www.makmur.id/id/reksadana/pendapatan-tetap/avrist-prime-income-fund-3518eb1f993d",
        locator: &MAKMUR_RATE_PATH,
    },
    FundDescriptor {
        id: FundId::InsightMoney,
        name: "Insight Money Fund",
        category: FundCategory::MoneyMarket,
        url: "https://www.makmur.id/id/reksadana/pasar-uang/insight-money-20ff31c73b9a",
        locator: &MAKMUR_RATE_PATH,
    },
];

pub fn descriptor(fund: FundId) -> &'static FundDescriptor {
    match fund {
        FundId::CapitalFixedIncome => &FUNDS[0],
        FundId::SucorinvestMonthlyIncome => &FUNDS[1],
        FundId::AvristPrimeIncome => &FUNDS[2],
        FundId::InsightMoney => &FUNDS[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_follow_fund_order() {
        let ids: Vec<FundId> = FUNDS.iter().map(|d| d.id).collect();
        assert_eq!(ids, FundId::ALL.to_vec());
        for fund in FundId::ALL {
            assert_eq!(descriptor(fund).id, fund);
        }
    }

    #[test]
    fn only_insight_is_money_market() {
        let money_market: Vec<FundId> = FUNDS
            .iter()
            .filter(|d| d.category == FundCategory::MoneyMarket)
            .map(|d| d.id)
            .collect();
        assert_eq!(money_market, vec![FundId::InsightMoney]);
        assert!(FUNDS.iter().all(|d| d.url.starts_with("https://www.makmur.id/id/reksadana/")));
    }
}
