use crate::core::{FundId, RatesResponse};

use super::error::RateError;
use super::extract::extract;
use super::fetch::PageFetcher;
use super::funds::{FUNDS, FundDescriptor};
use super::normalize::normalize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundRate {
    pub fund: FundId,
    pub rate: f64,
}

/// Rates for every requested fund, in descriptor order. A rate may be NaN when the
/// located text was not numeric.
#[derive(Debug, Clone, Default)]
pub struct RateMap {
    rates: Vec<FundRate>,
}

impl RateMap {
    pub fn get(&self, fund: FundId) -> Option<f64> {
        self.rates.iter().find(|r| r.fund == fund).map(|r| r.rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FundRate> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn to_response(&self) -> RatesResponse {
        let mut response = RatesResponse::default();
        for rate in &self.rates {
            response.set(rate.fund, rate.rate);
        }
        response
    }
}

/// Fetches, locates and normalizes each fund's rate, one fund at a time in slice order.
///
/// The first fetch or extraction failure aborts the run and no partial map is returned;
/// funds after the failing one are never requested. Unparseable rate text does not
/// abort, it is recorded as NaN.
pub async fn aggregate_rates<F: PageFetcher>(
    fetcher: &F,
    funds: &[FundDescriptor],
) -> Result<RateMap, RateError> {
    let mut rates = Vec::with_capacity(funds.len());
    for descriptor in funds {
        let body = fetcher
            .fetch(descriptor.url)
            .await
            .map_err(|source| RateError::Fetch {
                fund: descriptor.id,
                source,
            })?;
        let text = extract(&body, descriptor.locator).map_err(|source| RateError::Extract {
            fund: descriptor.id,
            source,
        })?;
        rates.push(FundRate {
            fund: descriptor.id,
            rate: normalize(&text),
        });
    }
    Ok(RateMap { rates })
}

pub async fn fetch_fund_rates<F: PageFetcher>(fetcher: &F) -> Result<RateMap, RateError> {
    aggregate_rates(fetcher, &FUNDS).await
}
