//! Live rate collection for the fund pages.
//!
//! The issuer publishes yields only inside rendered HTML, so each rate is read by
//! structural position: fetch the page, locate the cell, normalize its text. A fetch or
//! locate failure on any fund fails the whole batch; unparseable text becomes NaN.

mod aggregate;
mod error;
mod extract;
mod fetch;
mod funds;
mod normalize;
#[cfg(test)]
pub(crate) mod stub;

pub use aggregate::{FundRate, RateMap, aggregate_rates, fetch_fund_rates};
pub use error::{ExtractError, FetchError, RateError, error_chain};
pub use extract::{FieldLocator, StructuralPath, extract};
pub use fetch::{HttpFetcher, PageFetcher, USER_AGENT};
pub use funds::{FUNDS, FundDescriptor, MAKMUR_RATE_PATH, descriptor};
pub use normalize::normalize;
