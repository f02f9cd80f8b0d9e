mod engine;
mod fallback;
mod types;

pub use engine::{
    percentage_growth, project, project_code, project_funds, project_retirement,
    retirement_schedule, run_retirement,
};
pub use fallback::{FETCH_FAILED_WARNING, FallbackRates, RateSource, ResolvedRate, ResolvedRates};
pub use types::{
    FundCategory, FundId, GrowthResult, Period, RatesResponse, RetirementInputs,
    RetirementResult, RetirementYear,
};
