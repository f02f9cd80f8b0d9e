mod cli;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::core::{
    FallbackRates, FundCategory, FundId, GrowthResult, Period, RatesResponse, ResolvedRate,
    RetirementInputs, RetirementResult, project_funds, run_retirement,
};
use crate::scrape::{PageFetcher, descriptor, error_chain, fetch_fund_rates};

pub use cli::{Cli, Command, run_cli};

const RATE_FETCH_ERROR: &str = "Error fetching fund rates";

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState<F> {
    pub fetcher: F,
    pub fallback: FallbackRates,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum RatesOrigin {
    /// Rates supplied by the caller.
    Request,
    Live,
    /// Scraping failed; every fund uses its fallback.
    Unavailable,
    Offline,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    investment: Option<f64>,
    period: Option<String>,

    capital_fixed_income_rate: Option<f64>,
    sucorinvest_monthly_income_rate: Option<f64>,
    avrist_prime_income_rate: Option<f64>,
    insight_money_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    monthly_expenses: Option<f64>,
    inflation_rate: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug)]
struct ProjectRequest {
    investment: f64,
    period: String,
    overrides: Option<RatesResponse>,
    offline: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FundGrowth {
    #[serde(flatten)]
    growth: GrowthResult,
    name: &'static str,
    category: FundCategory,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    investment: f64,
    period: String,
    period_days: Option<u32>,
    rates_origin: RatesOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    rates: Vec<ResolvedRate>,
    best_funds: Vec<FundId>,
    results: GrowthByCategory,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthByCategory {
    money_market: Vec<FundGrowth>,
    fixed_income: Vec<FundGrowth>,
}

impl GrowthByCategory {
    fn push(&mut self, growth: FundGrowth) {
        match growth.category {
            FundCategory::MoneyMarket => self.money_market.push(growth),
            FundCategory::FixedIncome => self.fixed_income.push(growth),
        }
    }
}

pub fn router<F>(state: Arc<AppState<F>>) -> Router
where
    F: PageFetcher + Send + Sync + 'static,
{
    Router::new()
        .route("/scrape-fund-rate", get(rates_handler::<F>))
        .route(
            "/api/project",
            get(project_get_handler::<F>).post(project_post_handler::<F>),
        )
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_http_server<F>(addr: SocketAddr, state: AppState<F>) -> std::io::Result<()>
where
    F: PageFetcher + Send + Sync + 'static,
{
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(addr).await?;
    println!("Fund rate API listening on http://{addr}");
    println!("Rates: http://127.0.0.1:{}/scrape-fund-rate", addr.port());

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn rates_handler<F>(State(state): State<Arc<AppState<F>>>) -> Response
where
    F: PageFetcher + Send + Sync + 'static,
{
    match fetch_fund_rates(&state.fetcher).await {
        Ok(rates) => json_response(StatusCode::OK, rates.to_response()),
        Err(e) => {
            eprintln!("{RATE_FETCH_ERROR}: {}", error_chain(&e));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, RATE_FETCH_ERROR)
        }
    }
}

async fn project_get_handler<F>(
    State(state): State<Arc<AppState<F>>>,
    Query(payload): Query<ProjectPayload>,
) -> Response
where
    F: PageFetcher + Send + Sync + 'static,
{
    project_handler_impl(&state, payload).await
}

async fn project_post_handler<F>(
    State(state): State<Arc<AppState<F>>>,
    Json(payload): Json<ProjectPayload>,
) -> Response
where
    F: PageFetcher + Send + Sync + 'static,
{
    project_handler_impl(&state, payload).await
}

async fn project_handler_impl<F>(state: &AppState<F>, payload: ProjectPayload) -> Response
where
    F: PageFetcher + Send + Sync + 'static,
{
    let request = match project_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    json_response(StatusCode::OK, build_project_response(state, request).await)
}

async fn retirement_get_handler(Query(payload): Query<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

async fn retirement_post_handler(Json(payload): Json<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

fn retirement_handler_impl(payload: RetirementPayload) -> Response {
    match retirement_inputs_from_payload(payload) {
        Ok(inputs) => json_response(StatusCode::OK, build_retirement_response(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn project_request_from_json(json: &str) -> Result<ProjectRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    project_request_from_payload(payload)
}

fn project_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest, String> {
    let investment = payload
        .investment
        .ok_or_else(|| "investment is required".to_string())?;
    if !investment.is_finite() || investment <= 0.0 {
        return Err("investment must be a positive amount".to_string());
    }
    let period = payload
        .period
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "period is required (1d, 7d, 1m, 3m, 6m or 1y)".to_string())?;

    let mut overrides = RatesResponse {
        capital_fixed_income_rate: payload.capital_fixed_income_rate,
        sucorinvest_monthly_income_rate: payload.sucorinvest_monthly_income_rate,
        avrist_prime_income_rate: payload.avrist_prime_income_rate,
        insight_money_rate: payload.insight_money_rate,
    };
    for fund in FundId::ALL {
        if let Some(rate) = overrides.get(fund).filter(|r| r.is_infinite()) {
            return Err(format!("{fund} rate must be finite, got {rate}"));
        }
    }
    if overrides.is_empty() {
        return Ok(ProjectRequest {
            investment,
            period,
            overrides: None,
            offline: false,
        });
    }
    // Supplied rates are taken as a complete response; unsupplied funds fall back.
    for fund in FundId::ALL {
        if overrides.get(fund).is_none() {
            overrides.set(fund, f64::NAN);
        }
    }
    Ok(ProjectRequest {
        investment,
        period,
        overrides: Some(overrides),
        offline: false,
    })
}

async fn build_project_response<F: PageFetcher>(
    state: &AppState<F>,
    request: ProjectRequest,
) -> ProjectResponse {
    let (response, origin) = match request.overrides {
        Some(overrides) => (Some(overrides), RatesOrigin::Request),
        None if request.offline => (Some(RatesResponse::default()), RatesOrigin::Offline),
        None => match fetch_fund_rates(&state.fetcher).await {
            Ok(rates) => (Some(rates.to_response()), RatesOrigin::Live),
            Err(e) => {
                eprintln!("{RATE_FETCH_ERROR}: {}", error_chain(&e));
                (None, RatesOrigin::Unavailable)
            }
        },
    };

    let resolved = state.fallback.resolve(response.as_ref());
    let growth = project_funds(request.investment, &request.period, &resolved.pairs());
    let best_funds = growth.iter().filter(|g| g.is_max).map(|g| g.fund).collect();
    let mut results = GrowthByCategory::default();
    for entry in growth {
        let fund = descriptor(entry.fund);
        results.push(FundGrowth {
            growth: entry,
            name: fund.name,
            category: fund.category,
        });
    }

    ProjectResponse {
        investment: request.investment,
        period_days: Period::from_code(&request.period).map(Period::days),
        period: request.period,
        rates_origin: origin,
        warning: resolved.warning,
        rates: resolved.rates,
        best_funds,
        results,
    }
}

#[cfg(test)]
fn retirement_inputs_from_json(json: &str) -> Result<RetirementInputs, String> {
    let payload = serde_json::from_str::<RetirementPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    retirement_inputs_from_payload(payload)
}

fn retirement_inputs_from_payload(payload: RetirementPayload) -> Result<RetirementInputs, String> {
    let monthly_expenses = payload
        .monthly_expenses
        .ok_or_else(|| "monthlyExpenses is required".to_string())?;
    if !monthly_expenses.is_finite() || monthly_expenses <= 0.0 {
        return Err("monthlyExpenses must be a positive amount".to_string());
    }
    let inflation_rate = payload
        .inflation_rate
        .ok_or_else(|| "inflationRate is required".to_string())?;
    if !(0.0..=100.0).contains(&inflation_rate) {
        return Err("inflationRate must be between 0 and 100".to_string());
    }
    let years = payload
        .years
        .ok_or_else(|| "years is required".to_string())?;
    if years < 1 {
        return Err("years must be at least 1".to_string());
    }
    Ok(RetirementInputs {
        monthly_expenses,
        inflation_rate,
        years,
    })
}

fn build_retirement_response(inputs: &RetirementInputs) -> RetirementResult {
    run_retirement(inputs)
}
