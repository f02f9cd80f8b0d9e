use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, Subcommand};
use serde::Serialize;

use super::{
    AppState, ProjectPayload, RetirementPayload, build_project_response,
    build_retirement_response, project_request_from_payload, retirement_inputs_from_payload,
};
use crate::core::FallbackRates;
use crate::scrape::{HttpFetcher, error_chain, fetch_fund_rates};

#[derive(Parser, Debug)]
#[command(
    name = "fund-yield",
    about = "Scrapes published fund yields and projects investment growth and retirement needs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the rate and projection API
    Serve {
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    /// Scrape the current rate of every fund and print them
    Rates,
    /// Project growth of an investment across all funds
    Project {
        #[arg(long, help = "Amount to invest")]
        investment: f64,
        #[arg(long, default_value = "1y", help = "Horizon: 1d, 7d, 1m, 3m, 6m or 1y")]
        period: String,
        #[arg(long, help = "Skip scraping and use the fallback rates")]
        offline: bool,
    },
    /// Total needed to cover inflating expenses over a retirement
    Retire {
        #[arg(long)]
        monthly_expenses: f64,
        #[arg(long, help = "Annual inflation rate in percent, e.g. 3.5")]
        inflation_rate: f64,
        #[arg(long)]
        years: u32,
    },
}

pub async fn run_cli(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve { host, port } => {
            let state = AppState {
                fetcher: http_fetcher()?,
                fallback: FallbackRates::default(),
            };
            super::run_http_server(SocketAddr::new(host, port), state)
                .await
                .map_err(|e| format!("Server error: {e}"))
        }
        Command::Rates => {
            let rates = fetch_fund_rates(&http_fetcher()?)
                .await
                .map_err(|e| format!("Error fetching fund rates: {}", error_chain(&e)))?;
            print_json(&rates.to_response())
        }
        Command::Project {
            investment,
            period,
            offline,
        } => {
            let mut request = project_request_from_payload(ProjectPayload {
                investment: Some(investment),
                period: Some(period),
                ..ProjectPayload::default()
            })?;
            request.offline = offline;
            let state = AppState {
                fetcher: http_fetcher()?,
                fallback: FallbackRates::default(),
            };
            print_json(&build_project_response(&state, request).await)
        }
        Command::Retire {
            monthly_expenses,
            inflation_rate,
            years,
        } => {
            let inputs = retirement_inputs_from_payload(RetirementPayload {
                monthly_expenses: Some(monthly_expenses),
                inflation_rate: Some(inflation_rate),
                years: Some(years),
            })?;
            print_json(&build_retirement_response(&inputs))
        }
    }
}

fn http_fetcher() -> Result<HttpFetcher, String> {
    HttpFetcher::new().map_err(|e| format!("Failed to build HTTP client: {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("JSON error: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_to_port_3001_on_all_interfaces() {
        let cli = Cli::try_parse_from(["fund-yield", "serve"]).expect("valid args");
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(port, 3001);
                assert!(host.is_unspecified());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn project_parses_period_and_offline_flag() {
        let cli = Cli::try_parse_from([
            "fund-yield",
            "project",
            "--investment",
            "1000000",
            "--period",
            "3m",
            "--offline",
        ])
        .expect("valid args");
        match cli.command {
            Command::Project {
                investment,
                period,
                offline,
            } => {
                assert_eq!(investment, 1_000_000.0);
                assert_eq!(period, "3m");
                assert!(offline);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn retire_requires_years() {
        let err = Cli::try_parse_from([
            "fund-yield",
            "retire",
            "--monthly-expenses",
            "10000000",
            "--inflation-rate",
            "3",
        ])
        .expect_err("years is mandatory");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[tokio::test]
    async fn offline_projection_uses_fallback_without_warning() {
        let mut request = project_request_from_payload(ProjectPayload {
            investment: Some(1_000_000.0),
            period: Some("1y".to_string()),
            ..ProjectPayload::default()
        })
        .expect("valid request");
        request.offline = true;
        let state = AppState {
            fetcher: crate::scrape::stub::StubFetcher::default(),
            fallback: FallbackRates::default(),
        };

        let response = build_project_response(&state, request).await;
        assert!(response.warning.is_none());
        assert!(state.fetcher.calls().is_empty());
        assert_eq!(response.best_funds, vec![crate::core::FundId::AvristPrimeIncome]);
        let json = serde_json::to_value(&response).expect("serializes");
        assert_eq!(json["ratesOrigin"], "offline");
    }
}
