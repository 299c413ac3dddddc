// ═══════════════════════════════════════════════════════════════════
// Provider Tests — HTTP client URL building, error mapping, trait use
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;

use energy_marketplace_core::errors::CoreError;
use energy_marketplace_core::models::contract::{Contract, ContractListResponse, ContractStatus};
use energy_marketplace_core::models::energy_type::EnergyType;
use energy_marketplace_core::models::filters::ContractFilters;
use energy_marketplace_core::models::metrics::PortfolioMetrics;
use energy_marketplace_core::models::portfolio::PortfolioResponse;
use energy_marketplace_core::models::settings::Settings;
use energy_marketplace_core::providers::http::{error_from_response, HttpMarketplaceClient};
use energy_marketplace_core::providers::traits::MarketplaceApi;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn client_for(url: &str) -> HttpMarketplaceClient {
    let settings = Settings {
        api_base_url: url.to_string(),
        ..Settings::default()
    };
    HttpMarketplaceClient::new(&settings).unwrap()
}

fn default_client() -> HttpMarketplaceClient {
    HttpMarketplaceClient::new(&Settings::default()).unwrap()
}

/// A stand-in that answers every call with the same failure.
struct DownApi;

#[async_trait]
impl MarketplaceApi for DownApi {
    fn name(&self) -> &str {
        "Down"
    }

    async fn list_contracts(&self, _filters: &ContractFilters) -> Result<ContractListResponse, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn get_contract(&self, _contract_id: u64) -> Result<Contract, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn get_portfolio(&self) -> Result<PortfolioResponse, CoreError> {
        Ok(PortfolioResponse {
            items: vec![],
            metrics: PortfolioMetrics::empty(),
        })
    }

    async fn add_portfolio_item(&self, _contract_id: u64) -> Result<(), CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn remove_portfolio_item(&self, _contract_id: u64) -> Result<(), CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn default_settings_build_a_client() {
        let client = default_client();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.name(), "HTTP");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = client_for("https://api.example.com/v1//");
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn non_http_url_is_config_error() {
        let settings = Settings {
            api_base_url: "ftp://example.com".into(),
            ..Settings::default()
        };
        let err = HttpMarketplaceClient::new(&settings).err().unwrap();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn zero_page_size_is_config_error() {
        let settings = Settings {
            page_size: 0,
            ..Settings::default()
        };
        let err = HttpMarketplaceClient::new(&settings).err().unwrap();
        assert!(matches!(err, CoreError::Config(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Listing URL
// ═══════════════════════════════════════════════════════════════════

mod contracts_url {
    use super::*;

    #[test]
    fn no_filters_no_query() {
        let url = default_client().contracts_url(&ContractFilters::default()).unwrap();
        assert_eq!(url, "http://localhost:8000/contracts");
    }

    #[test]
    fn default_listing_view() {
        let filters = ContractFilters {
            limit: Some(20),
            ..ContractFilters::available()
        };
        let url = default_client().contracts_url(&filters).unwrap();
        assert_eq!(url, "http://localhost:8000/contracts?status=Available&limit=20");
    }

    #[test]
    fn repeated_energy_types_and_sort() {
        let filters = ContractFilters {
            energy_type: vec![EnergyType::Solar, EnergyType::NaturalGas],
            price_max: Some(40.0),
            ..ContractFilters::default()
        }
        .with_sort("price_per_mwh", "desc");
        let url = client_for("https://market.example.com/").contracts_url(&filters).unwrap();
        assert_eq!(
            url,
            "https://market.example.com/contracts?energy_type=Solar&energy_type=Natural+Gas\
             &price_max=40&sort_by=price_per_mwh&sort_dir=desc"
        );
    }

    #[test]
    fn dates_and_offset() {
        let filters = ContractFilters {
            delivery_start_min: chrono::NaiveDate::from_ymd_opt(2026, 6, 1),
            status: Some(ContractStatus::Sold),
            offset: Some(40),
            ..ContractFilters::default()
        };
        let url = default_client().contracts_url(&filters).unwrap();
        assert_eq!(
            url,
            "http://localhost:8000/contracts?delivery_start_min=2026-06-01&status=Sold&offset=40"
        );
    }

    #[test]
    fn invalid_filter_is_rejected_before_any_request() {
        let filters = ContractFilters {
            price_min: Some(f64::NAN),
            ..ContractFilters::default()
        };
        let err = default_client().contracts_url(&filters).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Error mapping
// ═══════════════════════════════════════════════════════════════════

mod error_mapping {
    use super::*;

    #[test]
    fn not_found_keeps_detail() {
        let err = error_from_response(404, r#"{"detail":"Contract not in portfolio"}"#);
        assert_eq!(err, CoreError::NotFound("Contract not in portfolio".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn conflict_keeps_detail() {
        let err = error_from_response(409, r#"{"detail":"Contract already in portfolio"}"#);
        assert_eq!(err, CoreError::Conflict("Contract already in portfolio".into()));
    }

    #[test]
    fn other_status_is_remote() {
        let err = error_from_response(503, r#"{"detail":"maintenance"}"#);
        assert_eq!(
            err,
            CoreError::Remote {
                status: 503,
                detail: "maintenance".into()
            }
        );
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let err = error_from_response(500, "Internal Server Error");
        assert_eq!(
            err,
            CoreError::Remote {
                status: 500,
                detail: "HTTP 500".into()
            }
        );
    }

    #[test]
    fn missing_or_empty_detail_falls_back_to_status() {
        assert_eq!(error_from_response(404, "{}"), CoreError::NotFound("HTTP 404".into()));
        assert_eq!(
            error_from_response(404, r#"{"detail":null}"#),
            CoreError::NotFound("HTTP 404".into())
        );
        assert_eq!(
            error_from_response(409, r#"{"detail":""}"#),
            CoreError::Conflict("HTTP 409".into())
        );
        assert_eq!(error_from_response(404, ""), CoreError::NotFound("HTTP 404".into()));
    }

    #[test]
    fn validation_detail_is_kept_as_json() {
        let body = r#"{"detail":[{"loc":["query","limit"],"msg":"ensure this value is less than or equal to 100"}]}"#;
        match error_from_response(422, body) {
            CoreError::Remote { status, detail } => {
                assert_eq!(status, 422);
                assert!(detail.starts_with('['));
                assert!(detail.contains("less than or equal to 100"));
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn every_mapped_error_is_a_remote_failure() {
        for status in [400u16, 404, 409, 422, 500, 502] {
            assert!(error_from_response(status, "").is_remote_failure());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait object usage
// ═══════════════════════════════════════════════════════════════════

mod trait_objects {
    use super::*;

    #[tokio::test]
    async fn implementations_are_interchangeable() {
        let apis: Vec<Box<dyn MarketplaceApi>> = vec![Box::new(default_client()), Box::new(DownApi)];
        let names: Vec<&str> = apis.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["HTTP", "Down"]);

        let portfolio = apis[1].get_portfolio().await.unwrap();
        assert!(portfolio.items.is_empty());
        let err = apis[1].get_contract(1).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
