pub mod market_service;
pub mod metrics_service;
pub mod notification_service;
pub mod pagination_service;
pub mod portfolio_service;
pub mod query_service;
