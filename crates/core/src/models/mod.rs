pub mod contract;
pub mod energy_type;
pub mod filters;
pub mod market;
pub mod metrics;
pub mod notification;
pub mod pagination;
pub mod portfolio;
pub mod settings;
