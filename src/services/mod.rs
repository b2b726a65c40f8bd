pub mod comparison_service;
pub mod dashboard_service;
pub mod export_service;
pub mod failure_cache;
pub mod indicators;
pub mod price_cache;
pub mod price_service;
