pub mod aggregator;
pub mod currency_service;
pub mod ledger_service;
pub mod user_service;
