pub mod api;
pub mod console;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

pub use api::credentials::Credential;
pub use api::http::HttpFundApi;
pub use api::traits::FundApi;
pub use console::AdminConsole;
pub use dashboard::UserDashboard;
pub use errors::CoreError;
pub use models::chart::{ChartSeries, Timeframe};
pub use models::transaction::Transaction;
pub use services::aggregator::TransactionAggregator;

/// Aggregate an oldest-first transaction list for one timeframe.
///
/// Shorthand for [`TransactionAggregator::aggregate`].
pub fn aggregate(transactions: &[Transaction], timeframe: Timeframe) -> ChartSeries {
    TransactionAggregator::new().aggregate(transactions, timeframe)
}
