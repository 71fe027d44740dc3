pub mod credentials;
pub mod traits;

// HTTP implementation of the fund API
pub mod http;
