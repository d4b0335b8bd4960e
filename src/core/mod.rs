pub mod errors;
pub mod helpers;
pub mod http;
pub mod notify;
pub mod query_params;
pub mod session;
