pub mod domain;
pub mod fetch;
pub mod view;

pub use domain::*;
pub use fetch::{FetchError, HttpStatementFetcher, StatementFetcher, StatementRequest};
pub use view::{FixedTenant, LoadStatus, StatementView, TenantResolver, ViewState};
