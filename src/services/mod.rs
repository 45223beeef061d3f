pub mod relay;
pub use relay::{RelayError, RelayService};

pub mod search_log;
pub use search_log::{SeaOrmSearchLog, SearchLog, SearchLogError};
