mod clean;
mod fetch;
mod status;

pub use clean::run_clean;
pub use fetch::{run_fetch, FetchOverrides};
pub use status::run_status;
