//! CLI command handlers, one file per subcommand.

mod fetch;
mod fetch_many;
mod links;

pub use fetch::run_fetch;
pub use fetch_many::run_fetch_many;
pub use links::run_links;
