/*
 * shape-redemption-checker: operator tool for inspecting what a shape
 * liquidity position would redeem for at a given ledger state version. It
 * keeps the operator's inputs, builds resolver queries from them, and holds
 * the last results and error for display.
 */

pub mod cli;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod session;

pub use cli::{Args, Command, OutputFormat};
pub use config::{load_config, CheckerConfig, ConfigError};
pub use controller::{RedemptionChecker, ResultState};
pub use dispatcher::{LookupDispatcher, FALLBACK_ERROR_MESSAGE};
pub use error::{CheckerError, CheckerResult};
pub use session::{run_interactive, run_session, SessionCommand, SessionError};
