pub mod account;
pub mod client;
pub mod error;
pub mod menu;
pub mod parser;
pub mod registry;
pub mod transaction;

pub use account::{Account, OverdraftPolicy, Statement};
pub use client::Client;
pub use error::Error;
pub use registry::Registry;
pub use transaction::Transaction;
