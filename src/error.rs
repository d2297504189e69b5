use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountNumber;
use crate::client::ClientId;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid amount for transaction: {0}")]
    InvalidAmount(Decimal),
    #[error("could not parse `{0}` as an amount")]
    MalformedAmount(String),
    #[error("could not parse `{0}` as a calendar date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("withdrawal of {requested} exceeds available funds: {available}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },
    #[error("withdrawal cap of {cap} reached")]
    WithdrawalCapReached { cap: u32 },
    #[error("invalid selection `{0}`")]
    InvalidSelection(String),
    #[error("no client at position `{0}`")]
    UnknownClient(ClientId),
    #[error("no account numbered `{0}`")]
    UnknownAccount(AccountNumber),
}
