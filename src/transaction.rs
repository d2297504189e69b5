use std::fmt;

use rust_decimal::Decimal;

use crate::{account::Account, error::Error};

/// A single ledger event. Deposits and withdrawals are the only two kinds;
/// both carry the amount they move. Values are immutable once created and
/// are owned by an account's history after a successful registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Deposit { amount } | Transaction::Withdrawal { amount } => *amount,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transaction::Deposit { .. } => "Deposit",
            Transaction::Withdrawal { .. } => "Withdrawal",
        }
    }

    /// Apply this transaction to the target account. The account owns all
    /// validation and records the transaction into its history only on
    /// acceptance; a rejected transaction leaves no trace.
    pub fn register(&self, account: &mut Account) -> Result<(), Error> {
        match self {
            Transaction::Deposit { amount } => account.deposit(*amount),
            Transaction::Withdrawal { amount } => account.withdraw(*amount),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ${:.2}", self.kind(), self.amount())
    }
}
