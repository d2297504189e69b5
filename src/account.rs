use std::fmt;

use rust_decimal::Decimal;

use crate::{client::ClientId, error::Error, transaction::Transaction};

pub type AccountNumber = u32;

/// Branch code shared by every account in this simulation.
pub const BRANCH: &str = "0001";

/// Chronological, append-only record of an account's accepted transactions.
/// Owned by exactly one account; never truncated or reordered.
#[derive(Debug, Default, PartialEq)]
pub struct History {
    transactions: Vec<Transaction>,
}

impl History {
    fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Recorded transactions, oldest first.
    pub fn entries(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Overdraft rules of a current account: how far below zero the balance may
/// go and how many withdrawals are allowed in total (a count, not an amount).
/// Invariant: `used <= cap`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverdraftPolicy {
    limit: Decimal,
    cap: u32,
    used: u32,
}

impl Default for OverdraftPolicy {
    fn default() -> Self {
        OverdraftPolicy::new(Decimal::new(500, 0), 3)
    }
}

impl OverdraftPolicy {
    pub fn new(limit: Decimal, cap: u32) -> Self {
        OverdraftPolicy {
            limit,
            cap,
            used: 0,
        }
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    /// Gate evaluated before the base withdrawal logic, in this order:
    /// cap first, overdraft-aware sufficiency second.
    fn admit(&self, amount: Decimal, balance: Decimal) -> Result<(), Error> {
        if self.used >= self.cap {
            return Err(Error::WithdrawalCapReached { cap: self.cap });
        }
        if amount > balance + self.limit {
            return Err(Error::InsufficientFunds {
                available: balance + self.limit,
                requested: amount,
            });
        }
        Ok(())
    }
}

/// A single bank account. An account without an overdraft policy follows the
/// plain-balance rule (never negative); with a policy it is a current account
/// whose balance may go down to minus the overdraft limit, with a capped
/// number of withdrawals.
#[derive(Debug, PartialEq)]
pub struct Account {
    number: AccountNumber,
    branch: &'static str,
    client: ClientId,
    balance: Decimal,
    history: History,
    overdraft: Option<OverdraftPolicy>,
}

impl Account {
    pub fn new(client: ClientId, number: AccountNumber, overdraft: Option<OverdraftPolicy>) -> Self {
        Account {
            number,
            branch: BRANCH,
            client,
            balance: Decimal::ZERO,
            history: History::default(),
            overdraft,
        }
    }

    /// A current account with the default overdraft limit and withdrawal cap.
    pub fn current(client: ClientId, number: AccountNumber) -> Self {
        Account::new(client, number, Some(OverdraftPolicy::default()))
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &'static str {
        self.branch
    }

    pub fn client(&self) -> ClientId {
        self.client
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn overdraft(&self) -> Option<&OverdraftPolicy> {
        self.overdraft.as_ref()
    }

    /// Balance plus whatever overdraft allowance remains below it.
    fn available(&self) -> Decimal {
        match &self.overdraft {
            Some(policy) => self.balance + policy.limit,
            None => self.balance,
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        self.balance += amount;
        self.history.record(Transaction::Deposit { amount });
        Ok(())
    }

    /// Two layers, strictly ordered: the overdraft gate (cap, then
    /// balance+limit sufficiency) runs first when a policy is present, then
    /// the base logic validates the amount and re-checks sufficiency against
    /// the same bound. The re-check cannot reject what the gate accepted.
    /// The used counter moves only after the base logic succeeds.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), Error> {
        if let Some(policy) = &self.overdraft {
            policy.admit(amount, self.balance)?;
        }
        self.withdraw_base(amount)?;
        if let Some(policy) = &mut self.overdraft {
            policy.used += 1;
        }
        Ok(())
    }

    fn withdraw_base(&mut self, amount: Decimal) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        if amount > self.available() {
            return Err(Error::InsufficientFunds {
                available: self.available(),
                requested: amount,
            });
        }
        self.balance -= amount;
        self.history.record(Transaction::Withdrawal { amount });
        Ok(())
    }

    /// Snapshot of the history plus the current balance, for rendering.
    pub fn statement(&self) -> Statement {
        Statement {
            number: self.number,
            lines: self.history.entries().to_vec(),
            balance: self.balance,
        }
    }
}

/// Chronological rendering of an account's transactions and closing balance.
#[derive(Debug, PartialEq)]
pub struct Statement {
    pub number: AccountNumber,
    pub lines: Vec<Transaction>,
    pub balance: Decimal,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Statement - account {} ===", self.number)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "Current balance: ${:.2}", self.balance)
    }
}
