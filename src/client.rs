use std::fmt;

use chrono::NaiveDate;

use crate::{
    account::{Account, AccountNumber},
    error::Error,
    transaction::Transaction,
};

/// Position of a client in the registry's insertion-ordered list.
pub type ClientId = usize;

/// A bank client. Identity fields are descriptive only; nothing enforces
/// uniqueness of documents across clients. Accounts are referenced by number
/// and resolved through the registry, so there are no owning back-pointers.
#[derive(Debug, PartialEq)]
pub struct Client {
    pub name: String,
    pub document: String,
    pub birth_date: NaiveDate,
    pub address: String,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        birth_date: NaiveDate,
        address: impl Into<String>,
    ) -> Self {
        Client {
            name: name.into(),
            document: document.into(),
            birth_date,
            address: address.into(),
            accounts: Vec::new(),
        }
    }

    pub fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Account numbers owned by this client, in opening order.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    /// Sole entry point for applying a transaction to an account. The client
    /// does not check that the account is one of its own; any account handed
    /// in is driven as-is.
    pub fn execute_transaction(
        &self,
        account: &mut Account,
        transaction: Transaction,
    ) -> Result<(), Error> {
        transaction.register(account)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - document: {}", self.name, self.document)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::Client;
    use crate::account::Account;
    use crate::error::Error;
    use crate::transaction::Transaction;

    fn ada() -> Client {
        Client::new(
            "Ada",
            "123.456.789-00",
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            "1 Ledger St",
        )
    }

    #[test]
    fn accounts_keep_opening_order() {
        let mut client = ada();
        client.add_account(3);
        client.add_account(1);
        client.add_account(2);
        assert_eq!(vec![3, 1, 2], client.accounts());
    }

    #[test]
    fn execute_transaction_forwards_to_the_account() {
        let client = ada();
        let mut account = Account::current(0, 1);
        assert_eq!(
            Ok(()),
            client.execute_transaction(&mut account, Transaction::Deposit { amount: dec!(10) })
        );
        assert_eq!(dec!(10), account.balance());
    }

    #[test]
    fn execute_transaction_surfaces_account_rejections() {
        let client = ada();
        let mut account = Account::new(0, 1, None);
        assert_eq!(
            Err(Error::InvalidAmount(dec!(-1))),
            client.execute_transaction(&mut account, Transaction::Deposit { amount: dec!(-1) })
        );
    }

    #[test]
    fn execute_transaction_does_not_check_ownership() {
        // The client owns no accounts at all, yet can drive one it is given.
        let client = ada();
        assert!(client.accounts().is_empty());
        let mut foreign = Account::current(42, 99);
        assert_eq!(
            Ok(()),
            client.execute_transaction(&mut foreign, Transaction::Deposit { amount: dec!(5) })
        );
        assert_eq!(dec!(5), foreign.balance());
    }

    #[test]
    fn display_shows_name_and_document() {
        assert_eq!("Ada - document: 123.456.789-00", ada().to_string());
    }
}
