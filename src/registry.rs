use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::{
    account::{Account, AccountNumber, Statement},
    client::{Client, ClientId},
    error::Error,
    parser::parse_date,
    transaction::Transaction,
};

/// One row of the account listing / CSV export.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountSummary {
    #[serde(rename = "account")]
    pub number: AccountNumber,
    pub branch: &'static str,
    pub client: String,
    pub balance: Decimal,
}

/// Owns every client and account for one program run and assigns account
/// numbers sequentially from 1. Passed by reference into the driver; there
/// is no ambient global state.
#[derive(Debug, Default)]
pub struct Registry {
    clients: Vec<Client>,
    accounts: HashMap<AccountNumber, Account>,
    opened: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client. The birth date must be an ISO calendar date;
    /// duplicate documents are accepted.
    pub fn create_client(
        &mut self,
        name: impl Into<String>,
        document: impl Into<String>,
        birth_date: &str,
        address: impl Into<String>,
    ) -> Result<ClientId, Error> {
        let birth_date = parse_date(birth_date)?;
        let client = Client::new(name, document, birth_date, address);
        info!(name = %client.name, "client created");
        self.clients.push(client);
        Ok(self.clients.len() - 1)
    }

    /// Open a current account for an existing client, with the default
    /// overdraft limit and withdrawal cap.
    pub fn create_account(&mut self, client: ClientId) -> Result<AccountNumber, Error> {
        if client >= self.clients.len() {
            return Err(Error::UnknownClient(client));
        }
        let number = self.opened + 1;
        self.accounts.insert(number, Account::current(client, number));
        self.clients[client].add_account(number);
        self.opened = number;
        info!(number, client, "account opened");
        Ok(number)
    }

    pub fn deposit(
        &mut self,
        client: ClientId,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), Error> {
        self.execute(client, number, Transaction::Deposit { amount })
    }

    pub fn withdraw(
        &mut self,
        client: ClientId,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), Error> {
        self.execute(client, number, Transaction::Withdrawal { amount })
    }

    /// Resolve the client and the account, then route the transaction
    /// through the client, the only actor allowed to submit one.
    fn execute(
        &mut self,
        client: ClientId,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), Error> {
        let client = self
            .clients
            .get(client)
            .ok_or(Error::UnknownClient(client))?;
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(Error::UnknownAccount(number))?;
        client.execute_transaction(account, transaction)
    }

    pub fn statement(&self, number: AccountNumber) -> Result<Statement, Error> {
        self.accounts
            .get(&number)
            .map(Account::statement)
            .ok_or(Error::UnknownAccount(number))
    }

    /// Clients in registration order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: ClientId) -> Result<&Client, Error> {
        self.clients.get(id).ok_or(Error::UnknownClient(id))
    }

    /// The client's accounts in opening order, as listing rows.
    pub fn list_accounts(&self, client: ClientId) -> Result<Vec<AccountSummary>, Error> {
        let client = self.client(client)?;
        client
            .accounts()
            .iter()
            .map(|&number| {
                let account = self
                    .accounts
                    .get(&number)
                    .ok_or(Error::UnknownAccount(number))?;
                Ok(self.summarize(account))
            })
            .collect()
    }

    fn summarize(&self, account: &Account) -> AccountSummary {
        let client = self
            .clients
            .get(account.client())
            .map(|c| c.name.clone())
            .unwrap_or_default();
        AccountSummary {
            number: account.number(),
            branch: account.branch(),
            client,
            balance: account.balance(),
        }
    }

    /// Serialize every account as CSV.
    /// Note: sorts accounts by number for predictable output.
    pub fn export(&self, output: impl std::io::Write) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = csv::Writer::from_writer(output);
        for account in self.accounts.values().sorted_by_key(|a| a.number()) {
            writer.serialize(self.summarize(account))?;
        }
        writer.flush()?;
        Ok(())
    }
}
