use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::{
    account::AccountNumber,
    client::ClientId,
    error::Error,
    parser::{parse_amount, parse_selection},
    registry::Registry,
};

enum Operation {
    Deposit,
    Withdrawal,
}

impl Operation {
    fn label(&self) -> &'static str {
        match self {
            Operation::Deposit => "Deposit",
            Operation::Withdrawal => "Withdrawal",
        }
    }
}

/// One interactive run over a registry. Reads commands line by line and
/// writes every prompt and message to the output, so a scripted reader and
/// a byte buffer drive it exactly like a terminal. Every error is recovered
/// with a message and a return to the menu; EOF quits.
pub struct Session<'a, R, W> {
    registry: &'a mut Registry,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(registry: &'a mut Registry, input: R, output: W) -> Self {
        Session {
            registry,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.write_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            match choice.trim() {
                "1" => self.create_client()?,
                "2" => self.open_account()?,
                "3" => self.list_clients()?,
                "4" => self.list_accounts()?,
                "5" => self.transact(Operation::Deposit)?,
                "6" => self.transact(Operation::Withdrawal)?,
                "7" => self.statement()?,
                "0" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
        Ok(())
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== MENU ===")?;
        writeln!(self.output, "1. Create client")?;
        writeln!(self.output, "2. Open account")?;
        writeln!(self.output, "3. List clients")?;
        writeln!(self.output, "4. List client accounts")?;
        writeln!(self.output, "5. Deposit")?;
        writeln!(self.output, "6. Withdraw")?;
        writeln!(self.output, "7. Statement")?;
        writeln!(self.output, "0. Quit")?;
        write!(self.output, "Choose an option: ")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn report(&mut self, error: &Error) -> io::Result<()> {
        warn!(%error, "operation rejected");
        writeln!(self.output, "{error}")
    }

    fn create_client(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        let Some(document) = self.prompt("Document: ")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompt("Birth date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Address: ")? else {
            return Ok(());
        };
        match self.registry.create_client(
            name.trim(),
            document.trim(),
            birth_date.trim(),
            address.trim(),
        ) {
            Ok(_) => writeln!(self.output, "Client created successfully!"),
            Err(error) => {
                warn!(%error, "client not created");
                writeln!(self.output, "Could not create client: {error}")
            }
        }
    }

    fn open_account(&mut self) -> io::Result<()> {
        let Some(client) = self.select_client()? else {
            return Ok(());
        };
        match self.registry.create_account(client) {
            Ok(number) => {
                let name = &self.registry.clients()[client].name;
                writeln!(self.output, "Account {number} created for {name}!")
            }
            Err(error) => self.report(&error),
        }
    }

    fn list_clients(&mut self) -> io::Result<()> {
        if self.registry.clients().is_empty() {
            return writeln!(self.output, "No clients registered.");
        }
        writeln!(self.output, "\n=== CLIENTS ===")?;
        for client in self.registry.clients() {
            writeln!(self.output, "{client}")?;
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> io::Result<()> {
        let Some(client) = self.select_client()? else {
            return Ok(());
        };
        match self.registry.list_accounts(client) {
            Ok(summaries) if summaries.is_empty() => {
                writeln!(self.output, "This client has no accounts.")
            }
            Ok(summaries) => {
                let name = &self.registry.clients()[client].name;
                writeln!(self.output, "\nAccounts of {name}:")?;
                for summary in summaries {
                    writeln!(
                        self.output,
                        "Account {} - balance: ${:.2}",
                        summary.number, summary.balance
                    )?;
                }
                Ok(())
            }
            Err(error) => self.report(&error),
        }
    }

    fn transact(&mut self, operation: Operation) -> io::Result<()> {
        let Some(client) = self.select_client()? else {
            return Ok(());
        };
        let Some(number) = self.select_account(client)? else {
            return Ok(());
        };
        let Some(raw) = self.prompt(&format!("{} amount: ", operation.label()))? else {
            return Ok(());
        };
        let amount = match parse_amount(&raw) {
            Ok(amount) => amount,
            Err(error) => return self.report(&error),
        };
        let result = match operation {
            Operation::Deposit => self.registry.deposit(client, number, amount),
            Operation::Withdrawal => self.registry.withdraw(client, number, amount),
        };
        match result {
            Ok(()) => writeln!(
                self.output,
                "{} of ${amount:.2} completed!",
                operation.label()
            ),
            Err(error) => {
                warn!(%error, "operation rejected");
                writeln!(self.output, "{} failed: {error}", operation.label())
            }
        }
    }

    fn statement(&mut self) -> io::Result<()> {
        let Some(client) = self.select_client()? else {
            return Ok(());
        };
        let Some(number) = self.select_account(client)? else {
            return Ok(());
        };
        match self.registry.statement(number) {
            Ok(statement) => writeln!(self.output, "\n{statement}"),
            Err(error) => self.report(&error),
        }
    }

    fn select_client(&mut self) -> io::Result<Option<ClientId>> {
        if self.registry.clients().is_empty() {
            writeln!(self.output, "No clients registered.")?;
            return Ok(None);
        }
        writeln!(self.output, "\nAvailable clients:")?;
        for (position, client) in self.registry.clients().iter().enumerate() {
            writeln!(self.output, "{}. {client}", position + 1)?;
        }
        let Some(raw) = self.prompt("Choose a client: ")? else {
            return Ok(None);
        };
        match parse_selection(&raw, self.registry.clients().len()) {
            Ok(index) => Ok(Some(index)),
            Err(error) => {
                self.report(&error)?;
                Ok(None)
            }
        }
    }

    fn select_account(&mut self, client: ClientId) -> io::Result<Option<AccountNumber>> {
        let summaries = match self.registry.list_accounts(client) {
            Ok(summaries) => summaries,
            Err(error) => {
                self.report(&error)?;
                return Ok(None);
            }
        };
        if summaries.is_empty() {
            writeln!(self.output, "This client has no accounts.")?;
            return Ok(None);
        }
        let name = &self.registry.clients()[client].name;
        writeln!(self.output, "\nAccounts of {name}:")?;
        for (position, summary) in summaries.iter().enumerate() {
            writeln!(
                self.output,
                "{}. Account {} - balance: ${:.2}",
                position + 1,
                summary.number,
                summary.balance
            )?;
        }
        let Some(raw) = self.prompt("Choose an account: ")? else {
            return Ok(None);
        };
        match parse_selection(&raw, summaries.len()) {
            Ok(index) => Ok(Some(summaries[index].number)),
            Err(error) => {
                self.report(&error)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::registry::Registry;

    fn run_script(registry: &mut Registry, script: &str) -> String {
        let mut output = Vec::<u8>::new();
        Session::new(registry, script.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn eof_quits_the_loop() {
        let mut registry = Registry::new();
        let output = run_script(&mut registry, "");
        assert!(output.ends_with("Choose an option: "));
    }

    #[test]
    fn unknown_option_is_reported() {
        let mut registry = Registry::new();
        let output = run_script(&mut registry, "9\n0\n");
        assert!(output.contains("Invalid option."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn selecting_from_an_empty_registry_recovers() {
        let mut registry = Registry::new();
        let output = run_script(&mut registry, "5\n0\n");
        assert!(output.contains("No clients registered."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn full_deposit_flow() {
        let mut registry = Registry::new();
        registry
            .create_client("Ada", "111", "1990-05-17", "1 Ledger St")
            .unwrap();
        registry.create_account(0).unwrap();

        let output = run_script(&mut registry, "5\n1\n1\n250.00\n0\n");
        assert!(output.contains("Deposit amount: "));
        assert!(output.contains("Deposit of $250.00 completed!"));
        assert_eq!(
            rust_decimal_macros::dec!(250),
            registry.statement(1).unwrap().balance
        );
    }

    #[test]
    fn bad_selection_returns_to_the_menu() {
        let mut registry = Registry::new();
        registry
            .create_client("Ada", "111", "1990-05-17", "1 Ledger St")
            .unwrap();

        let output = run_script(&mut registry, "5\nfirst\n0\n");
        assert!(output.contains("invalid selection `first`"));
        assert!(output.ends_with("Exiting...\n"));
    }
}
