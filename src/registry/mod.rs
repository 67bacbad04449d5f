use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountError, AccountEvent, AccountNumber},
    command::{AccountCommand, AccountCommandError, OpenAccountCommand},
};

pub mod in_memory_registry;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Account not found!")]
    AccountNotFound(AccountNumber),
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Result of opening an account. The account is registered even when its
/// initial deposit is rejected, in which case its balance stays at zero.
#[derive(Debug)]
pub struct OpenedAccount {
    pub opened: AccountEvent,
    pub initial_deposit: Result<AccountEvent, AccountError>,
}

/// Owns the accounts of a session. Storage is left to implementors; lookup
/// and dispatch to account operations are shared.
pub trait AccountRegistry {
    /// Stores a new account after all existing ones and returns it.
    fn insert(&mut self, account: Account) -> &mut Account;

    /// Accounts in opening order.
    fn accounts(&self) -> impl Iterator<Item = &Account>;

    fn accounts_mut(&mut self) -> impl Iterator<Item = &mut Account>;

    /// Account numbers are not checked for uniqueness, the first account
    /// opened with a number wins.
    fn find(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts().find(|acc| acc.account_number() == number)
    }

    fn find_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts_mut().find(|acc| acc.account_number() == number)
    }

    /// Fails only when the account terms are invalid; nothing is registered
    /// in that case.
    fn open_account(
        &mut self,
        command: OpenAccountCommand,
    ) -> Result<OpenedAccount, AccountError> {
        let OpenAccountCommand {
            number,
            holder,
            kind,
            initial_balance,
        } = command;
        let account = self.insert(Account::new(number, holder, kind)?);
        let initial_deposit = account.deposit(initial_balance);
        info!(
            account = number,
            kind = kind.code(),
            balance = %account.balance(),
            "opened account"
        );
        Ok(OpenedAccount {
            opened: account.opened(),
            initial_deposit,
        })
    }

    fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<AccountEvent, RegistryError> {
        let account = self
            .find_mut(number)
            .ok_or(RegistryError::AccountNotFound(number))?;
        let event = account.deposit(amount)?;
        debug!(account = number, ?event, "applied deposit");
        Ok(event)
    }

    fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<AccountEvent, RegistryError> {
        let account = self
            .find_mut(number)
            .ok_or(RegistryError::AccountNotFound(number))?;
        let event = account.withdraw(amount)?;
        debug!(account = number, ?event, "applied withdrawal");
        Ok(event)
    }

    /// Calculates interest on every account, in opening order.
    fn accrue_interest(&mut self) -> Vec<Result<AccountEvent, AccountError>> {
        self.accounts_mut()
            .map(|account| {
                let outcome = account.calculate_interest();
                debug!(account = account.account_number(), ?outcome, "accrued interest");
                outcome
            })
            .collect()
    }

    /// Dispatches a command to the matching operation and returns every
    /// outcome in the order it should be reported.
    fn execute(&mut self, command: AccountCommand) -> Vec<Result<AccountEvent, RegistryError>> {
        match command {
            AccountCommand::Open(open) => match self.open_account(open) {
                Ok(OpenedAccount {
                    opened,
                    initial_deposit,
                }) => vec![initial_deposit.map_err(RegistryError::from), Ok(opened)],
                Err(err) => vec![Err(err.into())],
            },
            AccountCommand::Deposit { account, amount } => vec![self.deposit(account, amount)],
            AccountCommand::Withdraw { account, amount } => vec![self.withdraw(account, amount)],
            AccountCommand::CalculateInterest => self
                .accrue_interest()
                .into_iter()
                .map(|outcome| outcome.map_err(RegistryError::from))
                .collect(),
        }
    }
}
