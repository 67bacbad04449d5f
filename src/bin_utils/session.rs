use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    account::{AccountEvent, AccountKind, AccountNumber},
    command::{AccountCommand, OpenAccountCommand},
    registry::{AccountRegistry, RegistryError, in_memory_registry::InMemoryRegistry},
};

use super::prompt::{Prompt, PromptError};

const MENU: &str = "\n---- BANKING SYSTEM MENU ----\n\
                    1. Create Savings Account\n\
                    2. Create Checking Account\n\
                    3. Create Fixed Deposit Account\n\
                    4. Deposit\n\
                    5. Withdraw\n\
                    6. Display All Accounts\n\
                    7. Calculate Interest\n\
                    8. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewAccount {
    Savings,
    Checking,
    FixedDeposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create(NewAccount),
    Deposit,
    Withdraw,
    DisplayAll,
    CalculateInterest,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Create(NewAccount::Savings)),
            2 => Some(Self::Create(NewAccount::Checking)),
            3 => Some(Self::Create(NewAccount::FixedDeposit)),
            4 => Some(Self::Deposit),
            5 => Some(Self::Withdraw),
            6 => Some(Self::DisplayAll),
            7 => Some(Self::CalculateInterest),
            8 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive menu loop. Runs until the operator exits or the input ends.
pub struct Session<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
}

impl<'w, R, W> Session<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    pub fn run(self) -> Result<InMemoryRegistry> {
        let mut prompt = Prompt::new(self.input, self.output);
        let mut registry = InMemoryRegistry::default();
        info!("session started");

        loop {
            match Self::step(&mut prompt, &mut registry) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break,
                Err(PromptError::Closed) => {
                    info!("input closed");
                    break;
                }
                Err(PromptError::Io(err)) => {
                    return Err(err).context("Failed to talk to the terminal");
                }
            }
        }

        info!(accounts = registry.len(), "session finished");
        Ok(registry)
    }

    fn step(
        prompt: &mut Prompt<'w, R, W>,
        registry: &mut InMemoryRegistry,
    ) -> Result<ControlFlow<()>, PromptError> {
        prompt.say(MENU)?;
        let line = prompt.ask_line("Enter choice: ")?;
        let Some(choice) = MenuChoice::parse(&line) else {
            prompt.say("Invalid choice!")?;
            return Ok(ControlFlow::Continue(()));
        };

        match choice {
            MenuChoice::Create(new_account) => Self::open_account(prompt, registry, new_account)?,
            MenuChoice::Deposit => {
                let account = prompt.ask("Enter Account Number: ")?;
                let amount = prompt.ask("Enter Deposit Amount: ")?;
                Self::report(
                    prompt,
                    registry.execute(AccountCommand::Deposit { account, amount }),
                )?;
            }
            MenuChoice::Withdraw => {
                let account = prompt.ask("Enter Account Number: ")?;
                let amount = prompt.ask("Enter Withdrawal Amount: ")?;
                Self::report(
                    prompt,
                    registry.execute(AccountCommand::Withdraw { account, amount }),
                )?;
            }
            MenuChoice::DisplayAll => {
                for account in registry.accounts() {
                    prompt.say("")?;
                    prompt.say(account.info())?;
                }
            }
            MenuChoice::CalculateInterest => {
                Self::report(prompt, registry.execute(AccountCommand::CalculateInterest))?;
            }
            MenuChoice::Exit => {
                prompt.say("Thank you, visit again!")?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn open_account(
        prompt: &mut Prompt<'w, R, W>,
        registry: &mut InMemoryRegistry,
        new_account: NewAccount,
    ) -> Result<(), PromptError> {
        let number: AccountNumber = prompt.ask("Enter Account Number: ")?;
        let holder = prompt.ask_line("Enter Name: ")?;
        let initial_balance: Decimal = prompt.ask("Enter Initial Balance: ")?;
        let kind = match new_account {
            NewAccount::Savings => AccountKind::Savings {
                interest_rate: prompt.ask("Enter Interest Rate (%): ")?,
            },
            NewAccount::Checking => AccountKind::Checking {
                overdraft_limit: prompt.ask("Enter Overdraft Limit: ")?,
            },
            NewAccount::FixedDeposit => {
                let term_months = prompt.ask("Enter Term (months): ")?;
                let interest_rate = prompt.ask("Enter Interest Rate (%): ")?;
                AccountKind::FixedDeposit {
                    term_months,
                    interest_rate,
                }
            }
        };

        match OpenAccountCommand::new(number, holder, kind, initial_balance) {
            Ok(command) => Self::report(prompt, registry.execute(AccountCommand::Open(command))),
            Err(err) => prompt.say(err),
        }
    }

    fn report(
        prompt: &mut Prompt<'w, R, W>,
        outcomes: Vec<Result<AccountEvent, RegistryError>>,
    ) -> Result<(), PromptError> {
        for outcome in outcomes {
            match outcome {
                Ok(event) => prompt.say(event)?,
                Err(err) => prompt.say(err)?,
            }
        }
        Ok(())
    }
}
