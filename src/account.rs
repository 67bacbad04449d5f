use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountNumber = i32;

/// Prefix printed in front of every amount.
pub const CURRENCY: &str = "Rs.";

const MONTHS_PER_YEAR: u32 = 12;

/// The closed set of account variants together with their immutable terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// `interest_rate` is a percentage applied once per interest calculation.
    Savings { interest_rate: Decimal },
    /// The balance may go below zero by at most `overdraft_limit`.
    Checking { overdraft_limit: Decimal },
    /// `interest_rate` is a yearly percentage, prorated over `term_months`.
    FixedDeposit {
        term_months: u32,
        interest_rate: Decimal,
    },
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "Savings",
            AccountKind::Checking { .. } => "Checking",
            AccountKind::FixedDeposit { .. } => "Fixed Deposit",
        }
    }

    /// Short machine name, also used as the operation type in scripts.
    pub fn code(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "savings",
            AccountKind::Checking { .. } => "checking",
            AccountKind::FixedDeposit { .. } => "fixed_deposit",
        }
    }

    /// Rejects terms that would let a balance leave its allowed range.
    pub fn validate(&self) -> Result<(), AccountError> {
        match *self {
            AccountKind::Savings { interest_rate }
            | AccountKind::FixedDeposit { interest_rate, .. }
                if interest_rate < Decimal::ZERO =>
            {
                Err(AccountError::NegativeInterestRate {
                    rate: interest_rate.normalize(),
                })
            }
            AccountKind::FixedDeposit { term_months: 0, .. } => Err(AccountError::ZeroTerm),
            AccountKind::Checking { overdraft_limit } if overdraft_limit < Decimal::ZERO => {
                Err(AccountError::NegativeOverdraftLimit {
                    limit: overdraft_limit.normalize(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEventKind {
    Opened {
        label: &'static str,
    },
    Deposited {
        amount: Decimal,
    },
    Withdrawn {
        amount: Decimal,
        overdraft_used: Option<Decimal>,
    },
    /// `term_months` is only set for fixed deposits.
    InterestAdded {
        interest: Decimal,
        term_months: Option<u32>,
    },
    InterestNotEarned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEvent {
    account_number: AccountNumber,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    pub fn kind(&self) -> &AccountEventKind {
        &self.kind
    }
}

impl fmt::Display for AccountEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AccountEventKind::Opened { label } => {
                write!(f, "{label} Account created successfully.")
            }
            AccountEventKind::Deposited { amount } => {
                write!(f, "Deposited {CURRENCY}{} successfully.", amount.normalize())
            }
            AccountEventKind::Withdrawn {
                amount,
                overdraft_used,
            } => {
                if let Some(overdraft) = overdraft_used {
                    writeln!(f, "Overdraft used: {CURRENCY}{}", overdraft.normalize())?;
                }
                write!(f, "Withdrew {CURRENCY}{} successfully.", amount.normalize())
            }
            AccountEventKind::InterestAdded {
                interest,
                term_months: None,
            } => write!(f, "Savings Interest {CURRENCY}{} added.", interest.normalize()),
            AccountEventKind::InterestAdded {
                interest,
                term_months: Some(term),
            } => write!(
                f,
                "FD Interest {CURRENCY}{} added for {term} months.",
                interest.normalize()
            ),
            AccountEventKind::InterestNotEarned => {
                write!(f, "Checking account does not earn interest.")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid amount Rs.{amount}, amount must be positive")]
    InvalidAmount { amount: Decimal },
    #[error("Insufficient balance: requested Rs.{requested}, available Rs.{available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error(
        "Withdrawal exceeds overdraft limit: requested Rs.{requested}, available Rs.{available}"
    )]
    OverdraftExceeded {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Balance would overflow")]
    BalanceOverflow,
    #[error("Interest rate must not be negative, got {rate}%")]
    NegativeInterestRate { rate: Decimal },
    #[error("Overdraft limit must not be negative, got Rs.{limit}")]
    NegativeOverdraftLimit { limit: Decimal },
    #[error("Term must be at least one month")]
    ZeroTerm,
}

/// Read-only snapshot of an account, rendered as the console info block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_number: AccountNumber,
    pub holder_name: String,
    pub balance: Decimal,
    pub kind: AccountKind,
}

impl fmt::Display for AccountInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} Account ---", self.kind.label())?;
        writeln!(f, "Account No: {}", self.account_number)?;
        writeln!(f, "Holder: {}", self.holder_name)?;
        writeln!(f, "Balance: {CURRENCY}{}", self.balance.normalize())?;
        match self.kind {
            AccountKind::Savings { interest_rate } => {
                write!(f, "Interest Rate: {}%", interest_rate.normalize())
            }
            AccountKind::Checking { overdraft_limit } => {
                write!(f, "Overdraft Limit: {CURRENCY}{}", overdraft_limit.normalize())
            }
            AccountKind::FixedDeposit {
                term_months,
                interest_rate,
            } => {
                writeln!(f, "Term: {term_months} months")?;
                write!(f, "Interest Rate: {}%", interest_rate.normalize())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    kind: AccountKind,
    balance: Decimal,
}

impl Account {
    /// Creates an account with a zero balance. The initial balance must be
    /// delivered through [`Account::deposit`].
    pub fn new(
        number: AccountNumber,
        holder: impl Into<String>,
        kind: AccountKind,
    ) -> Result<Self, AccountError> {
        kind.validate()?;
        Ok(Self {
            number,
            holder: holder.into(),
            kind,
            balance: Decimal::ZERO,
        })
    }

    pub fn account_number(&self) -> AccountNumber {
        self.number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn info(&self) -> AccountInfo {
        AccountInfo {
            account_number: self.number,
            holder_name: self.holder.clone(),
            balance: self.balance,
            kind: self.kind,
        }
    }

    pub fn opened(&self) -> AccountEvent {
        self.event(AccountEventKind::Opened {
            label: self.kind.label(),
        })
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let event = self.handle_deposit(amount)?;
        self.apply(&event);
        Ok(event)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let event = self.handle_withdraw(amount)?;
        self.apply(&event);
        Ok(event)
    }

    pub fn calculate_interest(&mut self) -> Result<AccountEvent, AccountError> {
        let event = self.handle_interest()?;
        self.apply(&event);
        Ok(event)
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                amount: amount.normalize(),
            });
        }
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(self.event(AccountEventKind::Deposited { amount }))
    }

    pub fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                amount: amount.normalize(),
            });
        }

        match self.kind {
            AccountKind::Checking { overdraft_limit } => match self.balance.checked_sub(amount) {
                Some(remaining) if remaining >= -overdraft_limit => {
                    Ok(self.event(AccountEventKind::Withdrawn {
                        amount,
                        overdraft_used: (remaining < Decimal::ZERO).then_some(-remaining),
                    }))
                }
                _ => Err(AccountError::OverdraftExceeded {
                    requested: amount.normalize(),
                    available: self.balance.saturating_add(overdraft_limit).normalize(),
                }),
            },
            AccountKind::Savings { .. } | AccountKind::FixedDeposit { .. } => {
                if self.balance < amount {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount.normalize(),
                        available: self.balance.normalize(),
                    });
                }
                Ok(self.event(AccountEventKind::Withdrawn {
                    amount,
                    overdraft_used: None,
                }))
            }
        }
    }

    pub fn handle_interest(&self) -> Result<AccountEvent, AccountError> {
        let (interest, term_months) = match self.kind {
            AccountKind::Checking { .. } => {
                return Ok(self.event(AccountEventKind::InterestNotEarned));
            }
            AccountKind::Savings { interest_rate } => (
                self.balance
                    .checked_mul(interest_rate)
                    .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED)),
                None,
            ),
            AccountKind::FixedDeposit {
                term_months,
                interest_rate,
            } => (
                self.balance
                    .checked_mul(interest_rate)
                    .and_then(|v| v.checked_mul(Decimal::from(term_months)))
                    .and_then(|v| {
                        v.checked_div(Decimal::from(MONTHS_PER_YEAR) * Decimal::ONE_HUNDRED)
                    }),
                Some(term_months),
            ),
        };
        let interest = interest.ok_or(AccountError::BalanceOverflow)?;
        self.balance
            .checked_add(interest)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(self.event(AccountEventKind::InterestAdded {
            interest,
            term_months,
        }))
    }

    // events are produced by the handlers above against the current balance,
    // so applying them cannot overflow
    fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited { amount } => {
                self.balance += amount;
            }
            AccountEventKind::Withdrawn { amount, .. } => {
                self.balance -= amount;
            }
            AccountEventKind::InterestAdded { interest, .. } => {
                self.balance += interest;
            }
            AccountEventKind::Opened { .. } | AccountEventKind::InterestNotEarned => {}
        }
    }

    fn event(&self, kind: AccountEventKind) -> AccountEvent {
        AccountEvent {
            account_number: self.number,
            kind,
        }
    }
}
