use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::{AccountError, AccountKind, AccountNumber};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Savings,
    Checking,
    FixedDeposit,
    Deposit,
    Withdraw,
    Interest,
}

/// Loosely typed operation fields, as they come from a script row.
#[derive(Debug, Clone, Default)]
pub struct OperationFields {
    pub account: Option<AccountNumber>,
    pub holder: Option<String>,
    pub amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub limit: Option<Decimal>,
    pub term: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountCommandError {
    #[error("Field `{field}` is required for {kind:?}")]
    FieldRequired {
        field: &'static str,
        kind: OperationKind,
    },
    #[error(transparent)]
    InvalidTerms(#[from] AccountError),
}

/// Request to open an account. Only constructed through
/// [`OpenAccountCommand::new`], which checks the terms with
/// [`AccountKind::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAccountCommand {
    pub(crate) number: AccountNumber,
    pub(crate) holder: String,
    pub(crate) kind: AccountKind,
    pub(crate) initial_balance: Decimal,
}

impl OpenAccountCommand {
    pub fn new(
        number: AccountNumber,
        holder: impl Into<String>,
        kind: AccountKind,
        initial_balance: Decimal,
    ) -> Result<Self, AccountCommandError> {
        kind.validate()?;
        Ok(Self {
            number,
            holder: holder.into(),
            kind,
            initial_balance,
        })
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Open(OpenAccountCommand),
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    /// Applies to every account in the registry.
    CalculateInterest,
}

impl AccountCommand {
    pub fn parse_command(
        kind: OperationKind,
        fields: OperationFields,
    ) -> Result<Self, AccountCommandError> {
        let required = |field: &'static str| AccountCommandError::FieldRequired { field, kind };
        match kind {
            OperationKind::Savings => {
                let interest_rate = fields.rate.ok_or_else(|| required("rate"))?;
                Ok(Self::Open(Self::parse_open_command(
                    fields,
                    AccountKind::Savings { interest_rate },
                    required,
                )?))
            }
            OperationKind::Checking => {
                let overdraft_limit = fields.limit.ok_or_else(|| required("limit"))?;
                Ok(Self::Open(Self::parse_open_command(
                    fields,
                    AccountKind::Checking { overdraft_limit },
                    required,
                )?))
            }
            OperationKind::FixedDeposit => {
                let term_months = fields.term.ok_or_else(|| required("term"))?;
                let interest_rate = fields.rate.ok_or_else(|| required("rate"))?;
                Ok(Self::Open(Self::parse_open_command(
                    fields,
                    AccountKind::FixedDeposit {
                        term_months,
                        interest_rate,
                    },
                    required,
                )?))
            }
            OperationKind::Deposit => Ok(Self::Deposit {
                account: fields.account.ok_or_else(|| required("account"))?,
                amount: fields.amount.ok_or_else(|| required("amount"))?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                account: fields.account.ok_or_else(|| required("account"))?,
                amount: fields.amount.ok_or_else(|| required("amount"))?,
            }),
            OperationKind::Interest => Ok(Self::CalculateInterest),
        }
    }

    fn parse_open_command(
        fields: OperationFields,
        account_kind: AccountKind,
        required: impl Fn(&'static str) -> AccountCommandError,
    ) -> Result<OpenAccountCommand, AccountCommandError> {
        let number = fields.account.ok_or_else(|| required("account"))?;
        let holder = fields.holder.ok_or_else(|| required("holder"))?;
        let initial_balance = fields.amount.ok_or_else(|| required("amount"))?;
        OpenAccountCommand::new(number, holder, account_kind, initial_balance)
    }
}
