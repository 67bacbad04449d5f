use std::io::Write;

use crate::account::{Account, AccountKind, AccountNumber};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRecord {
    pub account: AccountNumber,
    pub holder: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub balance: Decimal,
    pub interest_rate: Option<Decimal>,
    pub overdraft_limit: Option<Decimal>,
    pub term_months: Option<u32>,
}

impl From<&Account> for AccountRecord {
    fn from(acc: &Account) -> Self {
        let (interest_rate, overdraft_limit, term_months) = match *acc.kind() {
            AccountKind::Savings { interest_rate } => (Some(interest_rate), None, None),
            AccountKind::Checking { overdraft_limit } => (None, Some(overdraft_limit), None),
            AccountKind::FixedDeposit {
                term_months,
                interest_rate,
            } => (Some(interest_rate), None, Some(term_months)),
        };
        Self {
            account: acc.account_number(),
            holder: acc.holder_name().to_owned(),
            kind: acc.kind().code(),
            balance: acc.balance().normalize(),
            interest_rate: interest_rate.map(|rate| rate.normalize()),
            overdraft_limit: overdraft_limit.map(|limit| limit.normalize()),
            term_months,
        }
    }
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRecord>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
