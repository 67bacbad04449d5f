use std::io::Read;

use crate::{
    account::AccountNumber,
    command::{AccountCommand, AccountCommandError, OperationFields, OperationKind},
};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: Option<AccountNumber>,
    pub holder: Option<String>,
    pub amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub limit: Option<Decimal>,
    pub term: Option<u32>,
}

impl Operation {
    pub fn into_command(self) -> Result<AccountCommand, AccountCommandError> {
        AccountCommand::parse_command(
            self.kind,
            OperationFields {
                account: self.account,
                holder: self.holder,
                amount: self.amount,
                rate: self.rate,
                limit: self.limit,
                term: self.term,
            },
        )
    }
}

/// Parses an operation script in CSV format, yielding each row with the
/// line it was read from.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows_with_empty_fields() {
        let script = "type,account,holder,amount,rate,limit,term\n\
                      savings, 101 , Asha Rao ,1000,5,,\n\
                      interest,,,,,,\n\
                      bogus,1,,,,,\n";
        let rows: Vec<_> = CsvOperationParser::new(script.as_bytes()).collect();
        assert_eq!(rows.len(), 3);

        let savings = rows[0].1.as_ref().unwrap();
        assert_eq!(savings.kind, OperationKind::Savings);
        assert_eq!(savings.account, Some(101));
        assert_eq!(savings.holder.as_deref(), Some("Asha Rao"));
        assert_eq!(savings.amount, Some(dec!(1000)));
        assert_eq!(savings.limit, None);

        let interest = rows[1].1.as_ref().unwrap();
        assert_eq!(interest.kind, OperationKind::Interest);
        assert_eq!(interest.account, None);

        assert!(rows[2].1.is_err());
    }
}
