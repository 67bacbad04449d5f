use crate::account::Account;

use super::AccountRegistry;

#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    accounts: Vec<Account>,
}

impl InMemoryRegistry {
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRegistry for InMemoryRegistry {
    fn insert(&mut self, account: Account) -> &mut Account {
        let index = self.accounts.len();
        self.accounts.push(account);
        &mut self.accounts[index]
    }

    fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    fn accounts_mut(&mut self) -> impl Iterator<Item = &mut Account> {
        self.accounts.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        account::{AccountError, AccountEventKind, AccountKind},
        command::{AccountCommand, OpenAccountCommand},
        registry::RegistryError,
    };

    use super::*;

    fn open(number: i32, kind: AccountKind, initial_balance: Decimal) -> AccountCommand {
        let command = OpenAccountCommand::new(number, "Holder", kind, initial_balance).unwrap();
        AccountCommand::Open(command)
    }

    fn savings() -> AccountKind {
        AccountKind::Savings {
            interest_rate: dec!(5),
        }
    }

    fn checking() -> AccountKind {
        AccountKind::Checking {
            overdraft_limit: dec!(50),
        }
    }

    #[test]
    fn open_reports_deposit_then_creation() {
        let mut registry = InMemoryRegistry::default();
        let outcomes = registry.execute(open(101, savings(), dec!(1000)));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0].as_ref().unwrap().to_string(),
            "Deposited Rs.1000 successfully."
        );
        assert_eq!(
            outcomes[1].as_ref().unwrap().to_string(),
            "Savings Account created successfully."
        );
        assert_eq!(registry.find(101).unwrap().balance(), dec!(1000));
    }

    #[test]
    fn invalid_initial_balance_still_opens_account() {
        let mut registry = InMemoryRegistry::default();
        let outcomes = registry.execute(open(7, checking(), dec!(0)));
        assert!(matches!(
            outcomes[0],
            Err(RegistryError::AccountErr(AccountError::InvalidAmount { .. }))
        ));
        assert!(outcomes[1].is_ok());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find(7).unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn invalid_terms_register_nothing() {
        let mut registry = InMemoryRegistry::default();
        let command = OpenAccountCommand {
            number: 3,
            holder: "Holder".into(),
            kind: AccountKind::FixedDeposit {
                term_months: 0,
                interest_rate: dec!(6),
            },
            initial_balance: dec!(100),
        };
        let outcomes = registry.execute(AccountCommand::Open(command));
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            Err(RegistryError::AccountErr(AccountError::ZeroTerm))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_account_is_not_found() {
        let mut registry = InMemoryRegistry::default();
        registry.execute(open(1, savings(), dec!(10)));
        let err = registry.deposit(2, dec!(5)).unwrap_err();
        assert!(matches!(err, RegistryError::AccountNotFound(2)));
        assert_eq!(err.to_string(), "Account not found!");
        assert!(matches!(
            registry.withdraw(2, dec!(5)),
            Err(RegistryError::AccountNotFound(2))
        ));
        assert_eq!(registry.find(1).unwrap().balance(), dec!(10));
    }

    #[test]
    fn duplicate_numbers_first_match_wins() {
        let mut registry = InMemoryRegistry::default();
        registry.execute(open(5, savings(), dec!(10)));
        registry.execute(open(5, checking(), dec!(20)));
        assert_eq!(registry.len(), 2);

        registry.deposit(5, dec!(1)).unwrap();
        let balances: Vec<_> = registry.accounts().map(|acc| acc.balance()).collect();
        assert_eq!(balances, vec![dec!(11), dec!(20)]);
        assert_eq!(registry.find(5).unwrap().kind(), &savings());
    }

    #[test]
    fn rejected_withdrawal_keeps_balance() {
        let mut registry = InMemoryRegistry::default();
        registry.execute(open(2, checking(), dec!(100)));
        let outcomes = registry.execute(AccountCommand::Withdraw {
            account: 2,
            amount: dec!(200),
        });
        assert!(matches!(
            outcomes[0],
            Err(RegistryError::AccountErr(AccountError::OverdraftExceeded { .. }))
        ));
        assert_eq!(registry.find(2).unwrap().balance(), dec!(100));
    }

    #[test]
    fn interest_accrues_on_every_account() {
        let mut registry = InMemoryRegistry::default();
        registry.execute(open(1, savings(), dec!(1000)));
        registry.execute(open(2, checking(), dec!(100)));
        registry.execute(open(
            3,
            AccountKind::FixedDeposit {
                term_months: 12,
                interest_rate: dec!(6),
            },
            dec!(1000),
        ));

        let outcomes = registry.execute(AccountCommand::CalculateInterest);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes[1].as_ref().unwrap().kind(),
            &AccountEventKind::InterestNotEarned
        );

        let balances: Vec<_> = registry.accounts().map(|acc| acc.balance()).collect();
        assert_eq!(balances, vec![dec!(1050), dec!(100), dec!(1060)]);
    }
}
