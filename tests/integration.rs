use std::{cell::RefCell, rc::Rc, str::from_utf8};

use menu_bank::{
    bin_utils::{ScriptError, ScriptService, session::Session},
    registry::AccountRegistry,
};
use rust_decimal_macros::dec;

const TEST_FILE: &str = include_str!("operations.csv");

#[test]
fn replay_operation_script() {
    let mut output = Vec::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let collected = Rc::clone(&errors);
    let service = ScriptService {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |line, err: ScriptError| {
            collected.borrow_mut().push((line, err.to_string()));
        }),
    };
    service.run().unwrap();

    let lines: Vec<&str> = from_utf8(&output).unwrap().lines().collect();
    assert_eq!(
        lines,
        vec![
            "account,holder,type,balance,interest_rate,overdraft_limit,term_months",
            "101,Asha Rao,savings,1050,5,,",
            "202,Ben Okafor,checking,-20,,50,",
            "303,Chen Li,fixed_deposit,1060,6,,12",
        ]
    );

    let errors = errors.borrow();
    let messages: Vec<&str> = errors.iter().map(|(_, msg)| msg.as_str()).collect();
    assert_eq!(messages.len(), 5);
    assert!(messages[0].starts_with("Withdrawal exceeds overdraft limit"));
    assert!(messages[1].starts_with("Invalid amount Rs.-5"));
    assert_eq!(messages[2], "Account not found!");
    assert_eq!(messages[3], "Overdraft limit must not be negative, got Rs.-1");
    assert_eq!(messages[4], "Field `amount` is required for Withdraw");
}

#[test]
fn interactive_session() {
    let input = [
        // savings account, 1000 at 5%
        "1", "101", "Asha Rao", "1000", "5",
        // checking account, 100 with 50 overdraft
        "2", "202", "Ben", "100", "50",
        // fixed deposit with an invalid initial balance
        "3", "303", "Chen", "-10", "12", "6",
        "5", "202", "120",
        "5", "202", "200",
        "4", "101", "-5",
        "4", "999", "10",
        "4", "303", "abc", "1000",
        "7",
        "6",
        "9",
        "menu",
        "8",
    ]
    .join("\n");
    let mut output = Vec::new();
    let session = Session {
        input: input.as_bytes(),
        output: &mut output,
    };
    let registry = session.run().unwrap();

    let text = from_utf8(&output).unwrap();
    for expected in [
        "---- BANKING SYSTEM MENU ----",
        "Deposited Rs.1000 successfully.",
        "Savings Account created successfully.",
        "Checking Account created successfully.",
        "Invalid amount Rs.-10, amount must be positive",
        "Fixed Deposit Account created successfully.",
        "Overdraft used: Rs.20\nWithdrew Rs.120 successfully.",
        "Withdrawal exceeds overdraft limit",
        "Invalid amount Rs.-5, amount must be positive",
        "Account not found!",
        "Invalid input, please try again.",
        "Savings Interest Rs.50 added.",
        "Checking account does not earn interest.",
        "FD Interest Rs.60 added for 12 months.",
        "--- Savings Account ---\nAccount No: 101\nHolder: Asha Rao\nBalance: Rs.1050\nInterest Rate: 5%",
        "--- Checking Account ---\nAccount No: 202\nHolder: Ben\nBalance: Rs.-20\nOverdraft Limit: Rs.50",
        "--- Fixed Deposit Account ---\nAccount No: 303\nHolder: Chen\nBalance: Rs.1060\nTerm: 12 months\nInterest Rate: 6%",
        "Thank you, visit again!",
    ] {
        assert!(text.contains(expected), "missing `{expected}` in:\n{text}");
    }
    assert_eq!(text.matches("Invalid choice!").count(), 2);

    let balances: Vec<_> = registry.accounts().map(|acc| acc.balance()).collect();
    assert_eq!(balances, vec![dec!(1050), dec!(-20), dec!(1060)]);
}
