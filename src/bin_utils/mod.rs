//! Front ends used by the `menu-bank` binary: the interactive menu session
//! and the CSV script replay.

use std::io::{Read, Write};

use crate::registry::{AccountRegistry, RegistryError, in_memory_registry::InMemoryRegistry};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRecord, print_accounts};
use thiserror::Error;
use tracing::{debug, warn};

pub mod csv_parser;
pub mod csv_printer;
pub mod prompt;
pub mod session;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Rejected(#[from] RegistryError),
}

/// Replays a CSV operation script against a fresh registry and prints the
/// resulting accounts as CSV.
pub struct ScriptService<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> ScriptService<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut registry = InMemoryRegistry::default();

        for (line, row) in parser {
            let command = match row {
                Ok(operation) => operation.into_command().map_err(RegistryError::from),
                Err(err) => {
                    warn!(line, "skipping malformed row");
                    (self.error_printer)(line, err.into());
                    continue;
                }
            };
            let outcomes = match command {
                Ok(command) => registry.execute(command),
                Err(err) => vec![Err(err)],
            };
            for outcome in outcomes {
                match outcome {
                    Ok(event) => debug!(line, %event, "applied"),
                    Err(err) => (self.error_printer)(line, err.into()),
                }
            }
        }

        print_accounts(self.output, registry.accounts().map(AccountRecord::from))
    }
}
