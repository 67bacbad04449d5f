/// Account model: the three account variants and their deposit, withdrawal
/// and interest rules. Balances change only by applying events produced by
/// the account's own handlers.
pub mod account;

/// Validated requests that are executed against the [`registry`].
pub mod command;

/// Registry interface, plus "in memory" implementation.
/// Looks accounts up by number and dispatches commands to them.
pub mod registry;

/// Interactive menu session and CSV script replay. Lives in the library so
/// integration tests can drive both front ends over in-memory buffers.
pub mod bin_utils;
