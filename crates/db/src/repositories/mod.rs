//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The posting, unposting, and closing engines live here: each
//! operation runs inside a single transaction with its guards read first.

pub mod account;
pub mod closing;
pub mod ledger;
pub mod posting;

pub use account::{
    AccountError, AccountRepository, CreateDetailAccountInput, CreateGeneralAccountInput,
};
pub use closing::{ClosingError, ClosingRepository};
pub use ledger::{IntakeError, LedgerRepository};
pub use posting::{PostingError, PostingRepository};
