//! Voting and ranking core.
//!
//! [`IdeaLedger`] owns ideas and their tallies, [`VoteJournal`] keeps the
//! append-only vote history, and [`VoteCoordinator`] ties the two together for
//! a single vote. [`ranking::rank`] orders ideas for display.

pub mod coordinator;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod ranking;
pub mod seed;

mod time;

pub use coordinator::{VoteCoordinator, VoteReceipt};
pub use error::{LedgerError, Result};
pub use journal::VoteJournal;
pub use ledger::IdeaLedger;
