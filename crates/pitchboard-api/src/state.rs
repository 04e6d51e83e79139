use std::sync::Arc;

use pitchboard_db::Database;
use pitchboard_ledger::{IdeaLedger, VoteCoordinator, VoteJournal};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub ledger: IdeaLedger,
    pub votes: VoteCoordinator,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> AppState {
        let ledger = IdeaLedger::new(db.clone());
        let votes = VoteCoordinator::new(ledger.clone(), VoteJournal::new(db));
        Arc::new(Self { ledger, votes })
    }
}
