use std::sync::Arc;

use tracing::{debug, warn};

use pitchboard_db::Database;
use pitchboard_types::models::{Idea, Vote, VoteType};

use crate::error::Result;
use crate::journal::VoteJournal;
use crate::ledger::IdeaLedger;

/// Outcome of a successful vote.
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub idea: Idea,
}

/// Single entry point for casting a vote.
///
/// The journal entry is written before the tally moves. The tally itself is
/// changed with an atomic `votes = votes + delta` update, so concurrent votes
/// on the same idea never act on a stale count.
#[derive(Clone)]
pub struct VoteCoordinator {
    ledger: IdeaLedger,
    journal: VoteJournal,
}

impl VoteCoordinator {
    pub fn new(ledger: IdeaLedger, journal: VoteJournal) -> Self {
        Self { ledger, journal }
    }

    pub fn from_db(db: Arc<Database>) -> Self {
        Self::new(IdeaLedger::new(db.clone()), VoteJournal::new(db))
    }

    pub fn ledger(&self) -> &IdeaLedger {
        &self.ledger
    }

    pub fn journal(&self) -> &VoteJournal {
        &self.journal
    }

    pub fn cast_vote(
        &self,
        idea_id: &str,
        vote_type: &str,
        user_id: Option<String>,
    ) -> Result<VoteReceipt> {
        let vote_type: VoteType = vote_type.parse()?;

        // Resolve first so a missing idea leaves no journal entry behind.
        self.ledger.get_by_id(idea_id)?;

        let vote = self.journal.append(idea_id, vote_type, user_id)?;

        let idea = self
            .ledger
            .adjust_votes(idea_id, vote_type.delta())
            .inspect_err(|e| {
                warn!("Vote {} journaled but tally not applied: {}", vote.id, e);
            })?;

        debug!("Vote {} ({}) on idea {} -> {}", vote.id, vote_type, idea.id, idea.votes);
        Ok(VoteReceipt { vote, idea })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    fn coordinator() -> VoteCoordinator {
        VoteCoordinator::from_db(Arc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn up_and_down_move_the_tally() {
        let c = coordinator();
        let idea = c.ledger().create("t", "d", "AI").unwrap();

        let receipt = c.cast_vote(&idea.id, "up", None).unwrap();
        assert_eq!(receipt.idea.votes, 1);
        assert_eq!(receipt.vote.vote_type, VoteType::Up);

        let receipt = c.cast_vote(&idea.id, "down", Some("u1".into())).unwrap();
        assert_eq!(receipt.idea.votes, 0);
        assert_eq!(receipt.vote.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn tally_matches_seed_plus_journal() {
        let c = coordinator();
        let idea = c.ledger().create_seeded("t", "d", "AI", 7, 0).unwrap();

        let pattern = ["up", "up", "down", "up", "down", "down", "down", "up", "up"];
        for vote_type in pattern {
            c.cast_vote(&idea.id, vote_type, None).unwrap();
        }

        let ups = pattern.iter().filter(|v| **v == "up").count() as i64;
        let downs = pattern.len() as i64 - ups;
        assert_eq!(c.ledger().get_by_id(&idea.id).unwrap().votes, 7 + ups - downs);

        let entries = c.journal().entries_for(&idea.id).unwrap();
        let replayed: i64 = entries.iter().map(|v| v.vote_type.delta()).sum();
        assert_eq!(7 + replayed, 7 + ups - downs);
    }

    #[test]
    fn invalid_direction_changes_nothing() {
        let c = coordinator();
        let idea = c.ledger().create_seeded("t", "d", "AI", 3, 0).unwrap();

        let err = c.cast_vote(&idea.id, "sideways", None).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        assert!(c.journal().entries_for(&idea.id).unwrap().is_empty());
        assert_eq!(c.ledger().get_by_id(&idea.id).unwrap().votes, 3);
    }

    #[test]
    fn missing_idea_leaves_no_journal_entry() {
        let c = coordinator();

        let err = c.cast_vote("ghost", "up", None).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(c.journal().entries_for("ghost").unwrap().is_empty());
    }

    #[test]
    fn concurrent_up_votes_are_not_lost() {
        let c = coordinator();
        let idea = c.ledger().create("t", "d", "AI").unwrap();

        std::thread::scope(|s| {
            for _ in 0..100 {
                s.spawn(|| c.cast_vote(&idea.id, "up", None).unwrap());
            }
        });

        assert_eq!(c.ledger().get_by_id(&idea.id).unwrap().votes, 100);
        assert_eq!(c.journal().entries_for(&idea.id).unwrap().len(), 100);
    }

    #[test]
    fn concurrent_mixed_votes_settle_on_net_count() {
        let c = coordinator();
        let idea = c.ledger().create_seeded("t", "d", "AI", 10, 0).unwrap();

        std::thread::scope(|s| {
            for i in 0..60 {
                let c = &c;
                let id = idea.id.as_str();
                s.spawn(move || {
                    let vote_type = if i % 3 == 0 { "down" } else { "up" };
                    c.cast_vote(id, vote_type, None).unwrap();
                });
            }
        });

        // 20 down, 40 up
        assert_eq!(c.ledger().get_by_id(&idea.id).unwrap().votes, 10 + 40 - 20);
    }
}
