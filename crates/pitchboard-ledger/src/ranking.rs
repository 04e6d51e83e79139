use std::cmp::Ordering;

use pitchboard_types::models::Idea;

/// Display order: most votes first, newest first among equal tallies.
///
/// The id is the final key so that ideas sharing a tally and a timestamp still
/// come out in the same order on every call.
pub fn rank(mut ideas: Vec<Idea>) -> Vec<Idea> {
    ideas.sort_by(compare);
    ideas
}

fn compare(a: &Idea, b: &Idea) -> Ordering {
    b.votes
        .cmp(&a.votes)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
