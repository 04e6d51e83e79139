use tracing::info;

use crate::error::Result;
use crate::ledger::IdeaLedger;

struct SampleIdea {
    title: &'static str,
    description: &'static str,
    tag: &'static str,
    votes: i64,
    comments: i64,
}

const SAMPLE_IDEAS: &[SampleIdea] = &[
    SampleIdea {
        title: "AI that cooks your meals",
        description: "Smart kitchen AI that learns your preferences and cooks personalized meals automatically.",
        tag: "AI",
        votes: 120,
        comments: 8,
    },
    SampleIdea {
        title: "Uber for pencils",
        description: "On-demand pencil delivery service for students and professionals who always lose their writing tools.",
        tag: "SaaS",
        votes: 14,
        comments: 3,
    },
    SampleIdea {
        title: "Crypto fridge that mines coins",
        description: "Smart refrigerator that uses excess cooling power to mine cryptocurrency while keeping your food fresh.",
        tag: "Crypto",
        votes: 65,
        comments: 12,
    },
];

/// Insert the sample ideas if the ledger is empty. Returns how many were added.
pub fn seed_sample_ideas(ledger: &IdeaLedger) -> Result<usize> {
    if !ledger.is_empty()? {
        return Ok(0);
    }

    for sample in SAMPLE_IDEAS {
        ledger.create_seeded(
            sample.title,
            sample.description,
            sample.tag,
            sample.votes,
            sample.comments,
        )?;
    }

    info!("Seeded {} sample ideas", SAMPLE_IDEAS.len());
    Ok(SAMPLE_IDEAS.len())
}
