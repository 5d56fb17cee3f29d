//! Leaderboard categories for ranking candidates within a cycle.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Financial metric the leaders endpoint ranks candidates by.
///
/// [`slug`](Self::slug) is the path segment the API expects;
/// [`description`](Self::description) is the label the FEC summary files
/// attach to the metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderCategory {
    IndividualTotal,
    ContributionTotal,
    CandidateLoan,
    ReceiptsTotal,
    RefundTotal,
    PacTotal,
    DisbursementsTotal,
    EndCash,
    DebtsOwed,
}

impl LeaderCategory {
    /// Every category the API serves.
    pub const ALL: [Self; 9] = [
        Self::IndividualTotal,
        Self::ContributionTotal,
        Self::CandidateLoan,
        Self::ReceiptsTotal,
        Self::RefundTotal,
        Self::PacTotal,
        Self::DisbursementsTotal,
        Self::EndCash,
        Self::DebtsOwed,
    ];

    /// Path segment for the leaders endpoint.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::IndividualTotal => "individual_total",
            Self::ContributionTotal => "contribution_total",
            Self::CandidateLoan => "candidate_loan",
            Self::ReceiptsTotal => "receipts_total",
            Self::RefundTotal => "refund_total",
            Self::PacTotal => "pac_total",
            Self::DisbursementsTotal => "disbursements_total",
            Self::EndCash => "end_cash",
            Self::DebtsOwed => "debts_owed",
        }
    }

    /// Human-readable label for the metric.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::IndividualTotal => "Contributions from individuals",
            Self::ContributionTotal => "Total contributions",
            Self::CandidateLoan => "Loans from candidate",
            Self::ReceiptsTotal => "Total receipts",
            Self::RefundTotal => "Total refunds",
            Self::PacTotal => "Contributions from PACs",
            Self::DisbursementsTotal => "Total disbursements",
            Self::EndCash => "Cash on hand",
            Self::DebtsOwed => "Debts owed by",
        }
    }
}

/// Displays as the API slug, mirroring `FromStr`.
impl fmt::Display for LeaderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LeaderCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| ParseError::new("leaderboard category", s))
    }
}
