//! Client for the ProPublica Campaign Finance API
//!
//! The API serves candidate filings in two shapes: full records carrying
//! money totals (single-candidate lookups, leaderboards, new-candidate
//! listings) and reduced records nested under a `candidate` key (name
//! search, seat listings). Both shapes normalize into the one
//! [`Candidate`] type, and [`Client`] picks the right builder for each
//! operation.
//!
//! ```no_run
//! # async fn run() -> Result<(), campaign_cash::Error> {
//! use campaign_cash::{Client, Cycle};
//!
//! let client = Client::new("YOUR-API-KEY").default_cycle(Cycle::new(2026));
//! if let Some(candidate) = client.find("H0NY01023", None).await? {
//!     let cash = candidate.finances.map_or(0.0, |f| f.end_cash);
//!     println!("{}: ${cash:.2} on hand", candidate.name.as_deref().unwrap_or("?"));
//! }
//! # Ok(())
//! # }
//! ```

mod candidate;
pub use candidate::{Candidate, FinancialSummary, Office};

mod category;
pub use category::LeaderCategory;

mod client;
pub use client::{Chamber, Client, Cycle};

mod transport;
pub use transport::{Envelope, Error, HttpTransport, Transport, DEFAULT_BASE_URL};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::mock;

/// Error for strings naming no known enum value, raised by the `FromStr`
/// impls on [`LeaderCategory`] and [`Chamber`].
#[derive(Debug, thiserror::Error)]
#[error("unknown {what}: {value:?}")]
pub struct ParseError {
    what: &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_owned(),
        }
    }
}
