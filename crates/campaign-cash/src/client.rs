//! Query dispatch: the public operations of the Campaign Finance API.
//!
//! [`Client`] builds the relative path and query parameters for each
//! operation, delegates the fetch to its [`Transport`], and maps every raw
//! item in the reply through the matching [`Candidate`] builder. Lookups,
//! leaderboards and new-candidate listings return full-form records;
//! search and seat queries return the reduced search form.

use crate::candidate::Candidate;
use crate::category::LeaderCategory;
use crate::transport::{Error, HttpTransport, Transport};
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A two-year filing cycle, identified by its even-numbered closing year.
///
/// Candidate ids, committees and totals are all namespaced per cycle, so
/// every operation takes one. Construction does not validate the year;
/// the API rejects cycles it has no data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(u16);

impl Cycle {
    /// Cycle applied when an operation is given `None` and the client was
    /// built without an explicit default.
    pub const DEFAULT: Self = Self(2026);

    #[must_use]
    pub const fn new(year: u16) -> Self {
        Self(year)
    }

    #[must_use]
    pub const fn year(self) -> u16 {
        self.0
    }
}

impl From<u16> for Cycle {
    fn from(year: u16) -> Self {
        Self(year)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Congressional chamber, used to narrow seat queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// Lowercase path segment the seats endpoint expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chamber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(Self::House),
            "senate" => Ok(Self::Senate),
            _ => Err(ParseError::new("chamber", s)),
        }
    }
}

/// Client for candidate queries, generic over the transport so tests can
/// substitute a mock.
///
/// Operations take `cycle: Option<Cycle>`; `None` resolves to the
/// client's default. The default is plain configuration carried by the
/// client value, not process state.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
    default_cycle: Cycle,
}

impl Client<HttpTransport> {
    /// Client against the production API with the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(api_key))
    }
}

impl<T: Transport> Client<T> {
    /// Wrap an arbitrary transport: a mock in unit tests, or an
    /// [`HttpTransport`] built around a custom `reqwest::Client`.
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            default_cycle: Cycle::DEFAULT,
        }
    }

    /// Replace the cycle used when operations receive `None`.
    #[must_use]
    pub fn default_cycle(mut self, cycle: Cycle) -> Self {
        self.default_cycle = cycle;
        self
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn cycle_or_default(&self, cycle: Option<Cycle>) -> Cycle {
        cycle.unwrap_or(self.default_cycle)
    }

    /// Retrieve a single candidate by FEC id within a cycle.
    ///
    /// Returns `Ok(None)` when the API reports no results for the id.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn find(&self, fec_id: &str, cycle: Option<Cycle>) -> Result<Option<Candidate>, Error> {
        let cycle = self.cycle_or_default(cycle);
        let reply = self
            .transport
            .invoke(&format!("{cycle}/candidates/{fec_id}"), &[])
            .await?;
        Ok(reply.results.first().map(Candidate::from_detail))
    }

    /// Candidates leading a financial category within a cycle.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn leaders(
        &self,
        category: LeaderCategory,
        cycle: Option<Cycle>,
    ) -> Result<Vec<Candidate>, Error> {
        let cycle = self.cycle_or_default(cycle);
        let reply = self
            .transport
            .invoke(&format!("{cycle}/candidates/leaders/{}", category.slug()), &[])
            .await?;
        Ok(reply.results.iter().map(Candidate::from_detail).collect())
    }

    /// Candidates whose names match a free-text query.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn search(
        &self,
        name: &str,
        cycle: Option<Cycle>,
        offset: Option<u32>,
    ) -> Result<Vec<Candidate>, Error> {
        let cycle = self.cycle_or_default(cycle);
        let mut params = vec![("query", name.to_owned())];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        let reply = self
            .transport
            .invoke(&format!("{cycle}/candidates/search"), &params)
            .await?;
        Ok(reply
            .results
            .iter()
            .map(Candidate::from_search_result)
            .collect())
    }

    /// Candidates recently added to the FEC rolls for a cycle.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn new_candidates(
        &self,
        cycle: Option<Cycle>,
        offset: Option<u32>,
    ) -> Result<Vec<Candidate>, Error> {
        let cycle = self.cycle_or_default(cycle);
        let mut params = Vec::new();
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        let reply = self
            .transport
            .invoke(&format!("{cycle}/candidates/new"), &params)
            .await?;
        Ok(reply.results.iter().map(Candidate::from_detail).collect())
    }

    /// Candidates for a state's seats, optionally narrowed to a chamber
    /// and, within a chamber, to a district.
    ///
    /// The path grows with the arguments, mirroring the API's scheme:
    /// `{cycle}/seats/{state}`, then `/{chamber}`, then `/{district}`.
    /// A district without a chamber is ignored since there is no path
    /// for it.
    ///
    /// # Errors
    /// Propagates transport failures unchanged.
    pub async fn by_state(
        &self,
        state: &str,
        chamber: Option<Chamber>,
        district: Option<u32>,
        cycle: Option<Cycle>,
        offset: Option<u32>,
    ) -> Result<Vec<Candidate>, Error> {
        let cycle = self.cycle_or_default(cycle);
        let mut path = format!("{cycle}/seats/{state}");
        if let Some(chamber) = chamber {
            path.push_str(&format!("/{chamber}"));
            if let Some(district) = district {
                path.push_str(&format!("/{district}"));
            }
        }
        let mut params = Vec::new();
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        let reply = self.transport.invoke(&path, &params).await?;
        Ok(reply
            .results
            .iter()
            .map(Candidate::from_search_result)
            .collect())
    }
}
