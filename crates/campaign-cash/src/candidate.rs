//! Candidate records and the normalization rules that produce them.
//!
//! The Campaign Finance API returns candidates in two shapes: a flat full
//! record carrying financial totals (detail, leaders and new-candidate
//! endpoints) and a terse search result nesting identity under a `candidate`
//! key (search and seats endpoints). [`Candidate::from_detail`] and
//! [`Candidate::from_search_result`] map both onto one canonical record.
//!
//! Every builder and helper here is pure and total: absent or malformed
//! fields coerce to `None`, `0` or `0.0` per field, and nothing in this
//! module performs I/O or returns an error. Several fields are derived
//! rather than copied, since the API does not supply them directly:
//!
//! - office comes from the first character of the FEC candidate id,
//! - district comes from the filename segment of a race URI,
//! - state comes from a race URI (full form) or from the id itself
//!   (search form),
//! - committee id comes from whichever encoding of the `committee` field
//!   the endpoint used.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Office sought by a candidate, derived from the first character of the
/// FEC candidate id (`H` for House, `S` for Senate).
///
/// Any other first character falls back to `President`, matching the id
/// scheme's `P` prefix for presidential filings. The fallback applies to
/// malformed ids as well, lowercase `h`/`s` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Office {
    House,
    Senate,
    President,
}

impl Office {
    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
            Self::President => "president",
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary totals from a candidate's most recent summary filing.
///
/// Only full-form records carry these. Absent, null or non-numeric raw
/// values coerce to `0.0`; the all-zero [`Default`] describes a candidate
/// with no filings yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_receipts: f64,
    pub total_contributions: f64,
    pub total_from_individuals: f64,
    pub total_from_pacs: f64,
    pub candidate_loans: f64,
    pub total_disbursements: f64,
    pub total_refunds: f64,
    pub debts_owed: f64,
    pub begin_cash: f64,
    pub end_cash: f64,
}

/// A candidate for federal office within one filing cycle, normalized from
/// either API shape.
///
/// Records are built once per API item and never mutated. Fields the
/// source shape does not carry stay `None`; in particular `finances` is
/// `None` on search results, where absent totals are not the same thing
/// as zero totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// FEC candidate id, e.g. `H0NY01023`. The API supplies one on every
    /// record; an empty string means the payload broke that contract.
    pub id: String,
    pub name: Option<String>,
    pub party: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    pub office: Option<Office>,
    /// District number. `0` covers at-large seats, statewide offices and
    /// district URIs that did not parse.
    pub district: u32,
    pub fec_uri: Option<String>,
    /// Id of the candidate's principal campaign committee.
    pub committee_id: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_address: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zip: Option<String>,
    pub status: Option<String>,
    pub date_coverage_from: Option<String>,
    pub date_coverage_to: Option<String>,
    /// `Some` on full-form records, `None` on search results.
    pub finances: Option<FinancialSummary>,
}

impl Candidate {
    /// Build a candidate from a full-form item, the shape returned by the
    /// detail, leaders and new-candidates endpoints.
    ///
    /// Total over any JSON value: missing or mistyped keys read as absent
    /// and coerce per field, so a malformed payload yields a sparse record
    /// rather than a panic.
    #[must_use]
    pub fn from_detail(item: &Value) -> Self {
        let id = text(item, "id");
        let office = parse_office(id.as_deref());
        Self {
            id: id.unwrap_or_default(),
            name: text(item, "name"),
            party: text(item, "party"),
            state: parse_state(text(item, "state").as_deref()),
            office,
            district: parse_district(text(item, "district").as_deref()),
            fec_uri: text(item, "fec_uri"),
            committee_id: parse_committee(item.get("committee")),
            mailing_city: text(item, "mailing_city"),
            mailing_address: text(item, "mailing_address"),
            mailing_state: text(item, "mailing_state"),
            mailing_zip: text(item, "mailing_zip"),
            status: text(item, "status"),
            date_coverage_from: text(item, "date_coverage_from"),
            date_coverage_to: text(item, "date_coverage_to"),
            finances: Some(FinancialSummary {
                total_receipts: coerce_f64(item.get("total_receipts")),
                total_contributions: coerce_f64(item.get("total_contributions")),
                total_from_individuals: coerce_f64(item.get("total_from_individuals")),
                total_from_pacs: coerce_f64(item.get("total_from_pacs")),
                candidate_loans: coerce_f64(item.get("candidate_loans")),
                total_disbursements: coerce_f64(item.get("total_disbursements")),
                total_refunds: coerce_f64(item.get("total_refunds")),
                debts_owed: coerce_f64(item.get("debts_owed")),
                begin_cash: coerce_f64(item.get("begin_cash")),
                end_cash: coerce_f64(item.get("end_cash")),
            }),
        }
    }

    /// Build a candidate from a search-form item, the shape returned by the
    /// search and seats endpoints: `{"candidate": {...}, "district": ...,
    /// "committee": ...}`.
    ///
    /// Only identity fields are populated. Everything else stays `None`,
    /// `finances` included: these endpoints do not report totals, and a
    /// missing total is not a zero total.
    #[must_use]
    pub fn from_search_result(item: &Value) -> Self {
        let nested = item.get("candidate");
        let id = nested.and_then(|c| c.get("id")).and_then(Value::as_str);
        // Seat ids embed the state at bytes 2..4 (`S4CA00123` is a
        // California filing). This is deliberately not the race-URI
        // derivation `parse_state` applies to full records.
        let state = id.and_then(|s| s.get(2..4)).map(str::to_owned);
        let office = parse_office(id);
        Self {
            id: id.map(str::to_owned).unwrap_or_default(),
            name: nested.and_then(|c| text(c, "name")),
            party: nested.and_then(|c| text(c, "party")),
            state,
            office,
            district: parse_district(item.get("district").and_then(Value::as_str)),
            fec_uri: None,
            committee_id: parse_committee(item.get("committee")),
            mailing_city: None,
            mailing_address: None,
            mailing_state: None,
            mailing_zip: None,
            status: None,
            date_coverage_from: None,
            date_coverage_to: None,
            finances: None,
        }
    }
}

/// Fetch a string field from a JSON object. Non-strings read as absent.
fn text(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Two-letter state code from a race URI: the last path segment truncated
/// to two characters (`.../races/NY.json` yields `NY`).
fn parse_state(raw: Option<&str>) -> Option<String> {
    let segment = raw?.rsplit('/').next().unwrap_or_default();
    Some(segment.chars().take(2).collect())
}

/// Office from the first character of a candidate id. Absent in, absent
/// out; every present id resolves, unknown prefixes as `President`.
fn parse_office(id: Option<&str>) -> Option<Office> {
    let id = id?;
    Some(match id.chars().next() {
        Some('H') => Office::House,
        Some('S') => Office::Senate,
        _ => Office::President,
    })
}

/// District number from a race URI: the filename segment before its first
/// `.`, parsed as an integer (`.../NY/house/12.json` yields 12). Absent,
/// unparsable and non-positive inputs all yield 0, so a literal district 0
/// and a parse failure are indistinguishable by design.
fn parse_district(uri: Option<&str>) -> u32 {
    let Some(uri) = uri else { return 0 };
    let stem = uri
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default();
    match stem.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).unwrap_or(0),
        _ => 0,
    }
}

/// Committee id from the `committee` field. Endpoints encode it either as
/// a relative URI (`/committees/C00553560.json`) or as a nested object
/// carrying an `id`; any other shape reads as absent.
fn parse_committee(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(uri) => {
            let stem = uri
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .split('.')
                .next()
                .unwrap_or_default();
            (!stem.is_empty()).then(|| stem.to_owned())
        }
        Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

/// Best-effort float coercion for money fields: numbers pass through,
/// numeric strings parse, everything else (null, absent, other shapes,
/// non-finite strings) reads as `0.0`. Never fails.
fn coerce_f64(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Arbitrary JSON values of modest depth, biased toward the strings and
    /// objects the API actually sends.
    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[A-Za-z0-9/._ -]{0,24}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                prop::collection::btree_map("[a-z_]{1,16}", inner, 0..6)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Offices follow the first character of the id for every string
        #[test]
        fn office_matches_prefix(id in ".{0,12}") {
            let expected = match id.chars().next() {
                Some('H') => Office::House,
                Some('S') => Office::Senate,
                _ => Office::President,
            };
            prop_assert_eq!(parse_office(Some(&id)), Some(expected));
        }

        /// District parsing never panics, whatever the uri looks like
        #[test]
        fn district_total_over_arbitrary_strings(uri in ".{0,48}") {
            let _ = parse_district(Some(&uri));
        }

        /// Numeric stems survive the round trip through a race uri
        #[test]
        fn district_recovers_numeric_stems(n in 1u32..=10_000) {
            let uri = format!("races/NY/house/{n}.json");
            prop_assert_eq!(parse_district(Some(&uri)), n);
        }

        /// Both builders are total and idempotent over arbitrary JSON
        #[test]
        fn builders_total_and_idempotent(item in arb_json()) {
            prop_assert_eq!(Candidate::from_detail(&item), Candidate::from_detail(&item));
            prop_assert_eq!(
                Candidate::from_search_result(&item),
                Candidate::from_search_result(&item)
            );
        }

        /// Money coercion always lands on a finite float
        #[test]
        fn money_always_finite(raw in arb_json()) {
            prop_assert!(coerce_f64(Some(&raw)).is_finite());
        }
    }
}
