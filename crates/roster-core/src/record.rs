//! Record model
//!
//! A record exposes each of its columns through a typed accessor that returns
//! a normalized [`Value`], so query code dispatches on the value tag instead
//! of the concrete record layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    CANDIDATE_COLUMNS, ColumnDef, ID_KEY, RANK_KEY, RankError, RecordId, Result, RosterError, Value,
};

/// A row of domain data with a stable identity and typed fields
pub trait Record: Clone {
    /// The column registry for this record type
    fn columns() -> &'static [ColumnDef];

    fn id(&self) -> &RecordId;

    /// Value of the field behind `key`; unknown keys yield `Value::Null`.
    fn field(&self, key: &str) -> Value;

    /// A copy of this record under a new identity
    fn with_id(&self, id: RecordId) -> Self;

    /// A copy of this record with one field replaced.
    ///
    /// Rejects unknown keys, the identity, and values of the wrong shape.
    fn with_field(&self, key: &str, value: Value) -> Result<Self>;

    /// Every field value, identity first, in registry order
    fn fields(&self) -> Vec<Value> {
        std::iter::once(Value::Text(self.id().to_string()))
            .chain(Self::columns().iter().map(|c| self.field(c.key)))
            .collect()
    }

    /// Check the per-record invariants of a record that did not come through
    /// [`Record::with_field`], e.g. one loaded from a file.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The manually assigned rank, if the record type has one and it is set
    fn rank(&self) -> Option<i64> {
        match self.field(RANK_KEY) {
            Value::Number(n) if n.fract() == 0.0 => Some(n as i64),
            _ => None,
        }
    }
}

/// Hiring pipeline stage of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    New,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    pub fn all() -> &'static [CandidateStatus] {
        &[
            Self::New,
            Self::Screening,
            Self::Interview,
            Self::Offer,
            Self::Hired,
            Self::Rejected,
        ]
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                RosterError::invalid_value("status", format!("unknown status '{}'", s))
            })
    }
}

/// Inclusive bounds of the candidate rating
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Largest integer magnitude that survives a round trip through `Value::Number`
pub const MAX_EXACT_INTEGER: i64 = (1 << 53) - 1;

/// A job candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Calendar date as `YYYY-MM-DD`
    pub submitted_at: String,
    pub work_availability: String,
    pub annual_salary_expectation: f64,
    pub work_experience: String,
    pub education: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub rank: Option<i64>,
}

impl Candidate {
    /// Create a candidate with only an identity and a name; every other
    /// field starts empty.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            submitted_at: String::new(),
            work_availability: String::new(),
            annual_salary_expectation: 0.0,
            work_experience: String::new(),
            education: String::new(),
            skills: Vec::new(),
            status: CandidateStatus::New,
            rating: None,
            starred: false,
            rank: None,
        }
    }
}

impl Record for Candidate {
    fn columns() -> &'static [ColumnDef] {
        CANDIDATE_COLUMNS
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            ID_KEY => Value::Text(self.id.to_string()),
            "name" => Value::Text(self.name.clone()),
            "email" => Value::Text(self.email.clone()),
            "phone" => Value::Text(self.phone.clone()),
            "location" => Value::Text(self.location.clone()),
            "submittedAt" => Value::Text(self.submitted_at.clone()),
            "workAvailability" => Value::Text(self.work_availability.clone()),
            "annualSalaryExpectation" => Value::Number(self.annual_salary_expectation),
            "workExperience" => Value::Text(self.work_experience.clone()),
            "education" => Value::Text(self.education.clone()),
            "skills" => Value::List(self.skills.clone()),
            "status" => Value::Text(self.status.as_str().to_string()),
            "rating" => self.rating.map(|r| Value::Number(r as f64)).into(),
            "starred" => Value::Bool(self.starred),
            RANK_KEY => self.rank.into(),
            _ => Value::Null,
        }
    }

    fn with_id(&self, id: RecordId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    fn with_field(&self, key: &str, value: Value) -> Result<Self> {
        let mut next = self.clone();
        match key {
            ID_KEY => return Err(RosterError::ImmutableField(key.to_string())),
            "name" => next.name = expect_text(key, value)?,
            "email" => next.email = expect_text(key, value)?,
            "phone" => next.phone = expect_text(key, value)?,
            "location" => next.location = expect_text(key, value)?,
            "submittedAt" => next.submitted_at = expect_date_text(key, value)?,
            "workAvailability" => next.work_availability = expect_text(key, value)?,
            "annualSalaryExpectation" => {
                next.annual_salary_expectation = expect_number(key, value)?
            }
            "workExperience" => next.work_experience = expect_text(key, value)?,
            "education" => next.education = expect_text(key, value)?,
            "skills" => next.skills = expect_list(key, value)?,
            "status" => next.status = expect_text(key, value)?.parse()?,
            "rating" => next.rating = expect_rating(key, value)?,
            "starred" => next.starred = expect_bool(key, value)?,
            RANK_KEY => next.rank = expect_optional_integer(key, value)?,
            _ => return Err(RosterError::UnknownColumn(key.to_string())),
        }
        Ok(next)
    }

    fn validate(&self) -> Result<()> {
        if let Some(rating) = self.rating
            && !RATING_RANGE.contains(&rating)
        {
            return Err(RosterError::invalid_value(
                "rating",
                format!(
                    "rating must be between {} and {}, got {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end(),
                    rating
                ),
            ));
        }
        if let Some(rank) = self.rank {
            if rank < 1 {
                return Err(RankError::NonPositive { rank }.into());
            }
            check_exact_integer(RANK_KEY, rank)?;
        }
        Ok(())
    }

    fn rank(&self) -> Option<i64> {
        self.rank
    }
}

/// Reject integers that `Value::Number` cannot hold exactly
pub fn check_exact_integer(key: &str, number: i64) -> Result<i64> {
    if number.unsigned_abs() > MAX_EXACT_INTEGER as u64 {
        return Err(RosterError::invalid_value(
            key,
            format!("{} is beyond the exact integer limit {}", number, MAX_EXACT_INTEGER),
        ));
    }
    Ok(number)
}

fn expect_text(key: &str, value: Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Err(RosterError::invalid_value(
            key,
            format!("expected text, got {:?}", other),
        )),
    }
}

fn expect_date_text(key: &str, value: Value) -> Result<String> {
    let text = expect_text(key, value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| RosterError::invalid_value(key, format!("'{}' is not a date: {}", text, e)))
}

fn expect_number(key: &str, value: Value) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n,
        Value::Text(ref s) => s.trim().parse::<f64>().map_err(|_| {
            RosterError::invalid_value(key, format!("'{}' is not a number", s))
        })?,
        other => {
            return Err(RosterError::invalid_value(
                key,
                format!("expected a number, got {:?}", other),
            ));
        }
    };
    if !number.is_finite() {
        return Err(RosterError::invalid_value(key, "number must be finite"));
    }
    Ok(number)
}

fn expect_optional_integer(key: &str, value: Value) -> Result<Option<i64>> {
    if value.is_null() {
        return Ok(None);
    }
    if matches!(value, Value::Text(ref s) if s.trim().is_empty()) {
        return Ok(None);
    }
    let number = expect_number(key, value)?;
    if number.fract() != 0.0 {
        return Err(RosterError::invalid_value(
            key,
            format!("{} is not a whole number", number),
        ));
    }
    if number.abs() > MAX_EXACT_INTEGER as f64 {
        return Err(RosterError::invalid_value(
            key,
            format!("{} is beyond the exact integer limit {}", number, MAX_EXACT_INTEGER),
        ));
    }
    Ok(Some(number as i64))
}

fn expect_rating(key: &str, value: Value) -> Result<Option<u8>> {
    let Some(rating) = expect_optional_integer(key, value)? else {
        return Ok(None);
    };
    let (low, high) = (*RATING_RANGE.start(), *RATING_RANGE.end());
    if rating < low as i64 || rating > high as i64 {
        return Err(RosterError::invalid_value(
            key,
            format!("rating must be between {} and {}, got {}", low, high, rating),
        ));
    }
    Ok(Some(rating as u8))
}

fn expect_bool(key: &str, value: Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::Text(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::Text(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(RosterError::invalid_value(
            key,
            format!("expected a boolean, got {:?}", other),
        )),
    }
}

fn expect_list(key: &str, value: Value) -> Result<Vec<String>> {
    match value {
        Value::List(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Text(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()),
        other => Err(RosterError::invalid_value(
            key,
            format!("expected a list of strings, got {:?}", other),
        )),
    }
}

/// The initial candidate collection handed to a fresh sheet
pub fn seed_candidates() -> Vec<Candidate> {
    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    vec![
        Candidate {
            email: "john@example.com".into(),
            phone: "123-456-7890".into(),
            location: "New York, NY".into(),
            submitted_at: "2024-07-26".into(),
            work_availability: "Full-time".into(),
            annual_salary_expectation: 80000.0,
            work_experience: "5 years".into(),
            education: "Bachelor's Degree".into(),
            skills: skills(&["React", "TypeScript", "Node.js"]),
            status: CandidateStatus::Interview,
            rating: Some(4),
            starred: true,
            rank: Some(1),
            ..Candidate::new("1", "John Doe")
        },
        Candidate {
            email: "jane@example.com".into(),
            phone: "098-765-4321".into(),
            location: "San Francisco, CA".into(),
            submitted_at: "2024-07-25".into(),
            work_availability: "Part-time".into(),
            annual_salary_expectation: 65000.0,
            work_experience: "3 years".into(),
            education: "Master's Degree".into(),
            skills: skills(&["Vue.js", "JavaScript", "CSS"]),
            status: CandidateStatus::Screening,
            rating: Some(5),
            rank: Some(2),
            ..Candidate::new("2", "Jane Smith")
        },
        Candidate {
            email: "carlos@example.com".into(),
            phone: "555-010-2233".into(),
            location: "Austin, TX".into(),
            submitted_at: "2024-07-20".into(),
            work_availability: "Contract".into(),
            annual_salary_expectation: 95000.0,
            work_experience: "8 years".into(),
            education: "PhD".into(),
            skills: skills(&["Rust", "Go", "Kubernetes"]),
            status: CandidateStatus::Offer,
            rating: Some(5),
            starred: true,
            rank: Some(3),
            ..Candidate::new("3", "Carlos Mendez")
        },
        Candidate {
            email: "priya@example.com".into(),
            phone: "555-987-1100".into(),
            location: "San Diego, CA".into(),
            submitted_at: "2024-08-02".into(),
            work_availability: "Full-time".into(),
            annual_salary_expectation: 72000.0,
            work_experience: "2 years".into(),
            education: "Bachelor's Degree".into(),
            skills: skills(&["Python", "SQL"]),
            rating: Some(3),
            ..Candidate::new("4", "Priya Patel")
        },
        Candidate {
            email: "".into(),
            phone: "555-444-9090".into(),
            location: "Chicago, IL".into(),
            submitted_at: "2024-06-30".into(),
            work_availability: "Part-time".into(),
            annual_salary_expectation: 0.0,
            work_experience: "".into(),
            education: "Associate Degree".into(),
            status: CandidateStatus::Rejected,
            ..Candidate::new("5", "Sam Lee")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_accessors_normalize_values() {
        let candidate = &seed_candidates()[0];
        assert_eq!(candidate.field("name"), Value::Text("John Doe".into()));
        assert_eq!(candidate.field("annualSalaryExpectation"), Value::Number(80000.0));
        assert_eq!(
            candidate.field("skills"),
            Value::List(vec!["React".into(), "TypeScript".into(), "Node.js".into()])
        );
        assert_eq!(candidate.field("starred"), Value::Bool(true));
        assert_eq!(candidate.field("rank"), Value::Number(1.0));
        assert_eq!(candidate.field("status"), Value::Text("interview".into()));
        assert_eq!(candidate.field("nope"), Value::Null);
    }

    #[test]
    fn test_unset_optional_fields_are_null() {
        let candidate = Candidate::new("9", "Ann");
        assert_eq!(candidate.field("rating"), Value::Null);
        assert_eq!(candidate.field("rank"), Value::Null);
        assert_eq!(candidate.rank(), None);
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let original = Candidate::new("9", "Ann");
        let updated = original
            .with_field("location", Value::from("Berlin"))
            .unwrap();
        assert_eq!(original.location, "");
        assert_eq!(updated.location, "Berlin");
        assert_eq!(updated.id, original.id);
    }

    #[test]
    fn test_with_field_rejections() {
        let candidate = Candidate::new("9", "Ann");
        assert!(matches!(
            candidate.with_field("id", Value::from("10")),
            Err(RosterError::ImmutableField(_))
        ));
        assert!(matches!(
            candidate.with_field("salary", Value::from(1.0)),
            Err(RosterError::UnknownColumn(_))
        ));
        assert!(matches!(
            candidate.with_field("rating", Value::from(6i64)),
            Err(RosterError::InvalidValue { .. })
        ));
        assert!(matches!(
            candidate.with_field("submittedAt", Value::from("yesterday")),
            Err(RosterError::InvalidValue { .. })
        ));
        assert!(matches!(
            candidate.with_field("rank", Value::from(1.5)),
            Err(RosterError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rank_must_be_exact_integer() {
        let candidate = Candidate::new("9", "Ann");
        assert!(matches!(
            candidate.with_field("rank", Value::from("1e30")),
            Err(RosterError::InvalidValue { .. })
        ));
        assert!(matches!(
            candidate.with_field("rank", Value::from(9_007_199_254_740_992.0)),
            Err(RosterError::InvalidValue { .. })
        ));
        let largest = candidate
            .with_field("rank", Value::from(MAX_EXACT_INTEGER))
            .unwrap();
        assert_eq!(largest.rank, Some(MAX_EXACT_INTEGER));

        assert!(check_exact_integer("rank", 9_007_199_254_740_993).is_err());
        assert!(check_exact_integer("rank", i64::MIN).is_err());
        assert_eq!(check_exact_integer("rank", -7).unwrap(), -7);
    }

    #[test]
    fn test_validate_loaded_candidates() {
        assert!(seed_candidates().iter().all(|c| c.validate().is_ok()));

        let bad_rating = Candidate {
            rating: Some(9),
            ..Candidate::new("1", "Ann")
        };
        assert!(matches!(
            bad_rating.validate(),
            Err(RosterError::InvalidValue { ref column, .. }) if column == "rating"
        ));

        let bad_rank = Candidate {
            rank: Some(-4),
            ..Candidate::new("1", "Ann")
        };
        assert!(matches!(
            bad_rank.validate(),
            Err(RosterError::InvalidRank(RankError::NonPositive { rank: -4 }))
        ));

        let huge_rank = Candidate {
            rank: Some(i64::MAX),
            ..Candidate::new("1", "Ann")
        };
        assert!(huge_rank.validate().is_err());
    }

    #[test]
    fn test_with_field_coercions() {
        let candidate = Candidate::new("9", "Ann");
        let updated = candidate
            .with_field("skills", Value::from("Go, Rust,"))
            .and_then(|c| c.with_field("status", Value::from("Hired")))
            .and_then(|c| c.with_field("annualSalaryExpectation", Value::from(" 72000 ")))
            .and_then(|c| c.with_field("starred", Value::from("true")))
            .and_then(|c| c.with_field("rating", Value::from(2i64)))
            .unwrap();
        assert_eq!(updated.skills, vec!["Go".to_string(), "Rust".to_string()]);
        assert_eq!(updated.status, CandidateStatus::Hired);
        assert_eq!(updated.annual_salary_expectation, 72000.0);
        assert!(updated.starred);
        assert_eq!(updated.rating, Some(2));

        let cleared = updated.with_field("rating", Value::Null).unwrap();
        assert_eq!(cleared.rating, None);
    }

    #[test]
    fn test_fields_start_with_identity() {
        let candidate = Candidate::new("42", "Ann");
        let fields = candidate.fields();
        assert_eq!(fields[0], Value::Text("42".into()));
        assert_eq!(fields[1], Value::Text("Ann".into()));
        assert_eq!(fields.len(), CANDIDATE_COLUMNS.len() + 1);
    }

    #[test]
    fn test_seed_identities_and_ranks_are_unique() {
        let seed = seed_candidates();
        let mut ids: Vec<_> = seed.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), seed.len());

        let mut ranks: Vec<_> = seed.iter().filter_map(|c| c.rank).collect();
        let total = ranks.len();
        ranks.sort();
        ranks.dedup();
        assert_eq!(ranks.len(), total);
        assert!(ranks.iter().all(|r| *r >= 1));
    }

    #[test]
    fn test_candidate_json_uses_camel_case() {
        let json = serde_json::to_value(Candidate::new("1", "Ann")).unwrap();
        assert_eq!(json["submittedAt"], serde_json::json!(""));
        assert_eq!(json["annualSalaryExpectation"], serde_json::json!(0.0));
        assert_eq!(json["status"], serde_json::json!("new"));
    }
}
