//! Review schema definitions
//!
//! The schema is a fixed, ordered set of 19 field identifiers. Every
//! assembled record carries exactly this key set, no matter how many
//! individual extractions failed.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier for one review field
///
/// The declaration order is the column order of the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Publication date of the review
    Date,
    /// Reviewer's job title
    EmployeeTitle,
    /// Reviewer's office location
    Location,
    /// Current/former employee marker
    Status,
    /// Review headline
    ReviewTitle,
    /// Free-text tenure ("I have been working at ... for more than a year")
    Tenure,
    /// Helpful-vote count; defaults to 0, never absent
    HelpfulCount,
    Pros,
    Cons,
    /// Advice to management
    Advice,
    RatingOverall,
    RatingWorkLife,
    RatingCulture,
    RatingCareer,
    RatingComp,
    RatingManagement,
    /// Whether the reviewer recommends the employer
    Recommends,
    /// Business outlook opinion
    Outlook,
    /// CEO approval opinion
    CeoApproval,
}

impl Field {
    /// All schema fields in column order
    pub const ALL: [Field; 19] = [
        Field::Date,
        Field::EmployeeTitle,
        Field::Location,
        Field::Status,
        Field::ReviewTitle,
        Field::Tenure,
        Field::HelpfulCount,
        Field::Pros,
        Field::Cons,
        Field::Advice,
        Field::RatingOverall,
        Field::RatingWorkLife,
        Field::RatingCulture,
        Field::RatingCareer,
        Field::RatingComp,
        Field::RatingManagement,
        Field::Recommends,
        Field::Outlook,
        Field::CeoApproval,
    ];

    /// Stable column name used in the CSV header
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::EmployeeTitle => "employee_title",
            Self::Location => "location",
            Self::Status => "status",
            Self::ReviewTitle => "review_title",
            Self::Tenure => "years_at_company",
            Self::HelpfulCount => "helpful_count",
            Self::Pros => "pros",
            Self::Cons => "cons",
            Self::Advice => "advice_to_mgmt",
            Self::RatingOverall => "rating_overall",
            Self::RatingWorkLife => "rating_work_life_balance",
            Self::RatingCulture => "rating_culture_values",
            Self::RatingCareer => "rating_career_opportunities",
            Self::RatingComp => "rating_comp_benefits",
            Self::RatingManagement => "rating_senior_management",
            Self::Recommends => "recommends",
            Self::Outlook => "outlook",
            Self::CeoApproval => "approves_of_ceo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One harvested review
///
/// Maps every schema field to a value or the absence sentinel (`None`).
/// Immutable after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<Field, Option<String>>,
}

impl Record {
    /// Builds a record from a full field map
    ///
    /// Returns an error string naming the drift when the key set does not
    /// equal the schema. Callers treat that as a fatal contract violation.
    pub fn from_values(
        values: BTreeMap<Field, Option<String>>,
    ) -> std::result::Result<Self, String> {
        if values.len() != Field::ALL.len() {
            let missing: Vec<&str> = Field::ALL
                .iter()
                .filter(|f| !values.contains_key(*f))
                .map(|f| f.column_name())
                .collect();
            return Err(format!(
                "expected {} fields, got {} (missing: {})",
                Field::ALL.len(),
                values.len(),
                missing.join(", ")
            ));
        }
        Ok(Self { values })
    }

    /// Returns the value for a field, or `None` when absent
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).and_then(|v| v.as_deref())
    }

    /// Values in schema column order, absent fields as empty strings
    pub fn csv_row(&self) -> Vec<&str> {
        Field::ALL
            .iter()
            .map(|f| self.get(*f).unwrap_or(""))
            .collect()
    }
}
