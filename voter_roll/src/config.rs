// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The closed set of gender categories used for tallying.
///
/// Raw source values are always folded into one of these categories, so a
/// tally can never contain an unmapped label.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Gender {
    Male,
    Female,
    /// Anything that does not map to a known label, including blank cells.
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unknown];

    /// Normalizes a raw cell value into a category.
    ///
    /// The mapping is total: any input, including empty or garbage values,
    /// yields a category.
    pub fn parse(raw: &str) -> Gender {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" => Gender::Male,
            "f" | "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

// ******** Errors *********

/// Errors that prevent a roll from being assembled from a source table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RollErrors {
    /// The source table has no header row.
    EmptyTable,
    /// A required column could not be resolved in the header.
    MissingColumn(String),
}

impl Error for RollErrors {}

impl Display for RollErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RollErrors::EmptyTable => write!(f, "the source table has no header row"),
            RollErrors::MissingColumn(name) => write!(f, "missing required column: {}", name),
        }
    }
}

// ********* Configuration **********

/// Options controlling how queries are matched against a roll.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SearchOptions {
    /// When true, only the name, door number and identity-card columns are
    /// searched. Relation columns (father or husband names) are ignored so
    /// that shared family names do not trigger matches.
    pub restrict_to_identity_fields: bool,
}

impl SearchOptions {
    pub const DEFAULT: SearchOptions = SearchOptions {
        restrict_to_identity_fields: true,
    };
}
