//! Domain models for production records. A `Record` is the text form of one
//! row exactly as it lives in the data file; the enumerated option sets are
//! only used where the user picks a value, so a file edited by hand still loads
//! without being rejected.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// Number of columns in every persisted row.
pub const COLUMN_COUNT: usize = 5;

/// Header labels for the record grid, in persisted column order.
pub const COLUMN_HEADERS: [&str; COLUMN_COUNT] = [
    "Employee ID",
    "Product Name",
    "Category",
    "Completed",
    "Quality",
];

/// Product category options offered by the form. The first entry is the
/// default selection after the form is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Electronics,
    Furniture,
    Clothing,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Furniture, Category::Clothing];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
        }
    }

    /// Next option, wrapping around to the first.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Previous option, wrapping around to the last.
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| anyhow!("unknown category '{s}'"))
    }
}

/// Quality grade options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    #[default]
    High,
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::High, Quality::Medium, Quality::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::High => "High",
            Quality::Medium => "Medium",
            Quality::Low => "Low",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| anyhow!("unknown quality '{s}'"))
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, step: isize) -> T {
    let len = options.len() as isize;
    let index = options
        .iter()
        .position(|option| *option == current)
        .unwrap_or(0) as isize;
    options[(index + step).rem_euclid(len) as usize]
}

/// A non-negative completed count of any length, held as its decimal digits
/// with leading zeros stripped. Ordering is numeric: a longer digit string is
/// the larger number, equal lengths compare digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletedCount(String);

impl CompletedCount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CompletedCount {
    type Err = Error;

    /// Accepts one or more ASCII digits and nothing else; no sign, no
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(anyhow!("'{s}' is not a completed count"));
        }
        let digits = s.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        Ok(Self(digits.to_string()))
    }
}

impl Ord for CompletedCount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for CompletedCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CompletedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One production record. Every field is kept as the text that is shown in
/// the grid and written to disk; `completed` is only interpreted as a number
/// when validating input or building the statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub employee_id: String,
    pub product_name: String,
    pub category: String,
    pub completed: String,
    pub quality: String,
}

impl Record {
    pub fn new(
        employee_id: impl Into<String>,
        product_name: impl Into<String>,
        category: impl Into<String>,
        completed: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            product_name: product_name.into(),
            category: category.into(),
            completed: completed.into(),
            quality: quality.into(),
        }
    }

    /// Build a record from persisted columns. Missing trailing columns become
    /// empty strings and surplus columns are ignored.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = columns.into_iter().map(Into::into);
        let mut next = || columns.next().unwrap_or_default();
        Self {
            employee_id: next(),
            product_name: next(),
            category: next(),
            completed: next(),
            quality: next(),
        }
    }

    /// The five columns in persisted order.
    pub fn columns(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.employee_id,
            &self.product_name,
            &self.category,
            &self.completed,
            &self.quality,
        ]
    }

    /// Parse the completed count, ignoring surrounding whitespace. Returns
    /// `None` for anything that is not a plain non-negative integer.
    pub fn completed_count(&self) -> Option<CompletedCount> {
        self.completed.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_cycle_in_both_directions() {
        assert_eq!(Category::Electronics.next(), Category::Furniture);
        assert_eq!(Category::Electronics.previous(), Category::Clothing);
        assert_eq!(Quality::Low.next(), Quality::High);
        assert_eq!(Quality::High.previous(), Quality::Low);
    }

    #[test]
    fn option_labels_parse_back() {
        assert_eq!("Furniture".parse::<Category>().unwrap(), Category::Furniture);
        assert_eq!("Medium".parse::<Quality>().unwrap(), Quality::Medium);
        assert!("furniture".parse::<Category>().is_err());
        assert!("Excellent".parse::<Quality>().is_err());
    }

    #[test]
    fn from_columns_pads_and_truncates() {
        let short = Record::from_columns(["E1", "Desk"]);
        assert_eq!(short.columns(), ["E1", "Desk", "", "", ""]);

        let long = Record::from_columns(["E1", "Desk", "Furniture", "4", "Low", "extra"]);
        assert_eq!(long.columns(), ["E1", "Desk", "Furniture", "4", "Low"]);
    }

    #[test]
    fn completed_count_only_accepts_digits() {
        let mut record = Record::new("E1", "Desk", "Furniture", " 012 ", "High");
        assert_eq!(record.completed_count().unwrap().as_str(), "12");
        for bad in ["", "  ", "-2", "3.5", "abc", "+4", "1 2"] {
            record.completed = bad.to_string();
            assert_eq!(record.completed_count(), None, "{bad:?}");
        }
    }

    #[test]
    fn completed_counts_order_numerically_past_u64() {
        let count = |s: &str| s.parse::<CompletedCount>().unwrap();
        assert_eq!(count("000").as_str(), "0");
        assert_eq!(count("007"), count("7"));
        assert!(count("10") > count("9"));
        assert!(count("18446744073709551616") > count("18446744073709551615"));
        assert!(count("100000000000000000000000") > count("99999999999999999999999"));
    }
}
