use std::collections::HashSet;
use std::fmt;

use crate::config::RoutingConfig;
use crate::domain::types::CoordinateTable;

/// Splits a comma-separated lot list into trimmed, upper-cased codes,
/// dropping empty entries and keeping input order.
pub fn parse_lot_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|token| token.trim().to_uppercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Outcome of checking a parsed lot list against the lot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Known codes, first occurrence only, in input order.
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
    pub duplicates: Vec<String>,
    pub min_stops: usize,
    pub max_stops: usize,
}

impl Selection {
    pub fn validate(codes: &[String], table: &CoordinateTable, config: &RoutingConfig) -> Self {
        let mut seen = HashSet::new();
        let mut selection = Self {
            valid: Vec::new(),
            invalid: Vec::new(),
            duplicates: Vec::new(),
            min_stops: config.min_stops,
            max_stops: config.max_stops,
        };

        for code in codes {
            if !seen.insert(code.as_str()) {
                selection.duplicates.push(code.clone());
            } else if table.contains(code) {
                selection.valid.push(code.clone());
            } else {
                selection.invalid.push(code.clone());
            }
        }
        selection
    }

    pub fn within_bounds(&self) -> bool {
        (self.min_stops..=self.max_stops).contains(&self.valid.len())
    }

    /// Ready to be optimized: the known codes alone make an allowed count.
    /// Unknown codes are left out of [`Selection::valid`] and only reported.
    pub fn is_ready(&self) -> bool {
        self.within_bounds()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} valid lots", self.valid.len())?;
        if !self.invalid.is_empty() {
            write!(f, "; {} invalid: {}", self.invalid.len(), self.invalid.join(", "))?;
        }
        if !self.duplicates.is_empty() {
            write!(f, "; repeated: {}", self.duplicates.join(", "))?;
        }
        if !self.within_bounds() {
            write!(
                f,
                "; enter between {} and {} valid lots",
                self.min_stops, self.max_stops
            )?;
        }
        Ok(())
    }
}
