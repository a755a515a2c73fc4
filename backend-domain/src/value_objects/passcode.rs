// Passcode value object

use serde::Deserialize;

/// Shared low-entropy numeric code per participant. An identification
/// convenience for the entry form, NOT an authentication control; it only
/// keeps players from logging drinks under each other's names by accident.
/// Deliberately not `Serialize`: passcodes never appear in responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Passcode(String);

impl Passcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate.trim()
    }
}
