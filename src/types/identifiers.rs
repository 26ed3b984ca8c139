//! Identifier types for the scanner entry simulator
//!
//! Employees are identified by their position in the sorted arrival sequence of a
//! run. The index doubles as the generation order used to break ties between
//! identical arrival times.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier for an employee within a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeId(pub usize);

impl EmployeeId {
    /// Create an identifier from an arrival-order index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this employee in the arrival sequence
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMP_{:06}", self.0)
    }
}

impl Serialize for EmployeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("EMP_").unwrap_or(&s);
        let index = digits.parse::<usize>().map_err(serde::de::Error::custom)?;
        Ok(EmployeeId(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_display() {
        assert_eq!(EmployeeId::new(42).to_string(), "EMP_000042");
        assert_eq!(EmployeeId::new(0).index(), 0);
    }

    #[test]
    fn test_employee_id_ordering_follows_index() {
        assert!(EmployeeId::new(1) < EmployeeId::new(2));
    }

    #[test]
    fn test_employee_id_serde() {
        let id = EmployeeId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"EMP_000007\"");
        let back: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        // Bare indices are accepted as well
        let bare: EmployeeId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(bare, EmployeeId::new(12));
        assert!(serde_json::from_str::<EmployeeId>("\"EMP_x\"").is_err());
    }
}
