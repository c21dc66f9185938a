use crate::error::{DashboardError, Result};
use crate::utils::naming::{display_name, normalize_key};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic partition the measurements are split by. Each region has one
/// cleaned file named after its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Benin,
    SierraLeone,
    Togo,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Benin, Region::SierraLeone, Region::Togo];

    /// Internal identifier, also the stem of the region's data file.
    pub fn id(&self) -> &'static str {
        match self {
            Region::Benin => "benin",
            Region::SierraLeone => "sierra_leone",
            Region::Togo => "togo",
        }
    }

    pub fn display_name(&self) -> String {
        display_name(self.id())
    }

    /// Resolve user input given either as id or display name, ignoring case.
    pub fn parse(name: &str) -> Result<Self> {
        let key = normalize_key(name);
        Self::ALL
            .into_iter()
            .find(|r| r.id() == key || normalize_key(&r.display_name()) == key)
            .ok_or_else(|| DashboardError::UnknownRegion(name.trim().to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for Region {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_display_names() {
        assert_eq!(Region::SierraLeone.id(), "sierra_leone");
        assert_eq!(Region::SierraLeone.display_name(), "Sierra Leone");
        assert_eq!(Region::Benin.to_string(), "Benin");
    }

    #[test]
    fn test_parse_accepts_ids_and_display_names() {
        assert_eq!(Region::parse("togo").unwrap(), Region::Togo);
        assert_eq!(Region::parse("Sierra Leone").unwrap(), Region::SierraLeone);
        assert_eq!("BENIN".parse::<Region>().unwrap(), Region::Benin);
    }

    #[test]
    fn test_parse_unknown_region() {
        match Region::parse("Atlantis") {
            Err(DashboardError::UnknownRegion(name)) => assert_eq!(name, "Atlantis"),
            other => panic!("expected UnknownRegion, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Region::SierraLeone).unwrap();
        assert_eq!(json, "\"sierra_leone\"");
        let region: Region = serde_json::from_str("\"togo\"").unwrap();
        assert_eq!(region, Region::Togo);
    }
}
