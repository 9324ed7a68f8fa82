//! Core domain types: registry rows, name classifications, and the nested
//! region tree written out per top-level region.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SourceRecord
// ---------------------------------------------------------------------------

/// Whether a registry row is still in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Abolished,
}

impl Status {
    /// Map a raw status flag to a [`Status`]. Anything other than the
    /// active label counts as abolished.
    pub fn from_flag(flag: &str, active_label: &str) -> Self {
        if flag.trim() == active_label {
            Self::Active
        } else {
            Self::Abolished
        }
    }
}

/// A single row of the national administrative-division registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Fixed-width numeric code (up to 10 digits).
    pub code: String,
    /// Space-delimited hierarchical name, most general token first.
    pub full_name: String,
    pub status: Status,
}

impl SourceRecord {
    pub fn new(code: impl Into<String>, full_name: impl Into<String>, status: Status) -> Self {
        Self {
            code: code.into(),
            full_name: full_name.into(),
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The hierarchy level a name terminates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalLevel {
    /// 시도: province or metropolitan city.
    Region = 1,
    /// 시군구: city, county, or borough.
    District = 2,
    /// 읍면동: town, township, neighborhood, or urban block.
    Locality = 3,
}

impl TerminalLevel {
    /// Numeric depth, 1 through 3.
    pub fn depth(self) -> u8 {
        self as u8
    }
}

/// A full name decomposed into region / district / locality names.
///
/// `terminal == None` means the record is excluded and every name is unset.
/// A locality is never set without a district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub terminal: Option<TerminalLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
}

impl Classification {
    /// Excluded from the tree.
    pub fn excluded() -> Self {
        Self::default()
    }

    pub fn region(region: impl Into<String>) -> Self {
        Self {
            terminal: Some(TerminalLevel::Region),
            region: Some(region.into()),
            ..Self::default()
        }
    }

    pub fn district(region: Option<String>, district: impl Into<String>) -> Self {
        Self {
            terminal: Some(TerminalLevel::District),
            region,
            district: Some(district.into()),
            locality: None,
        }
    }

    /// A locality terminal. Passing no district drops the locality name too,
    /// since a leaf cannot exist without its parent.
    pub fn locality(
        region: Option<String>,
        district: Option<String>,
        locality: impl Into<String>,
    ) -> Self {
        let locality = district.as_ref().map(|_| locality.into());
        Self {
            terminal: Some(TerminalLevel::Locality),
            region,
            district,
            locality,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.terminal.is_none()
    }
}

// ---------------------------------------------------------------------------
// Region tree
// ---------------------------------------------------------------------------

/// Root of one output document: a top-level region and its districts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTree {
    /// Two-character code prefix.
    pub code: String,
    pub name: String,
    /// Districts in first-seen order.
    pub children: Vec<DistrictNode>,
}

/// A district within a region, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictNode {
    /// Five-character code prefix.
    pub code: String,
    pub name: String,
    /// Localities in source order.
    pub children: Vec<LocalityLeaf>,
}

/// A locality leaf. Codes are unique, so leaves are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityLeaf {
    /// Full ten-character code.
    pub code: String,
    pub name: String,
}

impl RegionTree {
    /// Total number of locality leaves across all districts.
    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(|d| d.children.len()).sum()
    }
}
