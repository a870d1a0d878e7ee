// src/config/region.rs
use serde::{Serialize, Deserialize};
use std::fmt;

/// Symbolic identifier of a shape in the rendered map (the SVG `id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical display name from the compiled-in table.
    pub fn display_name(&self) -> Option<&'static str> {
        region_name(&self.0)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A map region paired with the dataset key it stands for. `id` is absent when
/// the selection came from somewhere other than the map (e.g. search) and the
/// name has no table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionIdentifier {
    pub id: Option<RegionId>,
    pub name: String,
}

impl RegionIdentifier {
    pub fn from_region(id: RegionId, name: impl Into<String>) -> Self {
        Self { id: Some(id), name: name.into() }
    }

    /// Builds an identifier for a display name, filling in the map id when the
    /// table knows one.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = region_id(&name).map(RegionId::from);
        Self { id, name }
    }

    pub fn matches(&self, id: &RegionId, name: Option<&str>) -> bool {
        self.id.as_ref() == Some(id) || name.is_some_and(|n| n == self.name)
    }
}

// Must stay in sync with the dataset keys and the map's path ids. A name with
// no dataset record only renders the region as non-interactive.
pub const REGION_TABLE: &[(&str, &str)] = &[
    ("INMH", "Maharashtra"),
    ("INGJ", "Gujarat"),
    ("INTN", "Tamil Nadu"),
    ("INKA", "Karnataka"),
    ("INKL", "Kerala"),
    ("INUP", "Uttar Pradesh"),
    ("INGA", "Goa"),
    ("INRJ", "Rajasthan"),
    ("INTG", "Telangana"),
    ("INDL", "Delhi"),
    ("INAP", "Andhra Pradesh"),
    ("INAR", "Arunachal Pradesh"),
    ("INAS", "Assam"),
    ("INBR", "Bihar"),
    ("INCT", "Chhattisgarh"),
    ("INHR", "Haryana"),
    ("INHP", "Himachal Pradesh"),
    ("INJH", "Jharkhand"),
    ("INMP", "Madhya Pradesh"),
    ("INMN", "Manipur"),
    ("INML", "Meghalaya"),
    ("INMZ", "Mizoram"),
    ("INNL", "Nagaland"),
    ("INOR", "Odisha"),
    ("INPB", "Punjab"),
    ("INSK", "Sikkim"),
    ("INTRP", "Tripura"),
    ("INUT", "Uttarakhand"),
    ("INWB", "West Bengal"),
    ("INPY", "Puducherry"),
    ("INCH", "Chandigarh"),
    ("INDD", "Daman and Diu"),
    ("INDN", "Dadra and Nagar Haveli"),
    ("INLD", "Lakshadweep"),
    ("INAN", "Andaman and Nicobar"),
    ("INJK", "Jammu and Kashmir"),
    ("INLA", "Ladakh"),
];

pub fn region_name(id: &str) -> Option<&'static str> {
    REGION_TABLE.iter()
        .find(|(table_id, _)| *table_id == id)
        .map(|(_, name)| *name)
}

/// Reverse lookup, case-insensitive on the name.
pub fn region_id(name: &str) -> Option<&'static str> {
    let name = name.trim();
    REGION_TABLE.iter()
        .find(|(_, table_name)| table_name.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}
