// src/schema/mod.rs
//! Field layout of the register, parameterized per source revision.

pub mod field;
pub mod normalize;

pub use field::{ExtensionValue, Field, Numeric, NumericError, NumericKind, CORE_COUNT, EXTENSION_COUNT};

use serde::Deserialize;
use std::{collections::HashMap, fmt, str::FromStr};

use crate::error::WtrError;

pub const HEADING_OSGB36_E: &str = "OSGB36 E";
pub const HEADING_OSGB36_N: &str = "OSGB36 N";
pub const HEADING_WGS84_E: &str = "WGS84 E";
pub const HEADING_WGS84_N: &str = "WGS84 N";

pub const HEADING_OS_EASTING: &str = "OS Easting";
pub const HEADING_OS_NORTHING: &str = "OS Northing";
pub const HEADING_WGS84_LONGITUDE: &str = "WGS84 Longitude";
pub const HEADING_WGS84_LATITUDE: &str = "WGS84 Latitude";

/// Layout revision of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// Early register: product descriptions may be glued onto the code and
    /// company names are shortened on load.
    Legacy,
    /// Later register: description already split out, numeric product code
    /// carried in "Product Description 31".
    #[default]
    Current,
}

impl Revision {
    pub fn schema(self) -> FieldSchema {
        FieldSchema::new(self)
    }

    fn extension_labels(self) -> [(Field, &'static str); EXTENSION_COUNT] {
        match self {
            Revision::Legacy => [
                (Field::OsEasting, HEADING_OSGB36_E),
                (Field::OsNorthing, HEADING_OSGB36_N),
                (Field::Wgs84Longitude, HEADING_WGS84_E),
                (Field::Wgs84Latitude, HEADING_WGS84_N),
            ],
            Revision::Current => [
                (Field::OsEasting, HEADING_OS_EASTING),
                (Field::OsNorthing, HEADING_OS_NORTHING),
                (Field::Wgs84Longitude, HEADING_WGS84_LONGITUDE),
                (Field::Wgs84Latitude, HEADING_WGS84_LATITUDE),
            ],
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Legacy => f.write_str("legacy"),
            Revision::Current => f.write_str("current"),
        }
    }
}

impl FromStr for Revision {
    type Err = WtrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Revision::Legacy),
            "current" => Ok(Revision::Current),
            other => Err(WtrError::Config(format!("unknown register revision `{}`", other))),
        }
    }
}

/// Single-value clean-up run on a raw column before it is stored.
pub type Normalizer = fn(&str) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Always expected; a missing column reads as empty.
    Core,
    /// Only read and written when its label is in the table header.
    Extension(NumericKind),
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    pub normalizer: Option<Normalizer>,
}

/// Ordered field descriptors plus the row-level rules of one revision.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    revision: Revision,
    descriptors: Vec<FieldDescriptor>,
    by_label: HashMap<&'static str, usize>,
    split_product_code: bool,
    product_number: Field,
    point_to_point_needs_ngr: bool,
}

impl FieldSchema {
    pub fn new(revision: Revision) -> Self {
        let legacy = revision == Revision::Legacy;

        let mut descriptors: Vec<FieldDescriptor> = Field::ALL
            .iter()
            .filter_map(|&field| {
                field.core_label().map(|label| FieldDescriptor {
                    field,
                    label,
                    kind: FieldKind::Core,
                    normalizer: match field {
                        Field::Ngr => Some(normalize::grid_reference as Normalizer),
                        Field::LicenseeCompany if legacy => Some(normalize::company_name as Normalizer),
                        _ => None,
                    },
                })
            })
            .collect();

        for (field, label) in revision.extension_labels() {
            if let Some(kind) = field.numeric_kind() {
                descriptors.push(FieldDescriptor {
                    field,
                    label,
                    kind: FieldKind::Extension(kind),
                    normalizer: None,
                });
            }
        }

        let by_label = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.label, i))
            .collect();

        Self {
            revision,
            descriptors,
            by_label,
            split_product_code: legacy,
            product_number: if legacy {
                Field::ProductCode
            } else {
                Field::ProductDescription31
            },
            point_to_point_needs_ngr: !legacy,
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, label: &str) -> Option<&FieldDescriptor> {
        self.by_label.get(label).map(|&i| &self.descriptors[i])
    }

    pub fn label_of(&self, field: Field) -> Option<&'static str> {
        self.descriptors
            .iter()
            .find(|d| d.field == field)
            .map(|d| d.label)
    }

    /// Whether a combined "code - description" product code is split on load.
    pub fn splits_product_code(&self) -> bool {
        self.split_product_code
    }

    /// Field holding the six-digit numeric product code.
    pub fn product_number_field(&self) -> Field {
        self.product_number
    }

    pub fn point_to_point_needs_ngr(&self) -> bool {
        self.point_to_point_needs_ngr
    }

    /// Extension fields whose labels appear in `headers`.
    pub fn present_extensions(&self, headers: &[String]) -> Vec<Field> {
        self.descriptors
            .iter()
            .filter(|d| matches!(d.kind, FieldKind::Extension(_)))
            .filter(|d| headers.iter().any(|h| h == d.label))
            .map(|d| d.field)
            .collect()
    }
}
