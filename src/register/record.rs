// src/register/record.rs

use std::{borrow::Cow, collections::HashMap};

use crate::{
    error::{Result, WtrError},
    schema::{
        normalize, ExtensionValue, Field, FieldKind, FieldSchema, Numeric, NumericError,
        CORE_COUNT, EXTENSION_COUNT,
    },
};

/// One licence row after normalization.
///
/// Core fields are kept as text exactly as the register formats them.
/// Extension coordinates keep their source text alongside the parsed number
/// so that writing a record back never reformats them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    core: Vec<String>,
    extensions: [Option<ExtensionValue>; EXTENSION_COUNT],
}

impl Record {
    /// Build a record from one raw row.
    ///
    /// `present` lists the extension fields found in the table header; any
    /// other extension field is left unset even if the row map mentions it.
    /// `row` is only used to report conversion failures.
    pub fn from_columns(
        columns: &HashMap<String, String>,
        schema: &FieldSchema,
        present: &[Field],
        row: usize,
    ) -> Result<Self> {
        let mut core = vec![String::new(); CORE_COUNT];
        let mut extensions: [Option<ExtensionValue>; EXTENSION_COUNT] = Default::default();

        for desc in schema.descriptors() {
            let raw = columns.get(desc.label).map(String::as_str);
            match (desc.kind, desc.field.extension_slot()) {
                (FieldKind::Extension(kind), Some(slot)) => {
                    if !present.contains(&desc.field) {
                        continue;
                    }
                    let raw = raw.unwrap_or("");
                    let value =
                        ExtensionValue::parse(raw, kind).map_err(|source| WtrError::Extension {
                            column: desc.label.to_string(),
                            row,
                            value: raw.to_string(),
                            source,
                        })?;
                    extensions[slot] = Some(value);
                }
                _ => {
                    let raw = raw.unwrap_or("");
                    core[desc.field.index()] = match desc.normalizer {
                        Some(clean) => clean(raw),
                        None => raw.to_string(),
                    };
                }
            }
        }

        if schema.splits_product_code() {
            let (code, description) = normalize::split_product_code(
                &core[Field::ProductCode.index()],
                &core[Field::ProductDescription.index()],
            );
            core[Field::ProductCode.index()] = code;
            core[Field::ProductDescription.index()] = description;
        }

        Ok(Self { core, extensions })
    }

    /// A copy of this record with an extension coordinate set from `raw`.
    pub fn with_extension(&self, field: Field, raw: &str) -> std::result::Result<Self, NumericError> {
        let (slot, kind) = match (field.extension_slot(), field.numeric_kind()) {
            (Some(slot), Some(kind)) => (slot, kind),
            _ => return Err(NumericError::NotExtension(field)),
        };
        let mut record = self.clone();
        record.extensions[slot] = Some(ExtensionValue::parse(raw, kind)?);
        Ok(record)
    }

    /// Text of any field. Unset extension fields read as empty.
    pub fn get(&self, field: Field) -> &str {
        match field.extension_slot() {
            Some(slot) => self.extensions[slot]
                .as_ref()
                .map_or("", |v| v.text.as_str()),
            None => &self.core[field.index()],
        }
    }

    /// Parsed value of an extension field, the kind's zero when it was never set.
    /// `None` for core fields.
    pub fn numeric(&self, field: Field) -> Option<Numeric> {
        let slot = field.extension_slot()?;
        let kind = field.numeric_kind()?;
        Some(
            self.extensions[slot]
                .as_ref()
                .map_or(Numeric::zero(kind), |v| v.value),
        )
    }

    pub fn has_extension(&self, field: Field) -> bool {
        field
            .extension_slot()
            .is_some_and(|slot| self.extensions[slot].is_some())
    }

    /// Value to write under `label`.
    ///
    /// Extension columns echo their source text; one that was never read
    /// renders as the zero value. Labels the schema does not know render empty.
    pub fn render<'a>(&'a self, schema: &FieldSchema, label: &str) -> Cow<'a, str> {
        let Some(desc) = schema.descriptor(label) else {
            return Cow::Borrowed("");
        };
        match (desc.kind, desc.field.extension_slot()) {
            (FieldKind::Extension(kind), Some(slot)) => match &self.extensions[slot] {
                Some(v) => Cow::Borrowed(v.text.as_str()),
                None => Cow::Owned(Numeric::zero(kind).canonical()),
            },
            _ => Cow::Borrowed(self.get(desc.field)),
        }
    }

    pub fn licence_number(&self) -> &str {
        self.get(Field::LicenceNumber)
    }

    pub fn company(&self) -> &str {
        self.get(Field::LicenseeCompany)
    }

    pub fn ngr(&self) -> &str {
        self.get(Field::Ngr)
    }

    pub fn product_code(&self) -> &str {
        self.get(Field::ProductCode)
    }

    pub fn product_description(&self) -> &str {
        self.get(Field::ProductDescription)
    }

    pub fn os_easting(&self) -> i64 {
        match self.numeric(Field::OsEasting) {
            Some(Numeric::Int(v)) => v,
            _ => 0,
        }
    }

    pub fn os_northing(&self) -> i64 {
        match self.numeric(Field::OsNorthing) {
            Some(Numeric::Int(v)) => v,
            _ => 0,
        }
    }

    pub fn wgs84_longitude(&self) -> f64 {
        self.numeric(Field::Wgs84Longitude).map_or(0.0, Numeric::as_f64)
    }

    pub fn wgs84_latitude(&self) -> f64 {
        self.numeric(Field::Wgs84Latitude).map_or(0.0, Numeric::as_f64)
    }

    pub fn frequency_as_f64(&self) -> Option<f64> {
        self.get(Field::Frequency).trim().parse().ok()
    }

    /// Antenna height in metres (the register resolves it to 0.5 m).
    pub fn antenna_height_as_f64(&self) -> Option<f64> {
        self.get(Field::AntennaHeight).trim().parse().ok()
    }
}
