// src/schema/field.rs

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Every field a register record can hold, in register column order.
///
/// The last four are extension fields: coordinates that are not part of the
/// published register but may be appended to it by a geocoding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    LicenceNumber,
    LicenceIssueDate,
    SidLatNs,
    SidLatDeg,
    SidLatMin,
    SidLatSec,
    SidLongEw,
    SidLongDeg,
    SidLongMin,
    SidLongSec,
    Ngr,
    Frequency,
    FrequencyType,
    StationType,
    ChannelWidth,
    ChannelWidthType,
    HeightAboveSeaLevel,
    AntennaErp,
    AntennaErpType,
    AntennaType,
    AntennaGain,
    AntennaAzimuth,
    HorizontalElements,
    VerticalElements,
    AntennaHeight,
    AntennaLocation,
    EflUpperLower,
    AntennaDirection,
    AntennaElevation,
    AntennaPolarisation,
    AntennaName,
    FeedingLoss,
    FadeMargin,
    EmissionCode,
    ApCommentIntern,
    Vector,
    LicenseeSurname,
    LicenseeFirstName,
    LicenseeCompany,
    Status,
    Tradeable,
    Publishable,
    ProductCode,
    ProductDescription,
    ProductDescription31,
    ProductDescription32,
    OsEasting,
    OsNorthing,
    Wgs84Longitude,
    Wgs84Latitude,
}

/// Number of fields that are always expected in the register.
pub const CORE_COUNT: usize = 46;

/// Number of optional coordinate fields.
pub const EXTENSION_COUNT: usize = 4;

impl Field {
    pub const ALL: [Field; CORE_COUNT + EXTENSION_COUNT] = [
        Field::LicenceNumber,
        Field::LicenceIssueDate,
        Field::SidLatNs,
        Field::SidLatDeg,
        Field::SidLatMin,
        Field::SidLatSec,
        Field::SidLongEw,
        Field::SidLongDeg,
        Field::SidLongMin,
        Field::SidLongSec,
        Field::Ngr,
        Field::Frequency,
        Field::FrequencyType,
        Field::StationType,
        Field::ChannelWidth,
        Field::ChannelWidthType,
        Field::HeightAboveSeaLevel,
        Field::AntennaErp,
        Field::AntennaErpType,
        Field::AntennaType,
        Field::AntennaGain,
        Field::AntennaAzimuth,
        Field::HorizontalElements,
        Field::VerticalElements,
        Field::AntennaHeight,
        Field::AntennaLocation,
        Field::EflUpperLower,
        Field::AntennaDirection,
        Field::AntennaElevation,
        Field::AntennaPolarisation,
        Field::AntennaName,
        Field::FeedingLoss,
        Field::FadeMargin,
        Field::EmissionCode,
        Field::ApCommentIntern,
        Field::Vector,
        Field::LicenseeSurname,
        Field::LicenseeFirstName,
        Field::LicenseeCompany,
        Field::Status,
        Field::Tradeable,
        Field::Publishable,
        Field::ProductCode,
        Field::ProductDescription,
        Field::ProductDescription31,
        Field::ProductDescription32,
        Field::OsEasting,
        Field::OsNorthing,
        Field::Wgs84Longitude,
        Field::Wgs84Latitude,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Position among the extension fields, `None` for core fields.
    pub fn extension_slot(self) -> Option<usize> {
        self.index().checked_sub(CORE_COUNT)
    }

    pub fn is_extension(self) -> bool {
        self.extension_slot().is_some()
    }

    /// Numeric kind of an extension field.
    pub fn numeric_kind(self) -> Option<NumericKind> {
        match self {
            Field::OsEasting | Field::OsNorthing => Some(NumericKind::Int),
            Field::Wgs84Longitude | Field::Wgs84Latitude => Some(NumericKind::Float),
            _ => None,
        }
    }

    /// Header label of a core field. Identical in every register revision.
    pub fn core_label(self) -> Option<&'static str> {
        let label = match self {
            Field::LicenceNumber => "Licence Number",
            Field::LicenceIssueDate => "Licence issue date",
            Field::SidLatNs => "SID_LAT_N_S",
            Field::SidLatDeg => "SID_LAT_DEG",
            Field::SidLatMin => "SID_LAT_MIN",
            Field::SidLatSec => "SID_LAT_SEC",
            Field::SidLongEw => "SID_LONG_E_W",
            Field::SidLongDeg => "SID_LONG_DEG",
            Field::SidLongMin => "SID_LONG_MIN",
            Field::SidLongSec => "SID_LONG_SEC",
            Field::Ngr => "NGR",
            Field::Frequency => "Frequency",
            Field::FrequencyType => "Frequency Type",
            Field::StationType => "Station Type",
            Field::ChannelWidth => "Channel Width",
            Field::ChannelWidthType => "Channel Width type",
            Field::HeightAboveSeaLevel => "Height above sea level",
            Field::AntennaErp => "Antenna ERP",
            Field::AntennaErpType => "Antenna ERP type",
            Field::AntennaType => "Antenna Type",
            Field::AntennaGain => "Antenna Gain",
            Field::AntennaAzimuth => "Antenna AZIMUTH",
            Field::HorizontalElements => "Horizontal Elements",
            Field::VerticalElements => "Vertical Elements",
            Field::AntennaHeight => "Antenna Height",
            Field::AntennaLocation => "Antenna Location",
            Field::EflUpperLower => "EFL_UPPER_LOWER",
            Field::AntennaDirection => "Antenna Direction",
            Field::AntennaElevation => "Antenna Elevation",
            Field::AntennaPolarisation => "Antenna Polarisation",
            Field::AntennaName => "Antenna Name",
            Field::FeedingLoss => "Feeding Loss",
            Field::FadeMargin => "Fade Margin",
            Field::EmissionCode => "Emission Code",
            Field::ApCommentIntern => "AP_COMMENT_INTERN",
            Field::Vector => "Vector",
            // the register really does spell it "Licencee"
            Field::LicenseeSurname => "Licencee Surname",
            Field::LicenseeFirstName => "Licencee First Name",
            Field::LicenseeCompany => "Licencee Company",
            Field::Status => "Status",
            Field::Tradeable => "Tradeable",
            Field::Publishable => "Publishable",
            Field::ProductCode => "Product Code",
            Field::ProductDescription => "Product Description",
            Field::ProductDescription31 => "Product Description 31",
            Field::ProductDescription32 => "Product Description 32",
            Field::OsEasting | Field::OsNorthing | Field::Wgs84Longitude | Field::Wgs84Latitude => {
                return None
            }
        };
        Some(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int,
    Float,
}

/// Parsed form of an extension value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn zero(kind: NumericKind) -> Self {
        match kind {
            NumericKind::Int => Numeric::Int(0),
            NumericKind::Float => Numeric::Float(0.0),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }

    /// Text written for a value that was never read from a file:
    /// `%d` for integers, six decimals for floats.
    pub fn canonical(self) -> String {
        match self {
            Numeric::Int(v) => v.to_string(),
            Numeric::Float(v) => format!("{:.6}", v),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("not an integer: {0}")]
    Int(#[from] ParseIntError),
    #[error("not a number: {0}")]
    Float(#[from] ParseFloatError),
    #[error("{0:?} is not an extension field")]
    NotExtension(Field),
}

/// An extension value in both forms: the text exactly as it was supplied,
/// which is what gets written back, and the parsed number.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionValue {
    pub text: String,
    pub value: Numeric,
}

impl ExtensionValue {
    pub fn parse(raw: &str, kind: NumericKind) -> Result<Self, NumericError> {
        let value = match kind {
            NumericKind::Int => Numeric::Int(raw.parse::<i64>()?),
            NumericKind::Float => Numeric::Float(raw.parse::<f64>()?),
        };
        Ok(Self {
            text: raw.to_string(),
            value,
        })
    }
}
