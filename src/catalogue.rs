// src/catalogue.rs
//! Product code descriptions. Plain data: pass a catalogue to whatever needs
//! to describe or validate codes.

use std::collections::BTreeMap;

/// Product code of point-to-point fixed links.
pub const FIXED_LINKS: &str = "301010";

static OFCOM_PRODUCTS: &[(&str, &str)] = &[
    ("301010", "Fixed Links"),
    ("302010", "GHz CCTV"),
    ("304010", "Scanning Telemetry"),
    ("304020", "Scanning Telemetry"),
    ("305010", "Self Co-Ord Links"),
    ("306040", "Satellite (Permanent Earth Station)"),
    ("307030", "Satellite TES Cat1"),
    ("307040", "Satellite TES Cat2"),
    ("307050", "Satellite TES Cat3"),
    ("308010", "Satellite (Earth Station Network)"),
    ("308040", "Satellite (Non Fixed Satellite Earth Station)"),
    ("308130", "Network 2GHz Licence"),
    ("309010", "GNSS Repeater"),
    ("351010", "Coastal Station Radio International"),
    ("351020", "Coastal Station Radio UK"),
    ("351030", "Coastal Station Radio Marina"),
    ("351090", "Maritime Suppliers"),
    ("352010", "Maritime Navaids and Radar"),
    ("352020", "Differential Global Positioning System"),
    ("352030", "Automatic Identification System"),
    ("354010", "Coastal Station Radio (UK) Area Defined"),
    ("354020", "Coastal Station Radio (Int) Area Defined"),
    ("408010", "Business Radio Technically Assigned"),
    ("409020", "Business Radio (Public Safety Radio)"),
    ("409030", "Business Radio (GSM-R Railway Use)"),
    ("409510", "Business Radio Area Defined"),
    ("470807", "Aeronautical Station (Aeronautical Broadcast)"),
    ("470808", "Aeronautical Station (Aerodrome Surface and Operational"),
    ("502040", "Public Wireless Networks (2G Cellular Operator)"),
    ("502050", "Public Wireless Networks"),
    ("502081", "Public Wireless Networks (2G Cellular Operator - Guernsey)"),
    ("502082", "Public Wireless Networks (2G Cellular Operator - Isle of Man )"),
    ("502083", "Public Wireless Networks (2G Cellular Operator - Jersey)"),
    ("503010", "Spectrum Access 3.6 GHz"),
    ("503012", "Fixed Wireless Access (3.5 GHz - Isle of Man)"),
    ("503013", "Fixed Wireless Access (3.5 GHz - Jersey)"),
    ("503014", "Fixed Wireless Access (3.6 GHz - Guernsey)"),
    ("503015", "Fixed Wireless Access (3.6 GHz - Isle of Man)"),
    ("503016", "Fixed Wireless Access (3.6 GHz - Jersey)"),
    ("503017", "Fixed Wireless Access (10 GHz - Guernsey)"),
    ("503110", "Offshore"),
    ("511010", "Public Wireless Networks (3G Cellular Operator)"),
    ("511011", "Public Wireless Networks (3G Cellular Operator - Guernsey)"),
    ("511012", "Public Wireless Networks (3G Cellular Operator - Isle of Man)"),
    ("511013", "Public Wireless Networks (3G Cellular Operator - Jersey)"),
    ("513010", "Spectrum Access (3.5 GHz)"),
    ("521010", "Concurrent Spectrum Access (1781.7-1785 and 1876.7-1880 MHz)"),
    ("521020", "Spectrum Access Licence 412-414 and 422-424 MHz Bands"),
    ("521030", "Spectrum Access 10 - 40 GHz Bands"),
    ("521040", "Spectrum Access L Band (1452-1492 MHz)"),
    ("521050", "Spectrum Access: 28 GHz"),
    ("522080", "1785 MHz NI Award"),
    ("523010", "Spectrum Access 758 to 766 MHz"),
    ("523011", "Spectrum Access 542-550 MHz (Cardiff)"),
    ("523020", "Spectrum Access 3.4 GHz"),
    ("523022", "Spectrum Access 2.3 GHz"),
    ("525010", "Crown Recognised Spectrum Access"),
    ("525020", "Converted Spectrum Access"),
    ("541010", "Spectrum Access 800MHz and 2.6GHz"),
    ("551020", "Grant of RSA for Receive Only Earth Station (ROES)"),
    ("603020", "Miscellaneous"),
    ("604010", "High Duty Cycle Network Relay Points"),
    ("605010", "Manually Configurable White Space Devices"),
];

/// Read-only map of six-digit product code to a human-readable label.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalogue {
    codes: BTreeMap<String, String>,
}

impl ProductCatalogue {
    /// Codes in use on the published register. Labels are shortened, not Ofcom's verbatim text.
    pub fn ofcom() -> Self {
        Self::from_pairs(OFCOM_PRODUCTS.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn describe(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ofcom_catalogue_is_six_digit_and_unique() {
        let catalogue = ProductCatalogue::ofcom();
        assert_eq!(catalogue.len(), OFCOM_PRODUCTS.len());
        for code in catalogue.codes() {
            assert_eq!(code.len(), 6, "{code}");
            assert!(code.bytes().all(|b| b.is_ascii_digit()), "{code}");
        }
        assert_eq!(catalogue.describe(FIXED_LINKS), Some("Fixed Links"));
        assert!(!catalogue.contains("250011"));
    }

    #[test]
    fn custom_catalogue() {
        let catalogue = ProductCatalogue::from_pairs([("000001", "Test")]);
        assert_eq!(catalogue.describe("000001"), Some("Test"));
        assert_eq!(catalogue.codes().collect::<Vec<_>>(), vec!["000001"]);
        assert!(ProductCatalogue::default().is_empty());
    }
}
