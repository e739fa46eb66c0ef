// src/schema/normalize.rs
//! Clean-ups applied to raw register values while a record is being built.

use once_cell::sync::Lazy;
use regex::Regex;

static PRODUCT_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{6})[\- ]+(.*)$").expect("product code pattern should be valid")
});

/// Remove every whitespace character from a grid reference.
///
/// `"SU 123 456"` becomes `"SU123456"`; an already compact value is returned unchanged.
pub fn grid_reference(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// Older registers sometimes carry the product description glued onto the
/// product code (`"301010 - Fixed Links"`). Split it back out when the code
/// is too long and no description was supplied; leave it alone otherwise.
///
/// Both values come back trimmed.
pub fn split_product_code(code: &str, description: &str) -> (String, String) {
    let code = code.trim();
    let description = description.trim();

    if code.len() > 6 && description.is_empty() {
        if let Some(caps) = PRODUCT_CODE_RE.captures(code) {
            return (caps[1].to_string(), caps[2].to_string());
        }
    }
    (code.to_string(), description.to_string())
}

const COMPANY_ALIASES: &[(&str, &str)] = &[
    ("BRITISH TELECOMMUNICATIONS PUBLIC LIMITED COMPANY", "BT PLC"),
    ("MOBILE BROADBAND NETWORK LIMITED", "MBNL"),
];

const COMPANY_SUFFIXES: &[(&str, &str)] = &[
    ("Public Limited Company", "PLC"),
    ("PUBLIC LIMITED COMPANY", "PLC"),
    ("Limited", "Ltd"),
    ("LIMITED", "LTD"),
];

/// Shorten a licensee company name.
///
/// A couple of well-known names map to fixed short forms. Anything else has
/// the first occurrence of each legal suffix abbreviated, case-sensitively.
pub fn company_name(raw: &str) -> String {
    if let Some((_, alias)) = COMPANY_ALIASES.iter().find(|(full, _)| *full == raw) {
        return alias.to_string();
    }

    let mut name = raw.to_string();
    for (long, short) in COMPANY_SUFFIXES {
        if name.contains(long) {
            name = name.replacen(long, short, 1);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_reference_drops_all_whitespace() {
        assert_eq!(grid_reference("SU 123 456"), "SU123456");
        assert_eq!(grid_reference("  TQ\t12345  67890 "), "TQ1234567890");
        assert_eq!(grid_reference(""), "");
    }

    #[test]
    fn grid_reference_is_idempotent() {
        let once = grid_reference("AB 12345 67890");
        assert_eq!(once, "AB1234567890");
        assert_eq!(grid_reference(&once), once);
    }

    #[test]
    fn splits_code_with_dash_or_space() {
        assert_eq!(
            split_product_code("301010-Fixed Links", ""),
            ("301010".to_string(), "Fixed Links".to_string())
        );
        assert_eq!(
            split_product_code(" 408010 - Business Radio ", " "),
            ("408010".to_string(), "Business Radio".to_string())
        );
    }

    #[test]
    fn split_leaves_unmatched_or_described_codes() {
        // no separator after the six digits
        assert_eq!(
            split_product_code("301010ABCDEF", ""),
            ("301010ABCDEF".to_string(), String::new())
        );
        // description already present
        assert_eq!(
            split_product_code("301010-Fixed Links", "Other"),
            ("301010-Fixed Links".to_string(), "Other".to_string())
        );
        // short code
        assert_eq!(
            split_product_code("301010", ""),
            ("301010".to_string(), String::new())
        );
    }

    #[test]
    fn company_aliases_win_over_suffixes() {
        assert_eq!(
            company_name("BRITISH TELECOMMUNICATIONS PUBLIC LIMITED COMPANY"),
            "BT PLC"
        );
        assert_eq!(company_name("MOBILE BROADBAND NETWORK LIMITED"), "MBNL");
    }

    #[test]
    fn company_suffixes_are_abbreviated_once() {
        assert_eq!(company_name("Acme Limited"), "Acme Ltd");
        assert_eq!(company_name("ACME PUBLIC LIMITED COMPANY"), "ACME PLC");
        assert_eq!(company_name("Limited Radio Limited"), "Ltd Radio Limited");
        assert_eq!(company_name("acme limited"), "acme limited");
        assert_eq!(company_name("Vodafone Public Limited Company"), "Vodafone PLC");
    }
}
