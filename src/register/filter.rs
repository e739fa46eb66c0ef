// src/register/filter.rs
//! Predicates over records, composed with `Collection::filter`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::record::Record;
use crate::{catalogue::FIXED_LINKS, schema::FieldSchema};

/// A test applied to each record. Every predicate passed to a filter call
/// has to hold for a record to be kept.
pub type Predicate<'a> = &'a dyn Fn(&Record) -> bool;

static NGR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z]{2} ?[0-9]{5} ?[0-9]{5}$").expect("NGR pattern should be valid")
});

/// True when every predicate accepts `record`. No predicates accept everything.
pub fn matches_all(record: &Record, predicates: &[Predicate<'_>]) -> bool {
    predicates.iter().all(|p| p(record))
}

/// Records with a ten-figure national grid reference.
pub fn valid_ngr(record: &Record) -> bool {
    NGR_RE.is_match(record.ngr())
}

/// Records whose licensee company is one of `companies` (exact match).
pub fn companies<I, S>(companies: I) -> impl Fn(&Record) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let lookup: HashSet<String> = companies.into_iter().map(Into::into).collect();
    move |record: &Record| lookup.contains(record.company())
}

/// Records whose numeric product code is one of `codes`.
///
/// Which column holds that code depends on the register revision, so the
/// schema the collection was loaded with is needed.
pub fn product_codes<I, S>(schema: &FieldSchema, codes: I) -> impl Fn(&Record) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let field = schema.product_number_field();
    let lookup: HashSet<String> = codes.into_iter().map(Into::into).collect();
    move |record: &Record| lookup.contains(record.get(field))
}

/// Point-to-point fixed links. Later revisions also insist on a usable grid reference.
pub fn point_to_point(schema: &FieldSchema) -> impl Fn(&Record) -> bool {
    let field = schema.product_number_field();
    let needs_ngr = schema.point_to_point_needs_ngr();
    move |record: &Record| record.get(field) == FIXED_LINKS && (!needs_ngr || valid_ngr(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Revision;
    use std::collections::HashMap;

    fn record(schema: &FieldSchema, pairs: &[(&str, &str)]) -> Record {
        let columns: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::from_columns(&columns, schema, &[], 1).unwrap()
    }

    #[test]
    fn ngr_pattern() {
        let schema = Revision::Current.schema();
        for (ngr, ok) in [
            ("TQ1234567890", true),
            // spaces are stripped on load, so these are valid too
            ("TQ 12345 67890", true),
            ("tq1234567890", false),
            ("TQ12345", false),
            ("TQ1234567890X", false),
            ("", false),
        ] {
            assert_eq!(valid_ngr(&record(&schema, &[("NGR", ngr)])), ok, "{ngr}");
        }
    }

    #[test]
    fn company_membership_is_exact() {
        let schema = Revision::Current.schema();
        let keep = companies(["Acme Ltd", "Zed PLC"]);
        assert!(keep(&record(&schema, &[("Licencee Company", "Acme Ltd")])));
        assert!(!keep(&record(&schema, &[("Licencee Company", "ACME LTD")])));
        assert!(!keep(&record(&schema, &[])));
    }

    #[test]
    fn product_codes_follow_revision() {
        let legacy = Revision::Legacy.schema();
        let current = Revision::Current.schema();
        let pairs = [("Product Code", "408010"), ("Product Description 31", "301010")];

        assert!(product_codes(&legacy, ["408010"])(&record(&legacy, &pairs)));
        assert!(!product_codes(&legacy, ["301010"])(&record(&legacy, &pairs)));
        assert!(product_codes(&current, ["301010"])(&record(&current, &pairs)));
    }

    #[test]
    fn point_to_point_checks_ngr_only_where_required() {
        let legacy = Revision::Legacy.schema();
        let current = Revision::Current.schema();

        let legacy_row = record(&legacy, &[("Product Code", "301010"), ("NGR", "junk")]);
        assert!(point_to_point(&legacy)(&legacy_row));

        let bad_ngr = record(&current, &[("Product Description 31", "301010"), ("NGR", "junk")]);
        let good_ngr = record(
            &current,
            &[("Product Description 31", "301010"), ("NGR", "SU 12345 67890")],
        );
        assert!(!point_to_point(&current)(&bad_ngr));
        assert!(point_to_point(&current)(&good_ngr));
    }

    #[test]
    fn empty_predicate_list_accepts() {
        let schema = Revision::Current.schema();
        assert!(matches_all(&record(&schema, &[]), &[]));
        assert!(!matches_all(&record(&schema, &[]), &[&valid_ngr]));
    }
}
