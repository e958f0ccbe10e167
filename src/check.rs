//! Cross-locale consistency checks.
//!
//! For every ordered pair of locales `(X, Y)` the checker lists keys defined
//! in `X` but absent from `Y`. Independently, each locale is checked for
//! leaves with no usable text.

use serde_json::Value;

use crate::catalog::{FlattenedCatalog, KeyPath};

/// Keys present in `from` and absent from `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub from: String,
    pub to: String,
    pub missing: Vec<KeyPath>,
}

/// Leaves of one locale whose value is blank or null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyValueReport {
    pub locale: String,
    pub keys: Vec<KeyPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub diffs: Vec<DiffResult>,
    pub empty_values: Vec<EmptyValueReport>,
}

impl CheckReport {
    /// True if any pair has missing keys or any locale has empty values.
    pub fn is_failing(&self) -> bool {
        self.missing_count() > 0 || self.empty_count() > 0
    }

    pub fn missing_count(&self) -> usize {
        self.diffs.iter().map(|d| d.missing.len()).sum()
    }

    pub fn empty_count(&self) -> usize {
        self.empty_values.iter().map(|e| e.keys.len()).sum()
    }

    pub fn diff(&self, from: &str, to: &str) -> Option<&DiffResult> {
        self.diffs.iter().find(|d| d.from == from && d.to == to)
    }

    pub fn empty_for(&self, locale: &str) -> Option<&EmptyValueReport> {
        self.empty_values.iter().find(|e| e.locale == locale)
    }
}

/// `keys(from) \ keys(to)`, in `from`'s document order.
pub fn missing_keys(from: &FlattenedCatalog, to: &FlattenedCatalog) -> Vec<KeyPath> {
    from.keys()
        .filter(|key| !to.contains_key(key))
        .cloned()
        .collect()
}

/// Whether a leaf carries no translation.
///
/// Blank and whitespace-only strings and `null` are empty. Falsy-looking
/// strings such as `"0"` or `"false"` are real translations.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub fn empty_values(catalog: &FlattenedCatalog) -> Vec<KeyPath> {
    catalog
        .entries
        .iter()
        .filter(|(_, value)| is_empty_value(value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Run every check over the loaded locales.
///
/// Diffs are produced for each ordered pair in input order, so callers that
/// pass locales sorted get sorted output.
pub fn check_catalogs(catalogs: &[FlattenedCatalog]) -> CheckReport {
    let mut report = CheckReport::default();

    for from in catalogs {
        for to in catalogs {
            if from.locale == to.locale {
                continue;
            }
            report.diffs.push(DiffResult {
                from: from.locale.clone(),
                to: to.locale.clone(),
                missing: missing_keys(from, to),
            });
        }
    }

    for catalog in catalogs {
        report.empty_values.push(EmptyValueReport {
            locale: catalog.locale.clone(),
            keys: empty_values(catalog),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn catalog(locale: &str, entries: &[(&str, Value)]) -> FlattenedCatalog {
        let mut catalog = FlattenedCatalog::new(locale);
        for (key, value) in entries {
            catalog
                .entries
                .insert(KeyPath::parse(key).unwrap(), value.clone());
        }
        catalog
    }

    fn strings(keys: &[KeyPath]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_missing_in_both_directions() {
        let tr = catalog("tr", &[("A.B", json!("x")), ("A.C", json!("y"))]);
        let en = catalog("en", &[("A.B", json!("x"))]);

        let report = check_catalogs(&[en, tr]);

        assert_eq!(strings(&report.diff("tr", "en").unwrap().missing), vec!["A.C"]);
        assert!(report.diff("en", "tr").unwrap().missing.is_empty());
        assert!(report.is_failing());
        assert_eq!(report.missing_count(), 1);
    }

    #[test]
    fn test_every_ordered_pair() {
        let report = check_catalogs(&[
            catalog("de", &[]),
            catalog("en", &[]),
            catalog("tr", &[]),
        ]);
        let pairs: Vec<(&str, &str)> = report
            .diffs
            .iter()
            .map(|d| (d.from.as_str(), d.to.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("de", "en"),
                ("de", "tr"),
                ("en", "de"),
                ("en", "tr"),
                ("tr", "de"),
                ("tr", "en"),
            ]
        );
        assert!(!report.is_failing());
    }

    #[test]
    fn test_empty_value_edge_cases() {
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   ")));
        assert!(is_empty_value(&json!("\t\n")));
        assert!(is_empty_value(&Value::Null));
        assert!(!is_empty_value(&json!("0")));
        assert!(!is_empty_value(&json!("false")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!([])));
    }

    #[test]
    fn test_empty_values_fail_the_check() {
        let en = catalog(
            "en",
            &[("a", json!("")), ("b", json!("0")), ("c", json!(null))],
        );
        let report = check_catalogs(&[en]);

        assert_eq!(strings(&report.empty_for("en").unwrap().keys), vec!["a", "c"]);
        assert!(report.diffs.is_empty());
        assert!(report.is_failing());
    }

    #[test]
    fn test_consistent_catalogs_pass() {
        let en = catalog("en", &[("A.B", json!("Save"))]);
        let tr = catalog("tr", &[("A.B", json!("Kaydet"))]);
        assert!(!check_catalogs(&[en, tr]).is_failing());
    }

    proptest! {
        #[test]
        fn prop_missing_keys_cover_symmetric_difference(
            x in prop::collection::btree_set("[a-c]{1,2}(\\.[a-c]{1,2})?", 0..12),
            y in prop::collection::btree_set("[a-c]{1,2}(\\.[a-c]{1,2})?", 0..12),
        ) {
            let to_catalog = |locale: &str, keys: &BTreeSet<String>| {
                let entries: Vec<(&str, Value)> =
                    keys.iter().map(|k| (k.as_str(), json!("v"))).collect();
                catalog(locale, &entries)
            };
            let cx = to_catalog("x", &x);
            let cy = to_catalog("y", &y);

            let mut union: BTreeSet<String> = strings(&missing_keys(&cx, &cy)).into_iter().collect();
            union.extend(strings(&missing_keys(&cy, &cx)));

            let expected: BTreeSet<String> = x.symmetric_difference(&y).cloned().collect();
            prop_assert_eq!(union, expected);
        }
    }
}
