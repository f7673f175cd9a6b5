//! Foreign-key merge
//!
//! Builds id-to-record lookup tables for services and countries, then
//! left-joins both onto every info record. A miss is not an error: the
//! derived fields degrade to empty strings.

use crate::types::Record;
use serde_json::Value;
use std::collections::HashMap;

/// String coercion applied to both sides of the join. Numeric `1` and
/// string `"1"` meet; `1` and `"01"` do not.
fn id_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Stringified foreign key of `record`, empty when absent
fn foreign_key(record: &Record, field: &str) -> String {
    record.get(field).map(id_key).unwrap_or_default()
}

/// The matched record's value for `field`, empty string when the key
/// does not exist. Present-but-null values pass through untouched.
fn field_or_empty(record: &Record, field: &str) -> Value {
    record
        .get(field)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Index records by their stringified `id`. Non-object and empty
/// entries are skipped, as are records with no usable `id`; a later
/// duplicate id wins.
pub fn index_by_id(records: &[Value]) -> HashMap<String, &Record> {
    let mut by_id = HashMap::new();
    for record in records {
        let map = match record.as_object() {
            Some(map) if !map.is_empty() => map,
            _ => continue,
        };
        if let Some(id) = map.get("id") {
            if !id.is_null() {
                by_id.insert(id_key(id), map);
            }
        }
    }
    by_id
}

/// Left-join service and country details onto each info record.
///
/// Every merged record carries all five derived keys. Unmatched
/// foreign keys degrade to empty strings, and `country_name` falls
/// back to the record's own `cname` when the country has no name.
/// Non-object info entries are dropped silently.
pub fn merge(services: &[Value], countries: &[Value], info: &[Value]) -> Vec<Record> {
    let service_by_id = index_by_id(services);
    let country_by_id = index_by_id(countries);
    let empty = Record::new();

    let mut merged = Vec::new();
    for entry in info {
        let row = match entry.as_object() {
            Some(row) => row,
            None => continue,
        };
        let svc = service_by_id
            .get(&foreign_key(row, "service"))
            .copied()
            .unwrap_or(&empty);
        let cnt = country_by_id
            .get(&foreign_key(row, "country"))
            .copied()
            .unwrap_or(&empty);

        let mut out = row.clone();
        out.insert("service_name".to_string(), field_or_empty(svc, "name"));
        out.insert(
            "service_name_en".to_string(),
            field_or_empty(svc, "name_en"),
        );
        let country_name = cnt
            .get("name")
            .cloned()
            .unwrap_or_else(|| field_or_empty(row, "cname"));
        out.insert("country_name".to_string(), country_name);
        out.insert(
            "country_name_en".to_string(),
            field_or_empty(cnt, "name_en"),
        );
        out.insert(
            "country_areacode".to_string(),
            field_or_empty(cnt, "areacode"),
        );
        merged.push(out);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn services() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "تلگرام", "name_en": "Telegram"}),
            json!({"id": "2", "name": "واتساپ", "name_en": "WhatsApp"}),
        ]
    }

    fn countries() -> Vec<Value> {
        vec![json!({"id": 10, "name": "ایران", "name_en": "Iran", "areacode": "98"})]
    }

    // ========== index_by_id ==========

    #[test]
    fn test_index_keys_are_stringified() {
        let records = services();
        let by_id = index_by_id(&records);

        assert!(by_id.contains_key("1"));
        assert!(by_id.contains_key("2"));
    }

    #[test]
    fn test_index_skips_empty_and_non_object_entries() {
        let records = vec![json!({}), json!(null), json!(5), json!({"id": 3})];
        let by_id = index_by_id(&records);

        assert_eq!(by_id.len(), 1);
        assert!(by_id.contains_key("3"));
    }

    #[test]
    fn test_index_skips_records_without_usable_id() {
        let records = vec![json!({"name": "no id"}), json!({"id": null})];
        assert!(index_by_id(&records).is_empty());
    }

    #[test]
    fn test_index_later_duplicate_wins() {
        let records = vec![
            json!({"id": 1, "name": "first"}),
            json!({"id": "1", "name": "second"}),
        ];
        let by_id = index_by_id(&records);

        assert_eq!(by_id["1"]["name"], json!("second"));
    }

    // ========== merge ==========

    #[test]
    fn test_full_match_enriches_both_sides() {
        let info = vec![json!({"service": 1, "country": "10", "price": 1500})];
        let merged = merge(&services(), &countries(), &info);

        assert_eq!(merged.len(), 1);
        let row = &merged[0];
        assert_eq!(row["service_name"], json!("تلگرام"));
        assert_eq!(row["service_name_en"], json!("Telegram"));
        assert_eq!(row["country_name"], json!("ایران"));
        assert_eq!(row["country_name_en"], json!("Iran"));
        assert_eq!(row["country_areacode"], json!("98"));
        assert_eq!(row["price"], json!(1500));
    }

    #[test]
    fn test_unmatched_keys_degrade_to_empty_strings() {
        let info = vec![json!({"service": 99, "country": 99})];
        let merged = merge(&services(), &countries(), &info);

        let row = &merged[0];
        for field in [
            "service_name",
            "service_name_en",
            "country_name",
            "country_name_en",
            "country_areacode",
        ] {
            assert_eq!(row[field], json!(""), "{} should be empty", field);
        }
    }

    #[test]
    fn test_country_name_falls_back_to_cname() {
        // service matches, country misses, cname present
        let services = vec![json!({"id": 1, "name": "X"})];
        let countries = vec![];
        let info = vec![json!({"service": 1, "country": 9, "cname": "Fallback"})];

        let merged = merge(&services, &countries, &info);

        let row = &merged[0];
        assert_eq!(row["service_name"], json!("X"));
        assert_eq!(row["country_name"], json!("Fallback"));
        assert_eq!(row["country_name_en"], json!(""));
        assert_eq!(row["country_areacode"], json!(""));
    }

    #[test]
    fn test_numeric_and_string_ids_join() {
        let services = vec![json!({"id": "1", "name": "X"})];
        let info = vec![json!({"service": 1})];

        let merged = merge(&services, &[], &info);

        assert_eq!(merged[0]["service_name"], json!("X"));
    }

    #[test]
    fn test_zero_padded_id_does_not_join() {
        let services = vec![json!({"id": 1, "name": "X"})];
        let info = vec![json!({"service": "01"})];

        let merged = merge(&services, &[], &info);

        assert_eq!(merged[0]["service_name"], json!(""));
    }

    #[test]
    fn test_non_object_info_entries_dropped() {
        let info = vec![json!(null), json!("noise"), json!({"service": 1}), json!(3)];
        let merged = merge(&services(), &countries(), &info);

        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let info = vec![
            json!({"service": 1, "country": 10, "cname": "a"}),
            json!({"service": "2", "country": 99}),
        ];

        let first = merge(&services(), &countries(), &info);
        let second = merge(&services(), &countries(), &info);

        assert_eq!(first, second);
    }

    #[test]
    fn test_passthrough_fields_keep_order_derived_fields_appended() {
        let info = vec![json!({"number": "989", "service": 1, "country": 10})];
        let merged = merge(&services(), &countries(), &info);

        let keys: Vec<&str> = merged[0].keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "number",
                "service",
                "country",
                "service_name",
                "service_name_en",
                "country_name",
                "country_name_en",
                "country_areacode",
            ]
        );
    }

    #[test]
    fn test_missing_foreign_key_fields_treated_as_empty() {
        let info = vec![json!({"cname": "Somewhere"})];
        let merged = merge(&services(), &countries(), &info);

        let row = &merged[0];
        assert_eq!(row["service_name"], json!(""));
        assert_eq!(row["country_name"], json!("Somewhere"));
    }
}
