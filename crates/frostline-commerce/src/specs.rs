//! Specification codec.
//!
//! A product's `specifications` string has gone through three historical
//! shapes: unstructured prose, a flat JSON list of key/value rows, and the
//! current hybrid object combining an overview paragraph with a table.
//! Decoding detects the shape with an explicit, ordered decision table and
//! never fails; encoding always emits the current hybrid shape.

use serde::{Deserialize, Serialize};

/// One key/value row in a specification table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecRow {
    /// Attribute name, e.g. "Voltage".
    pub key: String,
    /// Attribute value, e.g. "220V".
    pub value: String,
}

impl SpecRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A row is blank when both key and value are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }
}

/// The decoded, renderable/editable form of a product's technical data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecSheet {
    /// Free-text overview paragraph.
    pub overview: String,
    /// Structured key/value table.
    pub table: Vec<SpecRow>,
}

/// Which historical payload shape a raw string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecShape {
    /// Current schema: `{ "overview": ..., "table": [...] }`.
    Hybrid,
    /// Legacy flat list: `[{ "key": ..., "value": ... }, ...]`.
    LegacyTable,
    /// Legacy unstructured prose (or anything unparseable).
    LegacyText,
}

/// Wire form of the current hybrid schema. Both fields are optional so
/// partially written legacy payloads still decode.
#[derive(Debug, Default, Deserialize)]
struct HybridPayload {
    #[serde(default)]
    overview: String,
    #[serde(default)]
    table: Vec<serde_json::Value>,
}

/// Detect which shape a raw payload is in, without fully decoding it.
pub fn detect_shape(raw: &str) -> SpecShape {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) if map.contains_key("table") => SpecShape::Hybrid,
        Ok(serde_json::Value::Array(_)) => SpecShape::LegacyTable,
        _ => SpecShape::LegacyText,
    }
}

impl SpecSheet {
    /// Create a sheet from parts.
    pub fn new(overview: impl Into<String>, table: Vec<SpecRow>) -> Self {
        Self {
            overview: overview.into(),
            table,
        }
    }

    /// Decode a raw `specifications` payload. Never fails: anything that
    /// is not a recognizable structured shape becomes an overview-only
    /// sheet with the original string preserved verbatim.
    pub fn decode(raw: &str) -> Self {
        match detect_shape(raw) {
            SpecShape::Hybrid => {
                // detect_shape only reports Hybrid for a parseable object
                let payload: HybridPayload = serde_json::from_str(raw).unwrap_or_default();
                let table = payload
                    .table
                    .into_iter()
                    .filter_map(|row| serde_json::from_value::<SpecRow>(row).ok())
                    .collect();
                Self {
                    overview: payload.overview,
                    table,
                }
            }
            SpecShape::LegacyTable => {
                let rows: Vec<serde_json::Value> = serde_json::from_str(raw).unwrap_or_default();
                let table = rows
                    .into_iter()
                    .filter_map(|row| serde_json::from_value::<SpecRow>(row).ok())
                    .collect();
                Self {
                    overview: String::new(),
                    table,
                }
            }
            SpecShape::LegacyText => Self {
                overview: raw.to_string(),
                table: Vec::new(),
            },
        }
    }

    /// Encode to the current hybrid schema. Blank editor rows are
    /// filtered out; legacy shapes are not preserved on re-save.
    pub fn encode(&self) -> String {
        #[derive(Serialize)]
        struct Wire<'a> {
            overview: &'a str,
            table: Vec<&'a SpecRow>,
        }
        let wire = Wire {
            overview: &self.overview,
            table: self.table.iter().filter(|r| !r.is_blank()).collect(),
        };
        // Serializing strings and vecs cannot fail
        serde_json::to_string(&wire).unwrap_or_default()
    }

    /// True when there is no technical data to render.
    pub fn is_empty(&self) -> bool {
        self.overview.trim().is_empty() && self.table.iter().all(|r| r.is_blank())
    }

    /// Copy of the sheet with blank rows removed.
    pub fn without_blank_rows(&self) -> Self {
        Self {
            overview: self.overview.clone(),
            table: self.table.iter().filter(|r| !r.is_blank()).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hybrid() {
        let raw = r#"{"overview":"Hermetic unit","table":[{"key":"Voltage","value":"220V"}]}"#;
        assert_eq!(detect_shape(raw), SpecShape::Hybrid);

        let sheet = SpecSheet::decode(raw);
        assert_eq!(sheet.overview, "Hermetic unit");
        assert_eq!(sheet.table, vec![SpecRow::new("Voltage", "220V")]);
    }

    #[test]
    fn test_decode_hybrid_missing_fields() {
        let sheet = SpecSheet::decode(r#"{"table":[]}"#);
        assert_eq!(sheet.overview, "");
        assert!(sheet.table.is_empty());
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_decode_hybrid_skips_malformed_rows() {
        let raw = r#"{"overview":"x","table":[{"key":"A","value":"1"},"junk",{"key":"B"}]}"#;
        let sheet = SpecSheet::decode(raw);
        assert_eq!(sheet.table, vec![SpecRow::new("A", "1")]);
    }

    #[test]
    fn test_decode_legacy_table() {
        let raw = r#"[{"key":"Voltage","value":"220V"}]"#;
        assert_eq!(detect_shape(raw), SpecShape::LegacyTable);

        let sheet = SpecSheet::decode(raw);
        assert_eq!(sheet.overview, "");
        assert_eq!(sheet.table, vec![SpecRow::new("Voltage", "220V")]);
    }

    #[test]
    fn test_decode_legacy_text() {
        let raw = "Runs on 3-phase power";
        assert_eq!(detect_shape(raw), SpecShape::LegacyText);

        let sheet = SpecSheet::decode(raw);
        assert_eq!(sheet.overview, "Runs on 3-phase power");
        assert!(sheet.table.is_empty());
    }

    #[test]
    fn test_json_object_without_table_is_text() {
        // A parseable object that isn't the hybrid shape falls through to prose.
        let raw = r#"{"voltage":"220V"}"#;
        assert_eq!(detect_shape(raw), SpecShape::LegacyText);

        let sheet = SpecSheet::decode(raw);
        assert_eq!(sheet.overview, raw);
    }

    #[test]
    fn test_empty_payload() {
        let sheet = SpecSheet::decode("");
        assert!(sheet.is_empty());
        assert_eq!(sheet.encode(), r#"{"overview":"","table":[]}"#);
    }

    #[test]
    fn test_round_trip_hybrid() {
        let sheet = SpecSheet::new(
            "Hermetic reciprocating compressor",
            vec![
                SpecRow::new("Voltage", "220V"),
                SpecRow::new("Refrigerant", "R134a"),
            ],
        );
        assert_eq!(SpecSheet::decode(&sheet.encode()), sheet);
    }

    #[test]
    fn test_round_trip_filters_blank_rows() {
        let sheet = SpecSheet::new(
            "Overview",
            vec![
                SpecRow::new("Voltage", "220V"),
                SpecRow::new("  ", ""),
                SpecRow::new("", ""),
            ],
        );
        assert_eq!(SpecSheet::decode(&sheet.encode()), sheet.without_blank_rows());
    }
}
