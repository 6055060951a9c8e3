//! JSON import and export of designs.
//!
//! Arrays are groups and objects are elements tagged by `type`. Import walks
//! the document by hand so a bad element is reported with its position in
//! the flattened stream rather than as an opaque untagged-enum failure.

use serde_json::Value;

use crate::error::{DesignError, Result};
use crate::step::{Element, Step};

/// Serialize a design to pretty-printed JSON.
pub fn export_design(steps: &[Step]) -> Result<String> {
    Ok(serde_json::to_string_pretty(steps)?)
}

/// Load a design from JSON.
///
/// The top level must be an array. Nested arrays become [`Step::Group`]s.
pub fn import_design(json: &str) -> Result<Vec<Step>> {
    let value: Value = serde_json::from_str(json)?;
    let mut index = 0;
    match value {
        Value::Array(items) => items.into_iter().map(|v| import_step(v, &mut index)).collect(),
        other => Err(DesignError::UnknownElement {
            index: 0,
            kind: json_kind(&other).into(),
            reason: "a design must be a JSON array".into(),
        }),
    }
}

fn import_step(value: Value, index: &mut usize) -> Result<Step> {
    match value {
        Value::Array(items) => Ok(Step::Group(
            items
                .into_iter()
                .map(|v| import_step(v, index))
                .collect::<Result<_>>()?,
        )),
        Value::Object(map) => {
            let at = *index;
            *index += 1;
            let kind = map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("<untagged>")
                .to_string();
            serde_json::from_value::<Element>(Value::Object(map))
                .map(Step::Element)
                .map_err(|e| DesignError::UnknownElement {
                    index: at,
                    kind,
                    reason: e.to_string(),
                })
        }
        other => {
            let at = *index;
            *index += 1;
            Err(DesignError::UnknownElement {
                index: at,
                kind: json_kind(&other).into(),
                reason: "expected an element object or a group array".into(),
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flatten, CrossSectionUpdate, Event, Point};

    #[test]
    fn test_export_then_import() {
        let design: Vec<Step> = vec![
            CrossSectionUpdate::rectangle(0.4, 0.2).into(),
            vec![Point::new(0.0, 0.0, 0.2), Point::new(5.0, 0.0, 0.2)].into(),
            Event::retract().into(),
        ];
        let json = export_design(&design).unwrap();
        let back = import_design(&json).unwrap();
        assert_eq!(flatten(&back), flatten(&design));
    }

    #[test]
    fn test_unknown_kind_reports_flat_index() {
        let json = r#"[
            {"type": "Point", "x": 0, "y": 0, "z": 0.2},
            [
                {"type": "Point", "x": 1},
                {"type": "Teleport", "x": 5}
            ]
        ]"#;
        match import_design(json) {
            Err(DesignError::UnknownElement { index, kind, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(kind, "Teleport");
            }
            other => panic!("expected UnknownElement, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_element_rejected() {
        let err = import_design("[42]").unwrap_err();
        assert!(matches!(err, DesignError::UnknownElement { index: 0, ref kind, .. } if kind == "number"));
    }
}
