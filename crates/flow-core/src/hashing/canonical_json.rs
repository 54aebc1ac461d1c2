//! Canonical JSON mínimo: claves de objetos ordenadas, sin espacios.
//!
//! Se usa para que los fingerprints de definiciones y snapshots no dependan
//! del orden de inserción de los campos.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // `Display` de `Value::String` produce el literal JSON escapado.
        Value::String(_) => value.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let v = json!({"b": 1, "a": [true, null, "x\"y"]});
        assert_eq!(to_canonical_json(&v), r#"{"a":[true,null,"x\"y"],"b":1}"#);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = json!({"step": 1, "label": "Recipient"});
        let b = json!({"label": "Recipient", "step": 1});
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
    }
}
