//! Walks structured state to and from a plain JSON-expressible tree.
//!
//! Plain maps pass through untagged, so a user map carrying a `type` key
//! equal to one of the reserved tag strings cannot round-trip. The tag
//! strings are deliberately obscure to keep that collision out of real
//! state.

use serde_json::{json, Map, Value};
use uc_core::{Array, ArrayData, Dtype, Error, Result};

use crate::registry::TypeRegistry;
use crate::state::{Fields, StateValue};

const TAG_KEY: &str = "type";
const RECORD_TAG: &str = "__record__";
const ARRAY_TAG: &str = "__array__";
const FLOAT_TAG: &str = "__f64__";

/// Encode structured state as a plain JSON value.
///
/// Records and arrays become tagged maps; everything else maps onto the
/// JSON vocabulary directly. Non-finite floats, which JSON numbers cannot
/// carry, are encoded as strings inside a small tagged map (bare scalars)
/// or as strings in array data (where the dtype disambiguates).
pub fn serialise(value: &StateValue) -> Value {
    match value {
        StateValue::Null => Value::Null,
        StateValue::Bool(b) => Value::Bool(*b),
        StateValue::Int(i) => json!(i),
        StateValue::Float(x) => match serde_json::Number::from_f64(*x) {
            Some(n) => Value::Number(n),
            None => json!({ (TAG_KEY): FLOAT_TAG, "data": nonfinite_str(*x) }),
        },
        StateValue::Str(s) => Value::String(s.clone()),
        StateValue::Array(a) => serialise_array(a),
        StateValue::List(items) => Value::Array(items.iter().map(serialise).collect()),
        StateValue::Map(entries) => {
            let mut obj = Map::new();
            for (k, v) in entries {
                obj.insert(k.clone(), serialise(v));
            }
            Value::Object(obj)
        }
        StateValue::Record(r) => {
            let mut fields = Map::new();
            for (k, v) in &r.fields {
                fields.insert(k.clone(), serialise(v));
            }
            json!({ (TAG_KEY): RECORD_TAG, "class": r.class, "fields": fields })
        }
    }
}

/// Decode a plain JSON value back into structured state.
///
/// Tagged records are rebuilt through the registry; an unregistered class
/// fails with [`Error::UnresolvedType`].
pub fn deserialise(value: &Value, registry: &TypeRegistry) -> Result<StateValue> {
    match value {
        Value::Null => Ok(StateValue::Null),
        Value::Bool(b) => Ok(StateValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(StateValue::Int(i))
            } else {
                n.as_f64().map(StateValue::Float).ok_or_else(|| {
                    Error::Validation(format!("unrepresentable number {}", n))
                })
            }
        }
        Value::String(s) => Ok(StateValue::Str(s.clone())),
        Value::Array(items) => Ok(StateValue::List(
            items.iter().map(|v| deserialise(v, registry)).collect::<Result<_>>()?,
        )),
        Value::Object(obj) => match obj.get(TAG_KEY).and_then(Value::as_str) {
            Some(RECORD_TAG) => deserialise_record(obj, registry),
            Some(ARRAY_TAG) => deserialise_array(obj).map(StateValue::Array),
            Some(FLOAT_TAG) => {
                let s = obj
                    .get("data")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::Validation("float tag without data".to_string()))?;
                Ok(StateValue::Float(parse_nonfinite(s)?))
            }
            _ => {
                let mut entries = Fields::new();
                for (k, v) in obj {
                    entries.insert(k.clone(), deserialise(v, registry)?);
                }
                Ok(StateValue::Map(entries))
            }
        },
    }
}

/// Serialize state to a pretty JSON string.
pub fn to_json_string(value: &StateValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serialise(value))?)
}

/// Parse a JSON string back into structured state.
pub fn from_json_str(s: &str, registry: &TypeRegistry) -> Result<StateValue> {
    let value: Value = serde_json::from_str(s)?;
    deserialise(&value, registry)
}

fn serialise_array(a: &Array) -> Value {
    let data: Vec<Value> = match a.data() {
        ArrayData::F64(v) => v
            .iter()
            .map(|&x| match serde_json::Number::from_f64(x) {
                Some(n) => Value::Number(n),
                None => Value::String(nonfinite_str(x).to_string()),
            })
            .collect(),
        ArrayData::I64(v) => v.iter().map(|&x| json!(x)).collect(),
        ArrayData::Bool(v) => v.iter().map(|&x| Value::Bool(x)).collect(),
    };
    json!({
        (TAG_KEY): ARRAY_TAG,
        "dtype": a.dtype().name(),
        "shape": a.shape(),
        "data": data,
    })
}

fn deserialise_array(obj: &Map<String, Value>) -> Result<Array> {
    let dtype = obj
        .get("dtype")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Validation("array tag without dtype".to_string()))?;
    let dtype = Dtype::parse(dtype)?;
    let shape: Vec<usize> = obj
        .get("shape")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation("array tag without shape".to_string()))?
        .iter()
        .map(|v| {
            v.as_u64()
                .map(|d| d as usize)
                .ok_or_else(|| Error::Validation(format!("bad shape entry {}", v)))
        })
        .collect::<Result<_>>()?;
    let data = obj
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation("array tag without data".to_string()))?;

    match dtype {
        Dtype::F64 => {
            let values: Vec<f64> = data.iter().map(json_to_f64).collect::<Result<_>>()?;
            Array::from_f64(shape, values)
        }
        Dtype::I64 => {
            let values: Vec<i64> = data
                .iter()
                .map(|v| {
                    v.as_i64()
                        .ok_or_else(|| Error::Validation(format!("bad i64 entry {}", v)))
                })
                .collect::<Result<_>>()?;
            Array::from_i64(shape, values)
        }
        Dtype::Bool => {
            let values: Vec<bool> = data
                .iter()
                .map(|v| {
                    v.as_bool()
                        .ok_or_else(|| Error::Validation(format!("bad bool entry {}", v)))
                })
                .collect::<Result<_>>()?;
            Array::from_bool(shape, values)
        }
    }
}

fn deserialise_record(obj: &Map<String, Value>, registry: &TypeRegistry) -> Result<StateValue> {
    let class = obj
        .get("class")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Validation("record tag without class".to_string()))?;
    let factory = registry
        .resolve(class)
        .ok_or_else(|| Error::UnresolvedType(class.to_string()))?;
    let field_obj = obj
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Validation("record tag without fields".to_string()))?;
    let mut fields = Fields::new();
    for (k, v) in field_obj {
        fields.insert(k.clone(), deserialise(v, registry)?);
    }
    factory(fields)
}

fn nonfinite_str(x: f64) -> &'static str {
    if x.is_nan() {
        "nan"
    } else if x > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn parse_nonfinite(s: &str) -> Result<f64> {
    match s {
        "nan" => Ok(f64::NAN),
        "inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        other => Err(Error::Validation(format!("bad float literal {:?}", other))),
    }
}

fn json_to_f64(v: &Value) -> Result<f64> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::Validation(format!("unrepresentable number {}", n))),
        Value::String(s) => parse_nonfinite(s),
        other => Err(Error::Validation(format!("bad f64 entry {}", other))),
    }
}
