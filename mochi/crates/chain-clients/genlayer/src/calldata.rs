//! GenLayer calldata encoding.
//!
//! Every value starts with a ULEB128 header `(payload << 3) | type`. For integers the payload is
//! the value itself, for strings, arrays and maps it is the length, for specials it selects the
//! constant. Map keys are written as a ULEB128 byte length followed by the UTF-8 bytes, sorted.

use serde_json::{Map, Number, Value};
use thiserror::Error;

pub const TYPE_SPECIAL: u8 = 0;
pub const TYPE_PINT: u8 = 1;
pub const TYPE_NINT: u8 = 2;
pub const TYPE_BYTES: u8 = 3;
pub const TYPE_STR: u8 = 4;
pub const TYPE_ARR: u8 = 5;
pub const TYPE_MAP: u8 = 6;

const BITS_IN_TYPE: u32 = 3;

const SPECIAL_NULL: u8 = (0 << BITS_IN_TYPE) | TYPE_SPECIAL;
const SPECIAL_FALSE: u8 = (1 << BITS_IN_TYPE) | TYPE_SPECIAL;
const SPECIAL_TRUE: u8 = (2 << BITS_IN_TYPE) | TYPE_SPECIAL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalldataError {
    #[error("Floating point numbers cannot be encoded: {0}")]
    UnsupportedNumber(Number),
}

/// Encodes a contract method call: `{"method": <name>, "args": [...]}`.
pub fn encode_call(method: &str, args: &[Value]) -> Result<Vec<u8>, CalldataError> {
    let mut call = Map::new();
    call.insert("method".to_string(), Value::String(method.to_string()));
    call.insert("args".to_string(), Value::Array(args.to_vec()));
    encode(&Value::Object(call))
}

pub fn encode(value: &Value) -> Result<Vec<u8>, CalldataError> {
    let mut out = Vec::new();
    encode_into(&mut out, value)?;
    Ok(out)
}

fn encode_into(out: &mut Vec<u8>, value: &Value) -> Result<(), CalldataError> {
    match value {
        Value::Null => out.push(SPECIAL_NULL),
        Value::Bool(false) => out.push(SPECIAL_FALSE),
        Value::Bool(true) => out.push(SPECIAL_TRUE),
        Value::Number(number) => encode_number(out, number)?,
        Value::String(s) => {
            write_header(out, s.len() as u128, TYPE_STR);
            out.extend_from_slice(s.as_bytes());
        }
        Value::Array(items) => {
            write_header(out, items.len() as u128, TYPE_ARR);
            for item in items {
                encode_into(out, item)?;
            }
        }
        Value::Object(map) => {
            write_header(out, map.len() as u128, TYPE_MAP);
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
            for (key, item) in entries {
                write_uleb128(out, key.len() as u128);
                out.extend_from_slice(key.as_bytes());
                encode_into(out, item)?;
            }
        }
    }
    Ok(())
}

fn encode_number(out: &mut Vec<u8>, number: &Number) -> Result<(), CalldataError> {
    if let Some(value) = number.as_u64() {
        write_header(out, value as u128, TYPE_PINT);
    } else if let Some(value) = number.as_i64() {
        // as_u64 failed, so the value is negative; -v - 1 fits without overflow
        let magnitude = (-(value as i128) - 1) as u128;
        write_header(out, magnitude, TYPE_NINT);
    } else {
        return Err(CalldataError::UnsupportedNumber(number.clone()));
    }
    Ok(())
}

fn write_header(out: &mut Vec<u8>, payload: u128, ty: u8) {
    write_uleb128(out, (payload << BITS_IN_TYPE) | ty as u128);
}

fn write_uleb128(out: &mut Vec<u8>, mut value: u128) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(null), vec![0x00])]
    #[case(json!(false), vec![0x08])]
    #[case(json!(true), vec![0x10])]
    #[case(json!(0), vec![0x01])]
    #[case(json!(5), vec![0x29])]
    #[case(json!(16), vec![0x81, 0x01])]
    #[case(json!(-1), vec![0x02])]
    #[case(json!(-3), vec![0x12])]
    #[case(json!(""), vec![0x04])]
    #[case(json!("x"), vec![0x0c, b'x'])]
    #[case(json!([]), vec![0x05])]
    #[case(json!({}), vec![0x06])]
    fn encodes_scalars(#[case] value: Value, #[case] expected: Vec<u8>) {
        assert_eq!(encode(&value).unwrap(), expected);
    }

    #[test]
    fn long_strings_use_multi_byte_headers() {
        let s = "a".repeat(16);
        let encoded = encode(&json!(s)).unwrap();
        assert_eq!(&encoded[..2], &[0x84, 0x01]);
        assert_eq!(&encoded[2..], s.as_bytes());
    }

    #[test]
    fn map_keys_are_sorted_and_untyped() {
        let encoded = encode(&json!({ "method": "f", "args": ["x"] })).unwrap();

        let mut expected = vec![0x16, 0x04];
        expected.extend_from_slice(b"args");
        expected.extend_from_slice(&[0x0d, 0x0c, b'x', 0x06]);
        expected.extend_from_slice(b"method");
        expected.extend_from_slice(&[0x0c, b'f']);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn verify_fact_call_carries_the_claim() {
        let encoded = encode_call("verify_fact", &[json!("Cats sleep")]).unwrap();

        let mut expected = vec![0x16, 0x04];
        expected.extend_from_slice(b"args");
        expected.extend_from_slice(&[0x0d, (10 << 3) | TYPE_STR]);
        expected.extend_from_slice(b"Cats sleep");
        expected.push(0x06);
        expected.extend_from_slice(b"method");
        expected.push((11 << 3) | TYPE_STR);
        expected.extend_from_slice(b"verify_fact");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn unicode_lengths_count_bytes() {
        let encoded = encode(&json!("猫")).unwrap();
        assert_eq!(encoded[0], (3 << 3) | TYPE_STR);
        assert_eq!(encoded.len(), 4);
    }

    #[test]
    fn floats_are_rejected() {
        assert!(matches!(encode(&json!(1.5)), Err(CalldataError::UnsupportedNumber(_))));
    }
}
