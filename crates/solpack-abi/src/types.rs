//! Parameter kinds, raw input values and normalized tokens

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use solpack_primitives::{Address, U256};

use crate::hexutil::{has_hex_prefix, is_hex, parse_u256};
use crate::EncodingError;

/// Supported parameter kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParamType {
    /// 256-bit unsigned integer
    Uint,
    /// 20-byte address
    Address,
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
    /// `uint256[]`
    UintArray,
    /// `address[]`
    AddressArray,
    /// `bool[]`
    BoolArray,
    /// `bytes[]`
    BytesArray,
    /// `string[]`
    StringArray,
}

impl ParamType {
    /// Canonical type tag
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Uint => "uint256",
            ParamType::Address => "address",
            ParamType::Bool => "bool",
            ParamType::Bytes => "bytes",
            ParamType::String => "string",
            ParamType::UintArray => "uint256[]",
            ParamType::AddressArray => "address[]",
            ParamType::BoolArray => "bool[]",
            ParamType::BytesArray => "bytes[]",
            ParamType::StringArray => "string[]",
        }
    }

    /// Whether values of this kind are stored in the tail
    pub fn is_dynamic(self) -> bool {
        !matches!(self, ParamType::Uint | ParamType::Address | ParamType::Bool)
    }

    /// Whether this is one of the array kinds
    pub fn is_array(self) -> bool {
        self.element().is_some()
    }

    /// Element kind of an array kind
    pub fn element(self) -> Option<ParamType> {
        match self {
            ParamType::UintArray => Some(ParamType::Uint),
            ParamType::AddressArray => Some(ParamType::Address),
            ParamType::BoolArray => Some(ParamType::Bool),
            ParamType::BytesArray => Some(ParamType::Bytes),
            ParamType::StringArray => Some(ParamType::String),
            _ => None,
        }
    }

    /// Array kind holding elements of this kind
    pub fn array_of(self) -> Option<ParamType> {
        match self {
            ParamType::Uint => Some(ParamType::UintArray),
            ParamType::Address => Some(ParamType::AddressArray),
            ParamType::Bool => Some(ParamType::BoolArray),
            ParamType::Bytes => Some(ParamType::BytesArray),
            ParamType::String => Some(ParamType::StringArray),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let (base, is_array) = match tag.strip_suffix("[]") {
            Some(base) => (base, true),
            None => (tag, false),
        };
        let scalar = match base {
            "uint" | "uint256" => ParamType::Uint,
            "address" => ParamType::Address,
            "bool" => ParamType::Bool,
            "bytes" => ParamType::Bytes,
            "string" => ParamType::String,
            _ => return Err(EncodingError::UnsupportedType(s.to_string())),
        };
        if !is_array {
            return Ok(scalar);
        }
        scalar
            .array_of()
            .ok_or_else(|| EncodingError::UnsupportedType(s.to_string()))
    }
}

impl TryFrom<String> for ParamType {
    type Error = EncodingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ParamType> for String {
    fn from(kind: ParamType) -> Self {
        kind.as_str().to_string()
    }
}

/// Value as supplied by a caller, before validation
///
/// JSON numbers must be non-negative integers that fit in a `u64`. Anything
/// larger goes in a decimal or hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(u64),
    /// Text: decimal or hex numbers, addresses, boolean words, hex bytes, strings
    Text(String),
    /// Array elements
    List(Vec<ParamValue>),
}

struct ParamValueVisitor;

impl ParamValueVisitor {
    fn numeric<E: de::Error>(shown: impl fmt::Display) -> E {
        E::custom(EncodingError::InvalidNumericInput(format!(
            "{} (numbers outside 0..=2^64-1 must be given as strings)",
            shown
        )))
    }
}

impl<'de> Visitor<'de> for ParamValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, an unsigned integer, a string or an array")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ParamValue, E> {
        Ok(ParamValue::Bool(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParamValue, E> {
        Ok(ParamValue::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParamValue, E> {
        u64::try_from(v)
            .map(ParamValue::Number)
            .map_err(|_| Self::numeric(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ParamValue, E> {
        Err(Self::numeric(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ParamValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ParamValue::List(items))
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ParamValueVisitor)
    }
}

impl ParamValue {
    fn shape(&self) -> String {
        match self {
            ParamValue::Bool(b) => format!("bool {}", b),
            ParamValue::Number(n) => format!("number {}", n),
            ParamValue::Text(s) => format!("text {:?}", s),
            ParamValue::List(items) => format!("list of {}", items.len()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Number(n)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// A raw value tagged with its declared kind, e.g.
/// `{"type": "uint256[]", "value": ["1", "2"]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedParameter {
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: ParamType,
    /// Raw value
    pub value: ParamValue,
}

impl TypedParameter {
    /// Create a new parameter
    pub fn new(kind: ParamType, value: impl Into<ParamValue>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// `uint256` parameter
    pub fn uint(value: impl Into<ParamValue>) -> Self {
        Self::new(ParamType::Uint, value)
    }

    /// `address` parameter
    pub fn address(value: impl Into<ParamValue>) -> Self {
        Self::new(ParamType::Address, value)
    }

    /// `bool` parameter
    pub fn bool(value: impl Into<ParamValue>) -> Self {
        Self::new(ParamType::Bool, value)
    }

    /// `bytes` parameter
    pub fn bytes(value: impl Into<ParamValue>) -> Self {
        Self::new(ParamType::Bytes, value)
    }

    /// `string` parameter
    pub fn string(value: impl Into<ParamValue>) -> Self {
        Self::new(ParamType::String, value)
    }

    /// Validate the raw value against the declared kind.
    ///
    /// This is the only place input text is interpreted; encoders downstream
    /// work on [`Token`]s and cannot fail.
    pub fn normalize(&self) -> Result<Token, EncodingError> {
        let value = &self.value;
        let token = match self.kind {
            ParamType::Uint => Token::Uint(parse_uint(value)?),
            ParamType::Address => Token::Address(parse_address(value)?),
            ParamType::Bool => Token::Bool(parse_bool(value)?),
            ParamType::Bytes => Token::Bytes(parse_bytes(value)?),
            ParamType::String => Token::String(parse_string(value)?),
            ParamType::UintArray => Token::UintArray(parse_list(self.kind, value, parse_uint)?),
            ParamType::AddressArray => {
                Token::AddressArray(parse_list(self.kind, value, parse_address)?)
            }
            ParamType::BoolArray => Token::BoolArray(parse_list(self.kind, value, parse_bool)?),
            ParamType::BytesArray => Token::BytesArray(parse_list(self.kind, value, parse_bytes)?),
            ParamType::StringArray => {
                Token::StringArray(parse_list(self.kind, value, parse_string)?)
            }
        };
        Ok(token)
    }
}

/// Validated value, one variant per [`ParamType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// 256-bit unsigned integer
    Uint(U256),
    /// Address
    Address(Address),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// `uint256[]`
    UintArray(Vec<U256>),
    /// `address[]`
    AddressArray(Vec<Address>),
    /// `bool[]`
    BoolArray(Vec<bool>),
    /// `bytes[]`
    BytesArray(Vec<Vec<u8>>),
    /// `string[]`
    StringArray(Vec<String>),
}

impl Token {
    /// Kind of this token
    pub fn kind(&self) -> ParamType {
        match self {
            Token::Uint(_) => ParamType::Uint,
            Token::Address(_) => ParamType::Address,
            Token::Bool(_) => ParamType::Bool,
            Token::Bytes(_) => ParamType::Bytes,
            Token::String(_) => ParamType::String,
            Token::UintArray(_) => ParamType::UintArray,
            Token::AddressArray(_) => ParamType::AddressArray,
            Token::BoolArray(_) => ParamType::BoolArray,
            Token::BytesArray(_) => ParamType::BytesArray,
            Token::StringArray(_) => ParamType::StringArray,
        }
    }
}

fn mismatch(expected: ParamType, value: &ParamValue) -> EncodingError {
    EncodingError::TypeMismatch {
        expected,
        found: value.shape(),
    }
}

fn parse_list<T>(
    kind: ParamType,
    value: &ParamValue,
    parse: fn(&ParamValue) -> Result<T, EncodingError>,
) -> Result<Vec<T>, EncodingError> {
    match value {
        ParamValue::List(items) => items.iter().map(parse).collect(),
        other => Err(mismatch(kind, other)),
    }
}

fn parse_uint(value: &ParamValue) -> Result<U256, EncodingError> {
    match value {
        ParamValue::Text(s) => parse_u256(s),
        ParamValue::Number(n) => Ok(U256::from(*n)),
        other => Err(mismatch(ParamType::Uint, other)),
    }
}

fn parse_address(value: &ParamValue) -> Result<Address, EncodingError> {
    match value {
        ParamValue::Text(s) => {
            Address::from_hex(s).map_err(|_| EncodingError::InvalidAddress(s.clone()))
        }
        other => Err(mismatch(ParamType::Address, other)),
    }
}

fn parse_bool(value: &ParamValue) -> Result<bool, EncodingError> {
    match value {
        ParamValue::Bool(b) => Ok(*b),
        ParamValue::Text(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(EncodingError::InvalidBoolInput(s.clone())),
        },
        ParamValue::Number(0) => Ok(false),
        ParamValue::Number(1) => Ok(true),
        ParamValue::Number(n) => Err(EncodingError::InvalidBoolInput(n.to_string())),
        other => Err(mismatch(ParamType::Bool, other)),
    }
}

fn parse_bytes(value: &ParamValue) -> Result<Vec<u8>, EncodingError> {
    let s = match value {
        ParamValue::Text(s) => s,
        other => return Err(mismatch(ParamType::Bytes, other)),
    };
    let digits = if has_hex_prefix(s) { &s[2..] } else { s.as_str() };
    if !is_hex(digits) {
        return Err(EncodingError::InvalidHexInput(s.clone()));
    }
    // "aaa" is read as 0x0aaa
    if digits.len() % 2 == 1 {
        Ok(hex::decode(format!("0{}", digits))?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

fn parse_string(value: &ParamValue) -> Result<String, EncodingError> {
    match value {
        ParamValue::Text(s) => Ok(s.clone()),
        other => Err(mismatch(ParamType::String, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Type tags ====================

    #[test]
    fn test_param_type_from_str() {
        assert_eq!("uint256".parse::<ParamType>().unwrap(), ParamType::Uint);
        assert_eq!("uint".parse::<ParamType>().unwrap(), ParamType::Uint);
        assert_eq!("address".parse::<ParamType>().unwrap(), ParamType::Address);
        assert_eq!("bool".parse::<ParamType>().unwrap(), ParamType::Bool);
        assert_eq!("bytes".parse::<ParamType>().unwrap(), ParamType::Bytes);
        assert_eq!("string".parse::<ParamType>().unwrap(), ParamType::String);
        assert_eq!("uint256[]".parse::<ParamType>().unwrap(), ParamType::UintArray);
        assert_eq!(" string[] ".parse::<ParamType>().unwrap(), ParamType::StringArray);
    }

    #[test]
    fn test_param_type_unsupported() {
        for tag in ["int256", "bytes32", "uint8", "tuple", "uint256[][]", "address[2]", ""] {
            assert!(
                matches!(tag.parse::<ParamType>(), Err(EncodingError::UnsupportedType(_))),
                "accepted {:?}",
                tag
            );
        }
    }

    #[test]
    fn test_param_type_display_roundtrip() {
        let all = [
            ParamType::Uint,
            ParamType::Address,
            ParamType::Bool,
            ParamType::Bytes,
            ParamType::String,
            ParamType::UintArray,
            ParamType::AddressArray,
            ParamType::BoolArray,
            ParamType::BytesArray,
            ParamType::StringArray,
        ];
        for kind in all {
            assert_eq!(kind.to_string().parse::<ParamType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Uint.is_dynamic());
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::BoolArray.is_dynamic());
        assert!(ParamType::UintArray.is_array());
        assert!(!ParamType::Bytes.is_array());
        assert_eq!(ParamType::BytesArray.element(), Some(ParamType::Bytes));
    }

    // ==================== JSON input ====================

    #[test]
    fn test_typed_parameter_from_json() {
        let param: TypedParameter =
            serde_json::from_str(r#"{"type": "bool[]", "value": ["true", false, 1]}"#).unwrap();
        assert_eq!(param.kind, ParamType::BoolArray);
        assert_eq!(
            param.normalize().unwrap(),
            Token::BoolArray(vec![true, false, true])
        );
    }

    #[test]
    fn test_typed_parameter_json_unsupported_tag() {
        let result: Result<TypedParameter, _> =
            serde_json::from_str(r#"{"type": "int8", "value": "1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_numbers_outside_u64() {
        for input in [
            r#"{"type": "uint256", "value": 18446744073709551616}"#,
            r#"{"type": "uint256", "value": -1}"#,
            r#"{"type": "uint256", "value": 1.5}"#,
            r#"{"type": "uint256[]", "value": [1, -2]}"#,
        ] {
            let err = serde_json::from_str::<TypedParameter>(input).unwrap_err();
            let message = err.to_string();
            assert!(message.contains("invalid numeric input"), "{}", message);
            assert!(!message.contains("untagged"), "{}", message);
        }
    }

    #[test]
    fn test_json_large_number_as_string() {
        let param: TypedParameter =
            serde_json::from_str(r#"{"type": "uint256", "value": "18446744073709551616"}"#)
                .unwrap();
        assert_eq!(
            param.normalize().unwrap(),
            Token::Uint(U256::from(u64::MAX) + U256::one())
        );

        let param: TypedParameter =
            serde_json::from_str(r#"{"type": "uint256", "value": 18446744073709551615}"#)
                .unwrap();
        assert_eq!(param.value, ParamValue::Number(u64::MAX));
    }

    #[test]
    fn test_json_value_shapes() {
        let value: ParamValue = serde_json::from_str(r#"[true, 7, "x", []]"#).unwrap();
        assert_eq!(
            value,
            ParamValue::List(vec![
                ParamValue::Bool(true),
                ParamValue::Number(7),
                ParamValue::Text("x".to_string()),
                ParamValue::List(Vec::new()),
            ])
        );
        assert!(serde_json::from_str::<ParamValue>("null").is_err());
        assert!(serde_json::from_str::<ParamValue>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_typed_parameter_to_json() {
        let param = TypedParameter::uint("255");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json, serde_json::json!({"type": "uint256", "value": "255"}));
    }

    // ==================== Normalization ====================

    #[test]
    fn test_normalize_uint() {
        assert_eq!(TypedParameter::uint("255").normalize().unwrap(), Token::Uint(U256::from(255)));
        assert_eq!(TypedParameter::uint("0xff").normalize().unwrap(), Token::Uint(U256::from(255)));
        assert_eq!(TypedParameter::uint(255u64).normalize().unwrap(), Token::Uint(U256::from(255)));
        assert!(matches!(
            TypedParameter::uint("12abc").normalize(),
            Err(EncodingError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn test_normalize_address() {
        let token = TypedParameter::address("0xC4EA73D428AB6589C36905D0F0B01F3051740FF8")
            .normalize()
            .unwrap();
        match token {
            Token::Address(a) => assert_eq!(a.to_hex(), "0xc4ea73d428ab6589c36905d0f0b01f3051740ff8"),
            other => panic!("unexpected token {:?}", other),
        }
        assert!(matches!(
            TypedParameter::address("0x1234").normalize(),
            Err(EncodingError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_normalize_bool() {
        assert_eq!(TypedParameter::bool("true").normalize().unwrap(), Token::Bool(true));
        assert_eq!(TypedParameter::bool("1").normalize().unwrap(), Token::Bool(true));
        assert_eq!(TypedParameter::bool("false").normalize().unwrap(), Token::Bool(false));
        assert_eq!(TypedParameter::bool("0").normalize().unwrap(), Token::Bool(false));
        assert_eq!(TypedParameter::bool(true).normalize().unwrap(), Token::Bool(true));
        assert!(matches!(
            TypedParameter::bool("yes").normalize(),
            Err(EncodingError::InvalidBoolInput(_))
        ));
        assert!(matches!(
            TypedParameter::bool(2u64).normalize(),
            Err(EncodingError::InvalidBoolInput(_))
        ));
    }

    #[test]
    fn test_normalize_bytes() {
        assert_eq!(
            TypedParameter::bytes("0xaaaa").normalize().unwrap(),
            Token::Bytes(vec![0xaa, 0xaa])
        );
        assert_eq!(
            TypedParameter::bytes("aaa").normalize().unwrap(),
            Token::Bytes(vec![0x0a, 0xaa])
        );
        assert_eq!(TypedParameter::bytes("0x").normalize().unwrap(), Token::Bytes(vec![]));
        assert!(matches!(
            TypedParameter::bytes("0xzz").normalize(),
            Err(EncodingError::InvalidHexInput(_))
        ));
    }

    #[test]
    fn test_normalize_shape_mismatch() {
        let scalar_given_list = TypedParameter::uint(vec!["1", "2"]);
        assert!(matches!(
            scalar_given_list.normalize(),
            Err(EncodingError::TypeMismatch { expected: ParamType::Uint, .. })
        ));

        let list_given_scalar = TypedParameter::new(ParamType::StringArray, "abc");
        assert!(matches!(
            list_given_scalar.normalize(),
            Err(EncodingError::TypeMismatch { expected: ParamType::StringArray, .. })
        ));

        let string_given_number = TypedParameter::string(5u64);
        assert!(matches!(
            string_given_number.normalize(),
            Err(EncodingError::TypeMismatch { expected: ParamType::String, .. })
        ));
    }

    #[test]
    fn test_normalize_array_element_failure() {
        let param = TypedParameter::new(ParamType::BoolArray, vec!["true", "nope"]);
        assert!(matches!(param.normalize(), Err(EncodingError::InvalidBoolInput(_))));
    }

    #[test]
    fn test_token_kind_matches_declared_kind() {
        let param = TypedParameter::new(ParamType::StringArray, vec!["a", "bb"]);
        assert_eq!(param.normalize().unwrap().kind(), ParamType::StringArray);
    }
}
