//! # solpack-abi
//!
//! Word-oriented encoding of contract-call parameters and packed keccak
//! hashing.
//!
//! ## Features
//!
//! - **Word**: 32-byte unit of every encoding, with padding helpers
//! - **Packers**: one per supported kind, scalars and homogeneous arrays
//! - **encode_parameters**: head/tail layout of a typed parameter list
//! - **hash_parameters**: keccak digest of that layout
//! - **Units**: decimal amount scaling
//! - **rpc**: JSON-RPC request objects, e.g. an `eth_call` carrying encoded call data
//!
//! ## Quick Start
//!
//! ```rust
//! use solpack_abi::{encode_parameters, hash_parameters, ParamType, TypedParameter};
//!
//! # fn main() -> Result<(), solpack_abi::EncodingError> {
//! let params = vec![
//!     TypedParameter::uint("255"),
//!     TypedParameter::new(ParamType::StringArray, vec!["a", "bb"]),
//! ];
//!
//! let encoded = encode_parameters(&params)?;
//! assert_eq!(encoded.len() % 64, 0);
//!
//! let digest = hash_parameters(&params)?;
//! assert!(digest.starts_with("0x"));
//! # Ok(())
//! # }
//! ```
//!
//! ## JSON Input
//!
//! ```rust
//! use solpack_abi::{encode_parameters, TypedParameter};
//!
//! let params: Vec<TypedParameter> = serde_json::from_str(
//!     r#"[{"type": "bool", "value": "true"}, {"type": "bytes", "value": "0xaaaa"}]"#,
//! ).unwrap();
//! let encoded = encode_parameters(&params).unwrap();
//! assert_eq!(encoded.len(), 64 * 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod array;
mod encode;
mod error;
mod hash;
pub mod hexutil;
pub mod rpc;
mod scalar;
pub mod types;
pub mod units;
pub mod word;

pub use array::{
    element_offsets, pack_address_array, pack_bool_array, pack_bytes_array, pack_string_array,
    pack_uint_array,
};
pub use encode::{encode_function_call, encode_parameters, encode_tokens, pack_function, pack_token};
pub use error::EncodingError;
pub use hash::{hash_parameter, hash_parameters, hash_parameters_raw};
pub use hexutil::random_hex;
pub use rpc::{build_request, call_request, BlockId, CallRequest};
pub use scalar::{pack_address, pack_bool, pack_bytes, pack_string, pack_uint};
pub use types::{ParamType, ParamValue, Token, TypedParameter};
pub use units::{from_wei, from_wei_u256, to_wei, to_wei_u256, MAX_DECIMALS};
pub use word::{EncodedValue, Word, WORD_BYTES, WORD_HEX_LEN};

// Re-export primitives for convenience
pub use solpack_primitives::{Address, H256, U256};
