//! JSON-RPC 2.0 request builders
//!
//! Every builder returns a request object ready to be posted to a node,
//! with `jsonrpc: "2.0"` and id `1`. Sending it is up to the caller.
//! Builders that take free-form hex validate it first and fail with
//! [`EncodingError::InvalidHexInput`].

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};
use solpack_primitives::{Address, H256, U256};

use crate::encode::encode_function_call;
use crate::hexutil::{is_hex_strict, u256_to_hex};
use crate::types::TypedParameter;
use crate::EncodingError;

/// Protocol version written into every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Id given to every request
pub const DEFAULT_REQUEST_ID: u64 = 1;

/// Block a state query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    Latest,
    /// Earliest block (genesis)
    Earliest,
    /// Pending block
    Pending,
}

impl Default for BlockId {
    fn default() -> Self {
        Self::Latest
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "0x{:x}", n),
            BlockId::Latest => f.write_str("latest"),
            BlockId::Earliest => f.write_str("earliest"),
            BlockId::Pending => f.write_str("pending"),
        }
    }
}

impl FromStr for BlockId {
    type Err = EncodingError;

    /// Accepts a tag, a `0x` quantity or a decimal block number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        let block = match tag.as_str() {
            "latest" => BlockId::Latest,
            "earliest" => BlockId::Earliest,
            "pending" => BlockId::Pending,
            number => {
                let parsed = match number.strip_prefix("0x") {
                    Some(body) => u64::from_str_radix(body, 16),
                    None => number.parse::<u64>(),
                };
                parsed
                    .map(BlockId::Number)
                    .map_err(|_| EncodingError::InvalidNumericInput(s.to_string()))?
            }
        };
        Ok(block)
    }
}

impl From<u64> for BlockId {
    fn from(n: u64) -> Self {
        BlockId::Number(n)
    }
}

impl From<BlockId> for Value {
    fn from(block: BlockId) -> Self {
        Value::String(block.to_string())
    }
}

/// Message-call object of `eth_call` and `eth_estimateGas`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Sender
    pub from: Option<Address>,
    /// Contract called
    pub to: Address,
    /// Gas limit
    pub gas: Option<U256>,
    /// Gas price
    pub gas_price: Option<U256>,
    /// Value sent along
    pub value: Option<U256>,
    /// `0x`-prefixed call data
    pub data: Option<String>,
}

impl CallRequest {
    /// Call to `to` with no other field set
    pub fn new(to: Address) -> Self {
        Self {
            from: None,
            to,
            gas: None,
            gas_price: None,
            value: None,
            data: None,
        }
    }

    /// Set the sender
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the gas limit
    pub fn gas(mut self, gas: U256) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Set the gas price
    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Set the value sent along
    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the call data; it must be `0x`-prefixed hex.
    pub fn data(mut self, data: impl Into<String>) -> Result<Self, EncodingError> {
        let data = data.into();
        require_hex(&data)?;
        self.data = Some(data);
        Ok(self)
    }

    /// Call data for `signature` applied to `params`
    pub fn function_call(
        self,
        signature: &str,
        params: &[TypedParameter],
    ) -> Result<Self, EncodingError> {
        let data = encode_function_call(signature, params)?;
        self.data(data)
    }

    /// JSON object form, quantities as `0x` hex and absent fields left out
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(from) = &self.from {
            object.insert("from".to_string(), Value::String(from.to_hex()));
        }
        object.insert("to".to_string(), Value::String(self.to.to_hex()));
        let quantities = [
            ("gas", &self.gas),
            ("gasPrice", &self.gas_price),
            ("value", &self.value),
        ];
        for (key, quantity) in quantities {
            if let Some(quantity) = quantity {
                object.insert(key.to_string(), Value::String(format_quantity(quantity)));
            }
        }
        if let Some(data) = &self.data {
            object.insert("data".to_string(), Value::String(data.clone()));
        }
        Value::Object(object)
    }
}

/// `0x` hex of a quantity, without leading zeros
pub fn format_quantity(value: &U256) -> String {
    format!("0x{}", u256_to_hex(value))
}

fn require_hex(data: &str) -> Result<(), EncodingError> {
    if is_hex_strict(data) {
        Ok(())
    } else {
        Err(EncodingError::InvalidHexInput(data.to_string()))
    }
}

/// Wrap `method` and `params` in a request envelope
pub fn build_request(method: &str, params: Vec<Value>) -> Value {
    tracing::trace!("Building {} request with {} params", method, params.len());
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": DEFAULT_REQUEST_ID,
        "method": method,
        "params": params,
    })
}

/// `web3_clientVersion`
pub fn web3_client_version() -> Value {
    build_request("web3_clientVersion", Vec::new())
}

/// `web3_sha3` of `0x`-prefixed hex data
pub fn web3_sha3(data: &str) -> Result<Value, EncodingError> {
    require_hex(data)?;
    Ok(build_request("web3_sha3", vec![json!(data)]))
}

/// `net_version`
pub fn net_version() -> Value {
    build_request("net_version", Vec::new())
}

/// `eth_blockNumber`
pub fn eth_block_number() -> Value {
    build_request("eth_blockNumber", Vec::new())
}

/// `eth_gasPrice`
pub fn eth_gas_price() -> Value {
    build_request("eth_gasPrice", Vec::new())
}

/// `eth_getBalance` of `address` at `block`
pub fn eth_get_balance(address: &Address, block: BlockId) -> Value {
    build_request("eth_getBalance", vec![json!(address.to_hex()), block.into()])
}

/// `eth_getTransactionCount` of `address` at `block`
pub fn eth_get_transaction_count(address: &Address, block: BlockId) -> Value {
    build_request(
        "eth_getTransactionCount",
        vec![json!(address.to_hex()), block.into()],
    )
}

/// `eth_getCode` of `address` at `block`
pub fn eth_get_code(address: &Address, block: BlockId) -> Value {
    build_request("eth_getCode", vec![json!(address.to_hex()), block.into()])
}

/// `eth_getStorageAt` of slot `position` of `address` at `block`
pub fn eth_get_storage_at(address: &Address, position: &U256, block: BlockId) -> Value {
    build_request(
        "eth_getStorageAt",
        vec![
            json!(address.to_hex()),
            json!(format_quantity(position)),
            block.into(),
        ],
    )
}

/// `eth_call` of `call` at `block`
pub fn eth_call(call: &CallRequest, block: BlockId) -> Value {
    build_request("eth_call", vec![call.to_value(), block.into()])
}

/// `eth_estimateGas` of `call`
pub fn eth_estimate_gas(call: &CallRequest) -> Value {
    build_request("eth_estimateGas", vec![call.to_value()])
}

/// `eth_sendRawTransaction` of a signed, `0x`-prefixed transaction
pub fn eth_send_raw_transaction(signed: &str) -> Result<Value, EncodingError> {
    require_hex(signed)?;
    Ok(build_request("eth_sendRawTransaction", vec![json!(signed)]))
}

/// `eth_getTransactionByHash`
pub fn eth_get_transaction_by_hash(hash: &H256) -> Value {
    build_request("eth_getTransactionByHash", vec![json!(hash.to_hex())])
}

/// `eth_getTransactionReceipt`
pub fn eth_get_transaction_receipt(hash: &H256) -> Value {
    build_request("eth_getTransactionReceipt", vec![json!(hash.to_hex())])
}

/// `eth_getBlockByHash`, with full transaction objects when `full`
pub fn eth_get_block_by_hash(hash: &H256, full: bool) -> Value {
    build_request("eth_getBlockByHash", vec![json!(hash.to_hex()), json!(full)])
}

/// `eth_getBlockByNumber`, with full transaction objects when `full`
pub fn eth_get_block_by_number(block: BlockId, full: bool) -> Value {
    build_request("eth_getBlockByNumber", vec![block.into(), json!(full)])
}

/// `eth_call` request invoking `signature` on `to` with `params`
pub fn call_request(
    to: &Address,
    signature: &str,
    params: &[TypedParameter],
    block: BlockId,
) -> Result<Value, EncodingError> {
    let call = CallRequest::new(*to).function_call(signature, params)?;
    tracing::debug!("Built eth_call to {} for {}", to, signature);
    Ok(eth_call(&call, block))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_address() -> Address {
        Address::from_hex("0xc4ea73d428ab6589c36905d0f0b01f3051740ff8").unwrap()
    }

    // ==================== Envelope ====================

    #[test]
    fn test_build_request() {
        let request = build_request("eth_chainId", Vec::new());
        assert_eq!(
            request,
            json!({"jsonrpc": "2.0", "id": 1, "method": "eth_chainId", "params": []})
        );
    }

    #[test]
    fn test_parameterless_builders() {
        assert_eq!(web3_client_version()["method"], "web3_clientVersion");
        assert_eq!(net_version()["method"], "net_version");
        assert_eq!(eth_block_number()["method"], "eth_blockNumber");
        assert_eq!(eth_gas_price()["params"], json!([]));
    }

    // ==================== Block ids ====================

    #[test]
    fn test_block_id_parse() {
        assert_eq!("latest".parse::<BlockId>().unwrap(), BlockId::Latest);
        assert_eq!("Pending".parse::<BlockId>().unwrap(), BlockId::Pending);
        assert_eq!("earliest".parse::<BlockId>().unwrap(), BlockId::Earliest);
        assert_eq!("0x10".parse::<BlockId>().unwrap(), BlockId::Number(16));
        assert_eq!("16".parse::<BlockId>().unwrap(), BlockId::Number(16));
        for bad in ["", "0x", "0xzz", "newest", "-1"] {
            assert!(bad.parse::<BlockId>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_block_id_render() {
        assert_eq!(BlockId::default().to_string(), "latest");
        assert_eq!(BlockId::Number(255).to_string(), "0xff");
        assert_eq!(Value::from(BlockId::Number(0)), json!("0x0"));
    }

    // ==================== State queries ====================

    #[test]
    fn test_eth_get_balance() {
        let request = eth_get_balance(&token_address(), BlockId::Latest);
        assert_eq!(request["method"], "eth_getBalance");
        assert_eq!(
            request["params"],
            json!(["0xc4ea73d428ab6589c36905d0f0b01f3051740ff8", "latest"])
        );
    }

    #[test]
    fn test_eth_get_storage_at() {
        let request = eth_get_storage_at(&token_address(), &U256::from(2), BlockId::Number(100));
        assert_eq!(
            request["params"],
            json!(["0xc4ea73d428ab6589c36905d0f0b01f3051740ff8", "0x2", "0x64"])
        );
    }

    #[test]
    fn test_block_and_transaction_lookups() {
        let hash = H256::from_bytes([0x11; 32]);
        assert_eq!(
            eth_get_transaction_receipt(&hash)["params"][0],
            json!(hash.to_hex())
        );
        assert_eq!(
            eth_get_block_by_hash(&hash, true)["params"],
            json!([hash.to_hex(), true])
        );
        assert_eq!(
            eth_get_block_by_number(BlockId::Pending, false)["params"],
            json!(["pending", false])
        );
    }

    // ==================== Hex validation ====================

    #[test]
    fn test_web3_sha3() {
        let request = web3_sha3("0x68656c6c6f").unwrap();
        assert_eq!(request["method"], "web3_sha3");
        assert_eq!(request["params"], json!(["0x68656c6c6f"]));

        for bad in ["68656c6c6f", "0xhello", "hello"] {
            assert!(matches!(web3_sha3(bad), Err(EncodingError::InvalidHexInput(_))));
        }
    }

    #[test]
    fn test_send_raw_transaction_requires_hex() {
        assert!(eth_send_raw_transaction("0xf86c").is_ok());
        assert!(eth_send_raw_transaction("f86c").is_err());
    }

    // ==================== Calls ====================

    #[test]
    fn test_call_object() {
        let call = CallRequest::new(token_address())
            .from(Address::ZERO)
            .gas(U256::from(21_000))
            .value(U256::zero())
            .data("0x18160ddd")
            .unwrap();
        assert_eq!(
            call.to_value(),
            json!({
                "from": "0x0000000000000000000000000000000000000000",
                "to": "0xc4ea73d428ab6589c36905d0f0b01f3051740ff8",
                "gas": "0x5208",
                "value": "0x0",
                "data": "0x18160ddd",
            })
        );
        assert!(CallRequest::new(token_address()).data("18160ddd").is_err());
    }

    #[test]
    fn test_call_request() {
        let owner = "0x3e8467983ba80734654208b274ebf01264526117";
        let request = call_request(
            &token_address(),
            "balanceOf(address)",
            &[TypedParameter::address(owner)],
            BlockId::Latest,
        )
        .unwrap();

        assert_eq!(request["method"], "eth_call");
        assert_eq!(request["params"][1], "latest");
        let call = &request["params"][0];
        assert_eq!(call["to"], "0xc4ea73d428ab6589c36905d0f0b01f3051740ff8");
        assert!(call.get("from").is_none());
        assert_eq!(
            call["data"],
            format!("0x70a08231{:0>64}", "3e8467983ba80734654208b274ebf01264526117")
        );
    }

    #[test]
    fn test_call_request_propagates_encoding_errors() {
        let result = call_request(
            &token_address(),
            "setFlag(bool)",
            &[TypedParameter::bool("maybe")],
            BlockId::Latest,
        );
        assert!(matches!(result, Err(EncodingError::Parameter { .. })));
    }

    #[test]
    fn test_estimate_gas() {
        let call = CallRequest::new(token_address()).gas_price(U256::from(1_000_000_000u64));
        let request = eth_estimate_gas(&call);
        assert_eq!(request["params"][0]["gasPrice"], "0x3b9aca00");
    }
}
