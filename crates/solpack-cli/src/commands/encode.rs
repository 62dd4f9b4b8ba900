//! Encoding and hashing commands
//!
//! Parameter lists are given as JSON, for example
//! `[{"type": "uint256", "value": "255"}, {"type": "string[]", "value": ["a", "bb"]}]`.

use clap::Args;
use serde_json::Value;
use solpack_abi::{
    call_request, encode_function_call, encode_parameters, hash_parameter, hash_parameters,
    hash_parameters_raw, pack_function, pack_token, Address, BlockId, ParamType, ParamValue,
    TypedParameter,
};

use crate::{config::Config, output::Output, CliError};

fn parse_parameters(input: &str) -> Result<Vec<TypedParameter>, CliError> {
    let params: Vec<TypedParameter> = serde_json::from_str(input)?;
    tracing::debug!("Parsed {} parameters", params.len());
    Ok(params)
}

/// Encode a parameter list
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// JSON array of {"type", "value"} objects
    params: String,
}

impl EncodeArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = parse_parameters(&self.params)?;
        let encoded = config.render(&encode_parameters(&params)?);

        Output::new(json)
            .field("encoded", &encoded)
            .field_u64("parameters", params.len() as u64)
            .message(&encoded)
            .print();

        Ok(())
    }
}

/// Keccak digest of a parameter list or of a single value
#[derive(Debug, Args)]
pub struct HashArgs {
    /// JSON array of parameters, or one {"type", "value"} object
    input: String,

    /// Hash a list through the raw digest path; output keeps its 0x marker
    #[arg(long)]
    raw: bool,
}

impl HashArgs {
    pub fn execute(self, _config: &Config, json: bool) -> Result<(), CliError> {
        let value: Value = serde_json::from_str(&self.input)?;
        let digest = match value {
            Value::Object(_) => {
                let param: TypedParameter = serde_json::from_value(value)?;
                hash_parameter(&param)?
            }
            Value::Array(_) => {
                let params: Vec<TypedParameter> = serde_json::from_value(value)?;
                if self.raw {
                    hash_parameters_raw(&params)?.to_hex()
                } else {
                    hash_parameters(&params)?
                }
            }
            _ => {
                return Err(CliError::InvalidInput(
                    "expected a JSON array or object".to_string(),
                ))
            }
        };

        Output::new(json)
            .field("hash", &digest)
            .message(&digest)
            .print();

        Ok(())
    }
}

/// Pack one value of the given type
#[derive(Debug, Args)]
pub struct PackArgs {
    /// Type tag, e.g. uint256, bytes or string[]
    kind: String,

    /// Value; array types take a JSON array
    value: String,
}

impl PackArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let kind: ParamType = self.kind.parse()?;
        let value = if kind.is_array() {
            serde_json::from_str::<ParamValue>(&self.value)?
        } else {
            ParamValue::Text(self.value)
        };

        let token = TypedParameter::new(kind, value).normalize()?;
        let packed = pack_token(&token);
        let encoded = config.render(&packed.to_hex());

        Output::new(json)
            .field("type", kind.as_str())
            .field("encoded", &encoded)
            .field_bool("dynamic", packed.is_dynamic())
            .field_u64("words", packed.words().len() as u64)
            .message(&encoded)
            .print();

        Ok(())
    }
}

/// Function selector of a signature
#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Signature such as transfer(address,uint256)
    signature: String,
}

impl SelectorArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let selector = config.render(&pack_function(&self.signature));

        Output::new(json)
            .field("signature", &self.signature)
            .field("selector", &selector)
            .message(&selector)
            .print();

        Ok(())
    }
}

/// Call data: selector followed by the encoded arguments
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Signature such as transfer(address,uint256)
    signature: String,

    /// JSON array of arguments
    #[arg(default_value = "[]")]
    params: String,

    /// Contract address; prints an eth_call request instead of bare call data
    #[arg(long)]
    to: Option<String>,

    /// Block for the eth_call request: latest, earliest, pending or a number
    #[arg(long, default_value = "latest", requires = "to")]
    block: String,
}

impl CallArgs {
    pub fn execute(self, _config: &Config, json: bool) -> Result<(), CliError> {
        let params = parse_parameters(&self.params)?;

        let Some(to) = &self.to else {
            let data = encode_function_call(&self.signature, &params)?;
            Output::new(json)
                .field("signature", &self.signature)
                .field("data", &data)
                .message(&data)
                .print();
            return Ok(());
        };

        let to = Address::from_hex(to).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        let block: BlockId = self.block.parse()?;
        let request = call_request(&to, &self.signature, &params, block)?;

        Output::new(json)
            .field("signature", &self.signature)
            .field_value("request", request.clone())
            .message(&serde_json::to_string(&request)?)
            .print();

        Ok(())
    }
}
