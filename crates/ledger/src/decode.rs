//! Best-effort decoding of constructor arguments into named values.
//!
//! Broadcasts carry constructor arguments already rendered as text, one per parameter. They are
//! matched against the constructor of the artifact by position. Tuples are split on their text
//! form, so nested tuples and strings containing `", "` are not decoded faithfully.

use crate::LedgerError;
use alloy_json_abi::{JsonAbi, Param};
use chronicles_chain::ChainReader;
use serde_json::{Map, Value};

/// Width of an ABI word in hex characters.
const WORD_HEX_LEN: usize = 64;

/// Constructor arguments as found in a broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructorArgs<'a> {
    /// One rendered value per constructor parameter.
    Values(&'a [String]),
    /// ABI encoded arguments without the `0x` prefix, as passed to a module factory.
    Encoded(&'a str),
}

/// Maps `args` to the constructor parameters of `abi`.
///
/// Returns an empty map if the contract has no constructor or there are no arguments.
pub fn decode_constructor_args<C: ChainReader>(
    contract: &str,
    abi: &JsonAbi,
    args: Option<ConstructorArgs<'_>>,
    chain: &C,
) -> Result<Map<String, Value>, LedgerError> {
    let mut decoded = Map::new();
    let (Some(constructor), Some(args)) = (&abi.constructor, args) else {
        return Ok(decoded);
    };

    match args {
        ConstructorArgs::Values(values) => {
            if constructor.inputs.len() != values.len() {
                return Err(LedgerError::ArgumentCountMismatch {
                    contract: contract.to_string(),
                    expected: constructor.inputs.len(),
                    actual: values.len(),
                });
            }

            for (param, value) in constructor.inputs.iter().zip(values) {
                let decoded_value = if param.ty == "tuple" {
                    Value::Object(decode_tuple(value, &param.components))
                } else {
                    Value::String(value.clone())
                };
                decoded.insert(param_name(&param.name).to_string(), decoded_value);
            }
        }
        ConstructorArgs::Encoded(data) => {
            let data = data.strip_prefix("0x").unwrap_or(data);
            for (i, word) in data.as_bytes().chunks(WORD_HEX_LEN).enumerate() {
                let word = String::from_utf8_lossy(word);
                let value = chain
                    .parse_bytes32_address(&format!("0x{word}"))
                    .map_or(Value::Null, |addr| Value::String(addr.to_checksum(None)));
                decoded.insert(i.to_string(), value);
            }
        }
    }

    Ok(decoded)
}

/// Strips a single leading `_`, or else a single trailing `_`, from a parameter name.
pub fn param_name(name: &str) -> &str {
    name.strip_prefix('_').or_else(|| name.strip_suffix('_')).unwrap_or(name)
}

/// Splits the text form of a tuple, `(a, b, c)`, and zips it with the component names.
///
/// Components without a matching part are left out.
fn decode_tuple(value: &str, components: &[Param]) -> Map<String, Value> {
    let inner = value.strip_prefix('(').unwrap_or(value);
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    components
        .iter()
        .zip(inner.split(", "))
        .map(|(component, part)| {
            (param_name(&component.name).to_string(), Value::String(part.to_string()))
        })
        .collect()
}
