//! # JSON-RPC Envelopes and Method Payloads
//!
//! Request/response envelopes, the method table, and the argument/reply
//! structs for each method. Handlers translate these to and from core types
//! and do nothing else.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zkrpc_core::{CircuitInputs, ZkError};

// -- Envelopes -----------------------------------------------------------------

/// One request line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

/// Structured error carried in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Machine-readable code, see [`ZkError::code`].
    pub code: String,
    pub message: String,
}

/// One response line. Exactly one of `result` and `error` is non-null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: Value,
    pub result: Option<Value>,
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, err: &ZkError) -> Self {
        Self {
            id,
            result: None,
            error: Some(RpcErrorObject {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

// -- Method table --------------------------------------------------------------

/// Prefix used by net/rpc-style clients for the service name.
const SERVICE_PREFIX: &str = "ZK.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Generate,
    Verify,
    Free,
    SubmitJob,
    VerifyJob,
}

impl FromStr for Method {
    type Err = ZkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(SERVICE_PREFIX).unwrap_or(s) {
            "Generate" => Ok(Self::Generate),
            "Verify" => Ok(Self::Verify),
            "Free" => Ok(Self::Free),
            "SubmitJob" => Ok(Self::SubmitJob),
            "VerifyJob" => Ok(Self::VerifyJob),
            other => Err(ZkError::MalformedRequest(format!("unknown method: {other}"))),
        }
    }
}

/// Decode `params` as either the argument object or a one-element array.
pub fn decode_params<T: DeserializeOwned>(params: Value) -> Result<T, ZkError> {
    let value = match params {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        Value::Array(items) => {
            return Err(ZkError::MalformedRequest(format!(
                "expected exactly one parameter, got {}",
                items.len()
            )))
        }
        Value::Null => return Err(ZkError::MalformedRequest("missing params".to_string())),
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| ZkError::MalformedRequest(format!("invalid params: {e}")))
}

// -- Registry methods ----------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateArgs {
    pub a: u64,
    pub b: u64,
    #[serde(rename = "const")]
    pub const_val: u64,
}

impl From<GenerateArgs> for CircuitInputs {
    fn from(args: GenerateArgs) -> Self {
        CircuitInputs::new(args.a, args.b, args.const_val)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReply {
    pub proof_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyArgs {
    pub proof_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReply {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeArgs {
    pub proof_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeReply {}

// -- Stateless methods ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    pub a: u64,
    pub b: u64,
    pub const_val: u64,
}

impl From<JobRequest> for CircuitInputs {
    fn from(job: JobRequest) -> Self {
        CircuitInputs::new(job.a, job.b, job.const_val)
    }
}

/// Stateless proof result. Generation failure is reported in `error`
/// rather than as an RPC error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofResponse {
    /// Base64 (standard alphabet) proof bytes; `null` on failure.
    pub proof: Option<String>,
    pub prover_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyJobRequest {
    /// Base64 (standard alphabet) proof bytes.
    pub proof: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyJobResponse {
    pub verified: bool,
    pub verifier_ms: f64,
}
