use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::debug;
use yocto::YoctoAmount;

use crate::calls::ViewCall;
use crate::error::ClientError;
use crate::http_client;

/// NEAR balance of an account, in yoctoNEAR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub total: YoctoAmount,
    pub locked: YoctoAmount,
    /// Spendable part of `total`.
    pub available: YoctoAmount,
}

impl AccountBalance {
    pub fn new(total: u128, locked: u128) -> Self {
        Self {
            total: total.into(),
            locked: locked.into(),
            available: total.saturating_sub(locked).into(),
        }
    }
}

/// Executes read-only calls against the chain.
#[async_trait]
pub trait ViewClient: Send + Sync {
    async fn view(&self, call: &ViewCall) -> Result<Value, ClientError>;
    async fn account_balance(&self, account_id: &str) -> Result<AccountBalance, ClientError>;
}

/// [`ViewClient`] speaking NEAR JSON-RPC over HTTP.
pub struct JsonRpcClient {
    endpoint: String,
    client: reqwest::Client,
}

impl JsonRpcClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        let client = http_client::builder()
            .build()
            .map_err(|source| ClientError::Http {
                source,
                endpoint: endpoint.clone(),
            })?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, label: &str, params: Value) -> Result<Value, ClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "method": "query",
            "params": params,
        });
        let http_err = |source| ClientError::Http {
            source,
            endpoint: self.endpoint.clone(),
        };
        let resp: Value = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(http_err)?
            .json()
            .await
            .map_err(http_err)?;

        if let Some(err) = resp.get("error") {
            return Err(ClientError::Rpc {
                method: label.to_string(),
                message: rpc_error_message(err),
            });
        }
        let result = resp
            .get("result")
            .ok_or_else(|| ClientError::Parse(format!("{label}: missing result")))?;
        // Contract panics come back inside an otherwise successful response.
        if let Some(message) = result.get("error").and_then(|e| e.as_str()) {
            return Err(ClientError::Rpc {
                method: label.to_string(),
                message: message.to_string(),
            });
        }
        Ok(result.clone())
    }
}

#[async_trait]
impl ViewClient for JsonRpcClient {
    async fn view(&self, call: &ViewCall) -> Result<Value, ClientError> {
        debug!(contract = %call.contract_id, method = %call.method, "view call");
        let args = serde_json::to_vec(&call.args).map_err(|e| ClientError::Parse(e.to_string()))?;
        let result = self
            .query(
                &call.method,
                json!({
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": call.contract_id,
                    "method_name": call.method,
                    "args_base64": STANDARD.encode(args),
                }),
            )
            .await?;
        decode_call_result(&call.method, &result)
    }

    async fn account_balance(&self, account_id: &str) -> Result<AccountBalance, ClientError> {
        debug!(account = account_id, "view account");
        let result = self
            .query(
                "view_account",
                json!({
                    "request_type": "view_account",
                    "finality": "final",
                    "account_id": account_id,
                }),
            )
            .await?;
        let total = u128_field(&result, "amount")?;
        let locked = u128_field(&result, "locked")?;
        Ok(AccountBalance::new(total, locked))
    }
}

/// Decode the byte array a `call_function` query returns into JSON.
fn decode_call_result(method: &str, result: &Value) -> Result<Value, ClientError> {
    let bytes = result
        .get("result")
        .and_then(|r| r.as_array())
        .ok_or_else(|| ClientError::Parse(format!("{method}: missing result bytes")))?
        .iter()
        .map(|b| {
            b.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| ClientError::Parse(format!("{method}: invalid result byte {b}")))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(format!("{method}: {e}")))
}

fn u128_field(result: &Value, field: &str) -> Result<u128, ClientError> {
    result
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<u128>().ok())
        .ok_or_else(|| ClientError::Parse(format!("view_account: invalid {field}")))
}

fn rpc_error_message(err: &Value) -> String {
    err.get("data")
        .or_else(|| err.get("message"))
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
        .unwrap_or_else(|| err.to_string())
}
