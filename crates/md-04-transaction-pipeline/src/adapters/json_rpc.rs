//! JSON-RPC 2.0 ledger client over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use shared_types::{
    format_address, format_hash, parse_address, parse_hash, Address, Hash, TransactionReceipt,
    U256,
};
use tracing::trace;

use crate::domain::errors::LedgerError;
use crate::ports::outbound::{CallRequest, LedgerClient};

/// Per-request HTTP timeout unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: serde_json::Value,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    status: Option<String>,
    contract_address: Option<String>,
    gas_used: String,
    block_number: Option<String>,
}

/// `LedgerClient` speaking Ethereum JSON-RPC; quantities travel as `0x` hex.
pub struct JsonRpcLedger {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl JsonRpcLedger {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::with_timeout(rpc_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> Self {
        // Builder only fails on TLS backend init; fall back to defaults
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, LedgerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        trace!(method, id, "JSON-RPC request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(rpc_response.result)
            .map_err(|e| LedgerError::InvalidResponse(format!("{method}: {e}")))
    }

    async fn call_quantity<P: Serialize>(&self, method: &str, params: P) -> Result<U256, LedgerError> {
        let result: String = self.call(method, params).await?;
        parse_quantity(&result)
    }

    async fn call_u64<P: Serialize>(&self, method: &str, params: P) -> Result<u64, LedgerError> {
        let result: String = self.call(method, params).await?;
        parse_hex_u64(&result)
    }
}

#[async_trait::async_trait]
impl LedgerClient for JsonRpcLedger {
    async fn balance(&self, address: &Address) -> Result<U256, LedgerError> {
        self.call_quantity("eth_getBalance", (format_address(address), "latest"))
            .await
    }

    async fn transaction_count(&self, address: &Address) -> Result<u64, LedgerError> {
        self.call_u64("eth_getTransactionCount", (format_address(address), "latest"))
            .await
    }

    async fn gas_price(&self) -> Result<U256, LedgerError> {
        self.call_quantity("eth_gasPrice", Vec::<()>::new()).await
    }

    async fn chain_id(&self) -> Result<u64, LedgerError> {
        self.call_u64("eth_chainId", Vec::<()>::new()).await
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64, LedgerError> {
        let mut call = json!({
            "from": format_address(&request.from),
            "value": format!("{:#x}", request.value),
            "data": format!("0x{}", hex::encode(&request.data)),
        });
        if let Some(to) = &request.to {
            call["to"] = json!(format_address(to));
        }
        self.call_u64("eth_estimateGas", [call]).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Hash, LedgerError> {
        let result: String = self
            .call("eth_sendRawTransaction", [format!("0x{}", hex::encode(raw))])
            .await?;
        parse_hash(&result).map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }

    async fn transaction_receipt(
        &self,
        hash: &Hash,
    ) -> Result<Option<TransactionReceipt>, LedgerError> {
        let receipt: Option<RpcReceipt> = self
            .call("eth_getTransactionReceipt", [format_hash(hash)])
            .await?;
        receipt.map(convert_receipt).transpose().map(Option::flatten)
    }
}

/// `None` for a receipt the node reports before it has a block.
fn convert_receipt(receipt: RpcReceipt) -> Result<Option<TransactionReceipt>, LedgerError> {
    let Some(block_number) = receipt.block_number else {
        return Ok(None);
    };
    let invalid = |e: shared_types::EncodingError| LedgerError::InvalidResponse(e.to_string());

    let success = match receipt.status.as_deref() {
        Some(status) => parse_hex_u64(status)? == 1,
        None => {
            return Err(LedgerError::InvalidResponse(
                "receipt has no status field".into(),
            ))
        }
    };

    Ok(Some(TransactionReceipt {
        transaction_hash: parse_hash(&receipt.transaction_hash).map_err(invalid)?,
        success,
        contract_address: receipt
            .contract_address
            .as_deref()
            .map(parse_address)
            .transpose()
            .map_err(invalid)?,
        gas_used: parse_hex_u64(&receipt.gas_used)?,
        block_number: parse_hex_u64(&block_number)?,
    }))
}

fn strip_hex_prefix(value: &str) -> Result<&str, LedgerError> {
    value
        .strip_prefix("0x")
        .filter(|digits| !digits.is_empty())
        .ok_or_else(|| LedgerError::InvalidResponse(format!("not a hex quantity: {value:?}")))
}

/// Parse a `0x` hex quantity into a u64.
fn parse_hex_u64(value: &str) -> Result<u64, LedgerError> {
    u64::from_str_radix(strip_hex_prefix(value)?, 16)
        .map_err(|e| LedgerError::InvalidResponse(format!("{value:?}: {e}")))
}

/// Parse a `0x` hex quantity into a U256.
fn parse_quantity(value: &str) -> Result<U256, LedgerError> {
    U256::from_str_radix(strip_hex_prefix(value)?, 16)
        .map_err(|e| LedgerError::InvalidResponse(format!("{value:?}: {e}")))
}
