//! [`ChainClient`] over Ethereum JSON-RPC.
//!
//! Transactions are sent with `eth_sendTransaction`, so the node must hold the
//! signing keys (a local dev node, or a node with unlocked accounts).

use std::time::Duration;

use alloy_core::{
    dyn_abi::DynSolType,
    primitives::{Address, B256, Bytes, U64},
};
use backon::{ConstantBuilder, Retryable};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{ChainError, gas::GasOverrides};

use super::{ArtifactStore, ChainClient, Contract, DeployRequest, TxReceipt, WriteCall, selector};

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How receipts are polled while waiting for a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPolling {
    /// Delay between two `eth_getTransactionReceipt` calls.
    #[serde(with = "duration_secs")]
    pub interval: Duration,
    /// Attempts before giving up with [`ChainError::Timeout`].
    pub max_attempts: usize,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 300,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Address>,
    data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<U64>,
}

impl TransactionRequest {
    fn new(from: Option<Address>, to: Option<Address>, data: Vec<u8>) -> Self {
        Self {
            from,
            to,
            data: data.into(),
            gas: None,
        }
    }

    fn overrides(mut self, overrides: Option<GasOverrides>) -> Self {
        self.gas = overrides.map(|o| U64::from(o.gas_limit));
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    #[serde(default)]
    contract_address: Option<Address>,
    block_number: U64,
    status: Option<U64>,
}

impl RpcReceipt {
    /// A mined receipt; status `0` means the transaction reverted.
    fn into_confirmed(self) -> Result<TxReceipt, ChainError> {
        if self.status.is_some_and(|status| status == U64::ZERO) {
            return Err(ChainError::Reverted(self.transaction_hash));
        }

        Ok(TxReceipt {
            tx_hash: self.transaction_hash,
            contract_address: self.contract_address,
            block_number: self.block_number.to(),
        })
    }
}

/// JSON-RPC chain client.
#[derive(Debug, Clone)]
pub struct JsonRpcChainClient {
    client: reqwest::Client,
    url: Url,
    artifacts: ArtifactStore,
    polling: ReceiptPolling,
}

impl JsonRpcChainClient {
    pub fn new(url: Url, artifacts: ArtifactStore) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::Transport(e.into()))?;

        Ok(Self {
            client,
            url,
            artifacts,
            polling: ReceiptPolling::default(),
        })
    }

    pub fn with_polling(mut self, polling: ReceiptPolling) -> Self {
        self.polling = polling;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Make a JSON-RPC call and deserialize the result.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T, ChainError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": 1
            }))
            .send()
            .await
            .map_err(|e| ChainError::Transport(anyhow::Error::new(e).context(format!("{method} request"))))?;

        let result: Value = response
            .json()
            .await
            .map_err(|e| ChainError::Transport(anyhow::Error::new(e).context(format!("{method} response"))))?;

        if let Some(error) = result.get("error") {
            return Err(ChainError::Rpc(
                error
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            ));
        }

        let result_value = result
            .get("result")
            .cloned()
            .ok_or_else(|| ChainError::Rpc(format!("no result in {method} response")))?;

        serde_json::from_value(result_value)
            .map_err(|e| ChainError::Decode(format!("{method} result: {e}")))
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ChainError> {
        let request = serde_json::to_value(&request)
            .map_err(|e| ChainError::Abi(format!("failed to serialize transaction: {e}")))?;
        self.call("eth_sendTransaction", vec![request]).await
    }

    async fn eth_call(
        &self,
        to: Address,
        data: Vec<u8>,
        overrides: Option<GasOverrides>,
    ) -> Result<Bytes, ChainError> {
        let request = TransactionRequest::new(None, Some(to), data).overrides(overrides);
        let request = serde_json::to_value(&request)
            .map_err(|e| ChainError::Abi(format!("failed to serialize call: {e}")))?;
        self.call("eth_call", vec![request, serde_json::json!("latest")])
            .await
    }

    async fn receipt(&self, tx_hash: B256) -> Result<Option<RpcReceipt>, ChainError> {
        self.call("eth_getTransactionReceipt", vec![serde_json::json!(tx_hash)])
            .await
    }
}

impl ChainClient for JsonRpcChainClient {
    async fn signers(&self) -> Result<Vec<Address>, ChainError> {
        self.call("eth_accounts", vec![]).await
    }

    async fn attach(&self, contract: Contract, address: Address) -> Result<(), ChainError> {
        // Surface a missing artifact now rather than on first use.
        self.artifacts.load(contract)?;

        let code: Bytes = self
            .call(
                "eth_getCode",
                vec![serde_json::json!(address), serde_json::json!("latest")],
            )
            .await?;

        if code.is_empty() {
            return Err(ChainError::NoCode(address));
        }

        Ok(())
    }

    async fn deploy(&self, request: DeployRequest) -> Result<B256, ChainError> {
        let artifact = self.artifacts.load(request.contract)?;
        let mut data = artifact.link(&request.libraries)?;
        data.extend(artifact.encode_constructor(&request.args)?);

        tracing::debug!(
            contract = %request.contract,
            from = %request.from,
            args = request.args.len(),
            "Sending deployment transaction"
        );

        // Creations are left to the node's gas estimate.
        self.send_transaction(TransactionRequest::new(Some(request.from), None, data))
            .await
    }

    async fn decimals(&self, token: Address, overrides: Option<GasOverrides>) -> Result<u8, ChainError> {
        let output = self
            .eth_call(token, selector("decimals()").to_vec(), overrides)
            .await?;
        let value = DynSolType::Uint(8)
            .abi_decode(&output)
            .map_err(|e| ChainError::Decode(format!("decimals(): {e}")))?;
        let (decimals, _) = value
            .as_uint()
            .ok_or_else(|| ChainError::Decode("decimals() did not return a uint".to_string()))?;
        u8::try_from(decimals).map_err(|e| ChainError::Decode(format!("decimals(): {e}")))
    }

    async fn symbol(&self, token: Address, overrides: Option<GasOverrides>) -> Result<String, ChainError> {
        let output = self
            .eth_call(token, selector("symbol()").to_vec(), overrides)
            .await?;
        let value = DynSolType::String
            .abi_decode(&output)
            .map_err(|e| ChainError::Decode(format!("symbol(): {e}")))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ChainError::Decode("symbol() did not return a string".to_string()))
    }

    async fn send(&self, call: WriteCall) -> Result<B256, ChainError> {
        tracing::debug!(
            to = %call.to,
            function = call.call.signature(),
            "Sending transaction"
        );

        self.send_transaction(
            TransactionRequest::new(Some(call.from), Some(call.to), call.call.calldata())
                .overrides(call.overrides),
        )
        .await
    }

    async fn wait(&self, tx_hash: B256) -> Result<TxReceipt, ChainError> {
        let polling = self.polling;
        (|| async {
            self.receipt(tx_hash)
                .await?
                .ok_or(ChainError::Timeout(tx_hash))
        })
        .retry(
            ConstantBuilder::default()
                .with_delay(polling.interval)
                .with_max_times(polling.max_attempts),
        )
        .when(|e| matches!(e, ChainError::Timeout(_)))
        .notify(|_, delay| {
            tracing::trace!(tx_hash = %tx_hash, ?delay, "Transaction not mined yet, retrying...");
        })
        .await?
        .into_confirmed()
    }
}
