use std::sync::Mutex;

use async_trait::async_trait;
use nearswap_client::{ClientError, FunctionCall, Wallet};
use tracing::info;

/// Wallet that prints the function calls it is asked to sign instead of
/// sending them. Signing belongs to the user's wallet application.
pub struct DryRunWallet {
    account_id: Option<String>,
    submitted: Mutex<Vec<FunctionCall>>,
}

impl DryRunWallet {
    pub fn new(account_id: Option<String>) -> Self {
        Self {
            account_id,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, oldest first.
    pub fn submitted(&self) -> Vec<FunctionCall> {
        self.submitted
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Wallet for DryRunWallet {
    fn account_id(&self) -> Option<String> {
        self.account_id.clone()
    }

    async fn submit(&self, call: FunctionCall) -> Result<(), ClientError> {
        let json =
            serde_json::to_string_pretty(&call).map_err(|e| ClientError::Wallet(e.to_string()))?;
        info!(method = %call.method, "dry run, not signing");
        println!("{json}");
        self.submitted
            .lock()
            .map_err(|e| ClientError::Wallet(e.to_string()))?
            .push(call);
        Ok(())
    }
}
