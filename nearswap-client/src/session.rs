use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use yocto::YoctoAmount;

use crate::calls::{ContractCalls, FunctionCall, PoolInfo, SwapRoute, ViewCall};
use crate::error::ClientError;
use crate::rpc::ViewClient;
use crate::token::{Token, TokenKind};

/// Minimum spendable NEAR before sending transactions.
const GAS_RESERVE: &str = "0.6";

/// Signs and submits function calls on behalf of the user.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Signed-in account, if any.
    fn account_id(&self) -> Option<String>;
    async fn submit(&self, call: FunctionCall) -> Result<(), ClientError>;
}

/// A connection to one AMM contract: the view client for queries and the
/// wallet for transactions. Built once and passed to whatever needs it.
pub struct Session<V, W> {
    calls: ContractCalls,
    view: V,
    wallet: W,
}

impl<V, W> Session<V, W>
where
    V: ViewClient,
    W: Wallet,
{
    pub fn new(contract_id: impl Into<String>, view: V, wallet: W) -> Self {
        Self {
            calls: ContractCalls::new(contract_id),
            view,
            wallet,
        }
    }

    pub fn calls(&self) -> &ContractCalls {
        &self.calls
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn account_id(&self) -> Option<String> {
        self.wallet.account_id()
    }

    fn require_account(&self) -> Result<String, ClientError> {
        self.wallet.account_id().ok_or(ClientError::NotSignedIn)
    }

    async fn view_amount(&self, call: &ViewCall) -> Result<YoctoAmount, ClientError> {
        let value = self.view.view(call).await?;
        amount_from_value(&call.method, value)
    }

    async fn submit(&self, call: FunctionCall) -> Result<FunctionCall, ClientError> {
        info!(contract = %call.contract_id, method = %call.method, deposit = %call.deposit, "submitting");
        self.wallet.submit(call.clone()).await?;
        Ok(call)
    }

    /// Output expected for selling `amount` (human units) of `from`.
    pub async fn quote_from_in(
        &self,
        from: &Token,
        to: &Token,
        amount: &str,
    ) -> Result<YoctoAmount, ClientError> {
        let amount_in = YoctoAmount::from_human(amount)?;
        if amount_in.is_zero() {
            return Ok(YoctoAmount::zero());
        }
        let route = SwapRoute::between(from, to)?;
        self.view_amount(&self.calls.price_in(&route, &amount_in)).await
    }

    /// Input required to buy `amount` (human units) of `to`.
    pub async fn quote_from_out(
        &self,
        from: &Token,
        to: &Token,
        amount: &str,
    ) -> Result<YoctoAmount, ClientError> {
        let amount_out = YoctoAmount::from_human(amount)?;
        if amount_out.is_zero() {
            return Ok(YoctoAmount::zero());
        }
        let route = SwapRoute::between(from, to)?;
        self.view_amount(&self.calls.price_out(&route, &amount_out)).await
    }

    /// Sell exactly `amount_in` of `from` for at least `min_out` of `to`.
    pub async fn swap_from_in(
        &self,
        from: &Token,
        to: &Token,
        amount_in: &str,
        min_out: &str,
    ) -> Result<FunctionCall, ClientError> {
        self.require_account()?;
        let route = SwapRoute::between(from, to)?;
        let amount_in = YoctoAmount::from_human(amount_in)?;
        let min_out = YoctoAmount::from_human(min_out)?;
        // the contract asserts both amounts are positive
        if amount_in.is_zero() || min_out.is_zero() {
            return Err(ClientError::ZeroAmount {
                method: "swap_exact_in",
            });
        }
        self.submit(self.calls.swap_exact_in(&route, &amount_in, &min_out))
            .await
    }

    /// Buy exactly `amount_out` (human units) of `to`, paying at most
    /// `max_in`, typically the yocto amount returned by [`quote_from_out`].
    ///
    /// [`quote_from_out`]: Session::quote_from_out
    pub async fn swap_from_out(
        &self,
        from: &Token,
        to: &Token,
        max_in: &YoctoAmount,
        amount_out: &str,
    ) -> Result<FunctionCall, ClientError> {
        self.require_account()?;
        let route = SwapRoute::between(from, to)?;
        let amount_out = YoctoAmount::from_human(amount_out)?;
        if amount_out.is_zero() {
            return Err(ClientError::ZeroAmount {
                method: "swap_exact_out",
            });
        }
        self.submit(self.calls.swap_exact_out(&route, &amount_out, max_in))
            .await
    }

    pub async fn list_pools(&self) -> Result<Vec<String>, ClientError> {
        let value = self.view.view(&self.calls.list_pools()).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Parse(format!("list_pools: {e}")))
    }

    pub async fn pool_info(&self, token: &str) -> Result<Option<PoolInfo>, ClientError> {
        let value = self.view.view(&self.calls.pool_info(token)).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Parse(format!("pool_info: {e}")))
    }

    /// Create the pool for `token` and seed it with liquidity.
    ///
    /// Returns `true` without sending anything when the pool already exists.
    pub async fn create_pool(
        &self,
        token: &Token,
        ynear: &str,
        max_tokens: &str,
        min_shares: &str,
    ) -> Result<bool, ClientError> {
        self.require_account()?;
        if self.pool_info(&token.address).await?.is_some() {
            debug!(token = %token.address, "pool already exists");
            return Ok(true);
        }
        self.submit(self.calls.create_pool(&token.address)).await?;
        self.add_liquidity(token, ynear, max_tokens, min_shares)
            .await?;
        Ok(false)
    }

    pub async fn add_liquidity(
        &self,
        token: &Token,
        ynear: &str,
        max_tokens: &str,
        min_shares: &str,
    ) -> Result<FunctionCall, ClientError> {
        self.require_account()?;
        let ynear = YoctoAmount::from_human(ynear)?;
        let max_tokens = YoctoAmount::from_human(max_tokens)?;
        let min_shares = YoctoAmount::from_human(min_shares)?;
        self.submit(
            self.calls
                .add_liquidity(&token.address, &ynear, &max_tokens, &min_shares),
        )
        .await
    }

    /// Amount of `token` the AMM may currently spend for the signed-in account.
    pub async fn allowance(&self, token: &Token) -> Result<YoctoAmount, ClientError> {
        let owner = self.require_account()?;
        self.view_amount(&self.calls.get_allowance(token, &owner)?)
            .await
    }

    /// Whether selling `amount` of `token` needs an allowance increase first.
    /// Only NEP-21 tokens go through allowances.
    pub async fn needs_approval(
        &self,
        token: &Token,
        amount: &YoctoAmount,
    ) -> Result<bool, ClientError> {
        if token.kind != TokenKind::Nep21 {
            return Ok(false);
        }
        Ok(&self.allowance(token).await? < amount)
    }

    pub async fn inc_allowance(
        &self,
        token: &Token,
        amount: &str,
    ) -> Result<FunctionCall, ClientError> {
        self.require_account()?;
        let amount = YoctoAmount::from_human(amount)?;
        self.submit(self.calls.inc_allowance(token, &amount)?).await
    }

    /// Balance of `token` held by the signed-in account.
    pub async fn token_balance(&self, token: &Token) -> Result<YoctoAmount, ClientError> {
        let owner = self.require_account()?;
        match token.kind {
            TokenKind::Native => Ok(self.view.account_balance(&owner).await?.available),
            TokenKind::Nep21 | TokenKind::Erc20 => {
                self.view_amount(&self.calls.get_balance(token, &owner)?)
                    .await
            }
        }
    }

    /// LP shares the signed-in account holds in the `token` pool.
    pub async fn shares_balance(&self, token: &Token) -> Result<YoctoAmount, ClientError> {
        let owner = self.require_account()?;
        self.view_amount(&self.calls.shares_balance(&token.address, &owner))
            .await
    }

    /// Whether the account keeps more than 0.6 NEAR available for fees.
    pub async fn gas_check(&self) -> Result<bool, ClientError> {
        let owner = self.require_account()?;
        let balance = self.view.account_balance(&owner).await?;
        let reserve = YoctoAmount::from_human(GAS_RESERVE)?;
        Ok(balance.available > reserve)
    }
}

/// Contract `U128` values arrive as JSON strings; small ones may be numbers.
fn amount_from_value(method: &str, value: Value) -> Result<YoctoAmount, ClientError> {
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|e| ClientError::Parse(format!("{method}: {e}"))),
        Value::Number(n) => n
            .as_u64()
            .map(|n| YoctoAmount::from(u128::from(n)))
            .ok_or_else(|| ClientError::Parse(format!("{method}: {n} is not an amount"))),
        other => Err(ClientError::Parse(format!(
            "{method}: expected an amount, got {other}"
        ))),
    }
}
