//! Calls to the AMM contract and to NEP-21 token contracts, as data.
//!
//! View calls are executed by a [`ViewClient`](crate::rpc::ViewClient);
//! function calls change state and must be signed, so they are handed to a
//! [`Wallet`](crate::session::Wallet).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use yocto::YoctoAmount;

use crate::error::ClientError;
use crate::token::{Token, TokenKind};

/// Gas attached to every function call.
pub const MAX_GAS: u64 = 300_000_000_000_000;

/// Deposit attached to swaps and pool changes (0.06 NEAR).
pub const SWAP_DEPOSIT: &str = "60000000000000000000000";

/// Deposit attached to `inc_allowance` (0.04 NEAR).
pub const ALLOWANCE_DEPOSIT: &str = "40000000000000000000000";

/// Read-only methods of the AMM contract.
pub const VIEW_METHODS: &[&str] = &[
    "price_near_to_token_in",
    "price_near_to_token_out",
    "price_token_to_near_in",
    "price_token_to_near_out",
    "price_token_to_token_in",
    "price_token_to_token_out",
    "pool_info",
    "list_pools",
    "calc_out_amount",
    "calc_in_amount",
    "balance_of",
];

/// State-changing methods of the AMM contract.
pub const CHANGE_METHODS: &[&str] = &[
    "create_pool",
    "add_liquidity",
    "remove_liquidity",
    "swap_near_to_token_exact_in",
    "swap_near_to_token_exact_in_xfr",
    "swap_near_to_token_exact_out",
    "swap_near_to_token_exact_out_xfr",
    "swap_token_to_near_exact_in",
    "swap_token_to_near_exact_in_xfr",
    "swap_token_to_near_exact_out",
    "swap_token_to_near_exact_out_xfr",
    "swap_tokens_exact_in",
    "swap_tokens_exact_in_xfr",
    "swap_tokens_exact_out",
    "swap_tokens_exact_out_xfr",
];

/// Read-only contract method invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCall {
    pub contract_id: String,
    pub method: String,
    pub args: Value,
}

/// State-changing contract method invocation, ready to be signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub contract_id: String,
    pub method: String,
    pub args: Value,
    pub gas: u64,
    /// Attached deposit in yoctoNEAR.
    pub deposit: YoctoAmount,
}

/// Public state of a NEAR/token pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub ynear: YoctoAmount,
    pub tokens: YoctoAmount,
    /// LP shares, with the same 24 decimals as NEAR.
    pub total_shares: YoctoAmount,
}

/// Which family of contract methods serves a token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapRoute {
    NearToToken { token: String },
    TokenToNear { token: String },
    TokenToToken { from: String, to: String },
}

impl SwapRoute {
    pub fn between(from: &Token, to: &Token) -> Result<Self, ClientError> {
        match (from.kind, to.kind) {
            (TokenKind::Native, TokenKind::Nep21) => Ok(SwapRoute::NearToToken {
                token: to.address.clone(),
            }),
            (TokenKind::Nep21, TokenKind::Native) => Ok(SwapRoute::TokenToNear {
                token: from.address.clone(),
            }),
            (TokenKind::Nep21, TokenKind::Nep21) => Ok(SwapRoute::TokenToToken {
                from: from.address.clone(),
                to: to.address.clone(),
            }),
            (from, to) => Err(ClientError::UnsupportedRoute { from, to }),
        }
    }

    /// Whether the input leg is NEAR, paid as the attached deposit.
    pub fn pays_near(&self) -> bool {
        matches!(self, SwapRoute::NearToToken { .. })
    }
}

/// Builds calls against one deployed AMM contract.
#[derive(Debug, Clone)]
pub struct ContractCalls {
    contract_id: String,
}

impl ContractCalls {
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn view(&self, method: &str, args: Value) -> ViewCall {
        ViewCall {
            contract_id: self.contract_id.clone(),
            method: method.to_string(),
            args,
        }
    }

    fn change(&self, method: &str, args: Value, deposit: YoctoAmount) -> FunctionCall {
        FunctionCall {
            contract_id: self.contract_id.clone(),
            method: method.to_string(),
            args,
            gas: MAX_GAS,
            deposit,
        }
    }

    /// Expected output for a given input amount.
    pub fn price_in(&self, route: &SwapRoute, amount_in: &YoctoAmount) -> ViewCall {
        match route {
            SwapRoute::NearToToken { token } => self.view(
                "price_near_to_token_in",
                json!({ "token": token, "ynear_in": amount_in }),
            ),
            SwapRoute::TokenToNear { token } => self.view(
                "price_token_to_near_in",
                json!({ "token": token, "tokens_in": amount_in }),
            ),
            SwapRoute::TokenToToken { from, to } => self.view(
                "price_token_to_token_in",
                json!({ "from": from, "to": to, "tokens_in": amount_in }),
            ),
        }
    }

    /// Required input for a given output amount.
    pub fn price_out(&self, route: &SwapRoute, amount_out: &YoctoAmount) -> ViewCall {
        match route {
            SwapRoute::NearToToken { token } => self.view(
                "price_near_to_token_out",
                json!({ "token": token, "tokens_out": amount_out }),
            ),
            SwapRoute::TokenToNear { token } => self.view(
                "price_token_to_near_out",
                json!({ "token": token, "ynear_out": amount_out }),
            ),
            SwapRoute::TokenToToken { from, to } => self.view(
                "price_token_to_token_out",
                json!({ "from": from, "to": to, "tokens_out": amount_out }),
            ),
        }
    }

    /// Sell exactly `amount_in`, receiving at least `min_out`.
    pub fn swap_exact_in(
        &self,
        route: &SwapRoute,
        amount_in: &YoctoAmount,
        min_out: &YoctoAmount,
    ) -> FunctionCall {
        match route {
            SwapRoute::NearToToken { token } => self.change(
                "swap_near_to_token_exact_in",
                json!({ "token": token, "min_tokens": min_out }),
                amount_in.clone(),
            ),
            SwapRoute::TokenToNear { token } => self.change(
                "swap_token_to_near_exact_in",
                json!({ "token": token, "tokens_paid": amount_in, "min_ynear": min_out }),
                swap_deposit(),
            ),
            SwapRoute::TokenToToken { from, to } => self.change(
                "swap_tokens_exact_in",
                json!({
                    "from": from,
                    "to": to,
                    "tokens_in": amount_in,
                    "min_tokens_out": min_out,
                }),
                swap_deposit(),
            ),
        }
    }

    /// Buy exactly `amount_out`, paying at most `max_in`.
    pub fn swap_exact_out(
        &self,
        route: &SwapRoute,
        amount_out: &YoctoAmount,
        max_in: &YoctoAmount,
    ) -> FunctionCall {
        match route {
            SwapRoute::NearToToken { token } => self.change(
                "swap_near_to_token_exact_out",
                json!({ "token": token, "tokens_out": amount_out }),
                max_in.clone(),
            ),
            SwapRoute::TokenToNear { token } => self.change(
                "swap_token_to_near_exact_out",
                json!({ "token": token, "ynear_out": amount_out, "max_tokens": max_in }),
                swap_deposit(),
            ),
            SwapRoute::TokenToToken { from, to } => self.change(
                "swap_tokens_exact_out",
                json!({
                    "from": from,
                    "to": to,
                    "tokens_out": amount_out,
                    "max_tokens_in": max_in,
                }),
                swap_deposit(),
            ),
        }
    }

    pub fn create_pool(&self, token: &str) -> FunctionCall {
        self.change("create_pool", json!({ "token": token }), swap_deposit())
    }

    pub fn add_liquidity(
        &self,
        token: &str,
        ynear: &YoctoAmount,
        max_tokens: &YoctoAmount,
        min_shares: &YoctoAmount,
    ) -> FunctionCall {
        self.change(
            "add_liquidity",
            json!({
                "token": token,
                "ynear": ynear,
                "max_tokens": max_tokens,
                "min_shares": min_shares,
            }),
            swap_deposit(),
        )
    }

    pub fn list_pools(&self) -> ViewCall {
        self.view("list_pools", json!({}))
    }

    pub fn pool_info(&self, token: &str) -> ViewCall {
        self.view("pool_info", json!({ "token": token }))
    }

    /// LP shares of `holder` in the `token` pool.
    pub fn shares_balance(&self, token: &str, holder: &str) -> ViewCall {
        self.view("balance_of", json!({ "token": token, "holder": holder }))
    }

    /// Amount the AMM may move from `owner` on the token contract.
    pub fn get_allowance(&self, token: &Token, owner: &str) -> Result<ViewCall, ClientError> {
        let address = nep21_address(token)?;
        Ok(ViewCall {
            contract_id: address.to_string(),
            method: "get_allowance".to_string(),
            args: json!({ "owner_id": owner, "escrow_account_id": self.contract_id }),
        })
    }

    /// Raise the AMM's allowance on the token contract by `amount`.
    pub fn inc_allowance(
        &self,
        token: &Token,
        amount: &YoctoAmount,
    ) -> Result<FunctionCall, ClientError> {
        let address = nep21_address(token)?;
        if amount.is_zero() {
            return Err(ClientError::ZeroAmount {
                method: "inc_allowance",
            });
        }
        Ok(FunctionCall {
            contract_id: address.to_string(),
            method: "inc_allowance".to_string(),
            args: json!({ "escrow_account_id": self.contract_id, "amount": amount }),
            gas: MAX_GAS,
            deposit: allowance_deposit(),
        })
    }

    /// Token balance of `owner` on a NEP-21 contract.
    pub fn get_balance(&self, token: &Token, owner: &str) -> Result<ViewCall, ClientError> {
        let address = nep21_address(token)?;
        Ok(ViewCall {
            contract_id: address.to_string(),
            method: "get_balance".to_string(),
            args: json!({ "owner_id": owner }),
        })
    }
}

fn nep21_address(token: &Token) -> Result<&str, ClientError> {
    match token.kind {
        TokenKind::Nep21 => Ok(&token.address),
        TokenKind::Native | TokenKind::Erc20 => Err(ClientError::NotNep21 {
            symbol: token.symbol.clone(),
        }),
    }
}

fn swap_deposit() -> YoctoAmount {
    YoctoAmount::from(60_000_000_000_000_000_000_000u128)
}

fn allowance_deposit() -> YoctoAmount {
    YoctoAmount::from(40_000_000_000_000_000_000_000u128)
}
