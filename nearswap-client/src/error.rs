use thiserror::Error;

use crate::token::TokenKind;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Amount(#[from] yocto::AmountError),
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
        endpoint: String,
    },
    #[error("RPC call {method} failed: {message}")]
    Rpc { method: String, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no swap route from {from} to {to}")]
    UnsupportedRoute { from: TokenKind, to: TokenKind },
    #[error("{symbol} is not a NEP-21 token")]
    NotNep21 { symbol: String },
    #[error("{method} requires a non-zero amount")]
    ZeroAmount { method: &'static str },
    #[error("not signed in")]
    NotSignedIn,
    #[error("wallet error: {0}")]
    Wallet(String),
}
