//! Client side of the nearswap AMM.
//!
//! The AMM contract owns pricing, reserves and share accounting. This crate
//! only prepares calls to it:
//!
//! - [`token`] describes the tokens a user can pick.
//! - [`calls`] maps a token pair and direction onto the contract's
//!   `price_*`, `swap_*` and pool methods, with amounts in yocto units.
//! - [`rpc`] executes view calls over NEAR JSON-RPC.
//! - [`session`] ties a view client and a wallet together; there is no global
//!   connection state.
//! - [`inputs`] is the swap form state and its transition function.

pub mod calls;
pub mod error;
mod http_client;
pub mod inputs;
pub mod rpc;
pub mod session;
pub mod token;

pub use calls::{ContractCalls, FunctionCall, PoolInfo, SwapRoute, ViewCall};
pub use error::ClientError;
pub use rpc::{AccountBalance, JsonRpcClient, ViewClient};
pub use session::{Session, Wallet};
pub use token::{Token, TokenKind};
