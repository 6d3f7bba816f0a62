use std::fmt;

use serde::{Deserialize, Serialize};

/// Token standard of a listed currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// NEAR itself, held on the account rather than in a token contract.
    #[serde(rename = "Native token")]
    Native,
    #[serde(rename = "NEP-21")]
    Nep21,
    /// Bridged Ethereum token; listed but not swappable through the AMM.
    #[serde(rename = "ERC-20")]
    Erc20,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Native => "Native token",
            TokenKind::Nep21 => "NEP-21",
            TokenKind::Erc20 => "ERC-20",
        };
        f.write_str(name)
    }
}

/// A currency the user can select on either side of a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Contract account of the token; empty for the native token.
    pub address: String,
}

impl Token {
    pub fn native() -> Self {
        Token {
            symbol: "NEAR".to_string(),
            kind: TokenKind::Native,
            address: String::new(),
        }
    }

    /// NEP-21 token at `address`, named after the first label of the account.
    pub fn nep21(address: &str) -> Self {
        let symbol = address.split('.').next().unwrap_or(address).to_uppercase();
        Token {
            symbol,
            kind: TokenKind::Nep21,
            address: address.to_string(),
        }
    }

    /// Parse a command-line token: `near`, `erc20:<address>` or a NEP-21
    /// contract account.
    pub fn from_spec(spec: &str) -> Self {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("near") {
            return Token::native();
        }
        if let Some(address) = spec.strip_prefix("erc20:") {
            return Token {
                symbol: address.to_string(),
                kind: TokenKind::Erc20,
                address: address.to_string(),
            };
        }
        Token::nep21(spec)
    }

    pub fn is_native(&self) -> bool {
        self.kind == TokenKind::Native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_specs() {
        assert_eq!(Token::from_spec("NEAR"), Token::native());
        let dai = Token::from_spec("dai.testnet");
        assert_eq!(dai.kind, TokenKind::Nep21);
        assert_eq!(dai.symbol, "DAI");
        assert_eq!(dai.address, "dai.testnet");
        assert_eq!(Token::from_spec("erc20:0xabc").kind, TokenKind::Erc20);
    }

    #[test]
    fn kind_uses_token_list_names() {
        assert_eq!(serde_json::to_string(&TokenKind::Nep21).unwrap(), "\"NEP-21\"");
        let token: Token =
            serde_json::from_str(r#"{"symbol":"NEAR","type":"Native token","address":""}"#).unwrap();
        assert!(token.is_native());
    }
}
