//! State of the swap and pool forms.
//!
//! Every change goes through [`reduce`], which matches each [`InputAction`]
//! exhaustively. The whole state serializes to JSON so it can be restored
//! after the wallet redirect that signing a transaction causes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yocto::{Precision, YoctoAmount};

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapStatus {
    #[default]
    NotReadyToSwap,
    ReadyToSwap,
    IsApproving,
    IsSwapping,
    FetchingData,
}

/// Validation failure shown next to the swap form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SwapError {
    #[error("Cannot swap to same currency.")]
    SameCurrency,
    #[error("Not signed in.")]
    NotSignedIn,
    #[error("Input exceeds balance.")]
    InsufficientBalance,
    #[error("Insufficient liquidity for trade.")]
    InsufficientLiquidity,
    #[error("Enter a non-zero number.")]
    ZeroAmount,
    #[error("Invalid amounts")]
    InvalidAmounts,
}

/// One of the four currency inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    SwapIn,
    SwapOut,
    Pool1,
    Pool2,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenInput {
    /// Amount as typed by the user.
    pub amount: String,
    pub symbol: String,
    pub kind: Option<TokenKind>,
    /// Position of the currency in the token list.
    pub token_index: usize,
    pub address: String,
    /// True if `amount` is a non-zero number.
    pub is_valid: bool,
    /// Only tracked for NEP-21 inputs.
    pub allowance: Option<YoctoAmount>,
    pub balance: Option<YoctoAmount>,
}

impl TokenInput {
    fn at(token_index: usize) -> Self {
        Self {
            token_index,
            ..Self::default()
        }
    }

    fn select(&mut self, currency: &SelectedCurrency) {
        self.symbol = currency.symbol.clone();
        self.kind = Some(currency.kind);
        self.token_index = currency.token_index;
        self.address = currency.address.clone();
        self.allowance = None;
        if let Some(balance) = &currency.balance {
            self.balance = Some(balance.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapInputs {
    #[serde(rename = "in")]
    pub input: TokenInput,
    #[serde(rename = "out")]
    pub output: TokenInput,
    pub error: Option<SwapError>,
    /// NEP-21 inputs need an allowance before swapping.
    pub needs_approval: bool,
    pub status: SwapStatus,
    /// Output balance recorded before submitting, compared once the wallet
    /// returns to tell whether the swap went through.
    pub previous: Option<YoctoAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInputs {
    pub input1: TokenInput,
    pub input2: TokenInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencySelection {
    pub is_visible: bool,
    pub selected_input: Option<Leg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputsState {
    pub swap: SwapInputs,
    pub pool: PoolInputs,
    pub currency_selection: CurrencySelection,
}

impl Default for InputsState {
    fn default() -> Self {
        Self {
            swap: SwapInputs {
                input: TokenInput::at(0),
                output: TokenInput::at(1),
                error: None,
                needs_approval: false,
                status: SwapStatus::NotReadyToSwap,
                previous: None,
            },
            pool: PoolInputs {
                input1: TokenInput::at(1),
                input2: TokenInput::at(2),
            },
            currency_selection: CurrencySelection::default(),
        }
    }
}

impl InputsState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    fn leg_mut(&mut self, leg: Leg) -> &mut TokenInput {
        match leg {
            Leg::SwapIn => &mut self.swap.input,
            Leg::SwapOut => &mut self.swap.output,
            Leg::Pool1 => &mut self.pool.input1,
            Leg::Pool2 => &mut self.pool.input2,
        }
    }
}

/// Currency picked in the selection dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCurrency {
    pub symbol: String,
    pub kind: TokenKind,
    pub token_index: usize,
    pub address: String,
    pub balance: Option<YoctoAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    /// Balance fetched for the token at `index` in the token list.
    SetTokenBalance { index: usize, balance: YoctoAmount },
    SetStatusReady,
    UpdateSwapStatus {
        status: SwapStatus,
        error: Option<SwapError>,
        previous: Option<YoctoAmount>,
    },
    ClearPrevious,
    SetAmount { leg: Leg, amount: String, is_valid: bool },
    SelectCurrency { leg: Leg, currency: SelectedCurrency },
    ToggleCurrencySelection,
    /// Remember which input the dialog is for and toggle it.
    SetCurrencySelectionInput { leg: Leg },
    UpdateSwapApproval { needs_approval: bool },
    ClearSwapInputs,
    UpdateSwapError { error: Option<SwapError> },
    UpdateInAllowance {
        allowance: YoctoAmount,
        needs_approval: Option<bool>,
    },
    SwitchSwapInputs,
}

pub fn reduce(state: &InputsState, action: InputAction) -> InputsState {
    let mut next = state.clone();
    match action {
        InputAction::SetTokenBalance { index, balance } => {
            if next.swap.input.token_index == index {
                next.swap.input.balance = Some(balance.clone());
            }
            if next.swap.output.token_index == index {
                next.swap.output.balance = Some(balance);
            }
        }
        InputAction::SetStatusReady => next.swap.status = SwapStatus::ReadyToSwap,
        InputAction::UpdateSwapStatus {
            status,
            error,
            previous,
        } => {
            next.swap.status = status;
            next.swap.error = error;
            next.swap.previous = previous;
        }
        InputAction::ClearPrevious => next.swap.previous = None,
        InputAction::SetAmount {
            leg,
            amount,
            is_valid,
        } => {
            let input = next.leg_mut(leg);
            input.amount = amount;
            input.is_valid = is_valid;
        }
        InputAction::SelectCurrency { leg, currency } => {
            next.leg_mut(leg).select(&currency);
            match leg {
                Leg::SwapIn => {
                    next.swap.input.amount.clear();
                    next.swap.needs_approval = currency.kind == TokenKind::Nep21;
                    next.swap.status = SwapStatus::NotReadyToSwap;
                }
                Leg::SwapOut => {
                    next.swap.needs_approval = false;
                    next.swap.status = SwapStatus::NotReadyToSwap;
                }
                Leg::Pool1 | Leg::Pool2 => {}
            }
            next.currency_selection.is_visible = false;
        }
        InputAction::ToggleCurrencySelection => {
            next.currency_selection.is_visible = !state.currency_selection.is_visible;
        }
        InputAction::SetCurrencySelectionInput { leg } => {
            next.currency_selection.selected_input = Some(leg);
            next.currency_selection.is_visible = !state.currency_selection.is_visible;
        }
        InputAction::UpdateSwapApproval { needs_approval } => {
            next.swap.needs_approval = needs_approval;
        }
        InputAction::ClearSwapInputs => {
            for input in [&mut next.swap.input, &mut next.swap.output] {
                input.amount.clear();
                input.is_valid = false;
            }
            next.swap.status = SwapStatus::NotReadyToSwap;
            next.swap.error = None;
        }
        InputAction::UpdateSwapError { error } => next.swap.error = error,
        InputAction::UpdateInAllowance {
            allowance,
            needs_approval,
        } => {
            next.swap.input.allowance = Some(allowance);
            if let Some(needs_approval) = needs_approval {
                next.swap.needs_approval = needs_approval;
            }
        }
        InputAction::SwitchSwapInputs => {
            next.swap.input = TokenInput {
                amount: String::new(),
                is_valid: false,
                ..state.swap.output.clone()
            };
            next.swap.output = state.swap.input.clone();
            next.swap.needs_approval = state.swap.output.kind == Some(TokenKind::Nep21);
            next.swap.status = SwapStatus::NotReadyToSwap;
            next.swap.error = None;
        }
    }
    next
}

/// Decide whether the swap form can be submitted, checking the most critical
/// problem first. `in_amount` is the quoted input, `out_amount` the wanted
/// output.
pub fn check_swap(
    swap: &SwapInputs,
    signed_in: bool,
    in_amount: &YoctoAmount,
    out_amount: &YoctoAmount,
) -> (SwapStatus, Option<SwapError>) {
    let error = if swap.input.token_index == swap.output.token_index {
        Some(SwapError::SameCurrency)
    } else if !signed_in {
        Some(SwapError::NotSignedIn)
    } else if swap.input.balance.as_ref().is_some_and(|b| in_amount > b) {
        Some(SwapError::InsufficientBalance)
    } else if in_amount.is_zero() && !out_amount.is_zero() {
        Some(SwapError::InsufficientLiquidity)
    } else if out_amount.is_zero() {
        Some(SwapError::ZeroAmount)
    } else {
        None
    };
    match error {
        Some(error) => (SwapStatus::NotReadyToSwap, Some(error)),
        None => (SwapStatus::ReadyToSwap, None),
    }
}

/// Guard run right before handing a swap to the wallet.
///
/// Both amounts must have been accepted as numbers. On success returns the
/// action that marks the swap as in flight and records the output balance,
/// so [`settled_swap`] can compare against it once the wallet returns.
pub fn start_swap(swap: &SwapInputs) -> Result<InputAction, SwapError> {
    if !swap.input.is_valid || !swap.output.is_valid {
        return Err(SwapError::InvalidAmounts);
    }
    Ok(InputAction::UpdateSwapStatus {
        status: SwapStatus::IsSwapping,
        error: None,
        previous: swap.output.balance.clone(),
    })
}

/// Balance change observed after a swap was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub before: YoctoAmount,
    pub after: YoctoAmount,
}

impl SwapOutcome {
    pub fn message(&self) -> String {
        format!(
            "your balance went from {} to {}",
            self.before.to_human(Precision::COMPACT),
            self.after.to_human(Precision::COMPACT)
        )
    }
}

/// A recorded pre-swap balance that `current` exceeds means the swap settled.
pub fn settled_swap(swap: &SwapInputs, current: &YoctoAmount) -> Option<SwapOutcome> {
    let before = swap.previous.as_ref()?;
    (current > before).then(|| SwapOutcome {
        before: before.clone(),
        after: current.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(human: &str) -> YoctoAmount {
        YoctoAmount::from_human(human).unwrap()
    }

    fn currency(symbol: &str, kind: TokenKind, token_index: usize) -> SelectedCurrency {
        SelectedCurrency {
            symbol: symbol.into(),
            kind,
            token_index,
            address: format!("{}.testnet", symbol.to_lowercase()),
            balance: Some(amount("10")),
        }
    }

    fn ready_state() -> InputsState {
        let state = InputsState::default();
        let state = reduce(
            &state,
            InputAction::SelectCurrency {
                leg: Leg::SwapIn,
                currency: currency("DAI", TokenKind::Nep21, 3),
            },
        );
        reduce(
            &state,
            InputAction::SelectCurrency {
                leg: Leg::SwapOut,
                currency: currency("NEAR", TokenKind::Native, 0),
            },
        )
    }

    #[test]
    fn default_indices() {
        let state = InputsState::default();
        assert_eq!(state.swap.input.token_index, 0);
        assert_eq!(state.swap.output.token_index, 1);
        assert_eq!(state.pool.input1.token_index, 1);
        assert_eq!(state.pool.input2.token_index, 2);
    }

    #[test]
    fn selecting_nep21_input_requires_approval() {
        let mut state = InputsState::default();
        state.swap.input.amount = "4".into();
        state.currency_selection.is_visible = true;
        let state = reduce(
            &state,
            InputAction::SelectCurrency {
                leg: Leg::SwapIn,
                currency: currency("DAI", TokenKind::Nep21, 3),
            },
        );
        assert!(state.swap.needs_approval);
        assert_eq!(state.swap.input.symbol, "DAI");
        assert!(state.swap.input.amount.is_empty());
        assert!(!state.currency_selection.is_visible);
        assert_eq!(state.swap.input.balance, Some(amount("10")));
    }

    #[test]
    fn selecting_output_clears_approval() {
        let state = ready_state();
        assert!(!state.swap.needs_approval);
        assert_eq!(state.swap.output.kind, Some(TokenKind::Native));
    }

    #[test]
    fn balances_apply_by_token_index() {
        let state = ready_state();
        let state = reduce(
            &state,
            InputAction::SetTokenBalance {
                index: 0,
                balance: amount("2"),
            },
        );
        assert_eq!(state.swap.output.balance, Some(amount("2")));
        assert_eq!(state.swap.input.balance, Some(amount("10")));
    }

    #[test]
    fn switching_swaps_legs() {
        let mut state = ready_state();
        state.swap.input.amount = "1".into();
        state.swap.output.amount = "5".into();
        let switched = reduce(&state, InputAction::SwitchSwapInputs);
        assert_eq!(switched.swap.input.symbol, "NEAR");
        assert!(switched.swap.input.amount.is_empty());
        assert_eq!(switched.swap.output.symbol, "DAI");
        assert_eq!(switched.swap.output.amount, "1");
        assert!(!switched.swap.needs_approval);

        let back = reduce(&switched, InputAction::SwitchSwapInputs);
        assert!(back.swap.needs_approval);
    }

    #[test]
    fn clearing_resets_amounts_and_error() {
        let mut state = ready_state();
        state.swap.error = Some(SwapError::ZeroAmount);
        let state = reduce(
            &state,
            InputAction::SetAmount {
                leg: Leg::SwapOut,
                amount: "3".into(),
                is_valid: true,
            },
        );
        assert!(state.swap.output.is_valid);
        let state = reduce(&state, InputAction::ClearSwapInputs);
        assert!(state.swap.output.amount.is_empty());
        assert!(!state.swap.output.is_valid);
        assert_eq!(state.swap.error, None);
    }

    #[test]
    fn selection_dialog_toggles() {
        let state = reduce(
            &InputsState::default(),
            InputAction::SetCurrencySelectionInput { leg: Leg::SwapOut },
        );
        assert!(state.currency_selection.is_visible);
        assert_eq!(state.currency_selection.selected_input, Some(Leg::SwapOut));
        let state = reduce(&state, InputAction::ToggleCurrencySelection);
        assert!(!state.currency_selection.is_visible);
    }

    #[test]
    fn allowance_update_may_set_approval() {
        let state = reduce(
            &ready_state(),
            InputAction::UpdateInAllowance {
                allowance: amount("100"),
                needs_approval: Some(false),
            },
        );
        assert_eq!(state.swap.input.allowance, Some(amount("100")));
        assert!(!state.swap.needs_approval);
    }

    #[test]
    fn checks_in_priority_order() {
        let state = ready_state();
        let one = amount("1");
        let zero = YoctoAmount::zero();

        let mut same = state.swap.clone();
        same.output.token_index = same.input.token_index;
        assert_eq!(check_swap(&same, false, &one, &one).1, Some(SwapError::SameCurrency));

        assert_eq!(check_swap(&state.swap, false, &one, &one).1, Some(SwapError::NotSignedIn));
        assert_eq!(
            check_swap(&state.swap, true, &amount("11"), &one).1,
            Some(SwapError::InsufficientBalance)
        );
        assert_eq!(
            check_swap(&state.swap, true, &zero, &one).1,
            Some(SwapError::InsufficientLiquidity)
        );
        assert_eq!(check_swap(&state.swap, true, &zero, &zero).1, Some(SwapError::ZeroAmount));
        assert_eq!(
            check_swap(&state.swap, true, &one, &one),
            (SwapStatus::ReadyToSwap, None)
        );
    }

    #[test]
    fn swap_needs_valid_amounts() {
        let state = ready_state();
        assert_eq!(start_swap(&state.swap), Err(SwapError::InvalidAmounts));

        let state = reduce(
            &state,
            InputAction::SetAmount {
                leg: Leg::SwapIn,
                amount: "2".into(),
                is_valid: true,
            },
        );
        assert_eq!(start_swap(&state.swap), Err(SwapError::InvalidAmounts));
        assert_eq!(SwapError::InvalidAmounts.to_string(), "Invalid amounts");

        let mut state = reduce(
            &state,
            InputAction::SetAmount {
                leg: Leg::SwapOut,
                amount: "1".into(),
                is_valid: true,
            },
        );
        state.swap.output.balance = Some(amount("7"));
        let swapping = reduce(&state, start_swap(&state.swap).unwrap());
        assert_eq!(swapping.swap.status, SwapStatus::IsSwapping);
        assert_eq!(swapping.swap.previous, Some(amount("7")));
        assert_eq!(swapping.swap.error, None);
    }

    #[test]
    fn detects_settled_swap() {
        let state = reduce(
            &ready_state(),
            InputAction::UpdateSwapStatus {
                status: SwapStatus::IsSwapping,
                error: None,
                previous: Some(amount("1")),
            },
        );
        assert_eq!(settled_swap(&state.swap, &amount("0.5")), None);
        let outcome = settled_swap(&state.swap, &amount("1.5")).unwrap();
        assert_eq!(outcome.message(), "your balance went from 1.00000 to 1.50000");

        let cleared = reduce(&state, InputAction::ClearPrevious);
        assert_eq!(settled_swap(&cleared.swap, &amount("2")), None);
    }

    #[test]
    fn state_survives_json_snapshot() {
        let state = reduce(&ready_state(), InputAction::SetStatusReady);
        let json = state.to_json().unwrap();
        assert!(json.contains("\"readyToSwap\""));
        assert_eq!(InputsState::from_json(&json).unwrap(), state);
    }
}
