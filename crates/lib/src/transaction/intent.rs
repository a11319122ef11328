use solana_sdk::pubkey::Pubkey;

use crate::{
    address::AddressCodec,
    constant::{LAMPORTS_PER_SOL, MAX_EXACT_LAMPORTS},
    error::SolsendError,
};

/// Converts a SOL amount to lamports, rounding to the nearest lamport.
///
/// Any finite, non-negative amount that fits in a `u64` converts; amounts
/// below half a lamport become 0.
pub fn sol_to_lamports(amount_sol: f64) -> Result<u64, SolsendError> {
    if !amount_sol.is_finite() {
        return Err(SolsendError::InvalidAmount(format!("{amount_sol} is not a finite number")));
    }
    if amount_sol < 0.0 {
        return Err(SolsendError::InvalidAmount(format!("{amount_sol} SOL is negative")));
    }

    let lamports = (amount_sol * LAMPORTS_PER_SOL as f64).round();
    // u64::MAX is not representable; its nearest f64 is 2^64, one past the range.
    if lamports >= u64::MAX as f64 {
        return Err(SolsendError::InvalidAmount(format!("{amount_sol} SOL is too large")));
    }

    Ok(lamports as u64)
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Parses a user-typed SOL amount such as `"1.5"`.
pub fn parse_amount(text: &str) -> Result<f64, SolsendError> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| SolsendError::InvalidAmount(format!("'{text}' is not a number")))
}

/// A validated request to move lamports from `sender` to `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferIntent {
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub lamports: u64,
}

impl TransferIntent {
    /// Amount is checked before the recipient, so a bad amount is reported
    /// even when the address is also wrong.
    pub fn new(sender: Pubkey, recipient: &str, amount_sol: f64) -> Result<Self, SolsendError> {
        if amount_sol.is_nan() || amount_sol <= 0.0 {
            return Err(SolsendError::InvalidAmount(format!(
                "{amount_sol} SOL must be greater than zero"
            )));
        }
        let lamports = sol_to_lamports(amount_sol)?;
        if lamports == 0 {
            return Err(SolsendError::InvalidAmount(format!(
                "{amount_sol} SOL is less than one lamport"
            )));
        }
        let recipient = AddressCodec::decode(recipient)?;

        if lamports > MAX_EXACT_LAMPORTS {
            log::warn!(
                "Transfer of {lamports} lamports is beyond exact f64 precision; amount was rounded"
            );
        }

        Ok(Self { sender, recipient, lamports })
    }

    pub fn amount_sol(&self) -> f64 {
        lamports_to_sol(self.lamports)
    }
}
