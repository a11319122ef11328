use solana_sdk::pubkey::Pubkey;

use crate::{error::SolsendError, rpc::LedgerRpc, transaction::lamports_to_sol};

pub struct BalanceQuery;

impl BalanceQuery {
    /// Balance in SOL. Without an account there is nothing to ask the
    /// network, so the answer is zero.
    pub async fn get_balance(
        rpc: &dyn LedgerRpc,
        account: Option<&Pubkey>,
    ) -> Result<f64, SolsendError> {
        let Some(account) = account else {
            return Ok(0.0);
        };

        let lamports = rpc.get_balance(account).await?;
        log::debug!("Balance of {account}: {lamports} lamports");
        Ok(lamports_to_sol(lamports))
    }
}
