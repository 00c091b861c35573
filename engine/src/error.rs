use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("draw history for chain {chain_id} has not been fetched")]
    DrawsPending { chain_id: u64 },

    #[error("balance history for vault {vault} on chain {chain_id} has not been fetched")]
    BalancesPending { chain_id: u64, vault: String },
}
