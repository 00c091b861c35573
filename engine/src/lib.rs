pub mod aggregate;
pub mod error;
pub mod resolver;
pub mod timeline;

pub use aggregate::{
    chain_eligibility, network_eligibility, unchecked_draws, ChainEligibility, DrawTimeRange,
    NetworkEligibility, UncheckedDrawsReport,
};
pub use error::EngineError;
pub use resolver::vault_eligible_draws;
pub use timeline::track_vaults;
