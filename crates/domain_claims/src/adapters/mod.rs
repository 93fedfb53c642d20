//! Claim data adapters

mod fixtures;

pub use fixtures::FixtureClaimData;
