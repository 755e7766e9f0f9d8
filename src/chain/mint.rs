//! MogSynth NFT mint phases and mint calls.

use serde::{Deserialize, Serialize};

use super::{Contract, ContractCall, ContractClient, ContractQuery, Receipt, submit_and_confirm};
use crate::error::{MogSynthError, Result};

const WEI_PER_FINNEY: u128 = 1_000_000_000_000_000;

/// Minting tier, as stored on-chain by `currentPhase()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Locked,
    Presale,
    Whitelist,
    Public,
}

impl Phase {
    /// Map the contract's numeric phase; unknown values read as `Locked`.
    pub fn from_index(index: u64) -> Self {
        match index {
            1 => Phase::Presale,
            2 => Phase::Whitelist,
            3 => Phase::Public,
            _ => Phase::Locked,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Phase::Locked => "Locked",
            Phase::Presale => "Presale",
            Phase::Whitelist => "Whitelist",
            Phase::Public => "Public",
        }
    }

    /// Mint price in wei (0 while locked).
    pub fn price_wei(self) -> u128 {
        match self {
            Phase::Locked => 0,
            Phase::Presale => 50 * WEI_PER_FINNEY,
            Phase::Whitelist => 80 * WEI_PER_FINNEY,
            Phase::Public => 100 * WEI_PER_FINNEY,
        }
    }

    /// Price formatted for display, `None` while locked.
    pub fn price_label(self) -> Option<String> {
        let wei = self.price_wei();
        (wei > 0).then(|| format!("{} ETH", wei as f64 / 1e18))
    }

    pub fn can_mint(self) -> bool {
        self != Phase::Locked
    }
}

/// Read the current phase from the NFT contract.
pub fn current_phase<C: ContractClient + ?Sized>(client: &C, nft_address: &str) -> Result<Phase> {
    let value = client.read(&ContractQuery::new(
        Contract::MogSynthNft,
        nft_address,
        "currentPhase",
    ))?;
    let index = value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| MogSynthError::network(format!("currentPhase returned {value}")))?;
    Ok(Phase::from_index(index))
}

/// Arguments for `mint(...)` in `phase`.
///
/// Whitelist mints carry the Merkle proof and the hex price; every other
/// phase sends an empty proof followed by the proof list.
pub fn mint_args(phase: Phase, merkle_proof: &[String]) -> Vec<serde_json::Value> {
    let proof: Vec<serde_json::Value> = merkle_proof.iter().map(|p| p.as_str().into()).collect();
    if phase == Phase::Whitelist {
        let price_hex = format!("0x{:x}", phase.price_wei());
        vec![proof.into(), price_hex.into()]
    } else {
        vec![serde_json::Value::Array(Vec::new()), proof.into()]
    }
}

/// Build the `mint` call for `phase`.
pub fn mint_call(phase: Phase, nft_address: &str, merkle_proof: &[String]) -> Result<ContractCall> {
    if !phase.can_mint() {
        return Err(MogSynthError::invalid_input("Minting is locked."));
    }
    Ok(ContractCall {
        contract: Contract::MogSynthNft,
        address: nft_address.to_string(),
        function_name: "mint".to_string(),
        args: mint_args(phase, merkle_proof),
        value_wei: Some(phase.price_wei()),
    })
}

/// Mint in `phase` and wait for confirmation.
pub fn mint<C: ContractClient + ?Sized>(
    client: &C,
    phase: Phase,
    nft_address: &str,
    merkle_proof: &[String],
) -> Result<Receipt> {
    let call = mint_call(phase, nft_address, merkle_proof)?;
    submit_and_confirm(client, call)
}
