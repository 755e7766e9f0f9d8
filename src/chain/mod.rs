//! Contract-call surface.
//!
//! The crate never talks to a wallet directly. Hosts inject a
//! [`ContractClient`] (wagmi/viem in the browser, a mock in tests) and the
//! helpers here build the calls and interpret the results.

pub mod library;
pub mod mint;

pub use library::*;
pub use mint::*;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ── Contracts & deployments ─────────────────────────────────

/// Which ABI a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contract {
    SoundLibrary,
    MogSynthNft,
}

/// Known contract addresses on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDeployment {
    pub chain_id: u64,
    pub name: &'static str,
    pub mog_synth_nft: &'static str,
}

pub const ANVIL_CHAIN_ID: u64 = 31337;
pub const MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

const DEPLOYMENTS: [ChainDeployment; 3] = [
    ChainDeployment {
        chain_id: ANVIL_CHAIN_ID,
        name: "Anvil Localhost",
        mog_synth_nft: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
    },
    ChainDeployment {
        chain_id: MAINNET_CHAIN_ID,
        name: "Ethereum",
        mog_synth_nft: "0xYourMainnetContractAddress",
    },
    ChainDeployment {
        chain_id: SEPOLIA_CHAIN_ID,
        name: "Sepolia",
        mog_synth_nft: "0xYourSepoliaContractAddress",
    },
];

/// Deployment for `chain_id`, or `None` for unsupported networks.
pub fn deployment(chain_id: u64) -> Option<&'static ChainDeployment> {
    DEPLOYMENTS.iter().find(|d| d.chain_id == chain_id)
}

// ── Calls ───────────────────────────────────────────────────

/// A write call handed to the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract: Contract,
    pub address: String,
    pub function_name: String,
    pub args: Vec<serde_json::Value>,
    /// Native value attached to the call, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_wei: Option<u128>,
}

/// A read-only call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractQuery {
    pub contract: Contract,
    pub address: String,
    pub function_name: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl ContractQuery {
    pub fn new(contract: Contract, address: &str, function_name: &str) -> Self {
        ContractQuery {
            contract,
            address: address.to_string(),
            function_name: function_name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// Opaque reference to a submitted transaction (its hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionHandle(pub String);

/// Outcome of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    pub success: bool,
}

/// Wallet/contract capability injected by the host.
///
/// Implementations report transport and wallet errors as
/// `MogSynthError::NetworkFailure`.
pub trait ContractClient {
    fn submit(&self, call: ContractCall) -> Result<TransactionHandle>;
    fn await_confirmation(&self, handle: &TransactionHandle) -> Result<Receipt>;
    fn read(&self, query: &ContractQuery) -> Result<serde_json::Value>;
}

/// Submit `call` and wait for its receipt; a reverted transaction is a
/// network failure.
pub fn submit_and_confirm<C: ContractClient + ?Sized>(
    client: &C,
    call: ContractCall,
) -> Result<Receipt> {
    let function = call.function_name.clone();
    let handle = client.submit(call)?;
    log::info!("{function} submitted as {}", handle.0);
    let receipt = client.await_confirmation(&handle)?;
    if !receipt.success {
        log::warn!("{function} reverted ({})", receipt.transaction_hash);
        return Err(crate::error::MogSynthError::network(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }
    Ok(receipt)
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::error::MogSynthError;

    /// In-memory client: records submissions and answers reads from a map
    /// keyed by `function_name` plus serialized args.
    #[derive(Default)]
    pub struct MockClient {
        pub submitted: RefCell<Vec<ContractCall>>,
        pub reads: HashMap<String, serde_json::Value>,
        pub revert: bool,
        pub offline: bool,
    }

    impl MockClient {
        pub fn key(function_name: &str, args: &[serde_json::Value]) -> String {
            format!("{function_name}{}", serde_json::Value::from(args.to_vec()))
        }

        pub fn with_read(mut self, function_name: &str, args: &[serde_json::Value], value: serde_json::Value) -> Self {
            self.reads.insert(Self::key(function_name, args), value);
            self
        }
    }

    impl ContractClient for MockClient {
        fn submit(&self, call: ContractCall) -> crate::error::Result<TransactionHandle> {
            if self.offline {
                return Err(MogSynthError::network("wallet not connected"));
            }
            let mut submitted = self.submitted.borrow_mut();
            submitted.push(call);
            Ok(TransactionHandle(format!("0x{:064x}", submitted.len())))
        }

        fn await_confirmation(&self, handle: &TransactionHandle) -> crate::error::Result<Receipt> {
            Ok(Receipt {
                transaction_hash: handle.0.clone(),
                success: !self.revert,
            })
        }

        fn read(&self, query: &ContractQuery) -> crate::error::Result<serde_json::Value> {
            self.reads
                .get(&Self::key(&query.function_name, &query.args))
                .cloned()
                .ok_or_else(|| MogSynthError::network(format!("no data for {}", query.function_name)))
        }
    }
}
