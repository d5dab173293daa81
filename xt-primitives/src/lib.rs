// This file is part of Equilibrium.

// Copyright (C) 2023 EQ Lab.
// SPDX-License-Identifier: GPL-3.0-or-later

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Shared types of the cross-chain transfer core: chain identifiers,
//! relative locations, registry keys, account kinds and the read-only
//! collaborator traits.

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_core::{H160, H256};
use std::fmt;

pub mod directory;
pub mod location;
pub mod registry;
pub mod serde_u128;

pub use directory::{ChainDirectory, RouteCatalog, StaticChainDirectory};
pub use location::{AccountNetwork, Junction, Junctions, Location, LocationError, MAX_JUNCTIONS};
pub use registry::RegistryKey;

/// Amount in the asset's smallest unit, as the executor counts it.
pub type XcmBalance = u128;

/// Chain identifier. `0` is the relay chain, anything else a parachain id.
pub type ChainRef = u32;

pub const RELAY_CHAIN: ChainRef = 0;

/// Name under which the XCM pallet is exposed by a chain runtime.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XcmPallet {
    /// Relay chains
    XcmPallet,
    /// Parachains
    PolkadotXcm,
}

impl XcmPallet {
    pub fn name(&self) -> &'static str {
        match self {
            XcmPallet::XcmPallet => "xcmPallet",
            XcmPallet::PolkadotXcm => "polkadotXcm",
        }
    }
}

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub is_parachain: bool,
    #[serde(default)]
    pub xcm_pallet: Option<XcmPallet>,
}

impl ChainInfo {
    pub fn has_xcm_capability(&self) -> bool {
        self.xcm_pallet.is_some()
    }
}

/// Registry symbol of a fungible asset, e.g. `DOT`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl From<&str> for AssetRef {
    fn from(symbol: &str) -> Self {
        AssetRef(symbol.into())
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq, TypeInfo, Serialize, Deserialize)]
pub enum AccountType {
    Id32([u8; 32]),
    Key20([u8; 20]),
}

impl TryFrom<Vec<u8>> for AccountType {
    type Error = ();

    fn try_from(value: Vec<u8>) -> Result<Self, ()> {
        match value.len() {
            20 => {
                let mut key = [0u8; 20];
                key.copy_from_slice(&value[..]);
                Ok(Self::Key20(key))
            }
            32 => {
                let mut id = [0u8; 32];
                id.copy_from_slice(&value[..]);
                Ok(Self::Id32(id))
            }
            _ => Err(()),
        }
    }
}

impl From<AccountType> for Vec<u8> {
    fn from(account: AccountType) -> Vec<u8> {
        account.as_bytes().to_vec()
    }
}

impl AccountType {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AccountType::Id32(id) => &id[..],
            AccountType::Key20(key) => &key[..],
        }
    }

    pub fn junction(&self) -> Junction {
        match self {
            AccountType::Id32(id) => Junction::AccountId32 {
                network: AccountNetwork::Any,
                id: H256(*id),
            },
            AccountType::Key20(key) => Junction::AccountKey20 {
                network: AccountNetwork::Any,
                key: H160(*key),
            },
        }
    }
}

/// One side of a transfer: an account on a chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferParty {
    pub chain: ChainRef,
    pub account: AccountType,
}

impl TransferParty {
    pub fn new(chain: ChainRef, account: AccountType) -> Self {
        TransferParty { chain, account }
    }

    /// Same chain and same raw account bytes.
    pub fn is_same_account(&self, other: &TransferParty) -> bool {
        self.chain == other.chain && self.account.as_bytes() == other.account.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const ALICE: [u8; 32] = hex!("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d");
    const BALTATHAR: [u8; 20] = hex!("3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0");

    #[test]
    fn account_type_from_raw_bytes() {
        assert_eq!(AccountType::try_from(ALICE.to_vec()), Ok(AccountType::Id32(ALICE)));
        assert_eq!(
            AccountType::try_from(BALTATHAR.to_vec()),
            Ok(AccountType::Key20(BALTATHAR))
        );
        assert_eq!(AccountType::try_from(vec![1u8; 31]), Err(()));
    }

    #[test]
    fn account_junction_follows_kind() {
        assert_eq!(
            AccountType::Id32(ALICE).junction(),
            Junction::AccountId32 {
                network: AccountNetwork::Any,
                id: H256(ALICE)
            }
        );
        assert_eq!(
            AccountType::Key20(BALTATHAR).junction(),
            Junction::AccountKey20 {
                network: AccountNetwork::Any,
                key: H160(BALTATHAR)
            }
        );
    }

    #[test]
    fn same_account_needs_same_chain_and_bytes() {
        let sender = TransferParty::new(2000, AccountType::Id32(ALICE));
        assert!(sender.is_same_account(&TransferParty::new(2000, AccountType::Id32(ALICE))));
        assert!(!sender.is_same_account(&TransferParty::new(2001, AccountType::Id32(ALICE))));
        assert!(!sender.is_same_account(&TransferParty::new(2000, AccountType::Id32([0; 32]))));
    }

    #[test]
    fn pallet_names() {
        assert_eq!(XcmPallet::XcmPallet.name(), "xcmPallet");
        assert_eq!(XcmPallet::PolkadotXcm.name(), "polkadotXcm");
        assert_eq!(
            serde_json::to_value(XcmPallet::PolkadotXcm).unwrap(),
            serde_json::json!("polkadotXcm")
        );
    }
}
