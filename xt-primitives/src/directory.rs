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

//! Read-only lookups the transfer core consumes.
//!
//! The chain directory and the route catalog are owned by the surrounding
//! application. [`StaticChainDirectory`] is the table-backed directory used
//! when chain data ships as configuration.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::{registry::RegistryKey, AssetRef, ChainInfo, ChainRef};

pub trait ChainDirectory {
    /// Network name of the relay chain this directory describes.
    fn relay(&self) -> &str;

    fn chain_info(&self, chain: ChainRef) -> Option<ChainInfo>;

    /// Canonical registry key of `asset`, if `chain` holds it.
    fn asset_location(&self, chain: ChainRef, asset: &AssetRef) -> Option<RegistryKey>;

    /// Decimal precision of `asset`.
    fn asset_decimals(&self, asset: &AssetRef) -> Option<u8>;
}

/// Static table of routes whose chains trust each other enough to teleport.
pub trait RouteCatalog {
    fn is_teleportable(
        &self,
        relay: &str,
        origin: ChainRef,
        destination: ChainRef,
        asset: &AssetRef,
    ) -> bool;
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainRecord {
    id: ChainRef,
    #[serde(flatten)]
    info: ChainInfo,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetRecord {
    symbol: AssetRef,
    decimals: u8,
    location: RegistryKey,
    /// Chains holding the asset, reserve or representation
    chains: Vec<ChainRef>,
}

#[derive(Deserialize)]
struct DirectoryRecord {
    relay: String,
    #[serde(default)]
    chains: Vec<ChainRecord>,
    #[serde(default)]
    assets: Vec<AssetRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct StaticChainDirectory {
    relay: String,
    chains: BTreeMap<ChainRef, ChainInfo>,
    assets: BTreeMap<AssetRef, AssetRecord>,
}

impl StaticChainDirectory {
    pub fn new(relay: impl Into<String>) -> Self {
        StaticChainDirectory {
            relay: relay.into(),
            ..Default::default()
        }
    }

    /// Loads a directory from its JSON form:
    /// `{"relay": "..", "chains": [{"id", "isParachain", "xcmPallet"}], "assets": [{"symbol", "decimals", "location", "chains"}]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let record: DirectoryRecord = serde_json::from_str(json)?;
        let mut directory = StaticChainDirectory::new(record.relay);
        for chain in record.chains {
            directory.chains.insert(chain.id, chain.info);
        }
        for asset in record.assets {
            directory.assets.insert(asset.symbol.clone(), asset);
        }
        Ok(directory)
    }

    pub fn with_chain(mut self, chain: ChainRef, info: ChainInfo) -> Self {
        self.chains.insert(chain, info);
        self
    }

    pub fn with_asset(
        mut self,
        symbol: AssetRef,
        decimals: u8,
        location: RegistryKey,
        chains: Vec<ChainRef>,
    ) -> Self {
        self.assets.insert(
            symbol.clone(),
            AssetRecord {
                symbol,
                decimals,
                location,
                chains,
            },
        );
        self
    }
}

impl ChainDirectory for StaticChainDirectory {
    fn relay(&self) -> &str {
        &self.relay
    }

    fn chain_info(&self, chain: ChainRef) -> Option<ChainInfo> {
        self.chains.get(&chain).copied()
    }

    fn asset_location(&self, chain: ChainRef, asset: &AssetRef) -> Option<RegistryKey> {
        self.assets
            .get(asset)
            .filter(|record| record.chains.contains(&chain))
            .map(|record| record.location.clone())
    }

    fn asset_decimals(&self, asset: &AssetRef) -> Option<u8> {
        self.assets.get(asset).map(|record| record.decimals)
    }
}
