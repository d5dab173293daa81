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

//! Route lookups backed by the chain directory and the teleport catalog.

use serde::Deserialize;
use xt_primitives::{
    AssetRef, ChainDirectory, ChainInfo, ChainRef, Location, RegistryKey, RouteCatalog,
};
use xt_utils::to_location;

use crate::RouteError;

/// Thin view over the directory and the catalog, answering the two questions
/// the resolver and the builder ask.
pub struct Routes<'a, D, R> {
    directory: &'a D,
    catalog: &'a R,
}

impl<'a, D: ChainDirectory, R: RouteCatalog> Routes<'a, D, R> {
    pub fn new(directory: &'a D, catalog: &'a R) -> Self {
        Routes { directory, catalog }
    }

    pub fn is_teleportable(&self, origin: ChainRef, destination: ChainRef, asset: &AssetRef) -> bool {
        self.catalog
            .is_teleportable(self.directory.relay(), origin, destination, asset)
    }

    pub fn chain_info(&self, chain: ChainRef) -> Result<ChainInfo, RouteError> {
        self.directory
            .chain_info(chain)
            .ok_or(RouteError::UnknownChain(chain))
    }

    pub fn registry_key(&self, chain: ChainRef, asset: &AssetRef) -> Result<RegistryKey, RouteError> {
        self.directory
            .asset_location(chain, asset)
            .ok_or_else(|| RouteError::AssetNotRegistered {
                asset: asset.clone(),
                chain,
            })
    }

    /// Canonical location of `asset` as seen from `chain`.
    pub fn asset_location(&self, chain: ChainRef, asset: &AssetRef) -> Result<Location, RouteError> {
        self.registered_asset(chain, asset).map(|(_, location)| location)
    }

    /// Registry key of `asset` together with its location as seen from `chain`.
    pub fn registered_asset(
        &self,
        chain: ChainRef,
        asset: &AssetRef,
    ) -> Result<(RegistryKey, Location), RouteError> {
        let info = self.chain_info(chain)?;
        let key = self.registry_key(chain, asset)?;
        let location = to_location(key.junctions(), info.is_parachain, Some(chain))?;
        Ok((key, location))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeleportRoute {
    pub relay: String,
    pub origin: ChainRef,
    pub destination: ChainRef,
    pub assets: Vec<AssetRef>,
}

/// Route catalog from a fixed table. Routes are directed: a teleport from A to
/// B says nothing about B to A.
#[derive(Clone, Debug, Default)]
pub struct StaticRouteCatalog {
    routes: Vec<TeleportRoute>,
}

impl StaticRouteCatalog {
    pub fn new(routes: Vec<TeleportRoute>) -> Self {
        StaticRouteCatalog { routes }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(StaticRouteCatalog::new)
    }
}

impl RouteCatalog for StaticRouteCatalog {
    fn is_teleportable(
        &self,
        relay: &str,
        origin: ChainRef,
        destination: ChainRef,
        asset: &AssetRef,
    ) -> bool {
        self.routes.iter().any(|route| {
            route.relay == relay
                && route.origin == origin
                && route.destination == destination
                && route.assets.contains(asset)
        })
    }
}
