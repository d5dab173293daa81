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

//! Transfer topology classification.

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use xt_primitives::{AssetRef, ChainDirectory, ChainRef, RouteCatalog};

use crate::{routes::Routes, RouteError};

/// How an asset travels from origin to destination.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo)]
pub enum TransferScenario {
    /// Origin and destination are the same chain
    Local,
    /// The route is trusted for teleports
    Teleport,
    /// The origin is the asset's reserve
    FromReserve,
    /// The destination is the asset's reserve
    ToReserve,
    /// Two hops through a reserve that is neither origin nor destination
    AcrossReserve(ChainRef),
}

pub struct ReserveResolver;

impl ReserveResolver {
    /// Picks exactly one scenario. Checks run in order, first match wins:
    /// same chain, teleport route from the catalog, reserve is origin,
    /// reserve is destination, otherwise two hops through the reserve.
    ///
    /// Teleport eligibility only ever comes from the catalog. Without a
    /// reserve chain the last three checks cannot run.
    pub fn resolve<D: ChainDirectory, R: RouteCatalog>(
        routes: &Routes<'_, D, R>,
        origin: ChainRef,
        destination: ChainRef,
        asset: &AssetRef,
        reserve_hint: Option<ChainRef>,
    ) -> Result<TransferScenario, RouteError> {
        let scenario = if origin == destination {
            TransferScenario::Local
        } else if routes.is_teleportable(origin, destination, asset) {
            TransferScenario::Teleport
        } else {
            match reserve_hint {
                Some(reserve) if reserve == origin => TransferScenario::FromReserve,
                Some(reserve) if reserve == destination => TransferScenario::ToReserve,
                Some(reserve) => TransferScenario::AcrossReserve(reserve),
                None => {
                    return Err(RouteError::Unsupported {
                        origin,
                        destination,
                    })
                }
            }
        };

        log::debug!(
            target: "xt_xcm",
            "Route {} -> {} for {} resolved to {:?}",
            origin,
            destination,
            asset,
            scenario
        );
        Ok(scenario)
    }
}
