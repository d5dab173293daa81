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

//! Cross-chain transfer programs: classify a transfer, then compile it into
//! the XCM pallet call that carries it out.

use sp_core::{ConstU128, ConstU32, ConstU64};
use xt_primitives::{AssetRef, ChainRef, LocationError};

pub mod builder;
pub mod call;
pub mod instruction;
pub mod routes;
pub mod scenario;

pub use builder::{ProgramBuilder, ProgramConfig, TransferPlan, PLACEHOLDER_EXECUTION_FEE};
pub use call::XcmCall;
pub use instruction::{
    AssetId, Fungibility, Instruction, MultiAsset, MultiAssetFilter, VersionedMultiAssets,
    VersionedMultiLocation, VersionedXcm, WeightLimit, WildMultiAsset, Xcm,
};
pub use routes::{Routes, StaticRouteCatalog, TeleportRoute};
pub use scenario::{ReserveResolver, TransferScenario};

/// `max_weight` of the local `execute` call.
pub const DEFAULT_MAX_EXECUTE_WEIGHT: u64 = 1_000_000_000;

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum RouteError {
    #[error("unsupported route from chain {origin} to chain {destination}")]
    Unsupported {
        origin: ChainRef,
        destination: ChainRef,
    },
    #[error("chain {0} is not in the directory")]
    UnknownChain(ChainRef),
    #[error("asset {asset} is not registered on chain {chain}")]
    AssetNotRegistered { asset: AssetRef, chain: ChainRef },
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Program parameters used unless the host overrides them.
pub struct DefaultProgramConfig;

impl ProgramConfig for DefaultProgramConfig {
    type ExecutionFee = ConstU128<PLACEHOLDER_EXECUTION_FEE>;
    type MaxExecuteWeight = ConstU64<DEFAULT_MAX_EXECUTE_WEIGHT>;
    type MaxAssets = ConstU32<1>;
}
