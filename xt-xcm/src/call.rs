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

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde_json::Value;
use sp_core::{hashing::blake2_256, H256};

use crate::instruction::{VersionedMultiAssets, VersionedMultiLocation, VersionedXcm, WeightLimit};

/// Extrinsic call of the XCM pallet that carries a transfer.
///
/// The encoded indices follow the pallet's call enum.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub enum XcmCall {
    /// Execute a message locally on the origin chain.
    #[codec(index = 3)]
    Execute {
        message: VersionedXcm,
        max_weight: u64,
    },
    #[codec(index = 8)]
    LimitedReserveTransferAssets {
        dest: VersionedMultiLocation,
        beneficiary: VersionedMultiLocation,
        assets: VersionedMultiAssets,
        fee_asset_item: u32,
        weight_limit: WeightLimit,
    },
    #[codec(index = 9)]
    LimitedTeleportAssets {
        dest: VersionedMultiLocation,
        beneficiary: VersionedMultiLocation,
        assets: VersionedMultiAssets,
        fee_asset_item: u32,
        weight_limit: WeightLimit,
    },
}

impl XcmCall {
    pub fn method(&self) -> &'static str {
        match self {
            XcmCall::Execute { .. } => "execute",
            XcmCall::LimitedReserveTransferAssets { .. } => "limitedReserveTransferAssets",
            XcmCall::LimitedTeleportAssets { .. } => "limitedTeleportAssets",
        }
    }

    /// Positional call arguments in the JSON form the chain's codec accepts.
    pub fn args(&self) -> Result<Vec<Value>, serde_json::Error> {
        match self {
            XcmCall::Execute {
                message,
                max_weight,
            } => Ok(vec![serde_json::to_value(message)?, Value::from(*max_weight)]),
            XcmCall::LimitedReserveTransferAssets {
                dest,
                beneficiary,
                assets,
                fee_asset_item,
                weight_limit,
            }
            | XcmCall::LimitedTeleportAssets {
                dest,
                beneficiary,
                assets,
                fee_asset_item,
                weight_limit,
            } => Ok(vec![
                serde_json::to_value(dest)?,
                serde_json::to_value(beneficiary)?,
                serde_json::to_value(assets)?,
                Value::from(*fee_asset_item),
                serde_json::to_value(weight_limit)?,
            ]),
        }
    }

    /// The hand-built program, for calls that carry one.
    pub fn message(&self) -> Option<&VersionedXcm> {
        match self {
            XcmCall::Execute { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn message_hash(&self) -> H256 {
        self.using_encoded(|encoded| H256(blake2_256(encoded)))
    }
}
