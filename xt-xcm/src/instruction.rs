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

//! Instruction set of the version 2 cross-consensus message format, limited
//! to what asset transfers use. Field names serialize exactly as the
//! executor's JSON codec expects them.

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use xt_primitives::{Location, XcmBalance};

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum AssetId {
    Concrete(Location),
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum Fungibility {
    Fungible(#[codec(compact)] #[serde(with = "xt_primitives::serde_u128")] XcmBalance),
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub struct MultiAsset {
    pub id: AssetId,
    pub fun: Fungibility,
}

impl MultiAsset {
    pub fn fungible(location: Location, amount: XcmBalance) -> Self {
        MultiAsset {
            id: AssetId::Concrete(location),
            fun: Fungibility::Fungible(amount),
        }
    }
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum WildMultiAsset {
    All,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum MultiAssetFilter {
    Definite(Vec<MultiAsset>),
    Wild(WildMultiAsset),
}

impl MultiAssetFilter {
    /// Everything in the holding register.
    pub const fn all() -> Self {
        MultiAssetFilter::Wild(WildMultiAsset::All)
    }
}

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum WeightLimit {
    Unlimited,
    Limited(#[codec(compact)] u64),
}

/// Subset of the V2 instruction set, encoded with the V2 indices.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum Instruction {
    /// Move assets from the origin's account into the holding register.
    #[codec(index = 0)]
    WithdrawAsset(Vec<MultiAsset>),
    /// Burn holding on this chain and ask `reserve` to release the backing
    /// assets and run `xcm` with them.
    #[codec(index = 16)]
    InitiateReserveWithdraw {
        assets: MultiAssetFilter,
        reserve: Location,
        xcm: Xcm,
    },
    #[codec(index = 19)]
    BuyExecution {
        fees: MultiAsset,
        #[serde(rename = "weightLimit")]
        weight_limit: WeightLimit,
    },
    /// Deposit holding into `dest`'s sovereign account and send `xcm` there.
    #[codec(index = 14)]
    DepositReserveAsset {
        assets: MultiAssetFilter,
        #[codec(compact)]
        #[serde(rename = "maxAssets")]
        max_assets: u32,
        dest: Location,
        xcm: Xcm,
    },
    #[codec(index = 13)]
    DepositAsset {
        assets: MultiAssetFilter,
        #[codec(compact)]
        #[serde(rename = "maxAssets")]
        max_assets: u32,
        beneficiary: Location,
    },
    #[codec(index = 4)]
    TransferAsset {
        assets: Vec<MultiAsset>,
        beneficiary: Location,
    },
}

/// Ordered instruction program.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default, TypeInfo, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xcm(pub Vec<Instruction>);

impl Xcm {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }
}

impl From<Vec<Instruction>> for Xcm {
    fn from(instructions: Vec<Instruction>) -> Self {
        Xcm(instructions)
    }
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum VersionedXcm {
    #[codec(index = 2)]
    V2(Xcm),
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum VersionedMultiLocation {
    #[codec(index = 1)]
    V2(Location),
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum VersionedMultiAssets {
    #[codec(index = 1)]
    V2(Vec<MultiAsset>),
}
