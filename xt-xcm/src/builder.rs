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

//! Compiles a classified transfer into the extrinsic call that performs it.
//!
//! Teleports and transfers out of the reserve use the pallet's own limited
//! transfer calls. Everything else is a hand-built program executed on the
//! origin chain:
//!
//! - `Local`: one `TransferAsset`, which every XCM-capable chain executes the
//!   same way, unlike the native transfer call whose pallet differs per chain.
//! - `ToReserve`: withdraw on origin, then ask the destination (the reserve)
//!   to release the backing assets to the beneficiary.
//! - `AcrossReserve`: withdraw on origin, release on the reserve, then
//!   forward to the destination as a reserve deposit.

use sp_core::Get;
use std::marker::PhantomData;
use xt_primitives::{AccountType, ChainRef, Location, XcmBalance, RELAY_CHAIN};
use xt_utils::{beneficiary, chain_location, reframe_from_reserve_own_perspective};

use crate::{
    call::XcmCall,
    instruction::{
        Instruction::{self, *},
        MultiAsset, MultiAssetFilter, VersionedMultiAssets,
        VersionedMultiLocation, VersionedXcm, WeightLimit, Xcm,
    },
    scenario::TransferScenario,
};

/// Fee bought with `BuyExecution` on the reserve chain. This is a fixed
/// placeholder, not a weight-to-fee conversion.
pub const PLACEHOLDER_EXECUTION_FEE: XcmBalance = 450_000_000_000;

pub trait ProgramConfig {
    /// Amount handed to `BuyExecution` inside the reserve's program.
    type ExecutionFee: Get<XcmBalance>;
    /// `max_weight` argument of the local `execute` call.
    type MaxExecuteWeight: Get<u64>;
    /// `maxAssets` of every deposit instruction.
    type MaxAssets: Get<u32>;
}

/// One transfer, resolved against the chain directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPlan {
    pub origin: ChainRef,
    pub origin_is_parachain: bool,
    pub destination: ChainRef,
    /// Asset location as seen by the origin chain
    pub asset: Location,
    pub amount: XcmBalance,
    pub beneficiary: AccountType,
}

impl TransferPlan {
    fn asset(&self) -> MultiAsset {
        MultiAsset::fungible(self.asset.clone(), self.amount)
    }

    fn beneficiary(&self) -> Location {
        beneficiary(&self.beneficiary)
    }
}

pub struct ProgramBuilder<T>(PhantomData<T>);

impl<T: ProgramConfig> ProgramBuilder<T> {
    pub fn build(scenario: TransferScenario, plan: &TransferPlan) -> XcmCall {
        let call = match scenario {
            TransferScenario::Local => Self::execute(Self::local_program(plan)),
            TransferScenario::Teleport => {
                let (dest, beneficiary, assets) = Self::limited_transfer_params(plan);
                XcmCall::LimitedTeleportAssets {
                    dest,
                    beneficiary,
                    assets,
                    fee_asset_item: 0,
                    weight_limit: WeightLimit::Unlimited,
                }
            }
            TransferScenario::FromReserve => {
                let (dest, beneficiary, assets) = Self::limited_transfer_params(plan);
                XcmCall::LimitedReserveTransferAssets {
                    dest,
                    beneficiary,
                    assets,
                    fee_asset_item: 0,
                    weight_limit: WeightLimit::Unlimited,
                }
            }
            TransferScenario::ToReserve => Self::execute(Self::to_reserve_program(plan)),
            TransferScenario::AcrossReserve(reserve) => {
                Self::execute(Self::across_reserve_program(plan, reserve))
            }
        };

        log::trace!(
            target: "xt_xcm",
            "Built {} for {:?} {} -> {}: {:?}",
            call.method(),
            scenario,
            plan.origin,
            plan.destination,
            call
        );
        call
    }

    pub fn local_program(plan: &TransferPlan) -> Xcm {
        Xcm(vec![TransferAsset {
            assets: vec![plan.asset()],
            beneficiary: plan.beneficiary(),
        }])
    }

    /// The destination is the asset's reserve.
    pub fn to_reserve_program(plan: &TransferPlan) -> Xcm {
        let reserve = plan.destination;
        Xcm(vec![
            WithdrawAsset(vec![plan.asset()]),
            InitiateReserveWithdraw {
                assets: MultiAssetFilter::all(),
                reserve: chain_location(plan.origin_is_parachain, reserve),
                xcm: Xcm(vec![
                    Self::buy_execution_on_reserve(plan, reserve),
                    DepositAsset {
                        assets: MultiAssetFilter::all(),
                        max_assets: T::MaxAssets::get(),
                        beneficiary: plan.beneficiary(),
                    },
                ]),
            },
        ])
    }

    /// Neither origin nor destination is the asset's reserve.
    pub fn across_reserve_program(plan: &TransferPlan, reserve: ChainRef) -> Xcm {
        Xcm(vec![
            WithdrawAsset(vec![plan.asset()]),
            InitiateReserveWithdraw {
                assets: MultiAssetFilter::all(),
                reserve: chain_location(plan.origin_is_parachain, reserve),
                xcm: Xcm(vec![
                    Self::buy_execution_on_reserve(plan, reserve),
                    DepositReserveAsset {
                        assets: MultiAssetFilter::all(),
                        max_assets: T::MaxAssets::get(),
                        dest: chain_location(reserve != RELAY_CHAIN, plan.destination),
                        xcm: Xcm(vec![DepositAsset {
                            assets: MultiAssetFilter::all(),
                            max_assets: T::MaxAssets::get(),
                            beneficiary: plan.beneficiary(),
                        }]),
                    },
                ]),
            },
        ])
    }

    fn buy_execution_on_reserve(plan: &TransferPlan, reserve: ChainRef) -> Instruction {
        BuyExecution {
            fees: MultiAsset::fungible(
                reframe_from_reserve_own_perspective(&plan.asset, reserve),
                T::ExecutionFee::get(),
            ),
            weight_limit: WeightLimit::Unlimited,
        }
    }

    fn limited_transfer_params(
        plan: &TransferPlan,
    ) -> (VersionedMultiLocation, VersionedMultiLocation, VersionedMultiAssets) {
        (
            VersionedMultiLocation::V2(chain_location(plan.origin_is_parachain, plan.destination)),
            VersionedMultiLocation::V2(plan.beneficiary()),
            VersionedMultiAssets::V2(vec![plan.asset()]),
        )
    }

    fn execute(program: Xcm) -> XcmCall {
        XcmCall::Execute {
            message: VersionedXcm::V2(program),
            max_weight: T::MaxExecuteWeight::get(),
        }
    }
}
