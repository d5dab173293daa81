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

//! Top-level entry point for cross-chain token transfers.
//!
//! [`TransferDispatcher::send_tokens`] validates the request, classifies the
//! route, compiles the pallet call, submits it on the origin chain and waits
//! for finality. Chain data and connections are injected through [`Config`].

use async_trait::async_trait;
use sp_core::H256;
use xt_primitives::{
    AssetRef, ChainDirectory, ChainRef, RouteCatalog, TransferParty, XcmBalance, XcmPallet,
};
use xt_utils::{plancks_to_units, reserve_chain, units_to_plancks};
use xt_xcm::{
    ProgramBuilder, ProgramConfig, ReserveResolver, Routes, TransferPlan, TransferScenario,
    XcmCall,
};

mod error;
mod mock;
mod tests;

pub use error::{
    ConnectionError, DispatchFailure, Error, ErrorKind, SubmitError, UnsupportedRoute,
    ValidationError,
};

pub trait Config: ProgramConfig {
    type Directory: ChainDirectory;
    type Routes: RouteCatalog;
    type Connector: ChainConnector;
}

/// Opens connections to chains by id.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    type Signer: Send + Sync;
    type Connection: ChainConnection<Signer = Self::Signer>;

    async fn connect(&self, chain: ChainRef) -> Result<Self::Connection, ConnectionError>;
}

/// Live connection to one chain, used by a single transfer at a time.
#[async_trait]
pub trait ChainConnection: Send {
    type Signer: Send + Sync;

    /// Signs and submits `call` on `pallet`, resolving once the block that
    /// includes it is finalized. Never times out.
    async fn submit_and_watch(
        &mut self,
        pallet: XcmPallet,
        call: &XcmCall,
        signer: &Self::Signer,
    ) -> Result<Finalized, SubmitError>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Finalized {
    pub block_hash: H256,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransferReceipt {
    pub scenario: TransferScenario,
    pub call: XcmCall,
    /// `blake2_256` of the SCALE-encoded call
    pub message_hash: H256,
    pub finalized_block: H256,
}

pub type SignerOf<T> = <<T as Config>::Connector as ChainConnector>::Signer;

pub struct TransferDispatcher<T: Config> {
    directory: T::Directory,
    routes: T::Routes,
    connector: T::Connector,
}

impl<T: Config> TransferDispatcher<T> {
    pub fn new(directory: T::Directory, routes: T::Routes, connector: T::Connector) -> Self {
        TransferDispatcher {
            directory,
            routes,
            connector,
        }
    }

    /// Parses a human amount such as `"1.5"` with the asset's precision.
    pub fn parse_amount(&self, asset: &AssetRef, units: &str) -> Result<XcmBalance, ValidationError> {
        self.directory
            .asset_decimals(asset)
            .and_then(|decimals| units_to_plancks(units, decimals))
            .ok_or_else(|| ValidationError::InvalidAmount(units.into()))
    }

    pub fn format_amount(&self, asset: &AssetRef, amount: XcmBalance) -> Option<String> {
        plancks_to_units(amount, self.directory.asset_decimals(asset)?)
    }

    /// Moves `amount` of `asset` from `sender` to `receiver`.
    ///
    /// Without `reserve_hint` the reserve is read off the asset's registry
    /// key. A hint that disagrees with the registry is honoured.
    pub async fn send_tokens(
        &self,
        sender: &TransferParty,
        signer: &SignerOf<T>,
        receiver: &TransferParty,
        reserve_hint: Option<ChainRef>,
        asset: &AssetRef,
        amount: XcmBalance,
    ) -> Result<TransferReceipt, Error> {
        Self::validate(sender, receiver, amount)?;

        let routes = Routes::new(&self.directory, &self.routes);
        let origin = routes.chain_info(sender.chain)?;
        let pallet = origin
            .xcm_pallet
            .ok_or(UnsupportedRoute::NoXcmCapability {
                chain: sender.chain,
            })?;
        if sender.chain != receiver.chain && !routes.chain_info(receiver.chain)?.has_xcm_capability()
        {
            return Err(UnsupportedRoute::NoXcmCapability {
                chain: receiver.chain,
            }
            .into());
        }

        let (key, asset_location) = routes.registered_asset(sender.chain, asset)?;
        let reserve = Self::reserve(reserve_hint, reserve_chain(key.path()), asset);

        let scenario =
            ReserveResolver::resolve(&routes, sender.chain, receiver.chain, asset, Some(reserve))?;
        let plan = TransferPlan {
            origin: sender.chain,
            origin_is_parachain: origin.is_parachain,
            destination: receiver.chain,
            asset: asset_location,
            amount,
            beneficiary: receiver.account.clone(),
        };
        let call = ProgramBuilder::<T>::build(scenario, &plan);
        let message_hash = call.message_hash();

        let mut connection = self.connector.connect(sender.chain).await?;
        log::info!(
            target: "xt_dispatcher",
            "Submitting {}.{} on chain {}: {} {} to chain {} ({:?}), hash {:?}",
            pallet.name(),
            call.method(),
            sender.chain,
            amount,
            asset,
            receiver.chain,
            scenario,
            message_hash
        );

        let finalized = connection
            .submit_and_watch(pallet, &call, signer)
            .await
            .map_err(|error| {
                log::error!(
                    target: "xt_dispatcher",
                    "Transfer {:?} on chain {} failed: {}",
                    message_hash,
                    sender.chain,
                    error
                );
                error.on_chain(sender.chain)
            })?;

        log::info!(
            target: "xt_dispatcher",
            "Transfer {:?} finalized in block {:?}",
            message_hash,
            finalized.block_hash
        );

        Ok(TransferReceipt {
            scenario,
            call,
            message_hash,
            finalized_block: finalized.block_hash,
        })
    }

    fn validate(
        sender: &TransferParty,
        receiver: &TransferParty,
        amount: XcmBalance,
    ) -> Result<(), ValidationError> {
        if sender.is_same_account(receiver) {
            return Err(ValidationError::SelfTransfer);
        }
        if amount == 0 {
            return Err(ValidationError::ZeroAmount);
        }
        Ok(())
    }

    fn reserve(hint: Option<ChainRef>, registered: ChainRef, asset: &AssetRef) -> ChainRef {
        match hint {
            Some(hint) if hint != registered => {
                log::warn!(
                    target: "xt_dispatcher",
                    "Reserve hint {} for {} disagrees with registered reserve {}",
                    hint,
                    asset,
                    registered
                );
                hint
            }
            Some(hint) => hint,
            None => registered,
        }
    }
}
