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

#![cfg(test)]

use super::*;
use hex_literal::hex;
use sp_core::{ConstU128, ConstU32, ConstU64};
use std::cell::RefCell;
use xt_primitives::{AccountType, StaticChainDirectory};
use xt_xcm::{StaticRouteCatalog, PLACEHOLDER_EXECUTION_FEE};

pub const POLKADOT: ChainRef = 0;
pub const ASSET_HUB: ChainRef = 1000;
pub const ACALA: ChainRef = 2000;
pub const PARALLEL: ChainRef = 2012;
pub const MOONBEAM: ChainRef = 2004;
pub const NO_XCM: ChainRef = 2094;

pub const ALICE: [u8; 32] = hex!("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d");
pub const BOB: [u8; 32] = hex!("8eaf04151687736326c9fea17e25fc5287613693c912909cb226aa4794f26a48");
pub const BALTATHAR: [u8; 20] = hex!("3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0");

pub const FINALIZED_BLOCK: H256 = H256([7u8; 32]);

pub const DIRECTORY: &str = r#"{
    "relay": "polkadot",
    "chains": [
        { "id": 0, "isParachain": false, "xcmPallet": "xcmPallet" },
        { "id": 1000, "isParachain": true, "xcmPallet": "polkadotXcm" },
        { "id": 2000, "isParachain": true, "xcmPallet": "polkadotXcm" },
        { "id": 2004, "isParachain": true, "xcmPallet": "polkadotXcm" },
        { "id": 2012, "isParachain": true, "xcmPallet": "polkadotXcm" },
        { "id": 2094, "isParachain": true }
    ],
    "assets": [
        {
            "symbol": "DOT",
            "decimals": 10,
            "location": [{ "network": "polkadot" }, "here"],
            "chains": [0, 1000, 2000, 2004, 2012, 2094]
        },
        {
            "symbol": "ACA",
            "decimals": 12,
            "location": [{ "network": "polkadot" }, { "parachain": 2000 }, { "generalKey": "0x0000" }],
            "chains": [2000, 2004, 2012]
        },
        {
            "symbol": "MISKEYED",
            "decimals": 12,
            "location": [{ "network": "polkadot" }, { "parachain": 2000 }, { "network": "kusama" }],
            "chains": [2000]
        }
    ]
}"#;

pub const ROUTES: &str = r#"[
    { "relay": "polkadot", "origin": 0, "destination": 1000, "assets": ["DOT"] },
    { "relay": "polkadot", "origin": 1000, "destination": 0, "assets": ["DOT"] }
]"#;

pub struct Test;

impl ProgramConfig for Test {
    type ExecutionFee = ConstU128<PLACEHOLDER_EXECUTION_FEE>;
    type MaxExecuteWeight = ConstU64<1_000_000_000>;
    type MaxAssets = ConstU32<1>;
}

impl Config for Test {
    type Directory = StaticChainDirectory;
    type Routes = StaticRouteCatalog;
    type Connector = ConnectorMock;
}

pub struct Submission {
    pub chain: ChainRef,
    pub pallet: XcmPallet,
    pub call: XcmCall,
    pub signer: AccountType,
}

thread_local! {
    pub static OPENED_CONNECTIONS: RefCell<Vec<ChainRef>> = RefCell::new(Vec::new());
    pub static SUBMISSIONS: RefCell<Vec<Submission>> = RefCell::new(Vec::new());
    pub static UNREACHABLE: RefCell<Vec<ChainRef>> = RefCell::new(Vec::new());
    pub static SUBMIT_OUTCOME: RefCell<Option<SubmitError>> = RefCell::new(None);
}

pub struct ConnectorMock;

impl ConnectorMock {
    pub fn set_unreachable(chain: ChainRef) {
        UNREACHABLE.with(|chains| chains.borrow_mut().push(chain));
    }

    pub fn fail_next_submit(error: SubmitError) {
        SUBMIT_OUTCOME.with(|outcome| *outcome.borrow_mut() = Some(error));
    }

    pub fn opened() -> Vec<ChainRef> {
        OPENED_CONNECTIONS.with(|opened| opened.borrow().clone())
    }

    pub fn submitted_calls() -> Vec<(ChainRef, XcmPallet, XcmCall)> {
        SUBMISSIONS.with(|submissions| {
            submissions
                .borrow()
                .iter()
                .map(|s| (s.chain, s.pallet, s.call.clone()))
                .collect()
        })
    }

    pub fn last_signer() -> Option<AccountType> {
        SUBMISSIONS.with(|submissions| submissions.borrow().last().map(|s| s.signer.clone()))
    }
}

#[async_trait]
impl ChainConnector for ConnectorMock {
    type Signer = AccountType;
    type Connection = ConnectionMock;

    async fn connect(&self, chain: ChainRef) -> Result<ConnectionMock, ConnectionError> {
        OPENED_CONNECTIONS.with(|opened| opened.borrow_mut().push(chain));
        if UNREACHABLE.with(|chains| chains.borrow().contains(&chain)) {
            return Err(ConnectionError {
                chain,
                reason: "websocket closed".into(),
            });
        }
        Ok(ConnectionMock { chain })
    }
}

pub struct ConnectionMock {
    chain: ChainRef,
}

#[async_trait]
impl ChainConnection for ConnectionMock {
    type Signer = AccountType;

    async fn submit_and_watch(
        &mut self,
        pallet: XcmPallet,
        call: &XcmCall,
        signer: &AccountType,
    ) -> Result<Finalized, SubmitError> {
        SUBMISSIONS.with(|submissions| {
            submissions.borrow_mut().push(Submission {
                chain: self.chain,
                pallet,
                call: call.clone(),
                signer: signer.clone(),
            })
        });
        match SUBMIT_OUTCOME.with(|outcome| outcome.borrow_mut().take()) {
            Some(error) => Err(error),
            None => Ok(Finalized {
                block_hash: FINALIZED_BLOCK,
            }),
        }
    }
}

pub fn new_dispatcher() -> TransferDispatcher<Test> {
    OPENED_CONNECTIONS.with(|opened| opened.borrow_mut().clear());
    SUBMISSIONS.with(|submissions| submissions.borrow_mut().clear());
    UNREACHABLE.with(|chains| chains.borrow_mut().clear());
    SUBMIT_OUTCOME.with(|outcome| *outcome.borrow_mut() = None);

    TransferDispatcher::new(
        StaticChainDirectory::from_json(DIRECTORY).unwrap(),
        StaticRouteCatalog::from_json(ROUTES).unwrap(),
        ConnectorMock,
    )
}
