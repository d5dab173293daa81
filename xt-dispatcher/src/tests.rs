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
use crate::mock::*;
use futures::executor::block_on;
use serde_json::json;
use xt_primitives::{AccountType, Junction, Junctions::*, Location, LocationError};
use xt_utils::beneficiary;
use xt_xcm::{
    Instruction, MultiAsset, RouteError, VersionedMultiAssets, VersionedMultiLocation,
    VersionedXcm, WeightLimit,
};

fn alice(chain: ChainRef) -> TransferParty {
    TransferParty::new(chain, AccountType::Id32(ALICE))
}

fn bob(chain: ChainRef) -> TransferParty {
    TransferParty::new(chain, AccountType::Id32(BOB))
}

fn send(
    dispatcher: &TransferDispatcher<Test>,
    sender: TransferParty,
    receiver: TransferParty,
    reserve_hint: Option<ChainRef>,
    asset: &str,
    amount: XcmBalance,
) -> Result<TransferReceipt, Error> {
    block_on(dispatcher.send_tokens(
        &sender,
        &sender.account,
        &receiver,
        reserve_hint,
        &AssetRef::from(asset),
        amount,
    ))
}

#[test]
fn self_transfer_rejected_before_connecting() {
    let dispatcher = new_dispatcher();
    let result = send(&dispatcher, alice(ACALA), alice(ACALA), None, "ACA", 100);

    assert_eq!(result, Err(Error::Validation(ValidationError::SelfTransfer)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "cannot send tokens to yourself"
    );
    assert!(ConnectorMock::opened().is_empty());
    assert!(ConnectorMock::submitted_calls().is_empty());
}

#[test]
fn same_account_on_another_chain_is_allowed() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(ACALA), alice(MOONBEAM), None, "ACA", 100).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::FromReserve);
    assert_eq!(ConnectorMock::opened(), vec![ACALA]);
}

#[test]
fn zero_amount_rejected() {
    let dispatcher = new_dispatcher();
    let result = send(&dispatcher, alice(ACALA), bob(MOONBEAM), None, "ACA", 0);

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    assert!(ConnectorMock::opened().is_empty());
}

#[test]
fn origin_without_xcm_pallet() {
    let dispatcher = new_dispatcher();
    let error = send(&dispatcher, alice(NO_XCM), bob(ACALA), None, "DOT", 10).unwrap_err();

    assert_eq!(
        error,
        Error::UnsupportedRoute(UnsupportedRoute::NoXcmCapability { chain: NO_XCM })
    );
    assert_eq!(error.to_string(), "blockchain does not support XCM");
    assert!(ConnectorMock::opened().is_empty());
}

#[test]
fn destination_without_xcm_pallet() {
    let dispatcher = new_dispatcher();
    let error = send(&dispatcher, alice(ACALA), bob(NO_XCM), None, "DOT", 10).unwrap_err();

    assert_eq!(
        error,
        Error::UnsupportedRoute(UnsupportedRoute::NoXcmCapability { chain: NO_XCM })
    );
}

#[test]
fn unknown_chain_and_unregistered_asset() {
    let dispatcher = new_dispatcher();

    assert_eq!(
        send(&dispatcher, alice(3000), bob(ACALA), None, "DOT", 10),
        Err(Error::UnsupportedRoute(UnsupportedRoute::Route(
            RouteError::UnknownChain(3000)
        )))
    );
    assert_eq!(
        send(&dispatcher, alice(POLKADOT), bob(ACALA), None, "ACA", 10),
        Err(Error::UnsupportedRoute(UnsupportedRoute::Route(
            RouteError::AssetNotRegistered {
                asset: AssetRef::from("ACA"),
                chain: POLKADOT,
            }
        )))
    );
    assert!(ConnectorMock::opened().is_empty());
}

#[test]
fn teleport_from_relay() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(POLKADOT), bob(ASSET_HUB), None, "DOT", 10_000_000_000).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::Teleport);
    assert_eq!(
        receipt.call,
        XcmCall::LimitedTeleportAssets {
            dest: VersionedMultiLocation::V2(Location::new(0, X1(Junction::Parachain(ASSET_HUB)))),
            beneficiary: VersionedMultiLocation::V2(beneficiary(&AccountType::Id32(BOB))),
            assets: VersionedMultiAssets::V2(vec![MultiAsset::fungible(
                Location::here(),
                10_000_000_000
            )]),
            fee_asset_item: 0,
            weight_limit: WeightLimit::Unlimited,
        }
    );
    assert_eq!(
        ConnectorMock::submitted_calls(),
        vec![(POLKADOT, XcmPallet::XcmPallet, receipt.call.clone())]
    );
    assert_eq!(ConnectorMock::last_signer(), Some(AccountType::Id32(ALICE)));
}

#[test]
fn teleport_back_to_relay() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(ASSET_HUB), bob(POLKADOT), None, "DOT", 10).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::Teleport);
    assert_eq!(
        receipt.call.args().unwrap()[0],
        json!({ "V2": { "parents": 1, "interior": "Here" } })
    );
    assert_eq!(
        ConnectorMock::submitted_calls()[0].1,
        XcmPallet::PolkadotXcm
    );
}

#[test]
fn malformed_registry_key_is_validation_error() {
    let dispatcher = new_dispatcher();
    let error = send(&dispatcher, alice(ACALA), bob(MOONBEAM), None, "MISKEYED", 1).unwrap_err();

    assert_eq!(
        error,
        Error::Validation(ValidationError::Location(LocationError::Malformed))
    );
    assert!(ConnectorMock::opened().is_empty());
}

#[test]
fn relay_token_from_and_to_relay() {
    let dispatcher = new_dispatcher();

    let receipt = send(&dispatcher, alice(POLKADOT), bob(ACALA), None, "DOT", 10).unwrap();
    assert_eq!(receipt.scenario, TransferScenario::FromReserve);
    assert_eq!(receipt.call.method(), "limitedReserveTransferAssets");

    let receipt = send(&dispatcher, alice(ACALA), bob(POLKADOT), None, "DOT", 10).unwrap();
    assert_eq!(receipt.scenario, TransferScenario::ToReserve);
    assert_eq!(receipt.call.method(), "execute");
    assert_eq!(
        ConnectorMock::submitted_calls()[1].1,
        XcmPallet::PolkadotXcm
    );
}

#[test]
fn relay_token_between_parachains_goes_through_relay() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(ACALA), bob(MOONBEAM), None, "DOT", 10).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::AcrossReserve(POLKADOT));
    let message = serde_json::to_value(receipt.call.message().unwrap()).unwrap();
    assert_eq!(
        message["V2"][1]["InitiateReserveWithdraw"]["reserve"],
        json!({ "parents": 1, "interior": "Here" })
    );
    assert_eq!(
        message["V2"][1]["InitiateReserveWithdraw"]["xcm"][1]["DepositReserveAsset"]["dest"],
        json!({ "parents": 0, "interior": { "X1": { "Parachain": 2004 } } })
    );
}

#[test]
fn local_transfer_is_transfer_asset() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(ACALA), bob(ACALA), None, "ACA", 5).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::Local);
    assert_eq!(
        receipt.call.message(),
        Some(&VersionedXcm::V2(
            vec![Instruction::TransferAsset {
                assets: vec![MultiAsset::fungible(
                    Location::new(0, X1(Junction::GeneralKey(vec![0, 0]))),
                    5
                )],
                beneficiary: beneficiary(&AccountType::Id32(BOB)),
            }]
            .into()
        ))
    );
}

#[test]
fn parachain_token_across_its_reserve() {
    let dispatcher = new_dispatcher();
    let receiver = TransferParty::new(PARALLEL, AccountType::Key20(BALTATHAR));
    let receipt = send(&dispatcher, alice(MOONBEAM), receiver, None, "ACA", 200).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::AcrossReserve(ACALA));
    let message = serde_json::to_value(receipt.call.message().unwrap()).unwrap();
    assert_eq!(
        message["V2"][0]["WithdrawAsset"][0]["id"],
        json!({ "Concrete": {
            "parents": 1,
            "interior": { "X2": [ { "Parachain": 2000 }, { "GeneralKey": "0x0000" } ] }
        } })
    );
    let inner = &message["V2"][1]["InitiateReserveWithdraw"];
    assert_eq!(
        inner["reserve"],
        json!({ "parents": 1, "interior": { "X1": { "Parachain": 2000 } } })
    );
    assert_eq!(
        inner["xcm"][0]["BuyExecution"]["fees"],
        json!({
            "id": { "Concrete": { "parents": 0, "interior": { "X1": { "GeneralKey": "0x0000" } } } },
            "fun": { "Fungible": 450_000_000_000u64 }
        })
    );
    assert_eq!(
        inner["xcm"][1]["DepositReserveAsset"]["dest"],
        json!({ "parents": 1, "interior": { "X1": { "Parachain": 2012 } } })
    );
    assert_eq!(
        inner["xcm"][1]["DepositReserveAsset"]["xcm"][0]["DepositAsset"]["beneficiary"],
        json!({ "parents": 0, "interior": { "X1": { "AccountKey20": {
            "network": "Any",
            "key": "0x3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0"
        } } } })
    );
}

#[test]
fn reserve_hint_is_honoured() {
    let dispatcher = new_dispatcher();

    let receipt = send(&dispatcher, alice(MOONBEAM), bob(PARALLEL), Some(ACALA), "ACA", 1).unwrap();
    assert_eq!(receipt.scenario, TransferScenario::AcrossReserve(ACALA));

    // disagrees with the registry, still wins
    let receipt = send(&dispatcher, alice(MOONBEAM), bob(PARALLEL), Some(MOONBEAM), "ACA", 1).unwrap();
    assert_eq!(receipt.scenario, TransferScenario::FromReserve);
}

#[test]
fn dispatch_error_carries_chain_payload() {
    let dispatcher = new_dispatcher();
    let payload = json!({ "Module": { "index": 31, "error": "0x0d000000" } });
    ConnectorMock::fail_next_submit(SubmitError::Dispatch(payload.clone()));

    let error = send(&dispatcher, alice(ACALA), bob(MOONBEAM), None, "ACA", 1).unwrap_err();

    assert_eq!(
        error,
        Error::Dispatch(DispatchFailure {
            chain: ACALA,
            payload
        })
    );
    assert_eq!(error.kind(), ErrorKind::Dispatch);
    assert_eq!(ConnectorMock::submitted_calls().len(), 1);
}

#[test]
fn connection_errors() {
    let dispatcher = new_dispatcher();
    ConnectorMock::set_unreachable(ACALA);

    let error = send(&dispatcher, alice(ACALA), bob(MOONBEAM), None, "ACA", 1).unwrap_err();
    assert_eq!(
        error,
        Error::Connection(ConnectionError {
            chain: ACALA,
            reason: "websocket closed".into()
        })
    );
    assert!(ConnectorMock::submitted_calls().is_empty());

    ConnectorMock::fail_next_submit(SubmitError::Connection("subscription dropped".into()));
    let error = send(&dispatcher, alice(MOONBEAM), bob(ACALA), None, "ACA", 1).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Connection);
}

#[test]
fn receipt_identifies_message() {
    let dispatcher = new_dispatcher();
    let receipt = send(&dispatcher, alice(MOONBEAM), bob(ACALA), None, "ACA", 1).unwrap();

    assert_eq!(receipt.scenario, TransferScenario::ToReserve);
    assert_eq!(receipt.message_hash, receipt.call.message_hash());
    assert_eq!(receipt.finalized_block, FINALIZED_BLOCK);
}

#[test]
fn amounts_use_asset_precision() {
    let dispatcher = new_dispatcher();
    let dot = AssetRef::from("DOT");

    assert_eq!(dispatcher.parse_amount(&dot, "1.5"), Ok(15_000_000_000));
    assert_eq!(
        dispatcher.parse_amount(&AssetRef::from("GLMR"), "1"),
        Err(ValidationError::InvalidAmount("1".into()))
    );
    assert_eq!(
        dispatcher.parse_amount(&dot, "1,5"),
        Err(ValidationError::InvalidAmount("1,5".into()))
    );
    assert_eq!(
        dispatcher.format_amount(&AssetRef::from("ACA"), 1_250_000_000_000),
        Some("1.25".into())
    );
}
