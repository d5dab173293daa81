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

//! Location algebra: turning registry keys into protocol locations and
//! re-expressing a location from one chain's point of view to another's.

use xt_primitives::{
    AccountType, ChainRef, Junction, Junctions, Location, LocationError, XcmBalance, RELAY_CHAIN,
};

/// Interior of a location with the `X<N>` tag stripped off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interior {
    Here,
    Junctions(Vec<Junction>),
}

/// Converts a registry key into a location as seen by the viewer chain.
///
/// The leading network junction is metadata and is dropped. A chain does not
/// name itself in its own frame, so a leading `Parachain(viewer_chain)` is
/// dropped as well and the result has no parents. A network junction
/// anywhere past the front makes the key malformed.
pub fn to_location(
    registry_key: &[Junction],
    viewer_is_parachain: bool,
    viewer_chain: Option<ChainRef>,
) -> Result<Location, LocationError> {
    let path = match registry_key.split_first() {
        Some((Junction::NetworkId(_), rest)) => rest,
        _ => registry_key,
    };

    if path.iter().any(|junction| matches!(junction, Junction::NetworkId(_))) {
        return Err(LocationError::Malformed);
    }

    let (parents, path) = match path.split_first() {
        Some((Junction::Parachain(id), rest)) if Some(*id) == viewer_chain => (0, rest),
        _ => (viewer_is_parachain as u8, path),
    };

    Ok(Location::new(parents, Junctions::from_vec(path.to_vec())?))
}

pub fn extract_junctions(location: &Location) -> Interior {
    match &location.interior {
        Junctions::Here => Interior::Here,
        junctions => Interior::Junctions(junctions.to_vec()),
    }
}

/// Same as [`extract_junctions`] for a location still in wire form. Fails when
/// the interior carries no `Here`/`X<N>` key matching its junctions.
pub fn extract_junctions_json(location: serde_json::Value) -> Result<Interior, LocationError> {
    Location::from_json(location).map(|location| extract_junctions(&location))
}

/// Re-expresses an asset location, given relative to a sibling of the
/// reserve, from the reserve chain's own point of view.
///
/// The reserve does not prefix its id onto its local assets: the leading
/// `Parachain` junction goes away and `parents` drops to zero. The relay
/// chain never names itself, so for relay-reserved assets only `parents`
/// changes.
pub fn reframe_from_reserve_own_perspective(location: &Location, reserve: ChainRef) -> Location {
    if reserve == RELAY_CHAIN {
        return Location::new(0, location.interior.clone());
    }
    let (interior, _reserve_junction) = location.interior.clone().split_first();
    Location::new(0, interior)
}

/// Chain backing the asset at `path`: the last `Parachain` junction found,
/// or the relay chain when there is none.
pub fn reserve_chain(path: &[Junction]) -> ChainRef {
    path.iter()
        .filter_map(Junction::parachain_id)
        .last()
        .unwrap_or(RELAY_CHAIN)
}

/// Location of chain `target` as seen by a viewer chain.
pub fn chain_location(viewer_is_parachain: bool, target: ChainRef) -> Location {
    let parents = viewer_is_parachain as u8;
    if target == RELAY_CHAIN {
        Location::new(parents, Junctions::Here)
    } else {
        Location::new(parents, Junctions::X1(Junction::Parachain(target)))
    }
}

/// Account location local to whichever chain executes the deposit.
pub fn beneficiary(account: &AccountType) -> Location {
    Location::new(0, Junctions::X1(account.junction()))
}

/// Parses a human amount like `"1.25"` into the asset's smallest unit.
/// Digits beyond the asset's precision are dropped (rounding down).
pub fn units_to_plancks(units: &str, decimals: u8) -> Option<XcmBalance> {
    let units = units.trim();
    let (whole, fraction) = units.split_once('.').unwrap_or((units, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let scale = 10u128.checked_pow(decimals.into())?;
    let whole: XcmBalance = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let digits = &fraction[..fraction.len().min(decimals as usize)];
    let fraction: XcmBalance = if digits.is_empty() {
        0
    } else {
        let pad = 10u128.checked_pow((decimals as usize - digits.len()) as u32)?;
        digits.parse::<XcmBalance>().ok()?.checked_mul(pad)?
    };

    whole.checked_mul(scale)?.checked_add(fraction)
}

pub fn plancks_to_units(amount: XcmBalance, decimals: u8) -> Option<String> {
    let scale = 10u128.checked_pow(decimals.into())?;
    let (whole, fraction) = (amount / scale, amount % scale);
    if fraction == 0 {
        return Some(whole.to_string());
    }
    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    Some(format!("{}.{}", whole, fraction.trim_end_matches('0')))
}

#[cfg(test)]
use hex_literal::hex;
#[cfg(test)]
use serde_json::json;
#[cfg(test)]
use xt_primitives::{Junctions::*, RegistryKey};

#[cfg(test)]
const ACALA_NATIVE_KEY: [u8; 2] = hex!("0000");

#[cfg(test)]
fn registry_key(value: serde_json::Value) -> RegistryKey {
    serde_json::from_value(value).unwrap()
}

#[test]
fn extract_junctions_returns_junctions_in_order() {
    for n in 1..=8u8 {
        let junctions: Vec<_> = (0..n).map(|i| Junction::GeneralIndex(i.into())).collect();
        let location = Location::new(1, Junctions::from_vec(junctions.clone()).unwrap());
        assert_eq!(location.interior.tag(), format!("X{}", n));
        assert_eq!(extract_junctions(&location), Interior::Junctions(junctions));
    }
    assert_eq!(extract_junctions(&Location::parent()), Interior::Here);
}

#[test]
fn extract_junctions_json_requires_tag() {
    assert_eq!(
        extract_junctions_json(json!({ "parents": 0, "interior": "Here" })),
        Ok(Interior::Here)
    );
    assert_eq!(
        extract_junctions_json(json!({
            "parents": 1,
            "interior": { "X2": [ { "Parachain": 1000 }, { "GeneralIndex": 1984 } ] }
        })),
        Ok(Interior::Junctions(vec![
            Junction::Parachain(1000),
            Junction::GeneralIndex(1984)
        ]))
    );
    assert_eq!(
        extract_junctions_json(json!({
            "parents": 1,
            "interior": [ { "Parachain": 1000 }, { "GeneralIndex": 1984 } ]
        })),
        Err(LocationError::Malformed)
    );
}

#[test]
fn reframe_single_junction_is_here_regardless_of_parents() {
    for parents in 0..3 {
        let location = Location::new(parents, X1(Junction::Parachain(2000)));
        assert_eq!(
            reframe_from_reserve_own_perspective(&location, 2000),
            Location::here()
        );
    }
}

#[test]
fn reframe_drops_reserve_junction() {
    let location = Location::new(
        1,
        X3(
            Junction::Parachain(2000),
            Junction::PalletInstance(42),
            Junction::GeneralIndex(69),
        ),
    );
    let reframed = reframe_from_reserve_own_perspective(&location, 2000);
    assert_eq!(
        reframed,
        Location::new(0, X2(Junction::PalletInstance(42), Junction::GeneralIndex(69)))
    );
    assert_eq!(reframed.interior.tag(), "X2");

    // original value untouched
    assert_eq!(location.interior.len(), 3);
}

#[test]
fn reframe_removes_exactly_one_junction() {
    for n in 2..=8u8 {
        let mut junctions = vec![Junction::Parachain(2000)];
        junctions.extend((1..n).map(Junction::PalletInstance));
        let location = Location::new(1, Junctions::from_vec(junctions.clone()).unwrap());

        let reframed = reframe_from_reserve_own_perspective(&location, 2000);
        assert_eq!(reframed.parents, 0);
        assert_eq!(reframed.interior.len(), (n - 1) as usize);
        assert_eq!(reframed.interior.tag(), format!("X{}", n - 1));
        assert_eq!(reframed.interior.to_vec(), junctions[1..].to_vec());
    }
}

#[test]
fn network_junction_only_at_front() {
    let key = [
        Junction::NetworkId("polkadot".into()),
        Junction::Parachain(2000),
        Junction::NetworkId("kusama".into()),
    ];
    assert_eq!(to_location(&key, true, None), Err(LocationError::Malformed));
}

#[test]
fn reframe_for_relay_reserve_keeps_interior() {
    assert_eq!(
        reframe_from_reserve_own_perspective(&Location::parent(), RELAY_CHAIN),
        Location::here()
    );
    let location = Location::new(1, X1(Junction::GeneralIndex(7)));
    assert_eq!(
        reframe_from_reserve_own_perspective(&location, RELAY_CHAIN),
        Location::new(0, X1(Junction::GeneralIndex(7)))
    );
}

#[test]
fn relay_native_key_to_location() {
    let dot = registry_key(json!([{ "network": "polkadot" }, "here"]));
    assert_eq!(
        to_location(dot.junctions(), false, Some(RELAY_CHAIN)),
        Ok(Location::here())
    );
    assert_eq!(to_location(dot.junctions(), true, Some(2000)), Ok(Location::parent()));
}

#[test]
fn parachain_key_to_location_from_sibling_and_self() {
    let key = registry_key(json!([
        { "network": "polkadot" },
        { "parachain": 2000 },
        { "generalKey": "0x0000" }
    ]));
    let general_key = Junction::GeneralKey(ACALA_NATIVE_KEY.to_vec());

    assert_eq!(
        to_location(key.junctions(), true, Some(2001)),
        Ok(Location::new(1, X2(Junction::Parachain(2000), general_key.clone())))
    );
    assert_eq!(
        to_location(key.junctions(), true, Some(2000)),
        Ok(Location::new(0, X1(general_key.clone())))
    );
    assert_eq!(
        serde_json::to_value(to_location(key.junctions(), true, Some(2000)).unwrap()).unwrap(),
        json!({ "parents": 0, "interior": { "X1": { "GeneralKey": "0x0000" } } })
    );
    assert_eq!(
        to_location(key.junctions(), false, None),
        Ok(Location::new(0, X2(Junction::Parachain(2000), general_key)))
    );
}

#[test]
fn reserve_chain_last_parachain_wins() {
    assert_eq!(reserve_chain(&[]), RELAY_CHAIN);
    assert_eq!(
        reserve_chain(&[Junction::PalletInstance(50), Junction::GeneralIndex(1984)]),
        RELAY_CHAIN
    );
    assert_eq!(
        reserve_chain(&[Junction::Parachain(1000), Junction::GeneralIndex(1984)]),
        1000
    );
    assert_eq!(
        reserve_chain(&[Junction::Parachain(1000), Junction::Parachain(2000)]),
        2000
    );
}

#[test]
fn chain_locations_from_relay_and_parachain() {
    assert_eq!(chain_location(true, RELAY_CHAIN), Location::parent());
    assert_eq!(
        chain_location(false, 2000),
        Location::new(0, X1(Junction::Parachain(2000)))
    );
    assert_eq!(
        chain_location(true, 2002),
        Location::new(1, X1(Junction::Parachain(2002)))
    );
}

#[test]
fn beneficiary_is_single_local_junction() {
    let account = AccountType::Key20([7; 20]);
    let location = beneficiary(&account);
    assert_eq!(location.parents, 0);
    assert_eq!(location.interior, X1(account.junction()));
}

#[test]
fn units_round_trip_with_precision() {
    assert_eq!(units_to_plancks("1.25", 10), Some(12_500_000_000));
    assert_eq!(units_to_plancks("0.000000000001", 12), Some(1));
    assert_eq!(units_to_plancks(".5", 1), Some(5));
    assert_eq!(units_to_plancks("3", 0), Some(3));
    assert_eq!(units_to_plancks("1.99", 1), Some(19));
    assert_eq!(units_to_plancks("", 10), None);
    assert_eq!(units_to_plancks("-1", 10), None);
    assert_eq!(units_to_plancks("1e3", 10), None);

    assert_eq!(plancks_to_units(12_500_000_000, 10).as_deref(), Some("1.25"));
    assert_eq!(plancks_to_units(1, 12).as_deref(), Some("0.000000000001"));
    assert_eq!(plancks_to_units(30, 1).as_deref(), Some("3"));
    assert_eq!(plancks_to_units(1, 40), None);
}
