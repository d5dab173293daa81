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

//! Relative locations in the consensus hierarchy.
//!
//! A [`Location`] is always read from the point of view of some observer
//! chain: `parents` hops up to the closest common ancestor, then `interior`
//! walks down to the thing being addressed.

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use sp_core::{H160, H256};
use std::collections::BTreeMap;

use crate::ChainRef;

/// Protocol maximum for the number of junctions in a location interior.
pub const MAX_JUNCTIONS: usize = 8;

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo, thiserror::Error)]
pub enum LocationError {
    /// Interior has no `X<N>` / `Here` tag, or the tag disagrees with the
    /// number of junctions it holds
    #[error("malformed location: interior tag does not match its junctions")]
    Malformed,
    #[error("location interior holds more than {} junctions", MAX_JUNCTIONS)]
    TooManyJunctions,
}

/// Network tag carried by account junctions.
#[derive(
    Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, Default, TypeInfo, Serialize, Deserialize,
)]
pub enum AccountNetwork {
    #[default]
    #[codec(index = 0)]
    #[serde(alias = "any")]
    Any,
    #[codec(index = 2)]
    #[serde(alias = "polkadot")]
    Polkadot,
    #[codec(index = 3)]
    #[serde(alias = "kusama")]
    Kusama,
}

/// One labeled hop of a location interior.
///
/// Serializes with the executor's field names. Registry-style lower camel
/// case names are accepted on input. Codec indices are those of the V2
/// `Junction`.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo, Serialize, Deserialize)]
pub enum Junction {
    #[codec(index = 0)]
    #[serde(alias = "parachain")]
    Parachain(#[codec(compact)] ChainRef),
    #[codec(index = 1)]
    #[serde(alias = "accountId32")]
    AccountId32 {
        #[serde(default)]
        network: AccountNetwork,
        id: H256,
    },
    #[codec(index = 3)]
    #[serde(alias = "accountKey20")]
    AccountKey20 {
        #[serde(default)]
        network: AccountNetwork,
        key: H160,
    },
    #[codec(index = 4)]
    #[serde(alias = "palletInstance")]
    PalletInstance(u8),
    #[codec(index = 5)]
    #[serde(alias = "generalIndex")]
    GeneralIndex(#[codec(compact)] #[serde(with = "crate::serde_u128")] u128),
    #[codec(index = 6)]
    #[serde(alias = "generalKey")]
    GeneralKey(#[serde(with = "sp_core::bytes")] Vec<u8>),
    /// Leading element of a registry key naming the relay network.
    /// Never part of a protocol-level location and has no encoding.
    #[codec(skip)]
    #[serde(rename = "network", alias = "Network")]
    NetworkId(String),
}

impl Junction {
    pub fn parachain_id(&self) -> Option<ChainRef> {
        match self {
            Junction::Parachain(id) => Some(*id),
            _ => None,
        }
    }
}

/// Closed union of interior paths. The variant is the `X<N>` tag, so a tag
/// that disagrees with its junction count cannot be built.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default, TypeInfo)]
pub enum Junctions {
    #[default]
    Here,
    X1(Junction),
    X2(Junction, Junction),
    X3(Junction, Junction, Junction),
    X4(Junction, Junction, Junction, Junction),
    X5(Junction, Junction, Junction, Junction, Junction),
    X6(Junction, Junction, Junction, Junction, Junction, Junction),
    X7(Junction, Junction, Junction, Junction, Junction, Junction, Junction),
    X8(Junction, Junction, Junction, Junction, Junction, Junction, Junction, Junction),
}

use Junctions::*;

impl Junctions {
    pub fn from_vec(junctions: Vec<Junction>) -> Result<Self, LocationError> {
        let len = junctions.len();
        if len > MAX_JUNCTIONS {
            return Err(LocationError::TooManyJunctions);
        }
        let mut iter = junctions.into_iter();
        let mut next = || iter.next().ok_or(LocationError::Malformed);
        Ok(match len {
            0 => Here,
            1 => X1(next()?),
            2 => X2(next()?, next()?),
            3 => X3(next()?, next()?, next()?),
            4 => X4(next()?, next()?, next()?, next()?),
            5 => X5(next()?, next()?, next()?, next()?, next()?),
            6 => X6(next()?, next()?, next()?, next()?, next()?, next()?),
            7 => X7(next()?, next()?, next()?, next()?, next()?, next()?, next()?),
            _ => X8(
                next()?,
                next()?,
                next()?,
                next()?,
                next()?,
                next()?,
                next()?,
                next()?,
            ),
        })
    }

    pub fn into_vec(self) -> Vec<Junction> {
        match self {
            Here => vec![],
            X1(a) => vec![a],
            X2(a, b) => vec![a, b],
            X3(a, b, c) => vec![a, b, c],
            X4(a, b, c, d) => vec![a, b, c, d],
            X5(a, b, c, d, e) => vec![a, b, c, d, e],
            X6(a, b, c, d, e, f) => vec![a, b, c, d, e, f],
            X7(a, b, c, d, e, f, g) => vec![a, b, c, d, e, f, g],
            X8(a, b, c, d, e, f, g, h) => vec![a, b, c, d, e, f, g, h],
        }
    }

    pub fn to_vec(&self) -> Vec<Junction> {
        self.clone().into_vec()
    }

    pub fn len(&self) -> usize {
        match self {
            Here => 0,
            X1(..) => 1,
            X2(..) => 2,
            X3(..) => 3,
            X4(..) => 4,
            X5(..) => 5,
            X6(..) => 6,
            X7(..) => 7,
            X8(..) => 8,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Here)
    }

    pub fn first(&self) -> Option<&Junction> {
        match self {
            Here => None,
            X1(a)
            | X2(a, ..)
            | X3(a, ..)
            | X4(a, ..)
            | X5(a, ..)
            | X6(a, ..)
            | X7(a, ..)
            | X8(a, ..) => Some(a),
        }
    }

    /// Removes the first junction. A single-junction interior becomes `Here`.
    pub fn split_first(self) -> (Junctions, Option<Junction>) {
        match self {
            Here => (Here, None),
            X1(a) => (Here, Some(a)),
            X2(a, b) => (X1(b), Some(a)),
            X3(a, b, c) => (X2(b, c), Some(a)),
            X4(a, b, c, d) => (X3(b, c, d), Some(a)),
            X5(a, b, c, d, e) => (X4(b, c, d, e), Some(a)),
            X6(a, b, c, d, e, f) => (X5(b, c, d, e, f), Some(a)),
            X7(a, b, c, d, e, f, g) => (X6(b, c, d, e, f, g), Some(a)),
            X8(a, b, c, d, e, f, g, h) => (X7(b, c, d, e, f, g, h), Some(a)),
        }
    }

    /// Wire tag of this interior: `Here` or `X<N>`.
    pub fn tag(&self) -> String {
        match self {
            Here => "Here".into(),
            other => format!("X{}", other.len()),
        }
    }
}

impl Serialize for Junctions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Here => serializer.serialize_str("Here"),
            X1(junction) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("X1", junction)?;
                map.end()
            }
            other => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&other.tag(), &other.to_vec())?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JunctionsRepr {
    Tag(String),
    Keyed(BTreeMap<String, JunctionsBody>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JunctionsBody {
    Many(Vec<Junction>),
    One(Junction),
    Empty(()),
}

impl<'de> Deserialize<'de> for Junctions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let malformed = || -> D::Error { de::Error::custom(LocationError::Malformed) };
        let (tag, body) = match JunctionsRepr::deserialize(deserializer)? {
            JunctionsRepr::Tag(tag) if tag.eq_ignore_ascii_case("here") => return Ok(Here),
            JunctionsRepr::Tag(_) => return Err(malformed()),
            JunctionsRepr::Keyed(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => return Err(malformed()),
                }
            }
        };

        if tag.eq_ignore_ascii_case("here") {
            return match body {
                JunctionsBody::Empty(()) => Ok(Here),
                JunctionsBody::Many(junctions) if junctions.is_empty() => Ok(Here),
                _ => Err(malformed()),
            };
        }

        let count: usize = tag
            .strip_prefix(|c: char| c == 'X' || c == 'x')
            .and_then(|n| n.parse().ok())
            .ok_or_else(malformed)?;
        let junctions = match body {
            JunctionsBody::Many(junctions) => junctions,
            JunctionsBody::One(junction) => vec![junction],
            JunctionsBody::Empty(()) => vec![],
        };
        if count == 0 || count != junctions.len() {
            return Err(malformed());
        }

        Junctions::from_vec(junctions).map_err(de::Error::custom)
    }
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default, TypeInfo, Serialize, Deserialize)]
pub struct Location {
    pub parents: u8,
    pub interior: Junctions,
}

impl Location {
    pub const fn new(parents: u8, interior: Junctions) -> Self {
        Location { parents, interior }
    }

    pub const fn here() -> Self {
        Location::new(0, Here)
    }

    pub const fn parent() -> Self {
        Location::new(1, Here)
    }

    pub fn first_interior(&self) -> Option<&Junction> {
        self.interior.first()
    }

    /// Parses a wire-shaped location, rejecting interiors whose tag is
    /// missing or does not match the junction count.
    pub fn from_json(value: serde_json::Value) -> Result<Self, LocationError> {
        serde_json::from_value(value).map_err(|_| LocationError::Malformed)
    }
}

impl From<Junction> for Location {
    fn from(junction: Junction) -> Self {
        Location::new(0, X1(junction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interior_tag_follows_junction_count() {
        for n in 1..=MAX_JUNCTIONS {
            let junctions: Vec<_> = (0..n as u8).map(Junction::PalletInstance).collect();
            let interior = Junctions::from_vec(junctions.clone()).unwrap();
            assert_eq!(interior.tag(), format!("X{}", n));
            assert_eq!(interior.len(), n);
            assert_eq!(interior.into_vec(), junctions);
        }
        assert_eq!(Junctions::from_vec(vec![]).unwrap(), Here);
        assert_eq!(Here.tag(), "Here");
    }

    #[test]
    fn more_than_eight_junctions_rejected() {
        let junctions = vec![Junction::GeneralIndex(1); MAX_JUNCTIONS + 1];
        assert_eq!(
            Junctions::from_vec(junctions),
            Err(LocationError::TooManyJunctions)
        );
    }

    #[test]
    fn split_first_of_single_junction_is_here() {
        let (rest, first) = X1(Junction::Parachain(2000)).split_first();
        assert_eq!(rest, Here);
        assert_eq!(first, Some(Junction::Parachain(2000)));

        let (rest, _) = X3(
            Junction::Parachain(2000),
            Junction::PalletInstance(42),
            Junction::GeneralIndex(69),
        )
        .split_first();
        assert_eq!(
            rest,
            X2(Junction::PalletInstance(42), Junction::GeneralIndex(69))
        );
    }

    #[test]
    fn serializes_with_executor_field_names() {
        let location = Location::new(
            1,
            X2(Junction::Parachain(2000), Junction::GeneralKey(vec![0x02, 0xbc])),
        );
        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({
                "parents": 1,
                "interior": { "X2": [ { "Parachain": 2000 }, { "GeneralKey": "0x02bc" } ] }
            })
        );

        let location = Location::new(0, X1(Junction::PalletInstance(50)));
        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({ "parents": 0, "interior": { "X1": { "PalletInstance": 50 } } })
        );

        assert_eq!(
            serde_json::to_value(&Location::parent()).unwrap(),
            json!({ "parents": 1, "interior": "Here" })
        );
    }

    #[test]
    fn account_junctions_carry_network_and_hex_id() {
        let id = Junction::AccountId32 {
            network: AccountNetwork::Any,
            id: H256::repeat_byte(0x11),
        };
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            json!({ "AccountId32": { "network": "Any", "id": format!("0x{}", "11".repeat(32)) } })
        );

        let key = Junction::AccountKey20 {
            network: AccountNetwork::Any,
            key: H160::repeat_byte(0xab),
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({ "AccountKey20": { "network": "Any", "key": format!("0x{}", "ab".repeat(20)) } })
        );
    }

    #[test]
    fn parses_both_x1_shapes_and_registry_names() {
        let single = Location::from_json(json!({
            "parents": 0,
            "interior": { "X1": { "generalKey": "0x0001" } }
        }))
        .unwrap();
        let listed = Location::from_json(json!({
            "parents": 0,
            "interior": { "X1": [ { "GeneralKey": "0x0001" } ] }
        }))
        .unwrap();
        assert_eq!(single, listed);
        assert_eq!(single.interior, X1(Junction::GeneralKey(vec![0, 1])));

        let here = Location::from_json(json!({ "parents": 1, "interior": { "here": null } })).unwrap();
        assert_eq!(here, Location::parent());
    }

    #[test]
    fn rejects_interior_without_matching_tag() {
        let wrong_count = json!({
            "parents": 1,
            "interior": { "X3": [ { "Parachain": 2000 }, { "PalletInstance": 42 } ] }
        });
        assert_eq!(Location::from_json(wrong_count), Err(LocationError::Malformed));

        let no_tag = json!({ "parents": 1, "interior": { "Y2": [] } });
        assert_eq!(Location::from_json(no_tag), Err(LocationError::Malformed));

        let x0 = json!({ "parents": 0, "interior": { "X0": [] } });
        assert_eq!(Location::from_json(x0), Err(LocationError::Malformed));

        let missing = json!({ "parents": 0 });
        assert_eq!(Location::from_json(missing), Err(LocationError::Malformed));
    }

    #[test]
    fn parses_general_index_inside_tagged_interior() {
        let usdt = Location::from_json(json!({
            "parents": 1,
            "interior": { "X3": [ { "Parachain": 1000 }, { "PalletInstance": 50 }, { "GeneralIndex": 1984 } ] }
        }));
        assert_eq!(
            usdt,
            Ok(Location::new(
                1,
                X3(
                    Junction::Parachain(1000),
                    Junction::PalletInstance(50),
                    Junction::GeneralIndex(1984)
                )
            ))
        );

        let single = Location::from_json(json!({
            "parents": 0,
            "interior": { "X1": { "generalIndex": 7 } }
        }));
        assert_eq!(single, Ok(Location::new(0, X1(Junction::GeneralIndex(7)))));
    }

    #[test]
    fn general_index_above_u64_round_trips_as_string() {
        let location = Location::new(0, X1(Junction::GeneralIndex(u128::MAX)));
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(
            value["interior"],
            json!({ "X1": { "GeneralIndex": u128::MAX.to_string() } })
        );
        assert_eq!(Location::from_json(value), Ok(location));
    }

    #[test]
    fn junctions_encode_with_v2_indices() {
        assert_eq!(Junction::Parachain(2000).encode(), vec![0x00, 0x41, 0x1f]);
        assert_eq!(Junction::PalletInstance(50).encode(), vec![0x04, 0x32]);
        assert_eq!(Junction::GeneralIndex(1984).encode(), vec![0x05, 0x01, 0x1f]);
        assert_eq!(Junction::GeneralKey(vec![0xbc]).encode(), vec![0x06, 0x04, 0xbc]);

        let account = Junction::AccountId32 {
            network: AccountNetwork::Any,
            id: H256::repeat_byte(0x11),
        };
        let mut expected = vec![0x01, 0x00];
        expected.extend_from_slice(&[0x11; 32]);
        assert_eq!(account.encode(), expected);

        let key = Junction::AccountKey20 {
            network: AccountNetwork::Kusama,
            key: H160::repeat_byte(0xab),
        };
        let mut expected = vec![0x03, 0x03];
        expected.extend_from_slice(&[0xab; 20]);
        assert_eq!(key.encode(), expected);

        assert_eq!(AccountNetwork::Polkadot.encode(), vec![0x02]);
        assert_eq!(
            Location::new(1, X1(Junction::Parachain(2000))).encode(),
            vec![0x01, 0x01, 0x00, 0x41, 0x1f]
        );
    }
}
