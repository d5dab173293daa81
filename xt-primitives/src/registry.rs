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

//! Registry keys as published by the asset registry.
//!
//! A key is a leading network junction followed by the asset's path from the
//! relay chain, e.g. `[{"network":"polkadot"},{"parachain":2000},{"generalKey":"0x.."}]`.
//! The relay's own asset is written `[{"network":"polkadot"},"here"]`.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::location::{Junction, LocationError, MAX_JUNCTIONS};

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(transparent)]
pub struct RegistryKey(Vec<Junction>);

impl RegistryKey {
    pub fn new(network: &str, path: Vec<Junction>) -> Result<Self, LocationError> {
        let mut junctions = Vec::with_capacity(path.len() + 1);
        junctions.push(Junction::NetworkId(network.into()));
        junctions.extend(path);
        Self::from_junctions(junctions)
    }

    pub fn from_junctions(junctions: Vec<Junction>) -> Result<Self, LocationError> {
        let key = RegistryKey(junctions);
        if key.path().len() > MAX_JUNCTIONS {
            return Err(LocationError::TooManyJunctions);
        }
        Ok(key)
    }

    /// The raw key, leading network junction included.
    pub fn junctions(&self) -> &[Junction] {
        &self.0
    }

    pub fn network(&self) -> Option<&str> {
        match self.0.first() {
            Some(Junction::NetworkId(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// The key without its network junction.
    pub fn path(&self) -> &[Junction] {
        match self.0.split_first() {
            Some((Junction::NetworkId(_), rest)) => rest,
            _ => &self.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryEntry {
    Marker(String),
    Junction(Junction),
}

impl<'de> Deserialize<'de> for RegistryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut junctions = Vec::new();
        for entry in Vec::<RegistryEntry>::deserialize(deserializer)? {
            match entry {
                RegistryEntry::Marker(marker) if marker.eq_ignore_ascii_case("here") => {}
                RegistryEntry::Marker(_) => {
                    return Err(de::Error::custom(LocationError::Malformed))
                }
                RegistryEntry::Junction(junction) => junctions.push(junction),
            }
        }
        RegistryKey::from_junctions(junctions).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_relay_native_key() {
        let key: RegistryKey = serde_json::from_value(json!([{ "network": "polkadot" }, "here"])).unwrap();
        assert_eq!(key.network(), Some("polkadot"));
        assert!(key.path().is_empty());
    }

    #[test]
    fn parses_parachain_key() {
        let key: RegistryKey = serde_json::from_value(json!([
            { "network": "polkadot" },
            { "parachain": 2000 },
            { "generalKey": "0x0001" }
        ]))
        .unwrap();
        assert_eq!(
            key.path(),
            &[Junction::Parachain(2000), Junction::GeneralKey(vec![0, 1])]
        );
        assert_eq!(key.junctions().len(), 3);
    }

    #[test]
    fn rejects_unknown_marker_and_long_paths() {
        let marker: Result<RegistryKey, _> =
            serde_json::from_value(json!([{ "network": "polkadot" }, "there"]));
        assert!(marker.is_err());

        let long = RegistryKey::new("kusama", vec![Junction::GeneralIndex(0); MAX_JUNCTIONS + 1]);
        assert_eq!(long, Err(LocationError::TooManyJunctions));
    }
}
