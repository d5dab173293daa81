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

use serde_json::Value;
use xt_primitives::{ChainRef, LocationError};
use xt_xcm::RouteError;

/// Category of a failed transfer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    Validation,
    UnsupportedRoute,
    Dispatch,
    Connection,
}

/// Request rejected before any chain was contacted.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("cannot send tokens to yourself")]
    SelfTransfer,
    #[error("transfer amount must be greater than zero")]
    ZeroAmount,
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    #[error(transparent)]
    Location(#[from] LocationError),
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum UnsupportedRoute {
    #[error("blockchain does not support XCM")]
    NoXcmCapability { chain: ChainRef },
    #[error(transparent)]
    Route(RouteError),
}

/// The chain accepted the extrinsic but its runtime rejected the message.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("chain {chain} rejected the transfer: {payload}")]
pub struct DispatchFailure {
    pub chain: ChainRef,
    /// Error as reported by the chain
    pub payload: Value,
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("cannot reach chain {chain}: {reason}")]
pub struct ConnectionError {
    pub chain: ChainRef,
    pub reason: String,
}

/// Failure reported by a live connection while submitting or watching.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("dispatch failed: {0}")]
    Dispatch(Value),
    #[error("connection lost: {0}")]
    Connection(String),
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnsupportedRoute(#[from] UnsupportedRoute),
    #[error(transparent)]
    Dispatch(#[from] DispatchFailure),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::UnsupportedRoute(_) => ErrorKind::UnsupportedRoute,
            Error::Dispatch(_) => ErrorKind::Dispatch,
            Error::Connection(_) => ErrorKind::Connection,
        }
    }
}

impl From<RouteError> for Error {
    fn from(error: RouteError) -> Self {
        match error {
            RouteError::Location(error) => ValidationError::Location(error).into(),
            error => UnsupportedRoute::Route(error).into(),
        }
    }
}

impl From<LocationError> for Error {
    fn from(error: LocationError) -> Self {
        ValidationError::Location(error).into()
    }
}

impl SubmitError {
    pub(crate) fn on_chain(self, chain: ChainRef) -> Error {
        match self {
            SubmitError::Dispatch(payload) => DispatchFailure { chain, payload }.into(),
            SubmitError::Connection(reason) => ConnectionError { chain, reason }.into(),
        }
    }
}
