// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for plan checking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting or evaluating a room
///
/// None of these escape the public pipeline entry points: conversion errors
/// degrade to drawing units and evaluation errors become failing verdicts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Cannot convert dimensions from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("Malformed rule for '{room_type}': {reason}")]
    MalformedRule { room_type: String, reason: String },
}
