// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// A task step string that is not one of the two recognised shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse step '{original}': {reason}")]
pub struct ParseError {
    pub reason: String,
    pub original: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            original: original.into(),
        }
    }
}
