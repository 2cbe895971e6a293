// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for json-selector

use thiserror::Error;

/// Errors produced while compiling or evaluating a path expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectorError {
    /// The expression is not valid JSONPath
    #[error("invalid JSONPath at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// A custom query strategy failed
    #[error("{0}")]
    Engine(String),
}

impl SelectorError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}
