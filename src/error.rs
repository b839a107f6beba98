// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Errors raised from this library.
//!

use peg::{error::ParseError, str::LineCol};
use std::borrow::Cow;
use thiserror::Error;

/// Variants of error raised from this library.
#[derive(Debug, Error)]
pub enum MyError {
    /// Stylesheet reading errors.
    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),

    /// Text-encoding (`peg`) related error.
    #[error("PEG error: {0:?}")]
    Text(ParseError<LineCol>),

    /// A cartographic property carries a value whose shape cannot be
    /// projected onto the SLD model; e.g. a `mark` that is neither
    /// `symbol(...)` nor `url(...)`, a `label-anchor` that is not exactly
    /// 2 numbers, a `raster-channels` naming 2 or more than 3 bands, etc...
    /// The message always names the offending property and value.
    #[error("Invalid value: {0}")]
    Value(Cow<'static, str>),

    /// JSON (`serde`) related error.
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime error.
    #[error("Runtime error: {0}")]
    Runtime(Cow<'static, str>),
}

impl MyError {
    // shorthand used all over the symbolizer synthesizers...
    pub(crate) fn value(property: &str, detail: impl std::fmt::Display) -> Self {
        MyError::Value(format!("property '{property}': {detail}").into())
    }
}
