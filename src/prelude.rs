// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Group imports of many common traits and types by adding a glob import
//! for use by clients of this library.
//!

pub use super::error::*;
pub use super::feature::*;
pub use super::filter::*;
pub use super::op::*;
pub use super::property::*;
pub use super::range::*;
pub use super::rule::*;
pub use super::selector::*;
pub use super::sld::*;
pub use super::translate::*;
pub use super::value::*;

pub use super::Stylesheet;
