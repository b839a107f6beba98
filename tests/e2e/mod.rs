// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios, each translating one small stylesheet and
//! asserting the shape of the resulting SLD tree.
//!

mod cascade;
mod label;
mod polygon;
mod raster;
mod repeated;
mod zorder;
