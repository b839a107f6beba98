// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Configuration parameters affecting the behaviour of this library.
//!

use dotenvy::var;
use std::sync::OnceLock;

/// Hard ceiling on the number of combined rules a single band may produce
/// when no override is given. See [`Translator`][crate::Translator].
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

#[derive(Debug)]
pub struct Config {
    max_combinations: usize,
}

static CONFIG: OnceLock<Config> = OnceLock::new();
/// This library configuration Singleton.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

impl Default for Config {
    fn default() -> Self {
        let max_combinations = var("CSS2SLD_MAX_COMBINATIONS")
            .ok()
            .and_then(|x| x.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_COMBINATIONS);

        Self { max_combinations }
    }
}

impl Config {
    /// Return the configured power-set combination cap to use when a
    /// `Translator` is built w/o an explicit override.
    pub fn max_combinations(&self) -> usize {
        self.max_combinations
    }
}
