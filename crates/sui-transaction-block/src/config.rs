// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write as _},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::error::CommandError;

#[cfg(test)]
#[path = "unit_tests/config_tests.rs"]
mod config_tests;

pub trait Import: DeserializeOwned {
    fn import(path: &str) -> Result<Self, CommandError> {
        let reader = || -> Result<Self, std::io::Error> {
            let data = fs::read(path)?;
            Ok(serde_json::from_slice(data.as_slice())?)
        };
        reader().map_err(|e| CommandError::Config {
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl<D: DeserializeOwned> Import for D {}

pub trait Export: Serialize {
    fn export(&self, path: &str) -> Result<(), CommandError> {
        let writer = || -> Result<(), std::io::Error> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let mut writer = BufWriter::new(file);
            let data = serde_json::to_string_pretty(self)?;
            writer.write_all(data.as_ref())?;
            writer.write_all(b"\n")?;
            Ok(())
        };
        writer().map_err(|e| CommandError::Config {
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl<S: Serialize> Export for S {}

/// What strict shape checks do with fields a shape does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownFields {
    #[default]
    Reject,
    Ignore,
}

/// Settings for validating commands and blocks received as untyped data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationConfig {
    /// Whether a record carrying fields its shape does not declare is rejected.
    #[serde(default)]
    pub unknown_fields: UnknownFields,
    /// Run the dangling reference check when validating a whole block. Off by default: a
    /// block referring to a result that does not exist is still well-shaped.
    #[serde(default = "ValidationConfig::default_check_references")]
    pub check_references: bool,
    /// Upper bound on the number of commands in a block, if any.
    #[serde(default)]
    pub max_commands: Option<usize>,
}

impl ValidationConfig {
    fn default_check_references() -> bool {
        false
    }

    /// Strict shapes plus reference checking.
    pub fn strict() -> Self {
        Self {
            check_references: true,
            ..Self::default()
        }
    }

    pub fn tracing(&self) {
        info!("Unknown fields policy set to {:?}", self.unknown_fields);
        info!("Reference checking set to {}", self.check_references);
        match self.max_commands {
            Some(max) => info!("Max commands per block set to {max}"),
            None => info!("Max commands per block not set"),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::default(),
            check_references: Self::default_check_references(),
            max_commands: None,
        }
    }
}
