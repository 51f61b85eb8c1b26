// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[macro_export]
macro_rules! tb_bail {
    ($e:expr) => {
        return Err($e)
    };
}

#[macro_export(local_inner_macros)]
macro_rules! tb_ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            tb_bail!($e);
        }
    };
}

pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Errors raised while building, validating or classifying transaction block commands.
#[derive(Eq, PartialEq, Clone, Debug, Error)]
pub enum CommandError {
    #[error("Move call target `{target}` is not of the form `package::module::function`")]
    MalformedTarget { target: String },

    #[error("Invalid type tag `{type_tag}`: {error}")]
    InvalidTypeTag { type_tag: String, error: String },

    #[error("Value does not match any command shape: {reason}")]
    InvalidCommand { reason: String },

    #[error("Value does not match the {expected} shape: {reason}")]
    SchemaMismatch {
        expected: &'static str,
        reason: String,
    },

    #[error("Command {command} refers to {argument}, which is not available: {reason}")]
    DanglingReference {
        command: usize,
        argument: String,
        reason: String,
    },

    #[error("Expected {expected} argument encodings but the call has {actual} arguments")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("Failed to access config file '{file}': {message}")]
    Config { file: String, message: String },
}

impl CommandError {
    pub fn schema_mismatch(expected: &'static str, reason: impl Into<String>) -> Self {
        CommandError::SchemaMismatch {
            expected,
            reason: reason.into(),
        }
    }
}
