// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "unit_tests/argument_tests.rs"]
mod argument_tests;

/// A reference to a value consumed by a command: an external input, the gas coin, or the
/// output of an earlier command in the same block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind")]
pub enum Argument {
    /// A value supplied to the block at position `index`. `name` and `value` are debug
    /// metadata and do not take part in the reference itself. A null `value` reads back
    /// as `None`.
    Input {
        index: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
    /// The gas coin of the transaction.
    GasCoin,
    /// The full output of the command at `index`.
    Result { index: u16 },
    /// The `result_index`-th value returned by the command at `index`.
    NestedResult {
        index: u16,
        #[serde(rename = "resultIndex")]
        result_index: u16,
    },
}

impl Argument {
    pub const KINDS: [&'static str; 4] = ["Input", "GasCoin", "Result", "NestedResult"];

    pub fn input(index: u16) -> Self {
        Argument::Input {
            index,
            name: None,
            value: None,
        }
    }

    pub fn named_input(index: u16, name: impl Into<String>) -> Self {
        Argument::Input {
            index,
            name: Some(name.into()),
            value: None,
        }
    }

    pub fn result(index: u16) -> Self {
        Argument::Result { index }
    }

    pub fn nested_result(index: u16, result_index: u16) -> Self {
        Argument::NestedResult {
            index,
            result_index,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Input { .. } => "Input",
            Argument::GasCoin => "GasCoin",
            Argument::Result { .. } => "Result",
            Argument::NestedResult { .. } => "NestedResult",
        }
    }

    /// The command this argument reads from, if it is a `Result` or `NestedResult`.
    pub fn command_index(&self) -> Option<u16> {
        match self {
            Argument::Result { index } | Argument::NestedResult { index, .. } => Some(*index),
            Argument::Input { .. } | Argument::GasCoin => None,
        }
    }

    pub fn input_index(&self) -> Option<u16> {
        match self {
            Argument::Input { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Compares two arguments by what they refer to, ignoring input metadata.
    pub fn same_reference(&self, other: &Argument) -> bool {
        match (self, other) {
            (Argument::Input { index: a, .. }, Argument::Input { index: b, .. }) => a == b,
            (Argument::GasCoin, Argument::GasCoin) => true,
            (Argument::Result { index: a }, Argument::Result { index: b }) => a == b,
            (
                Argument::NestedResult {
                    index: a,
                    result_index: ra,
                },
                Argument::NestedResult {
                    index: b,
                    result_index: rb,
                },
            ) => a == b && ra == rb,
            _ => false,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Input {
                index,
                name: Some(name),
                ..
            } => write!(f, "Input({index}, {name})"),
            Argument::Input { index, .. } => write!(f, "Input({index})"),
            Argument::GasCoin => write!(f, "GasCoin"),
            Argument::Result { index } => write!(f, "Result({index})"),
            Argument::NestedResult {
                index,
                result_index,
            } => write!(f, "NestedResult({index}, {result_index})"),
        }
    }
}
