// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    argument::Argument,
    command::Command,
    config::{UnknownFields, ValidationConfig},
    discriminator::Discriminator,
    error::{CommandError, CommandResult},
};

#[cfg(test)]
#[path = "unit_tests/block_tests.rs"]
mod block_tests;

/// An ordered sequence of commands executed atomically, together with the inputs they read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransactionBlock {
    /// `inputs[i]` is always `Input { index: i, .. }`.
    #[serde(default)]
    pub inputs: Vec<Argument>,
    pub commands: Vec<Command>,
}

impl TransactionBlock {
    pub const FIELDS: [&'static str; 2] = ["inputs", "commands"];

    /// Reads a block out of untyped data, classifying every command.
    pub fn from_value(value: &Value, config: &ValidationConfig) -> CommandResult<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| CommandError::schema_mismatch("TransactionBlock", "not a record"))?;
        if config.unknown_fields == UnknownFields::Reject {
            if let Some(unknown) = fields.keys().find(|key| !Self::FIELDS.contains(&key.as_str())) {
                return Err(CommandError::schema_mismatch(
                    "TransactionBlock",
                    format!("unexpected field `{unknown}`"),
                ));
            }
        }
        let discriminator = Discriminator::new(config);
        let commands = fields
            .get("commands")
            .and_then(Value::as_array)
            .ok_or_else(|| CommandError::schema_mismatch("TransactionBlock", "missing `commands`"))?
            .iter()
            .map(|command| discriminator.decode(command))
            .collect::<CommandResult<Vec<_>>>()?;
        let inputs = match fields.get("inputs") {
            None => vec![],
            Some(Value::Array(inputs)) => inputs
                .iter()
                .map(|input| Argument::from_value(input, &discriminator))
                .collect::<CommandResult<Vec<_>>>()?,
            Some(_) => {
                return Err(CommandError::schema_mismatch(
                    "TransactionBlock",
                    "`inputs` must be a sequence",
                ))
            }
        };
        let block = TransactionBlock { inputs, commands };
        block.validate(config)?;
        debug!(
            commands = block.commands.len(),
            inputs = block.inputs.len(),
            "ingested transaction block"
        );
        Ok(block)
    }

    /// Checks the block-level constraints `config` asks for.
    pub fn validate(&self, config: &ValidationConfig) -> CommandResult {
        if let Some(max) = config.max_commands {
            tb_ensure!(
                self.commands.len() <= max,
                CommandError::schema_mismatch(
                    "TransactionBlock",
                    format!("{} commands exceed the limit of {max}", self.commands.len()),
                )
            );
        }
        for (position, input) in self.inputs.iter().enumerate() {
            tb_ensure!(
                input.input_index().map(usize::from) == Some(position),
                CommandError::schema_mismatch(
                    "TransactionBlock",
                    format!("input {position} is {input}"),
                )
            );
        }
        if config.check_references {
            self.check_references()?;
        }
        Ok(())
    }

    /// Rejects arguments reading a result of the same or a later command, or an input the
    /// block does not declare.
    ///
    /// Nothing else in the crate calls this implicitly: well-shaped blocks with dangling
    /// references are accepted unless a caller opts in.
    pub fn check_references(&self) -> CommandResult {
        for (position, command) in self.commands.iter().enumerate() {
            for argument in command.arguments() {
                let reason = match argument {
                    Argument::Result { index } | Argument::NestedResult { index, .. }
                        if usize::from(*index) >= position =>
                    {
                        Some(format!("command {index} does not precede command {position}"))
                    }
                    Argument::Input { index, .. } if usize::from(*index) >= self.inputs.len() => {
                        Some(format!("the block declares {} inputs", self.inputs.len()))
                    }
                    _ => None,
                };
                if let Some(reason) = reason {
                    warn!(command = position, %argument, "dangling reference");
                    return Err(CommandError::DanglingReference {
                        command: position,
                        argument: argument.to_string(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }
}
