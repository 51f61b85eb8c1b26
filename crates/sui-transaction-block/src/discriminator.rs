// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Classification of untyped values, e.g. commands read back from storage or received over
//! the network, into one of the [`Command`] variants.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    argument::Argument,
    command::{Command, CommandKind},
    config::{UnknownFields, ValidationConfig},
    error::{CommandError, CommandResult},
    type_tag::{MoveTypeTagAdapter, TypeTagAdapter},
};

#[cfg(test)]
#[path = "unit_tests/discriminator_tests.rs"]
mod discriminator_tests;

/// Checks values against the exact record shapes of arguments and commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discriminator {
    unknown_fields: UnknownFields,
}

impl Discriminator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            unknown_fields: config.unknown_fields,
        }
    }

    pub fn is_argument(&self, value: &Value) -> bool {
        self.check_argument(value).is_ok()
    }

    /// Succeeds iff `value` has exactly the shape of one of the four argument variants.
    pub fn check_argument(&self, value: &Value) -> CommandResult {
        let record = self.record("Argument", value)?;
        let kind = record.kind()?;
        match kind {
            "Input" => {
                record.index("index")?;
                match record.get("name") {
                    None | Some(Value::Null) | Some(Value::String(_)) => {}
                    Some(other) => {
                        return Err(record.mismatch(format!("`name` must be a string, got {other}")))
                    }
                }
                record.finish(&["kind", "index", "name", "value"])
            }
            "GasCoin" => record.finish(&["kind"]),
            "Result" => {
                record.index("index")?;
                record.finish(&["kind", "index"])
            }
            "NestedResult" => {
                record.index("index")?;
                record.index("resultIndex")?;
                record.finish(&["kind", "index", "resultIndex"])
            }
            other => Err(record.mismatch(format!("unknown argument kind `{other}`"))),
        }
    }

    /// Whether `value` has the shape of the `kind` variant.
    pub fn matches(&self, kind: CommandKind, value: &Value) -> bool {
        let result = self.check_shape(kind, value);
        trace!(%kind, matched = result.is_ok(), "command shape check");
        result.is_ok()
    }

    /// Succeeds iff `value` has exactly the shape of the `kind` variant.
    pub fn check_shape(&self, kind: CommandKind, value: &Value) -> CommandResult {
        let record = self.record(kind.name(), value)?;
        let tag = record.kind()?;
        tb_ensure!(
            tag == kind.name(),
            record.mismatch(format!("kind is `{tag}`"))
        );
        match kind {
            CommandKind::MoveCall => {
                for field in ["package", "module", "function"] {
                    record.string(field)?;
                }
                for type_argument in record.array("typeArguments")? {
                    tb_ensure!(
                        type_argument.is_string(),
                        record.mismatch("`typeArguments` must hold type strings")
                    );
                }
                self.arguments(&record, "arguments")?;
                record.finish(&[
                    "kind",
                    "package",
                    "module",
                    "function",
                    "typeArguments",
                    "arguments",
                ])
            }
            CommandKind::TransferObjects => {
                self.arguments(&record, "objects")?;
                self.argument(&record, "address")?;
                record.finish(&["kind", "objects", "address"])
            }
            CommandKind::SplitCoin => {
                self.argument(&record, "coin")?;
                self.argument(&record, "amount")?;
                record.finish(&["kind", "coin", "amount"])
            }
            CommandKind::MergeCoins => {
                self.argument(&record, "destination")?;
                self.arguments(&record, "sources")?;
                record.finish(&["kind", "destination", "sources"])
            }
            CommandKind::Publish => {
                for module in record.array("modules")? {
                    let bytes = module
                        .as_array()
                        .ok_or_else(|| record.mismatch("`modules` must hold byte sequences"))?;
                    tb_ensure!(
                        bytes.iter().all(is_byte),
                        record.mismatch("module bytes must be integers in 0..=255")
                    );
                }
                record.finish(&["kind", "modules"])
            }
            CommandKind::MakeMoveVec => {
                if let Some(type_) = record.get("type") {
                    self.option_of_string(&record, type_)?;
                }
                self.arguments(&record, "objects")?;
                record.finish(&["kind", "type", "objects"])
            }
        }
    }

    pub fn is_command(&self, value: &Value) -> bool {
        CommandKind::ALL
            .iter()
            .any(|kind| self.matches(*kind, value))
    }

    /// Returns the first variant, in [`CommandKind::ALL`] order, whose shape `value` has.
    pub fn discriminate(&self, value: &Value) -> CommandResult<CommandKind> {
        let kind = CommandKind::ALL
            .into_iter()
            .find(|kind| self.matches(*kind, value))
            .ok_or_else(|| CommandError::InvalidCommand {
                reason: self.explain(value),
            })?;
        debug!(%kind, "classified untyped command");
        Ok(kind)
    }

    /// Classifies `value` and reads it into a typed [`Command`].
    pub fn decode(&self, value: &Value) -> CommandResult<Command> {
        let kind = self.discriminate(value)?;
        if kind == CommandKind::MoveCall {
            // Surface type tag failures as such rather than as a generic mismatch.
            let type_arguments = value
                .get("typeArguments")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str);
            for type_argument in type_arguments {
                MoveTypeTagAdapter.parse(type_argument, true)?;
            }
        }
        serde_json::from_value(value.clone())
            .map_err(|e| CommandError::schema_mismatch(kind.name(), e.to_string()))
    }

    /// Best-effort description of why no variant matched.
    fn explain(&self, value: &Value) -> String {
        let tag = value.get("kind").and_then(Value::as_str);
        match tag.and_then(CommandKind::from_name) {
            Some(kind) => match self.check_shape(kind, value) {
                Err(CommandError::SchemaMismatch { reason, .. }) => reason,
                Err(other) => other.to_string(),
                Ok(()) => "shape matched".to_string(),
            },
            None => match tag {
                Some(tag) => format!("unknown command kind `{tag}`"),
                None => "missing `kind` field".to_string(),
            },
        }
    }

    fn argument(&self, record: &Record<'_>, field: &str) -> CommandResult {
        let value = record.require(field)?;
        self.check_argument(value).map_err(|e| nested(record, field, e))
    }

    fn arguments(&self, record: &Record<'_>, field: &str) -> CommandResult {
        for value in record.array(field)? {
            self.check_argument(value).map_err(|e| nested(record, field, e))?;
        }
        Ok(())
    }

    /// The option record is an externally tagged enum and must carry exactly one key,
    /// whatever the unknown-fields policy says.
    fn option_of_string(&self, record: &Record<'_>, value: &Value) -> CommandResult {
        let option = self.record("Option", value)?;
        let shape_error =
            || record.mismatch("`type` must be {\"None\": null} or {\"Some\": {\"value\": ..}}");
        if option.fields.len() != 1 {
            return Err(shape_error());
        }
        match (option.get("None"), option.get("Some")) {
            (Some(Value::Null), None) => Ok(()),
            (None, Some(some)) => {
                let inner = self.record("Some", some)?;
                inner.string("value")?;
                inner.finish(&["value"])
            }
            _ => Err(shape_error()),
        }
    }

    fn record<'a>(&self, expected: &'static str, value: &'a Value) -> CommandResult<Record<'a>> {
        let fields = value
            .as_object()
            .ok_or_else(|| CommandError::schema_mismatch(expected, "not a record"))?;
        Ok(Record {
            expected,
            fields,
            unknown_fields: self.unknown_fields,
        })
    }
}

fn nested(record: &Record<'_>, field: &str, error: CommandError) -> CommandError {
    match error {
        CommandError::SchemaMismatch { reason, .. } => {
            record.mismatch(format!("`{field}`: {reason}"))
        }
        other => other,
    }
}

fn is_byte(value: &Value) -> bool {
    value.as_u64().map_or(false, |byte| byte <= u8::MAX as u64)
}

struct Record<'a> {
    expected: &'static str,
    fields: &'a Map<String, Value>,
    unknown_fields: UnknownFields,
}

impl<'a> Record<'a> {
    fn mismatch(&self, reason: impl Into<String>) -> CommandError {
        CommandError::schema_mismatch(self.expected, reason)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field)
    }

    fn require(&self, field: &str) -> CommandResult<&'a Value> {
        self.get(field)
            .ok_or_else(|| self.mismatch(format!("missing `{field}`")))
    }

    fn kind(&self) -> CommandResult<&'a str> {
        self.require("kind")?
            .as_str()
            .ok_or_else(|| self.mismatch("`kind` must be a string"))
    }

    fn string(&self, field: &str) -> CommandResult<&'a str> {
        self.require(field)?
            .as_str()
            .ok_or_else(|| self.mismatch(format!("`{field}` must be a string")))
    }

    fn index(&self, field: &str) -> CommandResult<u16> {
        self.require(field)?
            .as_u64()
            .and_then(|index| u16::try_from(index).ok())
            .ok_or_else(|| self.mismatch(format!("`{field}` must be an integer in 0..=65535")))
    }

    fn array(&self, field: &str) -> CommandResult<&'a Vec<Value>> {
        self.require(field)?
            .as_array()
            .ok_or_else(|| self.mismatch(format!("`{field}` must be a sequence")))
    }

    fn finish(&self, allowed: &[&str]) -> CommandResult {
        if self.unknown_fields == UnknownFields::Ignore {
            return Ok(());
        }
        match self.fields.keys().find(|key| !allowed.contains(&key.as_str())) {
            Some(unknown) => Err(self.mismatch(format!("unexpected field `{unknown}`"))),
            None => Ok(()),
        }
    }
}

impl Argument {
    /// Reads an argument out of untyped data after checking its shape.
    pub fn from_value(value: &Value, discriminator: &Discriminator) -> CommandResult<Argument> {
        discriminator.check_argument(value)?;
        serde_json::from_value(value.clone())
            .map_err(|e| CommandError::schema_mismatch("Argument", e.to_string()))
    }
}
