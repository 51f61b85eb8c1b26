// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    argument::Argument,
    encoding::{Address, EncodedArgument, Encoding, ObjectArgument, PureArgument, U64},
    error::{CommandError, CommandResult},
    type_tag::TypeTag,
};

#[cfg(test)]
#[path = "unit_tests/command_tests.rs"]
mod command_tests;

/// An option that always serializes to a record: `{"None": null}` or `{"Some": {"value": ..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MoveOption<T> {
    None(()),
    Some { value: T },
}

impl<T> MoveOption<T> {
    pub fn none() -> Self {
        MoveOption::None(())
    }

    pub fn some(value: T) -> Self {
        MoveOption::Some { value }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            MoveOption::None(()) => None,
            MoveOption::Some { value } => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            MoveOption::None(()) => None,
            MoveOption::Some { value } => Some(value),
        }
    }
}

impl<T> Default for MoveOption<T> {
    fn default() -> Self {
        MoveOption::none()
    }
}

impl<T> From<Option<T>> for MoveOption<T> {
    fn from(option: Option<T>) -> Self {
        option.map_or_else(MoveOption::none, MoveOption::some)
    }
}

/// A call to a Move function. Arguments are undeclared; their encodings come from the
/// function's signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }

    /// Pairs every argument with the encoding of the parameter it is passed to.
    pub fn resolve_encodings<'a>(
        &'a self,
        parameters: &[Encoding],
    ) -> CommandResult<Vec<EncodedArgument<'a>>> {
        tb_ensure!(
            parameters.len() == self.arguments.len(),
            CommandError::ArityMismatch {
                expected: parameters.len(),
                actual: self.arguments.len(),
            }
        );
        Ok(self
            .arguments
            .iter()
            .zip(parameters)
            .enumerate()
            .map(|(position, (argument, encoding))| EncodedArgument {
                field: "arguments",
                position: Some(position),
                argument,
                encoding: Some(encoding.clone()),
            })
            .collect())
    }
}

/// Sends `objects` to `address`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransferObjects {
    pub objects: Vec<ObjectArgument>,
    pub address: PureArgument<Address>,
}

/// Splits `amount` off `coin` into a new coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SplitCoin {
    pub coin: ObjectArgument,
    pub amount: PureArgument<U64>,
}

/// Merges every coin in `sources` into `destination`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MergeCoins {
    pub destination: ObjectArgument,
    pub sources: Vec<ObjectArgument>,
}

/// Builds a Move vector out of `objects`. The element type must be given when it cannot be
/// inferred, e.g. for an empty vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MakeMoveVec {
    #[serde(rename = "type", default)]
    pub type_: MoveOption<String>,
    pub objects: Vec<ObjectArgument>,
}

/// Publishes a package. Each entry is one compiled module, kept as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Publish {
    pub modules: Vec<Vec<u8>>,
}

/// A single instruction of a transaction block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind")]
pub enum Command {
    MoveCall(MoveCall),
    TransferObjects(TransferObjects),
    SplitCoin(SplitCoin),
    MergeCoins(MergeCoins),
    MakeMoveVec(MakeMoveVec),
    Publish(Publish),
}

/// The variant of a [`Command`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    MoveCall,
    TransferObjects,
    SplitCoin,
    MergeCoins,
    Publish,
    MakeMoveVec,
}

impl CommandKind {
    /// Every variant, in the order untyped values are matched against them.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::MoveCall,
        CommandKind::TransferObjects,
        CommandKind::SplitCoin,
        CommandKind::MergeCoins,
        CommandKind::Publish,
        CommandKind::MakeMoveVec,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::MoveCall => "MoveCall",
            CommandKind::TransferObjects => "TransferObjects",
            CommandKind::SplitCoin => "SplitCoin",
            CommandKind::MergeCoins => "MergeCoins",
            CommandKind::Publish => "Publish",
            CommandKind::MakeMoveVec => "MakeMoveVec",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::MoveCall(_) => CommandKind::MoveCall,
            Command::TransferObjects(_) => CommandKind::TransferObjects,
            Command::SplitCoin(_) => CommandKind::SplitCoin,
            Command::MergeCoins(_) => CommandKind::MergeCoins,
            Command::MakeMoveVec(_) => CommandKind::MakeMoveVec,
            Command::Publish(_) => CommandKind::Publish,
        }
    }

    /// Every argument-bearing slot of the command, in field order, with the encoding its
    /// field declares. `MoveCall` arguments carry no encoding; see
    /// [`MoveCall::resolve_encodings`].
    pub fn encoded_arguments(&self) -> Vec<EncodedArgument<'_>> {
        match self {
            Command::MoveCall(call) => {
                EncodedArgument::sequence("arguments", &call.arguments).collect()
            }
            Command::TransferObjects(transfer) => {
                EncodedArgument::sequence("objects", &transfer.objects)
                    .chain([EncodedArgument::single("address", &transfer.address)])
                    .collect()
            }
            Command::SplitCoin(split) => vec![
                EncodedArgument::single("coin", &split.coin),
                EncodedArgument::single("amount", &split.amount),
            ],
            Command::MergeCoins(merge) => {
                std::iter::once(EncodedArgument::single("destination", &merge.destination))
                    .chain(EncodedArgument::sequence("sources", &merge.sources))
                    .collect()
            }
            Command::MakeMoveVec(vector) => {
                EncodedArgument::sequence("objects", &vector.objects).collect()
            }
            Command::Publish(_) => vec![],
        }
    }

    /// All arguments the command reads, in field order.
    pub fn arguments(&self) -> Vec<&Argument> {
        self.encoded_arguments()
            .into_iter()
            .map(|slot| slot.argument)
            .collect()
    }
}

impl From<MoveCall> for Command {
    fn from(call: MoveCall) -> Self {
        Command::MoveCall(call)
    }
}

impl From<TransferObjects> for Command {
    fn from(transfer: TransferObjects) -> Self {
        Command::TransferObjects(transfer)
    }
}

impl From<SplitCoin> for Command {
    fn from(split: SplitCoin) -> Self {
        Command::SplitCoin(split)
    }
}

impl From<MergeCoins> for Command {
    fn from(merge: MergeCoins) -> Self {
        Command::MergeCoins(merge)
    }
}

impl From<MakeMoveVec> for Command {
    fn from(vec: MakeMoveVec) -> Self {
        Command::MakeMoveVec(vec)
    }
}

impl From<Publish> for Command {
    fn from(publish: Publish) -> Self {
        Command::Publish(publish)
    }
}
