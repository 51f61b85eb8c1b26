// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use tracing::debug;

use crate::{
    argument::Argument,
    block::TransactionBlock,
    command::{
        Command, MakeMoveVec, MergeCoins, MoveCall, MoveOption, Publish, SplitCoin,
        TransferObjects,
    },
    encoding::{ObjectArgument, PureArgument},
    error::{CommandError, CommandResult},
    type_tag::{MoveTypeTagAdapter, TypeTagAdapter},
};

#[cfg(test)]
#[path = "unit_tests/builder_tests.rs"]
mod builder_tests;

pub const TARGET_SEPARATOR: &str = "::";

/// Splits `package::module::function` into its three components.
pub fn parse_target(target: &str) -> CommandResult<(&str, &str, &str)> {
    let malformed = || CommandError::MalformedTarget {
        target: target.to_string(),
    };
    let mut parts = target.split(TARGET_SEPARATOR);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(package), Some(module), Some(function), None)
            if !package.is_empty() && !module.is_empty() && !function.is_empty() =>
        {
            Ok((package, module, function))
        }
        _ => Err(malformed()),
    }
}

/// Builds a `MoveCall`, parsing `type_arguments` strictly with the Move type grammar.
pub fn move_call(
    target: &str,
    type_arguments: &[&str],
    arguments: Vec<Argument>,
) -> CommandResult<Command> {
    move_call_with(&MoveTypeTagAdapter, target, type_arguments, arguments)
}

pub fn move_call_with<A: TypeTagAdapter + ?Sized>(
    adapter: &A,
    target: &str,
    type_arguments: &[&str],
    arguments: Vec<Argument>,
) -> CommandResult<Command> {
    let (package, module, function) = parse_target(target)?;
    let type_arguments = type_arguments
        .iter()
        .map(|type_argument| adapter.parse(type_argument, true))
        .collect::<CommandResult<Vec<_>>>()?;
    debug!(call = %target, "built MoveCall");
    Ok(Command::MoveCall(MoveCall {
        package: package.to_string(),
        module: module.to_string(),
        function: function.to_string(),
        type_arguments,
        arguments,
    }))
}

pub fn transfer_objects(objects: Vec<Argument>, address: Argument) -> Command {
    Command::TransferObjects(TransferObjects {
        objects: objects.into_iter().map(ObjectArgument::from).collect(),
        address: PureArgument::new(address),
    })
}

pub fn split_coin(coin: Argument, amount: Argument) -> Command {
    Command::SplitCoin(SplitCoin {
        coin: ObjectArgument::from(coin),
        amount: PureArgument::new(amount),
    })
}

pub fn merge_coins(destination: Argument, sources: Vec<Argument>) -> Command {
    Command::MergeCoins(MergeCoins {
        destination: ObjectArgument::from(destination),
        sources: sources.into_iter().map(ObjectArgument::from).collect(),
    })
}

/// Builds a `MakeMoveVec`, turning a bare optional element type into the record form.
pub fn make_move_vec(type_: Option<String>, objects: Vec<Argument>) -> Command {
    Command::MakeMoveVec(MakeMoveVec {
        type_: MoveOption::from(type_),
        objects: objects.into_iter().map(ObjectArgument::from).collect(),
    })
}

pub fn publish(modules: Vec<Vec<u8>>) -> Command {
    Command::Publish(Publish { modules })
}

/// Accumulates inputs and commands of a block, handing out the arguments that refer to them.
#[derive(Clone, Debug, Default)]
pub struct TransactionBlockBuilder {
    inputs: Vec<Argument>,
    commands: Vec<Command>,
}

impl TransactionBlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the next block input and returns the argument referring to it. A null
    /// `value` is recorded as no value.
    pub fn input(
        &mut self,
        name: Option<String>,
        value: Option<Value>,
    ) -> CommandResult<Argument> {
        let index = u16::try_from(self.inputs.len())
            .map_err(|_| CommandError::schema_mismatch("TransactionBlock", "too many inputs"))?;
        let value = value.filter(|value| !value.is_null());
        let input = Argument::Input { index, name, value };
        self.inputs.push(input.clone());
        Ok(input)
    }

    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    /// Appends `command` and returns the argument referring to its result.
    pub fn command(&mut self, command: impl Into<Command>) -> CommandResult<Argument> {
        let index = u16::try_from(self.commands.len())
            .map_err(|_| CommandError::schema_mismatch("TransactionBlock", "too many commands"))?;
        let command = command.into();
        debug!(index, kind = %command.kind(), "appended command");
        self.commands.push(command);
        Ok(Argument::result(index))
    }

    pub fn move_call(
        &mut self,
        target: &str,
        type_arguments: &[&str],
        arguments: Vec<Argument>,
    ) -> CommandResult<Argument> {
        let command = move_call(target, type_arguments, arguments)?;
        self.command(command)
    }

    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        address: Argument,
    ) -> CommandResult<Argument> {
        self.command(transfer_objects(objects, address))
    }

    pub fn split_coin(&mut self, coin: Argument, amount: Argument) -> CommandResult<Argument> {
        self.command(split_coin(coin, amount))
    }

    pub fn merge_coins(
        &mut self,
        destination: Argument,
        sources: Vec<Argument>,
    ) -> CommandResult<Argument> {
        self.command(merge_coins(destination, sources))
    }

    pub fn make_move_vec(
        &mut self,
        type_: Option<String>,
        objects: Vec<Argument>,
    ) -> CommandResult<Argument> {
        self.command(make_move_vec(type_, objects))
    }

    pub fn publish(&mut self, modules: Vec<Vec<u8>>) -> CommandResult<Argument> {
        self.command(publish(modules))
    }

    pub fn finish(self) -> TransactionBlock {
        TransactionBlock {
            inputs: self.inputs,
            commands: self.commands,
        }
    }
}
