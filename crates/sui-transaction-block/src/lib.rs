// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

//! Instruction records of a transaction block: the arguments commands consume, the six
//! command kinds, the encodings their fields declare, and the builders and classifier
//! that produce them.

#[macro_use]
pub mod error;

pub mod argument;
pub mod block;
pub mod builder;
pub mod command;
pub mod config;
pub mod discriminator;
pub mod encoding;
pub mod type_tag;

pub use argument::Argument;
pub use block::TransactionBlock;
pub use builder::TransactionBlockBuilder;
pub use command::{
    Command, CommandKind, MakeMoveVec, MergeCoins, MoveCall, MoveOption, Publish, SplitCoin,
    TransferObjects,
};
pub use config::ValidationConfig;
pub use discriminator::Discriminator;
pub use encoding::{ArgumentSchema, Encoding, ObjectArgument, PureArgument};
pub use error::{CommandError, CommandResult};
pub use type_tag::{MoveTypeTagAdapter, TypeTag, TypeTagAdapter};
