// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serialization strategies declared on argument schemas.
//!
//! An [`Argument`] says where a value comes from, never what type it has, so the serializer
//! cannot pick an encoding from the value alone. Command fields that always hold an object or
//! a pure value of a known type are declared with [`ObjectArgument`] or [`PureArgument`];
//! these wrap an `Argument` without changing its wire shape and carry the [`Encoding`] as part
//! of their type. Fields typed as a bare `Argument` carry no hint and are resolved from the
//! called function's signature instead.

use std::{fmt, marker::PhantomData};

use schemars::{
    gen::SchemaGenerator,
    schema::{Schema, SchemaObject},
    JsonSchema,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::argument::Argument;

#[cfg(test)]
#[path = "unit_tests/encoding_tests.rs"]
mod encoding_tests;

/// Extension key under which the encoding record is attached to an argument's JSON schema.
pub const ENCODING_EXTENSION: &str = "x-encoding";

/// How a resolved argument value is serialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Encoding {
    /// An on-chain object reference.
    Object,
    /// A scalar or byte string laid out per the named primitive type.
    Pure {
        #[serde(rename = "type")]
        type_name: String,
    },
}

impl Encoding {
    pub fn pure(type_name: impl Into<String>) -> Self {
        Encoding::Pure {
            type_name: type_name.into(),
        }
    }

    pub fn pure_of<T: PureType>() -> Self {
        Self::pure(T::NAME)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Encoding::Object)
    }

    fn to_extension(&self) -> serde_json::Value {
        match self {
            Encoding::Object => json!({ "kind": "object" }),
            Encoding::Pure { type_name } => json!({ "kind": "pure", "type": type_name }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Object => write!(f, "object"),
            Encoding::Pure { type_name } => write!(f, "pure<{type_name}>"),
        }
    }
}

/// A primitive type name a pure argument is declared to hold.
pub trait PureType {
    const NAME: &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address;

impl PureType for Address {
    const NAME: &'static str = "address";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct U64;

impl PureType for U64 {
    const NAME: &'static str = "u64";
}

/// Implemented by every schema an argument-bearing field can be declared with.
pub trait ArgumentSchema {
    /// The encoding declared by the schema, independent of any particular value.
    fn encoding() -> Option<Encoding>;

    fn argument(&self) -> &Argument;
}

impl ArgumentSchema for Argument {
    fn encoding() -> Option<Encoding> {
        None
    }

    fn argument(&self) -> &Argument {
        self
    }
}

/// An argument that must resolve to an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectArgument(pub Argument);

impl ObjectArgument {
    pub fn into_inner(self) -> Argument {
        self.0
    }
}

impl ArgumentSchema for ObjectArgument {
    fn encoding() -> Option<Encoding> {
        Some(Encoding::Object)
    }

    fn argument(&self) -> &Argument {
        &self.0
    }
}

impl From<Argument> for ObjectArgument {
    fn from(argument: Argument) -> Self {
        ObjectArgument(argument)
    }
}

impl JsonSchema for ObjectArgument {
    fn schema_name() -> String {
        "ObjectArgument".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        annotated_schema(gen, Self::encoding())
    }
}

/// An argument that must resolve to a pure value of type `T`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PureArgument<T> {
    argument: Argument,
    #[serde(skip)]
    _type: PhantomData<T>,
}

impl<T: PureType> PureArgument<T> {
    pub fn new(argument: Argument) -> Self {
        Self {
            argument,
            _type: PhantomData,
        }
    }

    pub fn into_inner(self) -> Argument {
        self.argument
    }
}

impl<T: PureType> ArgumentSchema for PureArgument<T> {
    fn encoding() -> Option<Encoding> {
        Some(Encoding::pure_of::<T>())
    }

    fn argument(&self) -> &Argument {
        &self.argument
    }
}

impl<T: PureType> From<Argument> for PureArgument<T> {
    fn from(argument: Argument) -> Self {
        Self::new(argument)
    }
}

impl<T: PureType> JsonSchema for PureArgument<T> {
    fn schema_name() -> String {
        format!("PureArgument_{}", T::NAME)
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        annotated_schema(gen, Self::encoding())
    }
}

/// The base `Argument` schema with the encoding record attached as an extension.
fn annotated_schema(gen: &mut SchemaGenerator, encoding: Option<Encoding>) -> Schema {
    let mut schema: SchemaObject = Argument::json_schema(gen).into_object();
    if let Some(encoding) = encoding {
        schema
            .extensions
            .insert(ENCODING_EXTENSION.to_string(), encoding.to_extension());
    }
    Schema::Object(schema)
}

/// Reads the encoding record back from a schema produced for an argument-bearing field.
pub fn schema_encoding(schema: &Schema) -> Option<Encoding> {
    match schema {
        Schema::Object(object) => object
            .extensions
            .get(ENCODING_EXTENSION)
            .and_then(|value| serde_json::from_value(value.clone()).ok()),
        Schema::Bool(_) => None,
    }
}

/// One argument-bearing slot of a command, with the encoding its field declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedArgument<'a> {
    pub field: &'static str,
    /// Position within the field when the field is a sequence.
    pub position: Option<usize>,
    pub argument: &'a Argument,
    pub encoding: Option<Encoding>,
}

impl<'a> EncodedArgument<'a> {
    pub(crate) fn single<S: ArgumentSchema>(field: &'static str, schema: &'a S) -> Self {
        Self {
            field,
            position: None,
            argument: schema.argument(),
            encoding: S::encoding(),
        }
    }

    pub(crate) fn sequence<S: ArgumentSchema>(
        field: &'static str,
        schemas: &'a [S],
    ) -> impl Iterator<Item = EncodedArgument<'a>> + 'a {
        schemas
            .iter()
            .enumerate()
            .map(move |(position, schema)| Self {
                field,
                position: Some(position),
                argument: schema.argument(),
                encoding: S::encoding(),
            })
    }
}
