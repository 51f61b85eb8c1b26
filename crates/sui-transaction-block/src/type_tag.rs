// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use move_core_types::{language_storage, parser::parse_type_tag};
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CommandError, CommandResult};

#[cfg(test)]
#[path = "unit_tests/type_tag_tests.rs"]
mod type_tag_tests;

/// An already-validated Move type, used as a type argument of a Move call.
///
/// The value is opaque to this crate. On the wire it travels as its canonical string and is
/// re-parsed strictly when read back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(language_storage::TypeTag);

impl TypeTag {
    pub fn as_move(&self) -> &language_storage::TypeTag {
        &self.0
    }

    pub fn into_inner(self) -> language_storage::TypeTag {
        self.0
    }
}

impl From<language_storage::TypeTag> for TypeTag {
    fn from(tag: language_storage::TypeTag) -> Self {
        TypeTag(tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TypeTag {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveTypeTagAdapter.parse(s, true)
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

impl JsonSchema for TypeTag {
    fn schema_name() -> String {
        "TypeTag".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Turns the textual form of a type into a [`TypeTag`].
pub trait TypeTagAdapter {
    /// Parses `text`. In strict mode malformed input, including surrounding whitespace, is
    /// rejected rather than coerced.
    fn parse(&self, text: &str, strict: bool) -> CommandResult<TypeTag>;
}

/// Parses type tags with the Move type grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveTypeTagAdapter;

impl TypeTagAdapter for MoveTypeTagAdapter {
    fn parse(&self, text: &str, strict: bool) -> CommandResult<TypeTag> {
        let invalid = |error: String| CommandError::InvalidTypeTag {
            type_tag: text.to_string(),
            error,
        };
        let candidate = if strict { text } else { text.trim() };
        if candidate.is_empty() {
            return Err(invalid("empty type".to_string()));
        }
        if strict && candidate.trim() != candidate {
            return Err(invalid("surrounding whitespace".to_string()));
        }
        parse_type_tag(candidate)
            .map(TypeTag)
            .map_err(|e| invalid(e.to_string()))
    }
}

impl<A: TypeTagAdapter + ?Sized> TypeTagAdapter for &A {
    fn parse(&self, text: &str, strict: bool) -> CommandResult<TypeTag> {
        (**self).parse(text, strict)
    }
}
