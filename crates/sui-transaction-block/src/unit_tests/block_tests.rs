// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::builder;
use serde_json::json;

fn split_and_transfer() -> TransactionBlock {
    TransactionBlock {
        inputs: vec![Argument::input(0), Argument::input(1), Argument::input(2)],
        commands: vec![
            builder::split_coin(Argument::input(0), Argument::input(1)),
            builder::transfer_objects(vec![Argument::result(0)], Argument::input(2)),
        ],
    }
}

#[test]
fn test_split_then_transfer_is_valid() {
    let block = split_and_transfer();
    block.validate(&ValidationConfig::default()).unwrap();
    block.validate(&ValidationConfig::strict()).unwrap();

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(
        value["commands"][1],
        json!({
            "kind": "TransferObjects",
            "objects": [{ "kind": "Result", "index": 0 }],
            "address": { "kind": "Input", "index": 2 },
        })
    );
    assert_eq!(
        TransactionBlock::from_value(&value, &ValidationConfig::strict()).unwrap(),
        block
    );
}

#[test]
fn test_dangling_result_is_only_rejected_on_request() {
    let block = TransactionBlock {
        inputs: vec![Argument::input(0), Argument::input(1), Argument::input(2)],
        commands: vec![builder::transfer_objects(
            vec![Argument::result(5)],
            Argument::input(2),
        )],
    };
    block.validate(&ValidationConfig::default()).unwrap();
    assert_eq!(
        block.validate(&ValidationConfig::strict()).unwrap_err(),
        CommandError::DanglingReference {
            command: 0,
            argument: "Result(5)".to_string(),
            reason: "command 5 does not precede command 0".to_string(),
        }
    );
}

#[test]
fn test_self_and_forward_references_are_dangling() {
    let block = TransactionBlock {
        inputs: vec![Argument::input(0)],
        commands: vec![
            builder::split_coin(Argument::GasCoin, Argument::input(0)),
            builder::merge_coins(Argument::GasCoin, vec![Argument::nested_result(1, 0)]),
        ],
    };
    assert!(matches!(
        block.check_references(),
        Err(CommandError::DanglingReference { command: 1, .. })
    ));

    let block = TransactionBlock {
        inputs: vec![Argument::input(0)],
        commands: vec![
            builder::split_coin(Argument::GasCoin, Argument::input(0)),
            builder::merge_coins(Argument::result(0), vec![Argument::nested_result(0, 1)]),
        ],
    };
    block.check_references().unwrap();
}

#[test]
fn test_undeclared_input_is_dangling() {
    let block = TransactionBlock {
        inputs: vec![Argument::input(0)],
        commands: vec![builder::split_coin(Argument::GasCoin, Argument::input(1))],
    };
    match block.check_references() {
        Err(CommandError::DanglingReference { argument, reason, .. }) => {
            assert_eq!(argument, "Input(1)");
            assert_eq!(reason, "the block declares 1 inputs");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_inputs_must_be_in_order() {
    let block = TransactionBlock {
        inputs: vec![Argument::input(1)],
        commands: vec![],
    };
    assert!(matches!(
        block.validate(&ValidationConfig::default()),
        Err(CommandError::SchemaMismatch { .. })
    ));
    let block = TransactionBlock {
        inputs: vec![Argument::GasCoin],
        commands: vec![],
    };
    assert!(block.validate(&ValidationConfig::default()).is_err());
}

#[test]
fn test_max_commands() {
    let config = ValidationConfig {
        max_commands: Some(1),
        ..ValidationConfig::default()
    };
    assert!(matches!(
        split_and_transfer().validate(&config),
        Err(CommandError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_from_value_classifies_every_command() {
    let value = json!({
        "commands": [
            {
                "kind": "SplitCoin",
                "coin": { "kind": "Input", "index": 0 },
                "amount": { "kind": "Input", "index": 1 },
            },
            { "kind": "Publish", "modules": [[1, 2]] },
        ],
    });
    let block = TransactionBlock::from_value(&value, &ValidationConfig::default()).unwrap();
    assert!(block.inputs.is_empty());
    assert_eq!(
        block.commands,
        vec![
            builder::split_coin(Argument::input(0), Argument::input(1)),
            builder::publish(vec![vec![1, 2]]),
        ]
    );

    // Inputs are never declared here, so the strict config reports them as dangling.
    assert!(matches!(
        TransactionBlock::from_value(&value, &ValidationConfig::strict()),
        Err(CommandError::DanglingReference { .. })
    ));
}

#[test]
fn test_from_value_rejects_bad_commands() {
    let value = json!({ "commands": [{ "kind": "Upgrade" }] });
    assert!(matches!(
        TransactionBlock::from_value(&value, &ValidationConfig::default()),
        Err(CommandError::InvalidCommand { .. })
    ));
    assert!(matches!(
        TransactionBlock::from_value(&json!({}), &ValidationConfig::default()),
        Err(CommandError::SchemaMismatch { .. })
    ));
    let value = json!({ "inputs": {}, "commands": [] });
    assert!(matches!(
        TransactionBlock::from_value(&value, &ValidationConfig::default()),
        Err(CommandError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_block_record_follows_unknown_field_policy() {
    let value = json!({ "commands": [], "bogus": 1 });
    match TransactionBlock::from_value(&value, &ValidationConfig::default()) {
        Err(CommandError::SchemaMismatch { expected, reason }) => {
            assert_eq!(expected, "TransactionBlock");
            assert_eq!(reason, "unexpected field `bogus`");
        }
        other => panic!("unexpected result {other:?}"),
    }

    let lenient = ValidationConfig {
        unknown_fields: UnknownFields::Ignore,
        ..ValidationConfig::default()
    };
    assert_eq!(
        TransactionBlock::from_value(&value, &lenient).unwrap(),
        TransactionBlock::default()
    );
    assert!(matches!(
        TransactionBlock::from_value(&json!([]), &lenient),
        Err(CommandError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_null_input_value_round_trips() {
    let mut builder = crate::TransactionBlockBuilder::new();
    let input = builder.input(None, Some(json!(null))).unwrap();
    assert_eq!(input, Argument::input(0));
    builder.split_coin(Argument::GasCoin, input).unwrap();
    let block = builder.finish();

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["inputs"][0], json!({ "kind": "Input", "index": 0 }));
    assert_eq!(
        TransactionBlock::from_value(&value, &ValidationConfig::strict()).unwrap(),
        block
    );
}
