// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::{command::CommandKind, encoding::U64, type_tag::TypeTag};
use serde_json::json;

/// Rejects every type string.
struct RejectAll;

impl TypeTagAdapter for RejectAll {
    fn parse(&self, text: &str, _strict: bool) -> CommandResult<TypeTag> {
        Err(CommandError::InvalidTypeTag {
            type_tag: text.to_string(),
            error: "rejected".to_string(),
        })
    }
}

#[test]
fn test_move_call_decomposes_target() {
    let command = move_call("0x2::coin::split", &[], vec![Argument::input(0)]).unwrap();
    let Command::MoveCall(call) = command else {
        panic!("expected a MoveCall");
    };
    assert_eq!(call.package, "0x2");
    assert_eq!(call.module, "coin");
    assert_eq!(call.function, "split");
    assert!(call.type_arguments.is_empty());
    assert_eq!(call.arguments, vec![Argument::input(0)]);
}

#[test]
fn test_move_call_rejects_malformed_targets() {
    for target in [
        "badtarget",
        "0x2::coin",
        "0x2::coin::split::extra",
        "::coin::split",
        "0x2::::split",
        "0x2::coin::",
        "",
    ] {
        assert_eq!(
            move_call(target, &[], vec![]).unwrap_err(),
            CommandError::MalformedTarget {
                target: target.to_string()
            },
            "target `{target}`"
        );
    }
}

#[test]
fn test_move_call_parses_type_arguments() {
    let command = move_call(
        "0x2::coin::zero",
        &["0x2::sui::SUI", "vector<u8>"],
        vec![],
    )
    .unwrap();
    let Command::MoveCall(call) = command else {
        panic!("expected a MoveCall");
    };
    assert_eq!(call.type_arguments.len(), 2);
    assert_eq!(call.type_arguments[1], "vector<u8>".parse::<TypeTag>().unwrap());
}

#[test]
fn test_move_call_rejects_malformed_type_arguments() {
    for type_argument in ["vector<", "0x2::sui", " u64", "not a type"] {
        let err = move_call("0x2::coin::zero", &[type_argument], vec![]).unwrap_err();
        match &err {
            CommandError::InvalidTypeTag { type_tag, .. } => {
                assert_eq!(type_tag, type_argument, "{err}")
            }
            other => panic!("{type_argument}: unexpected error {other}"),
        }
    }
}

#[test]
fn test_malformed_target_is_reported_before_type_arguments() {
    assert!(matches!(
        move_call_with(&RejectAll, "badtarget", &["u64"], vec![]),
        Err(CommandError::MalformedTarget { .. })
    ));
    assert!(matches!(
        move_call_with(&RejectAll, "0x2::coin::zero", &["u64"], vec![]),
        Err(CommandError::InvalidTypeTag { .. })
    ));
    assert!(move_call_with(&RejectAll, "0x2::coin::zero", &[], vec![]).is_ok());
}

#[test]
fn test_direct_builders() {
    assert_eq!(
        transfer_objects(vec![Argument::result(0)], Argument::input(1)),
        Command::TransferObjects(TransferObjects {
            objects: vec![ObjectArgument(Argument::result(0))],
            address: PureArgument::new(Argument::input(1)),
        })
    );
    assert_eq!(
        split_coin(Argument::GasCoin, Argument::input(0)),
        Command::SplitCoin(SplitCoin {
            coin: ObjectArgument(Argument::GasCoin),
            amount: PureArgument::<U64>::new(Argument::input(0)),
        })
    );
    assert_eq!(
        merge_coins(Argument::input(0), vec![Argument::input(1), Argument::input(2)]),
        Command::MergeCoins(MergeCoins {
            destination: ObjectArgument(Argument::input(0)),
            sources: vec![
                ObjectArgument(Argument::input(1)),
                ObjectArgument(Argument::input(2))
            ],
        })
    );
    assert_eq!(
        publish(vec![vec![1], vec![2, 3]]),
        Command::Publish(Publish {
            modules: vec![vec![1], vec![2, 3]]
        })
    );
}

#[test]
fn test_make_move_vec_wraps_type() {
    let untyped = make_move_vec(None, vec![Argument::input(0)]);
    assert_eq!(
        serde_json::to_value(&untyped).unwrap()["type"],
        json!({ "None": null })
    );

    let typed = make_move_vec(Some("u64".to_string()), vec![Argument::input(0)]);
    assert_eq!(
        serde_json::to_value(&typed).unwrap()["type"],
        json!({ "Some": { "value": "u64" } })
    );
}

#[test]
fn test_block_builder_hands_out_references() {
    let mut builder = TransactionBlockBuilder::new();
    let coin = builder.input(Some("coin".to_string()), None).unwrap();
    let amount = builder.input(None, Some(json!(100))).unwrap();
    let recipient = builder.input(None, Some(json!("0xa11ce"))).unwrap();

    let split = builder.split_coin(coin, amount).unwrap();
    assert_eq!(split, Argument::result(0));
    let transfer = builder.transfer_objects(vec![split], recipient).unwrap();
    assert_eq!(transfer, Argument::result(1));
    assert_eq!(builder.gas(), Argument::GasCoin);

    let block = builder.finish();
    assert_eq!(block.inputs.len(), 3);
    assert_eq!(block.inputs[0], Argument::named_input(0, "coin"));
    assert_eq!(
        block.commands,
        vec![
            split_coin(Argument::named_input(0, "coin"), block.inputs[1].clone()),
            transfer_objects(vec![Argument::result(0)], block.inputs[2].clone()),
        ]
    );
    block.check_references().unwrap();
}

#[test]
fn test_block_builder_covers_every_command() {
    let mut builder = TransactionBlockBuilder::new();
    let input = builder.input(None, None).unwrap();
    let gas = builder.gas();
    let published = builder.publish(vec![vec![0xa1, 0x1c, 0xeb, 0x0b]]).unwrap();
    let call = builder
        .move_call("0x2::coin::zero", &["0x2::sui::SUI"], vec![])
        .unwrap();
    builder.merge_coins(gas.clone(), vec![call.clone()]).unwrap();
    let vector = builder.make_move_vec(None, vec![published, call]).unwrap();
    builder.transfer_objects(vec![vector], input).unwrap();

    let block = builder.finish();
    assert_eq!(
        block.commands.iter().map(Command::kind).collect::<Vec<_>>(),
        vec![
            CommandKind::Publish,
            CommandKind::MoveCall,
            CommandKind::MergeCoins,
            CommandKind::MakeMoveVec,
            CommandKind::TransferObjects,
        ]
    );
    block.check_references().unwrap();
}

#[test]
fn test_block_builder_propagates_build_errors() {
    let mut builder = TransactionBlockBuilder::new();
    assert!(builder.move_call("badtarget", &[], vec![]).is_err());
    assert!(builder.finish().commands.is_empty());
}
