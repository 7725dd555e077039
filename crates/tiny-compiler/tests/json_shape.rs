//! tests/json_shape.rs — forme JSON des tokens et des deux AST (feature `serde`).
#![cfg(feature = "serde")]

use pretty_assertions::assert_eq;
use serde_json::json;

use tiny_compiler::{parse, tokenize, transform, Node, TargetNode};

const INPUT: &str = "(add 2 (subtract 4 2))";

#[test]
fn tokens_as_json() -> anyhow::Result<()> {
    let got = serde_json::to_value(tokenize(INPUT)?)?;
    assert_eq!(
        got,
        json!([
            {"type": "paren",  "value": "("},
            {"type": "name",   "value": "add"},
            {"type": "number", "value": "2"},
            {"type": "paren",  "value": "("},
            {"type": "name",   "value": "subtract"},
            {"type": "number", "value": "4"},
            {"type": "number", "value": "2"},
            {"type": "paren",  "value": ")"},
            {"type": "paren",  "value": ")"}
        ])
    );
    Ok(())
}

fn ast_json() -> serde_json::Value {
    json!({
        "type": "Program",
        "body": [{
            "type": "CallExpression",
            "name": "add",
            "params": [
                {"type": "NumberLiteral", "value": "2"},
                {
                    "type": "CallExpression",
                    "name": "subtract",
                    "params": [
                        {"type": "NumberLiteral", "value": "4"},
                        {"type": "NumberLiteral", "value": "2"}
                    ]
                }
            ]
        }]
    })
}

fn target_json() -> serde_json::Value {
    json!({
        "type": "Program",
        "body": [{
            "type": "ExpressionStatement",
            "expression": {
                "type": "CallExpression",
                "callee": {"type": "Identifier", "name": "add"},
                "arguments": [
                    {"type": "NumberLiteral", "value": "2"},
                    {
                        "type": "CallExpression",
                        "callee": {"type": "Identifier", "name": "subtract"},
                        "arguments": [
                            {"type": "NumberLiteral", "value": "4"},
                            {"type": "NumberLiteral", "value": "2"}
                        ]
                    }
                ]
            }
        }]
    })
}

#[test]
fn source_ast_as_json() -> anyhow::Result<()> {
    let ast = parse(&tokenize(INPUT)?)?;
    assert_eq!(serde_json::to_value(&ast)?, ast_json());
    Ok(())
}

#[test]
fn target_ast_as_json() -> anyhow::Result<()> {
    let target = transform(&parse(&tokenize(INPUT)?)?)?;
    assert_eq!(serde_json::to_value(&target)?, target_json());
    Ok(())
}

#[test]
fn json_reads_back() -> anyhow::Result<()> {
    let ast: Node = serde_json::from_value(ast_json())?;
    let target: TargetNode = serde_json::from_value(target_json())?;
    assert_eq!(transform(&ast)?, target);
    Ok(())
}
