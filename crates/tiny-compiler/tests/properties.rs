//! tests/properties.rs — propriétés du pipeline (proptest).

use proptest::prelude::*;

use tiny_compiler::{compile, parse, tokenize, Node};

/// Programme source aléatoire (arbre), rendu ensuite en texte.
fn expr() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        "[0-9]{1,4}".prop_map(Node::number),
        "[a-zA-Z0-9 ]{0,6}".prop_map(Node::string),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        ("[a-zA-Z]{1,8}", prop::collection::vec(inner, 0..4)).prop_map(|(name, params)| Node::call(name, params))
    })
}

fn program() -> impl Strategy<Value = Node> {
    prop::collection::vec(expr(), 0..4).prop_map(Node::program)
}

/// Réimprime `ast` en insérant du blanc arbitraire entre les tokens.
fn spaced(ast: &Node, pad: &str) -> String {
    match ast {
        Node::Program { body } => body.iter().map(|n| spaced(n, pad)).collect::<Vec<_>>().join(&format!(" {pad}")),
        Node::CallExpression { name, params } => {
            let mut s = format!("({pad}{name}");
            for p in params {
                s.push(' ');
                s.push_str(pad);
                s.push_str(&spaced(p, pad));
            }
            s.push_str(pad);
            s.push(')');
            s
        }
        Node::NumberLiteral { value } => value.clone(),
        Node::StringLiteral { value } => format!("\"{value}\""),
    }
}

fn count_calls(ast: &Node) -> usize {
    let own = usize::from(matches!(ast, Node::CallExpression { .. }));
    own + ast.children().iter().map(count_calls).sum::<usize>()
}

proptest! {
    #[test]
    fn whitespace_between_tokens_is_irrelevant(ast in program(), pad in "[ \t\n]{0,3}") {
        let canonical = tokenize(&ast.to_string()).unwrap();
        let padded = tokenize(&spaced(&ast, &pad)).unwrap();
        prop_assert_eq!(canonical, padded);
    }

    #[test]
    fn sexpr_reprint_parses_back(ast in program()) {
        let again = parse(&tokenize(&ast.to_string()).unwrap()).unwrap();
        prop_assert_eq!(again, ast);
    }

    #[test]
    fn compile_is_pure(ast in program()) {
        let src = ast.to_string();
        prop_assert_eq!(compile(&src).unwrap(), compile(&src).unwrap());
    }

    #[test]
    fn only_top_level_calls_end_with_semicolon(ast in program()) {
        let out = compile(&ast.to_string()).unwrap();
        let body = match &ast { Node::Program { body } => body, _ => unreachable!() };
        let lines: Vec<&str> = if body.is_empty() { Vec::new() } else { out.split('\n').collect() };
        prop_assert_eq!(lines.len(), body.len());
        let mut semis = 0;
        for (line, node) in lines.iter().zip(body) {
            let is_call = matches!(node, Node::CallExpression { .. });
            prop_assert_eq!(line.ends_with(");"), is_call);
            if is_call {
                semis += 1;
            }
        }
        // chaque appel s'ouvre par `name(` ; seuls les appels de tête portent `;`
        prop_assert_eq!(out.matches('(').count(), count_calls(&ast));
        prop_assert_eq!(out.matches(';').count(), semis);
    }
}
