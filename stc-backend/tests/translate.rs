//! End-to-end pipeline tests: syntax-tree JSON in, instruction listing and
//! both rendered surfaces out.

use pretty_assertions::assert_eq;
use stc_backend::translate;
use stc_common::TranslationError;
use stc_frontend::SyntaxNode;

fn tree(json: &str) -> SyntaxNode {
    serde_json::from_str(json).unwrap()
}

// function clamp(a, b) {
//     while (a < b) {
//         if (a < 0) { a = 0 - a; } else { a = a + 1; }
//     }
//     return a;
// }
const NESTED_FUNCTION: &str = r#"{
    "type": "Program",
    "body": [{
        "type": "FunctionDeclaration",
        "id": { "type": "Identifier", "name": "clamp" },
        "params": [
            { "type": "Identifier", "name": "a" },
            { "type": "Identifier", "name": "b" }
        ],
        "body": {
            "type": "BlockStatement",
            "body": [
                {
                    "type": "WhileStatement",
                    "test": {
                        "type": "BinaryExpression",
                        "operator": "<",
                        "left": { "type": "Identifier", "name": "a" },
                        "right": { "type": "Identifier", "name": "b" }
                    },
                    "body": {
                        "type": "BlockStatement",
                        "body": [{
                            "type": "IfStatement",
                            "test": {
                                "type": "BinaryExpression",
                                "operator": "<",
                                "left": { "type": "Identifier", "name": "a" },
                                "right": { "type": "Literal", "value": 0 }
                            },
                            "consequent": {
                                "type": "BlockStatement",
                                "body": [{
                                    "type": "ExpressionStatement",
                                    "expression": {
                                        "type": "AssignmentExpression",
                                        "operator": "=",
                                        "left": { "type": "Identifier", "name": "a" },
                                        "right": {
                                            "type": "BinaryExpression",
                                            "operator": "-",
                                            "left": { "type": "Literal", "value": 0 },
                                            "right": { "type": "Identifier", "name": "a" }
                                        }
                                    }
                                }]
                            },
                            "alternate": {
                                "type": "BlockStatement",
                                "body": [{
                                    "type": "ExpressionStatement",
                                    "expression": {
                                        "type": "AssignmentExpression",
                                        "operator": "=",
                                        "left": { "type": "Identifier", "name": "a" },
                                        "right": {
                                            "type": "BinaryExpression",
                                            "operator": "+",
                                            "left": { "type": "Identifier", "name": "a" },
                                            "right": { "type": "Literal", "value": 1 }
                                        }
                                    }
                                }]
                            }
                        }]
                    }
                },
                {
                    "type": "ReturnStatement",
                    "argument": { "type": "Identifier", "name": "a" }
                }
            ]
        }
    }]
}"#;

#[test]
fn test_nested_function_listing() {
    let result = translate(&tree(NESTED_FUNCTION)).unwrap();
    assert_eq!(
        result.program.listing(),
        "func clamp\n\
         param a\n\
         param b\n\
         L0:\n\
         lt t0, a, b\n\
         cmp t0\n\
         jmp_if_false L1\n\
         lt t1, a, 0\n\
         cmp t1\n\
         jmp_if_false L2\n\
         sub t2, 0, a\n\
         mov a, t2\n\
         jmp L3\n\
         L2:\n\
         add t3, a, 1\n\
         mov a, t3\n\
         L3:\n\
         jmp L0\n\
         L1:\n\
         ret a\n\
         end_func"
    );
}

#[test]
fn test_nested_function_script_surface() {
    let result = translate(&tree(NESTED_FUNCTION)).unwrap();
    let expected = "\
def clamp(a, b):
    # L0:
    t0 = a < b
    if t0:
        t1 = a < 0
        if t1:
            t2 = 0 - a
            a = t2
            # jump L3
        # L2:
        t3 = a + 1
        a = t3
        # L3:
        # jump L0
    # L1:
    return a
";
    assert_eq!(result.script, expected);
}

#[test]
fn test_nested_function_typed_surface() {
    let result = translate(&tree(NESTED_FUNCTION)).unwrap();
    let expected = "\
int main(void) {
    int clamp(int a, int b) {
        // L0:
        t0 = a < b;
        if (t0) {
            t1 = a < 0;
            if (t1) {
                t2 = 0 - a;
                a = t2;
                // jump L3
            }
            // L2:
            t3 = a + 1;
            a = t3;
            // L3:
            // jump L0
        }
        // L1:
        return a;
    }
}
";
    assert_eq!(result.typed, expected);
}

#[test]
fn test_depth_returns_to_base_in_both_surfaces() {
    // Follow the function with a top-level statement so the last emitted
    // line sits at base depth in both surfaces.
    let mut doc: serde_json::Value = serde_json::from_str(NESTED_FUNCTION).unwrap();
    doc["body"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({ "type": "ReturnStatement" }));
    let parsed: SyntaxNode = serde_json::from_value(doc).unwrap();
    let result = translate(&parsed).unwrap();

    // Script surface: the trailing statement carries no indentation.
    assert_eq!(result.script.lines().last().unwrap(), "return");

    // Typed surface: braces balance and the program frame closes at
    // column zero.
    let opens = result.typed.matches('{').count();
    let closes = result.typed.matches('}').count();
    assert_eq!(opens, closes);
    assert_eq!(result.typed.lines().last().unwrap(), "}");
    assert_eq!(
        result.typed.lines().rev().nth(1).unwrap(),
        "    return;"
    );
}

#[test]
fn test_short_circuit_and_in_both_surfaces() {
    // var x = a && b;
    let json = r#"{
        "type": "Program",
        "body": [{
            "type": "VariableDeclaration",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": { "type": "Identifier", "name": "x" },
                "init": {
                    "type": "LogicalExpression",
                    "operator": "&&",
                    "left": { "type": "Identifier", "name": "a" },
                    "right": { "type": "Identifier", "name": "b" }
                }
            }]
        }]
    }"#;
    let result = translate(&tree(json)).unwrap();
    assert_eq!(
        result.program.listing(),
        "decl x\n\
         cmp a\n\
         jmp_if_false L0\n\
         mov t0, b\n\
         jmp L1\n\
         L0:\n\
         mov t0, a\n\
         L1:\n\
         mov x, t0"
    );

    // The right operand's assignment only appears inside the guarded
    // block: one level of indentation in the script surface.
    let expected_script = "\
x = None
if a:
    t0 = b
    # jump L1
# L0:
t0 = a
# L1:
x = t0
";
    assert_eq!(result.script, expected_script);

    let expected_typed = "\
int main(void) {
    int x;
    if (a) {
        t0 = b;
        // jump L1
    }
    // L0:
    t0 = a;
    // L1:
    x = t0;
}
";
    assert_eq!(result.typed, expected_typed);
}

#[test]
fn test_translate_is_deterministic() {
    let parsed = tree(NESTED_FUNCTION);
    let first = translate(&parsed).unwrap();
    let second = translate(&parsed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_out_of_subset_input_fails_with_no_output() {
    let json = r#"{
        "type": "Program",
        "body": [{
            "type": "ExpressionStatement",
            "expression": {
                "type": "UnaryExpression",
                "operator": "-",
                "argument": { "type": "Identifier", "name": "a" }
            }
        }]
    }"#;
    let err = translate(&tree(json)).unwrap_err();
    assert_eq!(
        err,
        TranslationError::unsupported_construct("UnaryExpression")
    );
}

#[test]
fn test_string_and_bool_literals_pass_through() {
    let json = r#"{
        "type": "Program",
        "body": [{
            "type": "VariableDeclaration",
            "declarations": [
                {
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "s" },
                    "init": { "type": "Literal", "value": "hi" }
                },
                {
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "f" },
                    "init": { "type": "Literal", "value": false }
                }
            ]
        }]
    }"#;
    let result = translate(&tree(json)).unwrap();
    assert_eq!(
        result.program.listing(),
        "decl s\nmov s, \"hi\"\ndecl f\nmov f, false"
    );
    assert!(result.script.contains("s = 'hi'"));
    assert!(result.script.contains("f = False"));
    assert!(result.typed.contains("s = \"hi\";"));
    assert!(result.typed.contains("f = false;"));
}
