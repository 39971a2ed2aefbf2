use insta::assert_debug_snapshot;

use super::{FunctionTable, Parser};
use crate::ast::*;
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};

fn parse(source: &str) -> SyntaxResult<Program> {
    Parser::from_reader(source.as_bytes()).parse_program()
}

fn stmts(source: &str) -> Vec<Stmt> {
    parse(source).unwrap().block.stmts
}

fn stmt(kind: StmtKind, line: u32) -> Stmt {
    Stmt::new(kind, line)
}

fn block(stmts: Vec<Stmt>) -> Block {
    Block { stmts }
}

fn int(n: i64) -> Expr {
    Expr::Constant(Constant::Integer(n))
}

fn yarn(s: &str) -> Expr {
    Expr::Constant(Constant::String(s.to_owned()))
}

fn troof(b: bool) -> Expr {
    Expr::Constant(Constant::Bool(b))
}

fn var(name: &str) -> Expr {
    Expr::Variable(name.to_owned())
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn print(exprs: Vec<Expr>) -> StmtKind {
    StmtKind::Print {
        exprs,
        suppress_newline: false,
    }
}

#[test]
fn empty_program() {
    assert_eq!(
        parse("\nBTW nothing here\nHAI 1.2\nKTHXBYE\n\n").unwrap(),
        Program {
            version: 1.2,
            block: block(vec![]),
        }
    );
}

#[test]
fn integer_version() {
    assert_eq!(parse("HAI 1\nKTHXBYE").unwrap().version, 1.0);
}

#[test]
fn declaration_and_print() {
    assert_debug_snapshot!(parse("HAI 1.2\nI HAS A x ITZ SUM OF 2 AN 3\nVISIBLE x!\nKTHXBYE").unwrap(), @r###"
    Program {
        version: 1.2,
        block: Block {
            stmts: [
                Stmt {
                    kind: Declare {
                        name: "x",
                        init: Some(
                            Binary {
                                op: Sum,
                                lhs: Constant(
                                    Integer(
                                        2,
                                    ),
                                ),
                                rhs: Constant(
                                    Integer(
                                        3,
                                    ),
                                ),
                            },
                        ),
                    },
                    line: 2,
                },
                Stmt {
                    kind: Print {
                        exprs: [
                            Variable(
                                "x",
                            ),
                        ],
                        suppress_newline: true,
                    },
                    line: 3,
                },
            ],
        },
    }
    "###);
}

#[test]
fn commas_separate_statements() {
    assert_eq!(
        stmts("HAI 1.2, I HAS A x, x R 4, GIMMEH x, KTHXBYE"),
        [
            stmt(
                StmtKind::Declare {
                    name: "x".to_owned(),
                    init: None,
                },
                1
            ),
            stmt(
                StmtKind::Assign {
                    target: "x".to_owned(),
                    expr: int(4),
                },
                1
            ),
            stmt(
                StmtKind::Input {
                    target: "x".to_owned(),
                },
                1
            ),
        ]
    );
}

#[test]
fn casts() {
    assert_eq!(
        stmts("HAI 1.2\nx IS NOW A NUMBAR\nVISIBLE MAEK x A YARN\nKTHXBYE"),
        [
            stmt(
                StmtKind::Cast {
                    target: "x".to_owned(),
                    ty: ValueType::Numbar,
                },
                2
            ),
            stmt(
                print(vec![Expr::Cast {
                    expr: Box::new(var("x")),
                    ty: ValueType::Yarn,
                }]),
                3
            ),
        ]
    );
}

#[test]
fn forward_function_call() {
    let source = "HAI 1.2
VISIBLE add 1 2 \"!\"
HOW DUZ I add YR a AN YR b
  FOUND YR SUM OF a AN b
IF U SAY SO
KTHXBYE";

    assert_eq!(
        stmts(source),
        [
            stmt(
                print(vec![
                    Expr::Call {
                        name: "add".to_owned(),
                        args: vec![int(1), int(2)],
                    },
                    yarn("!"),
                ]),
                2
            ),
            stmt(
                StmtKind::FuncDef(FuncDef {
                    name: "add".to_owned(),
                    params: vec!["a".to_owned(), "b".to_owned()],
                    body: block(vec![stmt(
                        StmtKind::Return(binary(BinOp::Sum, var("a"), var("b"))),
                        4
                    )]),
                }),
                3
            ),
        ]
    );
}

#[test]
fn too_few_arguments() {
    let source = "HAI 1.2
VISIBLE add 1
HOW DUZ I add YR a AN YR b
  FOUND YR a
IF U SAY SO
KTHXBYE";

    assert_eq!(
        parse(source).unwrap_err(),
        SyntaxError::new(
            SyntaxErrorKind::WrongArgumentCount {
                name: "add".to_owned(),
                expected: 2,
                found: 1,
            },
            2,
            9
        )
    );
}

#[test]
fn duplicate_function() {
    let source = "HAI 1.2
HOW DUZ I f
IF U SAY SO
HOW DUZ I f
IF U SAY SO
KTHXBYE";

    assert_eq!(
        parse(source).unwrap_err(),
        SyntaxError::new(SyntaxErrorKind::DuplicateFunction("f".to_owned()), 4, 11)
    );
}

#[test]
fn malformed_function_header() {
    assert_eq!(
        parse("HAI 1.2\nHOW DUZ I f YR\nIF U SAY SO\nKTHXBYE")
            .unwrap_err()
            .kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: "a parameter name".to_owned(),
            found: "newline".to_owned(),
        }
    );
}

#[test]
fn loop_with_update_and_guard() {
    let source = "HAI 1.2
IM IN YR loop UPPIN YR i TIL BOTH SAEM i AN 3
  VISIBLE i
IM OUTTA YR loop
KTHXBYE";

    assert_eq!(
        stmts(source),
        [stmt(
            StmtKind::Loop(Loop {
                label: "loop".to_owned(),
                update: Some(LoopUpdate {
                    op: UpdateOp::Increment,
                    counter: "i".to_owned(),
                }),
                guard: Some(LoopGuard {
                    kind: GuardKind::Until,
                    cond: binary(BinOp::BothSaem, var("i"), int(3)),
                }),
                body: block(vec![stmt(print(vec![var("i")]), 3)]),
            }),
            2
        )]
    );
}

#[test]
fn loop_with_function_update() {
    let source = "HAI 1.2
HOW DUZ I twice YR n, FOUND YR PRODUKT OF n AN 2, IF U SAY SO
IM IN YR loop twice YR i WILE SMALLR OF i AN 100
IM OUTTA YR loop
KTHXBYE";

    let stmts = stmts(source);
    let StmtKind::Loop(ref lp) = stmts[1].kind else {
        panic!("expected a loop, got {:?}", stmts[1]);
    };

    assert_eq!(
        lp.update,
        Some(LoopUpdate {
            op: UpdateOp::Call("twice".to_owned()),
            counter: "i".to_owned(),
        })
    );
    assert_eq!(lp.guard.as_ref().map(|g| g.kind), Some(GuardKind::While));
}

#[test]
fn mismatched_loop_labels() {
    assert_eq!(
        parse("HAI 1.2\n  IM IN YR a\n  IM OUTTA YR b\nKTHXBYE").unwrap_err(),
        SyntaxError::new(
            SyntaxErrorKind::MismatchedLoopLabels {
                open: "a".to_owned(),
                close: "b".to_owned(),
            },
            2,
            3
        )
    );
}

#[test]
fn nary_operators() {
    let source = "HAI 1.2
VISIBLE SMOOSH \"a\" AN \"b\" MKAY \"c\"
VISIBLE ALL OF WIN AN FAIL WIN
KTHXBYE";

    assert_eq!(
        stmts(source),
        [
            stmt(
                print(vec![
                    Expr::Nary {
                        op: NaryOp::Smoosh,
                        operands: vec![yarn("a"), yarn("b")],
                    },
                    yarn("c"),
                ]),
                2
            ),
            stmt(
                print(vec![Expr::Nary {
                    op: NaryOp::AllOf,
                    operands: vec![troof(true), troof(false), troof(true)],
                }]),
                3
            ),
        ]
    );
}

#[test]
fn condition() {
    let source = "HAI 1.2
BOTH SAEM x AN 1, O RLY?
  YA RLY, VISIBLE 1
  MEBBE BOTH SAEM x AN 2
    VISIBLE 2
  NO WAI
    VISIBLE 3
OIC
KTHXBYE";

    assert_eq!(
        stmts(source),
        [
            stmt(
                StmtKind::Expr(binary(BinOp::BothSaem, var("x"), int(1))),
                2
            ),
            stmt(
                StmtKind::Condition {
                    then: block(vec![stmt(print(vec![int(1)]), 3)]),
                    else_ifs: vec![ElseIf {
                        cond: binary(BinOp::BothSaem, var("x"), int(2)),
                        block: block(vec![stmt(print(vec![int(2)]), 5)]),
                    }],
                    else_: Some(block(vec![stmt(print(vec![int(3)]), 7)])),
                },
                2
            ),
        ]
    );
}

#[test]
fn switch() {
    let source = "HAI 1.2
WTF?
  OMG 1
    VISIBLE \"a\"
    GTFO
  OMG 2
    VISIBLE \"b\"
  OMGWTF
    VISIBLE \"c\"
OIC
KTHXBYE";

    assert_eq!(
        stmts(source),
        [stmt(
            StmtKind::Switch {
                cases: vec![
                    Case {
                        literal: int(1),
                        body: block(vec![
                            stmt(print(vec![yarn("a")]), 4),
                            stmt(StmtKind::Break, 5),
                        ]),
                    },
                    Case {
                        literal: int(2),
                        body: block(vec![stmt(print(vec![yarn("b")]), 7)]),
                    },
                ],
                default: Some(block(vec![stmt(print(vec![yarn("c")]), 9)])),
            },
            2
        )]
    );
}

#[test]
fn missing_header() {
    assert_eq!(
        parse("VISIBLE 1").unwrap_err(),
        SyntaxError::new(
            SyntaxErrorKind::UnexpectedToken {
                expected: "keyword `HAI`".to_owned(),
                found: "keyword `VISIBLE`".to_owned(),
            },
            1,
            1
        )
    );
}

#[test]
fn incomplete_input() {
    assert!(parse("HAI 1.2\nO RLY?\n").unwrap_err().is_incomplete());
    assert!(parse("HAI 1.2\nOBTW\n").unwrap_err().is_incomplete());
    assert!(!parse("HAI 1.2\nVISIBLE\n").unwrap_err().is_incomplete());
}

#[test]
fn statements_one_at_a_time() {
    let mut parser = Parser::from_reader("I HAS A x ITZ 1\n\nVISIBLE x\n".as_bytes());

    assert_eq!(
        parser.parse_statement().unwrap(),
        Some(stmt(
            StmtKind::Declare {
                name: "x".to_owned(),
                init: Some(int(1)),
            },
            1
        ))
    );
    assert_eq!(
        parser.parse_statement().unwrap(),
        Some(stmt(print(vec![var("x")]), 3))
    );
    assert_eq!(parser.parse_statement().unwrap(), None);
}

#[test]
fn functions_carry_across_parsers() {
    let mut parser = Parser::from_reader(
        "HOW DUZ I twice YR n\nFOUND YR PRODUKT OF n AN 2\nIF U SAY SO\n".as_bytes(),
    );
    assert!(matches!(
        parser.parse_statement().unwrap(),
        Some(Stmt {
            kind: StmtKind::FuncDef(_),
            ..
        })
    ));

    let functions: FunctionTable = parser.into_functions();
    assert_eq!(functions["twice"], ["n"]);

    let mut parser = Parser::from_reader("twice 4\n".as_bytes()).with_functions(functions);
    assert_eq!(
        parser.parse_statement().unwrap(),
        Some(stmt(
            StmtKind::Expr(Expr::Call {
                name: "twice".to_owned(),
                args: vec![int(4)],
            }),
            1
        ))
    );
}

#[test]
fn redefinition_across_parsers() {
    let functions = FunctionTable::from([("f".to_owned(), vec!["a".to_owned()])]);

    let mut parser = Parser::from_reader("HOW DUZ I f YR a AN YR b\nFOUND YR a\nIF U SAY SO\n".as_bytes())
        .with_functions(functions.clone());
    assert_eq!(
        parser.parse_statement().unwrap_err(),
        SyntaxError::new(SyntaxErrorKind::DuplicateFunction("f".to_owned()), 1, 11)
    );

    // the same header parses, leaving the runtime to compare bodies
    let mut parser = Parser::from_reader("HOW DUZ I f YR a\nFOUND YR a\nIF U SAY SO\n".as_bytes())
        .with_functions(functions);
    let Some(Stmt {
        kind: StmtKind::FuncDef(def),
        ..
    }) = parser.parse_statement().unwrap()
    else {
        panic!("expected a function definition");
    };
    assert_eq!(def.params, ["a"]);
}
