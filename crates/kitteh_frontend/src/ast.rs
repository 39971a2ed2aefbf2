use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Program {
    pub version: f64,
    pub block: Block,
}

#[derive(Node!)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Node!)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }
}

#[derive(Node!)]
pub enum StmtKind {
    Assign {
        target: String,
        expr: Expr,
    },
    Break,
    Cast {
        target: String,
        ty: ValueType,
    },
    Declare {
        name: String,
        init: Option<Expr>,
    },
    Condition {
        then: Block,
        else_ifs: Vec<ElseIf>,
        else_: Option<Block>,
    },
    FuncDef(FuncDef),
    Input {
        target: String,
    },
    Loop(Loop),
    Print {
        exprs: Vec<Expr>,
        suppress_newline: bool,
    },
    Return(Expr),
    Switch {
        cases: Vec<Case>,
        default: Option<Block>,
    },
    Expr(Expr),
}

#[derive(Node!)]
pub struct ElseIf {
    pub cond: Expr,
    pub block: Block,
}

#[derive(Node!)]
pub struct Case {
    pub literal: Expr,
    pub body: Block,
}

#[derive(Node!)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

#[derive(Node!)]
pub struct Loop {
    pub label: String,
    pub update: Option<LoopUpdate>,
    pub guard: Option<LoopGuard>,
    pub body: Block,
}

#[derive(Node!)]
pub struct LoopUpdate {
    pub op: UpdateOp,
    pub counter: String,
}

#[derive(Node!)]
pub enum UpdateOp {
    Increment,
    Decrement,
    /// A unary function whose result becomes the new counter value.
    Call(String),
}

#[derive(Node!)]
pub struct LoopGuard {
    pub kind: GuardKind,
    pub cond: Expr,
}

#[derive(NodeCopy!)]
pub enum GuardKind {
    /// `WILE`: keep going while the condition holds.
    While,
    /// `TIL`: keep going until the condition holds.
    Until,
}

#[derive(Node!)]
pub enum Expr {
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        ty: ValueType,
    },
    Constant(Constant),
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Variable(String),
    Nary {
        op: NaryOp,
        operands: Vec<Expr>,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
}

#[derive(Node!)]
pub enum Constant {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Sum,
    Diff,
    Produkt,
    Quoshunt,
    Mod,
    Biggr,
    Smallr,

    Both,
    Either,
    Won,

    BothSaem,
    Diffrint,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Sum
                | BinOp::Diff
                | BinOp::Produkt
                | BinOp::Quoshunt
                | BinOp::Mod
                | BinOp::Biggr
                | BinOp::Smallr
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::Both | BinOp::Either | BinOp::Won)
    }
}

#[derive(NodeCopy!)]
pub enum NaryOp {
    AllOf,
    AnyOf,
    Smoosh,
}

#[derive(NodeCopy!)]
pub enum UnOp {
    Not,
}

#[derive(NodeCopy!)]
pub enum ValueType {
    Noob,
    Troof,
    Numbr,
    Numbar,
    Yarn,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Noob => "NOOB",
            ValueType::Troof => "TROOF",
            ValueType::Numbr => "NUMBR",
            ValueType::Numbar => "NUMBAR",
            ValueType::Yarn => "YARN",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
