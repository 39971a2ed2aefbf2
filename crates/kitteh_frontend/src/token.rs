use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }
}

#[derive(Node!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),

    Newline,
    Bang,

    Eof,
}

/// The kind of a token without its payload, for cheap lookahead comparisons.
#[derive(NodeCopy!)]
pub enum TokenTag {
    Keyword(Keyword),
    Identifier,
    Integer,
    Float,
    Bool,
    String,
    Newline,
    Bang,
    Eof,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Hai,
    Kthxbye,

    Noob,
    Troof,
    Numbr,
    Numbar,
    Yarn,

    IHasA,
    Itz,
    R,

    SumOf,
    DiffOf,
    ProduktOf,
    QuoshuntOf,
    ModOf,
    BiggrOf,
    SmallrOf,
    BothOf,
    EitherOf,
    WonOf,
    Not,
    AllOf,
    AnyOf,
    BothSaem,
    Diffrint,
    Smoosh,

    Maek,
    IsNowA,
    A,

    Visible,
    Gimmeh,
    Mkay,
    An,

    ORly,
    YaRly,
    NoWai,
    Mebbe,
    Oic,

    Wtf,
    Omg,
    Omgwtf,
    Gtfo,

    ImInYr,
    Yr,
    Til,
    Wile,
    ImOuttaYr,
    Uppin,
    Nerfin,

    HowDuzI,
    AnYr,
    IfUSaySo,
    FoundYr,
}

impl Keyword {
    pub const ALL: &'static [Keyword] = &[
        Keyword::Hai,
        Keyword::Kthxbye,
        Keyword::Noob,
        Keyword::Troof,
        Keyword::Numbr,
        Keyword::Numbar,
        Keyword::Yarn,
        Keyword::IHasA,
        Keyword::Itz,
        Keyword::R,
        Keyword::SumOf,
        Keyword::DiffOf,
        Keyword::ProduktOf,
        Keyword::QuoshuntOf,
        Keyword::ModOf,
        Keyword::BiggrOf,
        Keyword::SmallrOf,
        Keyword::BothOf,
        Keyword::EitherOf,
        Keyword::WonOf,
        Keyword::Not,
        Keyword::AllOf,
        Keyword::AnyOf,
        Keyword::BothSaem,
        Keyword::Diffrint,
        Keyword::Smoosh,
        Keyword::Maek,
        Keyword::IsNowA,
        Keyword::A,
        Keyword::Visible,
        Keyword::Gimmeh,
        Keyword::Mkay,
        Keyword::An,
        Keyword::ORly,
        Keyword::YaRly,
        Keyword::NoWai,
        Keyword::Mebbe,
        Keyword::Oic,
        Keyword::Wtf,
        Keyword::Omg,
        Keyword::Omgwtf,
        Keyword::Gtfo,
        Keyword::ImInYr,
        Keyword::Yr,
        Keyword::Til,
        Keyword::Wile,
        Keyword::ImOuttaYr,
        Keyword::Uppin,
        Keyword::Nerfin,
        Keyword::HowDuzI,
        Keyword::AnYr,
        Keyword::IfUSaySo,
        Keyword::FoundYr,
    ];

    /// The keyword as written in source, words separated by single spaces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Hai => "HAI",
            Keyword::Kthxbye => "KTHXBYE",
            Keyword::Noob => "NOOB",
            Keyword::Troof => "TROOF",
            Keyword::Numbr => "NUMBR",
            Keyword::Numbar => "NUMBAR",
            Keyword::Yarn => "YARN",
            Keyword::IHasA => "I HAS A",
            Keyword::Itz => "ITZ",
            Keyword::R => "R",
            Keyword::SumOf => "SUM OF",
            Keyword::DiffOf => "DIFF OF",
            Keyword::ProduktOf => "PRODUKT OF",
            Keyword::QuoshuntOf => "QUOSHUNT OF",
            Keyword::ModOf => "MOD OF",
            Keyword::BiggrOf => "BIGGR OF",
            Keyword::SmallrOf => "SMALLR OF",
            Keyword::BothOf => "BOTH OF",
            Keyword::EitherOf => "EITHER OF",
            Keyword::WonOf => "WON OF",
            Keyword::Not => "NOT",
            Keyword::AllOf => "ALL OF",
            Keyword::AnyOf => "ANY OF",
            Keyword::BothSaem => "BOTH SAEM",
            Keyword::Diffrint => "DIFFRINT",
            Keyword::Smoosh => "SMOOSH",
            Keyword::Maek => "MAEK",
            Keyword::IsNowA => "IS NOW A",
            Keyword::A => "A",
            Keyword::Visible => "VISIBLE",
            Keyword::Gimmeh => "GIMMEH",
            Keyword::Mkay => "MKAY",
            Keyword::An => "AN",
            Keyword::ORly => "O RLY?",
            Keyword::YaRly => "YA RLY",
            Keyword::NoWai => "NO WAI",
            Keyword::Mebbe => "MEBBE",
            Keyword::Oic => "OIC",
            Keyword::Wtf => "WTF?",
            Keyword::Omg => "OMG",
            Keyword::Omgwtf => "OMGWTF",
            Keyword::Gtfo => "GTFO",
            Keyword::ImInYr => "IM IN YR",
            Keyword::Yr => "YR",
            Keyword::Til => "TIL",
            Keyword::Wile => "WILE",
            Keyword::ImOuttaYr => "IM OUTTA YR",
            Keyword::Uppin => "UPPIN",
            Keyword::Nerfin => "NERFIN",
            Keyword::HowDuzI => "HOW DUZ I",
            Keyword::AnYr => "AN YR",
            Keyword::IfUSaySo => "IF U SAY SO",
            Keyword::FoundYr => "FOUND YR",
        }
    }
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Keyword(kw) => TokenTag::Keyword(*kw),
            TokenKind::Identifier(_) => TokenTag::Identifier,
            TokenKind::Integer(_) => TokenTag::Integer,
            TokenKind::Float(_) => TokenTag::Float,
            TokenKind::Bool(_) => TokenTag::Bool,
            TokenKind::String(_) => TokenTag::String,
            TokenKind::Newline => TokenTag::Newline,
            TokenKind::Bang => TokenTag::Bang,
            TokenKind::Eof => TokenTag::Eof,
        }
    }

    pub fn token_name(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{name}`"),
            other => other.tag().token_name(),
        }
    }
}

impl TokenTag {
    pub fn token_name(&self) -> String {
        match self {
            TokenTag::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenTag::Identifier => "identifier".to_owned(),
            TokenTag::Integer => "NUMBR literal".to_owned(),
            TokenTag::Float => "NUMBAR literal".to_owned(),
            TokenTag::Bool => "TROOF literal".to_owned(),
            TokenTag::String => "YARN literal".to_owned(),
            TokenTag::Newline => "newline".to_owned(),
            TokenTag::Bang => "`!`".to_owned(),
            TokenTag::Eof => "end of input".to_owned(),
        }
    }
}
