//! Token kinds produced by the scanner.
//!
//! Node kinds that only the parser creates live in
//! `tsz_parser::parser::syntax_kind_ext` and start above `LastToken`.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    NewLineTrivia,
    WhitespaceTrivia,
    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    BacktickToken,
    HashToken,
    EqualsToken,
    // Identifiers
    Identifier,
    // Reserved words
    BreakKeyword,
    CaseKeyword,
    ClassKeyword,
    ConstKeyword,
    DefaultKeyword,
    ElseKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    // Contextual keywords
    AbstractKeyword,
    AsKeyword,
    AsyncKeyword,
    AnyKeyword,
    BooleanKeyword,
    DeclareKeyword,
    GetKeyword,
    IsKeyword,
    KeyOfKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    NumberKeyword,
    ObjectKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    BigIntKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: Self = Self::BreakKeyword;
    pub const LAST_KEYWORD: Self = Self::BigIntKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: Self = Self::AbstractKeyword;
    pub const LAST_TOKEN: Self = Self::BigIntKeyword;

    /// Convert a raw `u16` kind back to a token kind.
    ///
    /// Returns `None` for node kinds above the token range.
    #[must_use]
    pub fn try_from_u16(value: u16) -> Option<Self> {
        ALL_KINDS.get(value as usize).copied()
    }
}

const ALL_KINDS: &[SyntaxKind] = {
    use SyntaxKind::*;
    &[
        Unknown,
        EndOfFileToken,
        SingleLineCommentTrivia,
        MultiLineCommentTrivia,
        NewLineTrivia,
        WhitespaceTrivia,
        NumericLiteral,
        BigIntLiteral,
        StringLiteral,
        NoSubstitutionTemplateLiteral,
        OpenBraceToken,
        CloseBraceToken,
        OpenParenToken,
        CloseParenToken,
        OpenBracketToken,
        CloseBracketToken,
        DotToken,
        DotDotDotToken,
        SemicolonToken,
        CommaToken,
        QuestionDotToken,
        LessThanToken,
        GreaterThanToken,
        LessThanEqualsToken,
        GreaterThanEqualsToken,
        EqualsEqualsToken,
        ExclamationEqualsToken,
        EqualsEqualsEqualsToken,
        ExclamationEqualsEqualsToken,
        EqualsGreaterThanToken,
        PlusToken,
        MinusToken,
        AsteriskToken,
        SlashToken,
        PercentToken,
        PlusPlusToken,
        MinusMinusToken,
        AmpersandToken,
        BarToken,
        CaretToken,
        ExclamationToken,
        TildeToken,
        AmpersandAmpersandToken,
        BarBarToken,
        QuestionToken,
        ColonToken,
        AtToken,
        QuestionQuestionToken,
        BacktickToken,
        HashToken,
        EqualsToken,
        Identifier,
        BreakKeyword,
        CaseKeyword,
        ClassKeyword,
        ConstKeyword,
        DefaultKeyword,
        ElseKeyword,
        ExportKeyword,
        ExtendsKeyword,
        FalseKeyword,
        FunctionKeyword,
        IfKeyword,
        ImportKeyword,
        InKeyword,
        NewKeyword,
        NullKeyword,
        ReturnKeyword,
        ThisKeyword,
        TrueKeyword,
        TypeOfKeyword,
        VarKeyword,
        VoidKeyword,
        ImplementsKeyword,
        InterfaceKeyword,
        LetKeyword,
        PrivateKeyword,
        ProtectedKeyword,
        PublicKeyword,
        StaticKeyword,
        AbstractKeyword,
        AsKeyword,
        AsyncKeyword,
        AnyKeyword,
        BooleanKeyword,
        DeclareKeyword,
        GetKeyword,
        IsKeyword,
        KeyOfKeyword,
        NeverKeyword,
        ReadonlyKeyword,
        NumberKeyword,
        ObjectKeyword,
        SetKeyword,
        StringKeyword,
        SymbolKeyword,
        TypeKeyword,
        UndefinedKeyword,
        UniqueKeyword,
        UnknownKeyword,
        BigIntKeyword,
    ]
};

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("bigint", SyntaxKind::BigIntKeyword),
    ("boolean", SyntaxKind::BooleanKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("declare", SyntaxKind::DeclareKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("implements", SyntaxKind::ImplementsKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("keyof", SyntaxKind::KeyOfKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("never", SyntaxKind::NeverKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("number", SyntaxKind::NumberKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("readonly", SyntaxKind::ReadonlyKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("type", SyntaxKind::TypeKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("undefined", SyntaxKind::UndefinedKeyword),
    ("unique", SyntaxKind::UniqueKeyword),
    ("unknown", SyntaxKind::UnknownKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
];

/// Look up the keyword kind for identifier text.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .binary_search_by(|(kw, _)| (*kw).cmp(text))
        .ok()
        .map(|i| KEYWORDS[i].1)
}

#[inline]
#[must_use]
pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    (SyntaxKind::FIRST_KEYWORD..=SyntaxKind::LAST_KEYWORD).contains(&kind)
}

/// Fixed source text of punctuation and keyword tokens.
#[must_use]
pub fn token_to_text(kind: SyntaxKind) -> Option<&'static str> {
    if token_is_keyword(kind) {
        return KEYWORDS.iter().find(|(_, k)| *k == kind).map(|(text, _)| *text);
    }
    let text = match kind {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::DotToken => ".",
        SyntaxKind::DotDotDotToken => "...",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::QuestionDotToken => "?.",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::LessThanEqualsToken => "<=",
        SyntaxKind::GreaterThanEqualsToken => ">=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::ExclamationEqualsToken => "!=",
        SyntaxKind::EqualsEqualsEqualsToken => "===",
        SyntaxKind::ExclamationEqualsEqualsToken => "!==",
        SyntaxKind::EqualsGreaterThanToken => "=>",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::PercentToken => "%",
        SyntaxKind::PlusPlusToken => "++",
        SyntaxKind::MinusMinusToken => "--",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::CaretToken => "^",
        SyntaxKind::ExclamationToken => "!",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::AmpersandAmpersandToken => "&&",
        SyntaxKind::BarBarToken => "||",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::AtToken => "@",
        SyntaxKind::QuestionQuestionToken => "??",
        SyntaxKind::BacktickToken => "`",
        SyntaxKind::HashToken => "#",
        SyntaxKind::EqualsToken => "=",
        _ => return None,
    };
    Some(text)
}
