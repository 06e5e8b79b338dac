use crate::*;

fn has_flag(flags: u32, flag: TokenFlags) -> bool {
    (flags & flag as u32) != 0
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new(), true);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace_not_skipped() {
    let mut scanner = ScannerState::new("   \n".to_string(), false);
    assert_eq!(scanner.scan(), SyntaxKind::WhitespaceTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::NewLineTrivia);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_type_alias_tokens() {
    let mut scanner = ScannerState::new("type Foo<T> = { bar?: T[] };".to_string(), true);
    let expected = [
        SyntaxKind::TypeKeyword,
        SyntaxKind::Identifier,
        SyntaxKind::LessThanToken,
        SyntaxKind::Identifier,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::EqualsToken,
        SyntaxKind::OpenBraceToken,
        SyntaxKind::Identifier,
        SyntaxKind::QuestionToken,
        SyntaxKind::ColonToken,
        SyntaxKind::Identifier,
        SyntaxKind::OpenBracketToken,
        SyntaxKind::CloseBracketToken,
        SyntaxKind::CloseBraceToken,
        SyntaxKind::SemicolonToken,
        SyntaxKind::EndOfFileToken,
    ];
    for kind in expected {
        assert_eq!(scanner.scan(), kind);
    }
}

#[test]
fn test_greater_than_is_never_compound() {
    let mut scanner = ScannerState::new("A<B<C>>".to_string(), true);
    let kinds: Vec<SyntaxKind> = std::iter::from_fn(|| {
        let k = scanner.scan();
        (k != SyntaxKind::EndOfFileToken).then_some(k)
    })
    .collect();
    assert_eq!(kinds[kinds.len() - 2..], [SyntaxKind::GreaterThanToken; 2]);
}

#[test]
fn test_scan_string_with_escapes() {
    let mut scanner = ScannerState::new("\"hello\\nworld\"".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "hello\nworld");
    assert!(!scanner.is_unterminated());
}

#[test]
fn test_unterminated_string() {
    let mut scanner = ScannerState::new("'abc\nx".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
}

#[test]
fn test_scan_numbers() {
    let mut scanner = ScannerState::new("1_000 0xFF 1e3 10n .5".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "1000");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert!(has_flag(scanner.get_token_flags(), TokenFlags::HexSpecifier));
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert!(has_flag(scanner.get_token_flags(), TokenFlags::Scientific));
    assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), ".5");
}

#[test]
fn test_jsdoc_comment_sets_flags() {
    let source = "/**\n * @typedef {Object} Foo\n */\nlet x;";
    let mut scanner = ScannerState::new(source.to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert!(scanner.has_preceding_jsdoc_comment());
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.get_token_full_start(), 0);
    assert_eq!(scanner.get_token_start(), source.find("let").unwrap_or(0));
}

#[test]
fn test_single_line_jsdoc_comment_has_no_line_break() {
    let mut scanner = ScannerState::new("/** @typedef {string} S */ let x;".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert!(scanner.has_preceding_jsdoc_comment());
    assert!(!scanner.has_preceding_line_break());

    let mut scanner = ScannerState::new("/**/\nlet x;".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert!(!scanner.has_preceding_jsdoc_comment());
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_plain_block_comment_is_not_jsdoc() {
    let mut scanner = ScannerState::new("/* note */ let x;".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert!(!scanner.has_preceding_jsdoc_comment());
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("a b c".to_string(), true);
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.get_token_value_ref(), "c");
    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token_value_ref(), "a");
    scanner.scan();
    assert_eq!(scanner.get_token_value_ref(), "b");
}

#[test]
fn test_reset_to_range_limits_scanning() {
    let mut scanner = ScannerState::new("{Object} Foo".to_string(), true);
    scanner.reset_to_range(1, 7);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value_ref(), "Object");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_jsdoc_tokens() {
    let source = " * @typedef {Object} my-name\n";
    let mut scanner = ScannerState::new(source.to_string(), false);
    let kinds: Vec<(SyntaxKind, String)> = std::iter::from_fn(|| {
        let k = scanner.scan_jsdoc_token();
        (k != SyntaxKind::EndOfFileToken).then(|| (k, scanner.get_token_text().to_string()))
    })
    .collect();

    let only_kinds: Vec<SyntaxKind> = kinds.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        only_kinds,
        vec![
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::AsteriskToken,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::AtToken,
            SyntaxKind::Identifier,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::Identifier,
            SyntaxKind::NewLineTrivia,
        ]
    );
    assert_eq!(kinds[10].1, "my-name");
}

#[test]
fn test_keyword_table_is_sorted_and_round_trips() {
    for kind in [
        SyntaxKind::TypeKeyword,
        SyntaxKind::TypeOfKeyword,
        SyntaxKind::UnknownKeyword,
        SyntaxKind::AbstractKeyword,
        SyntaxKind::VoidKeyword,
    ] {
        let text = token_to_text(kind).unwrap_or_default();
        assert_eq!(text_to_keyword(text), Some(kind), "keyword {text}");
    }
    assert_eq!(text_to_keyword("Object"), None);
}

#[test]
fn test_try_from_u16_covers_all_tokens() {
    assert_eq!(
        SyntaxKind::try_from_u16(SyntaxKind::LAST_TOKEN as u16),
        Some(SyntaxKind::LAST_TOKEN)
    );
    assert_eq!(
        SyntaxKind::try_from_u16(SyntaxKind::Identifier as u16),
        Some(SyntaxKind::Identifier)
    );
    assert_eq!(SyntaxKind::try_from_u16(SyntaxKind::LAST_TOKEN as u16 + 1), None);
}
