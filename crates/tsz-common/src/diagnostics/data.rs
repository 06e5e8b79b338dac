use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_messages {
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE: &str =
        "JSDoc typedef may be converted to TypeScript type.";
    pub const CONVERT_TYPEDEF_TO_TYPE: &str = "Convert typedef to type";
    pub const CONVERT_ALL_TYPEDEFS_TO_TYPES: &str = "Convert all typedefs to types";
}

pub mod diagnostic_codes {
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE: u32 = 80009;
    pub const CONVERT_TYPEDEF_TO_TYPE: u32 = 95176;
    pub const CONVERT_ALL_TYPEDEFS_TO_TYPES: u32 = 95177;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IDENTIFIER_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPRESSION_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE,
        category: DiagnosticCategory::Suggestion,
        message: diagnostic_messages::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONVERT_TYPEDEF_TO_TYPE,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::CONVERT_TYPEDEF_TO_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONVERT_ALL_TYPEDEFS_TO_TYPES,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::CONVERT_ALL_TYPEDEFS_TO_TYPES,
    },
];
