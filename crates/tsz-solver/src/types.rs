//! Type representation.
//!
//! Types are interned: structurally equal `TypeData` values share one
//! `TypeId`, so equality is an integer comparison. Intrinsics occupy the
//! first ids and are registered by `TypeInterner::new`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Produced by failed resolution inside the checker
    pub const ERROR: Self = Self(0);
    pub const ANY: Self = Self(1);
    pub const UNKNOWN: Self = Self(2);
    pub const NEVER: Self = Self(3);
    pub const VOID: Self = Self(4);
    pub const UNDEFINED: Self = Self(5);
    pub const NULL: Self = Self(6);
    pub const BOOLEAN: Self = Self(7);
    pub const NUMBER: Self = Self(8);
    pub const STRING: Self = Self(9);
    pub const BIGINT: Self = Self(10);
    pub const SYMBOL: Self = Self(11);
    /// The non-primitive `object` type
    pub const OBJECT: Self = Self(12);

    /// First id handed out for non-intrinsic types
    pub const FIRST_USER: u32 = 13;

    #[inline]
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Intrinsic type kinds, in `TypeId` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntrinsicKind {
    Error,
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Bigint,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub const ALL: [Self; 13] = [
        Self::Error,
        Self::Any,
        Self::Unknown,
        Self::Never,
        Self::Void,
        Self::Undefined,
        Self::Null,
        Self::Boolean,
        Self::Number,
        Self::String,
        Self::Bigint,
        Self::Symbol,
        Self::Object,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Bigint => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
        }
    }
}

/// Interned string handle for property names and string literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Atom(pub u32);

/// Literal type values. Numbers keep their source spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralValue {
    String(Atom),
    Number(Atom),
    BigInt(Atom),
    Boolean(bool),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
}

impl PropertyInfo {
    #[must_use]
    pub const fn new(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: false,
            readonly: false,
        }
    }

    #[must_use]
    pub const fn optional(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: true,
            readonly: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
}

/// Member list of a union or intersection.
pub type TypeList = SmallVec<[TypeId; 4]>;

/// Structural type data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// Properties in declaration order
    Object(Vec<PropertyInfo>),
    Array(TypeId),
    /// Flattened, deduplicated, at least two members
    Union(TypeList),
    /// Flattened, deduplicated, at least two members
    Intersection(TypeList),
    Function(FunctionShape),
    /// `keyof T` with `T` left unevaluated
    KeyOf(TypeId),
}
