//! Type interning.
//!
//! One `TypeInterner` belongs to one checker and one request, so interior
//! mutability is a `RefCell`; nothing here is shared across threads.

use crate::types::{
    Atom, FunctionShape, IntrinsicKind, LiteralValue, ParamInfo, PropertyInfo, TypeData, TypeId,
    TypeList,
};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::trace;

/// Type and string interning table.
pub struct TypeInterner {
    types: RefCell<IndexSet<TypeData, FxBuildHasher>>,
    strings: RefCell<IndexSet<Arc<str>, FxBuildHasher>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with the intrinsics pre-registered at their fixed
    /// ids.
    #[must_use]
    pub fn new() -> Self {
        let mut types = IndexSet::with_hasher(FxBuildHasher);
        for kind in IntrinsicKind::ALL {
            types.insert(TypeData::Intrinsic(kind));
        }
        Self {
            types: RefCell::new(types),
            strings: RefCell::new(IndexSet::with_hasher(FxBuildHasher)),
        }
    }

    /// Number of interned types, intrinsics included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.borrow().is_empty()
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        let (index, inserted) = self.types.borrow_mut().insert_full(data);
        if inserted {
            trace!(type_id = index, "interned type");
        }
        TypeId(index as u32)
    }

    #[must_use]
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.borrow().get_index(id.0 as usize).cloned()
    }

    pub fn intern_string(&self, text: &str) -> Atom {
        if let Some(index) = self.strings.borrow().get_index_of(text) {
            return Atom(index as u32);
        }
        let (index, _) = self.strings.borrow_mut().insert_full(Arc::from(text));
        Atom(index as u32)
    }

    /// Text of `atom`; empty for an atom from another interner.
    #[must_use]
    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.strings
            .borrow()
            .get_index(atom.0 as usize)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeData::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, text: &str) -> TypeId {
        let atom = self.intern_string(text);
        self.intern(TypeData::Literal(LiteralValue::Number(atom)))
    }

    pub fn literal_bigint(&self, text: &str) -> TypeId {
        let atom = self.intern_string(text);
        self.intern(TypeData::Literal(LiteralValue::BigInt(atom)))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::Boolean(value)))
    }

    /// Object type; a repeated property name keeps its first declaration.
    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        let mut unique: Vec<PropertyInfo> = Vec::with_capacity(properties.len());
        for property in properties {
            if !unique.iter().any(|p| p.name == property.name) {
                unique.push(property);
            }
        }
        self.intern(TypeData::Object(unique))
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn function(&self, params: Vec<ParamInfo>, return_type: TypeId) -> TypeId {
        self.intern(TypeData::Function(FunctionShape {
            params,
            return_type,
        }))
    }

    pub fn keyof(&self, operand: TypeId) -> TypeId {
        self.intern(TypeData::KeyOf(operand))
    }

    /// Normalized union: nested unions flatten, duplicates and `never` drop
    /// out, and `error`, `any` and `unknown` absorb everything, in that
    /// order.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let flat = self.flatten(members, |data| match data {
            TypeData::Union(list) => Some(list),
            _ => None,
        });
        for absorbing in [TypeId::ERROR, TypeId::ANY, TypeId::UNKNOWN] {
            if flat.contains(&absorbing) {
                return absorbing;
            }
        }
        let list: TypeList = flat.into_iter().filter(|&t| t != TypeId::NEVER).collect();
        match list.len() {
            0 => TypeId::NEVER,
            1 => list[0],
            _ => self.intern(TypeData::Union(list)),
        }
    }

    /// Normalized intersection: `never` and `error` absorb, `unknown` drops
    /// out, an empty intersection is `unknown`.
    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        let flat = self.flatten(members, |data| match data {
            TypeData::Intersection(list) => Some(list),
            _ => None,
        });
        for absorbing in [TypeId::ERROR, TypeId::NEVER, TypeId::ANY] {
            if flat.contains(&absorbing) {
                return absorbing;
            }
        }
        let list: TypeList = flat
            .into_iter()
            .filter(|&t| t != TypeId::UNKNOWN)
            .collect();
        match list.len() {
            0 => TypeId::UNKNOWN,
            1 => list[0],
            _ => self.intern(TypeData::Intersection(list)),
        }
    }

    /// Expand members of the same composite kind and drop duplicates,
    /// keeping first occurrences.
    fn flatten(
        &self,
        members: Vec<TypeId>,
        nested: impl Fn(TypeData) -> Option<TypeList>,
    ) -> TypeList {
        let mut out = TypeList::new();
        for member in members {
            let expanded = self
                .lookup(member)
                .and_then(&nested)
                .unwrap_or_else(|| TypeList::from_elem(member, 1));
            for id in expanded {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        }
        out
    }
}
