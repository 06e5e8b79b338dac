use crate::*;

fn fmt(interner: &TypeInterner, id: TypeId) -> String {
    TypeFormatter::new(interner).format(id)
}

#[test]
fn test_format_intrinsics() {
    let interner = TypeInterner::new();
    assert_eq!(fmt(&interner, TypeId::NUMBER), "number");
    assert_eq!(fmt(&interner, TypeId::OBJECT), "object");
    assert_eq!(fmt(&interner, TypeId::UNKNOWN), "unknown");
}

#[test]
fn test_format_literals() {
    let interner = TypeInterner::new();
    assert_eq!(fmt(&interner, interner.literal_string("a\"b")), "\"a\\\"b\"");
    assert_eq!(fmt(&interner, interner.literal_number("1.5")), "1.5");
    assert_eq!(fmt(&interner, interner.literal_bigint("10")), "10n");
    assert_eq!(fmt(&interner, interner.literal_boolean(false)), "false");
}

#[test]
fn test_format_object() {
    let interner = TypeInterner::new();
    let bar = interner.intern_string("bar");
    let baz = interner.intern_string("baz");
    let id = interner.object(vec![
        PropertyInfo::new(bar, TypeId::NUMBER),
        PropertyInfo::optional(baz, TypeId::STRING),
    ]);

    assert_eq!(fmt(&interner, id), "{ bar: number; baz?: string; }");
    assert_eq!(fmt(&interner, interner.object(vec![])), "{}");
}

#[test]
fn test_format_array_of_union_is_parenthesized() {
    let interner = TypeInterner::new();
    let union = interner.union(vec![TypeId::STRING, TypeId::NULL]);

    assert_eq!(fmt(&interner, interner.array(TypeId::STRING)), "string[]");
    assert_eq!(fmt(&interner, interner.array(union)), "(string | null)[]");
}

#[test]
fn test_format_function() {
    let interner = TypeInterner::new();
    let x = interner.intern_string("x");
    let id = interner.function(
        vec![
            ParamInfo {
                name: Some(x),
                type_id: TypeId::NUMBER,
                optional: true,
                rest: false,
            },
            ParamInfo {
                name: None,
                type_id: TypeId::STRING,
                optional: false,
                rest: true,
            },
        ],
        TypeId::VOID,
    );

    assert_eq!(fmt(&interner, id), "(x?: number, ...arg1: string) => void");
}

#[test]
fn test_format_keyof() {
    let interner = TypeInterner::new();
    let a = interner.intern_string("a");
    let object = interner.object(vec![PropertyInfo::new(a, TypeId::STRING)]);

    assert_eq!(
        fmt(&interner, interner.keyof(object)),
        "keyof { a: string; }"
    );
}
