use std::{fmt::Debug, marker::PhantomData};

use fieldscan::{Record, Render, Scan};

#[derive(Scan)]
struct Borrowed<'a, T: Debug, const N: usize>
where
    T: Clone,
{
    pub items: [T; N],
    pub label: &'a str,
    pub nested: Option<Box<T>>,
}

#[derive(Scan)]
struct Phantom<K, V> {
    pub value: V,
    _key: PhantomData<K>,
}

#[derive(Scan)]
struct TypedId<T> {
    pub id: u64,
    pub kind: PhantomData<T>,
}

struct NoRender;

fn main() {
    let borrowed = Borrowed {
        items: [1_u32, 2],
        label: "pair",
        nested: Some(Box::new(3)),
    };
    assert_eq!(borrowed.scan(), "items=[1, 2] | label=pair | nested=3");

    let phantom: Phantom<NoRender, bool> = Phantom {
        value: true,
        _key: PhantomData,
    };
    assert_eq!(phantom.render(), "{value=true}");

    let typed: TypedId<NoRender> = TypedId {
        id: 9,
        kind: PhantomData,
    };
    assert_eq!(typed.render(), "{id=9 | kind={}}");
}
