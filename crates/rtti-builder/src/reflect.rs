//! Classification of type tokens.
//!
//! A type token is a Rust type. Each token implements [`Reflect`], which
//! yields exactly one [`Type`]. Because dispatch is static there is exactly
//! one impl per token, so the fixed priority of the classifier (qualifiers,
//! host tags, primitives, containers, declared types) is decided by which
//! impl a token has rather than by probing its shape at runtime.

use rtti_schema::Type;

use crate::builder::Cx;
use crate::config::BuildConfig;

/// A type token the engine can describe.
pub trait Reflect {
    /// Describe this type. Declared structures come back as light references.
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type;
}

// References carry no schema information.
impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        T::reflect(cx)
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        T::reflect(cx)
    }
}

impl Reflect for () {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::Void
    }
}

impl Reflect for bool {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::Bool
    }
}

macro_rules! reflect_number {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
                    Type::number(stringify!($ty))
                }
            }
        )*
    };
}

reflect_number!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl Reflect for String {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::string("String")
    }
}

impl Reflect for str {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::string("str")
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::array(T::reflect(cx), "Vec")
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::array(T::reflect(cx), "slice")
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::array(T::reflect(cx), "array")
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::maybe(T::reflect(cx), "Option")
    }
}

/// A callable signature written as a function pointer type,
/// e.g. `fn(i32, f64) -> bool`.
///
/// Argument types are written without references (`fn(Lock, i32)` rather than
/// `fn(&Lock, i32)`). A pointer type with an elided reference argument is
/// higher-ranked (`for<'r> fn(&'r Lock)`) and does not implement this trait;
/// write `fn(&'static Lock)` when the reference has to stay. Either form
/// reflects the same as the bare type.
pub trait Signature {
    fn return_type<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type;

    /// Argument types in declaration order.
    fn args<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Vec<Type>;
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<R: Reflect, $($arg: Reflect),*> Signature for fn($($arg),*) -> R {
            fn return_type<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
                R::reflect(cx)
            }

            fn args<C: BuildConfig>(_cx: &mut Cx<'_, C>) -> Vec<Type> {
                vec![$($arg::reflect(_cx)),*]
            }
        }
    };
}

impl_signature!();
impl_signature!(A1);
impl_signature!(A1, A2);
impl_signature!(A1, A2, A3);
impl_signature!(A1, A2, A3, A4);
impl_signature!(A1, A2, A3, A4, A5);
impl_signature!(A1, A2, A3, A4, A5, A6);
impl_signature!(A1, A2, A3, A4, A5, A6, A7);
impl_signature!(A1, A2, A3, A4, A5, A6, A7, A8);

/// The alternatives of a `OneOf`, written as a tuple.
pub trait Variants {
    /// Variant types in declaration order.
    fn variants<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Vec<Type>;
}

macro_rules! impl_variants {
    ($($v:ident),+) => {
        impl<$($v: Reflect),+> Variants for ($($v,)+) {
            fn variants<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Vec<Type> {
                vec![$($v::reflect(cx)),+]
            }
        }
    };
}

impl_variants!(V1, V2);
impl_variants!(V1, V2, V3);
impl_variants!(V1, V2, V3, V4);
impl_variants!(V1, V2, V3, V4, V5);
impl_variants!(V1, V2, V3, V4, V5, V6);
impl_variants!(V1, V2, V3, V4, V5, V6, V7);
impl_variants!(V1, V2, V3, V4, V5, V6, V7, V8);
