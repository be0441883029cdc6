//! Type tokens for host runtime values.
//!
//! These are markers, never instantiated: they name the handle, container
//! and plumbing types that bindings declare in their signatures so the
//! engine can classify them. Built-in and internal markers map to a closed
//! tag table and never fall through to the generic object leaves.

use std::marker::PhantomData;

use rtti_schema::{BuiltinTag, InternalTag, Type};

use crate::builder::Cx;
use crate::config::BuildConfig;
use crate::reflect::{Reflect, Signature, Variants};

macro_rules! tagged_markers {
    ($ctor:ident, $tag:ident; $($(#[$meta:meta])* $marker:ident => $variant:ident,)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub enum $marker {}

            impl Reflect for $marker {
                fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
                    Type::$ctor($tag::$variant)
                }
            }
        )*
    };
}

tagged_markers! { builtin, BuiltinTag;
    /// Any of `ArrayBuffer` or an `ArrayBufferView`
    BufferSource => BufferSource,
    Uint8Array => Uint8Array,
    ArrayBufferView => ArrayBufferView,
    ArrayBuffer => ArrayBuffer,
    /// An untyped JS function object
    JsFunction => Function,
    Date => Date,
}

tagged_markers! { internal, InternalTag;
    /// Stands in for the pass's own `BuildConfig` type in a signature;
    /// `FeatureFlags` or `()` written there would not reflect as configuration
    Configuration => Configuration,
    Isolate => Isolate,
    /// Proof that the isolate lock is held
    Lock => Lock,
    Unimplemented => Unimplemented,
    /// Marks a method as accepting any number of trailing arguments
    Varargs => Varargs,
    SelfRef => SelfRef,
    Name => Name,
}

/// Type handler for `T`, injected by the binding layer
#[derive(Debug)]
pub struct TypeHandler<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Reflect for TypeHandler<T> {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::internal(InternalTag::TypeHandler)
    }
}

#[derive(Debug)]
pub struct FunctionCallbackInfo<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Reflect for FunctionCallbackInfo<T> {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::internal(InternalTag::FunctionCallbackInfo)
    }
}

#[derive(Debug)]
pub struct PropertyCallbackInfo<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Reflect for PropertyCallbackInfo<T> {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::internal(InternalTag::PropertyCallbackInfo)
    }
}

/// Any JS value
#[derive(Debug)]
pub enum JsValue {}

impl Reflect for JsValue {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::Unknown
    }
}

/// Any JS object
#[derive(Debug)]
pub enum JsObject {}

impl Reflect for JsObject {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::Object
    }
}

macro_rules! string_markers {
    ($($(#[$meta:meta])* $marker:ident,)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub enum $marker {}

            impl Reflect for $marker {
                fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
                    Type::string(stringify!($marker))
                }
            }
        )*
    };
}

string_markers! {
    /// A string living on the JS heap
    JsString,
    /// A string restricted to Latin-1 code units
    ByteString,
    /// A string with lone surrogates replaced
    UsvString,
    UsvStr,
}

macro_rules! transparent_wrappers {
    ($($(#[$meta:meta])* $wrapper:ident,)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $wrapper<T: ?Sized>(PhantomData<T>);

            impl<T: Reflect + ?Sized> Reflect for $wrapper<T> {
                fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
                    T::reflect(cx)
                }
            }
        )*
    };
}

transparent_wrappers! {
    /// Strong reference to a resource object
    Ref,
    V8Ref,
    HashableV8Ref,
    /// Handle valid within the current handle scope
    Local,
    JsRef,
    Identified,
    MemoizedIdentity,
    /// Rejects implicit coercion on the way in; same shape as `T`
    NonCoercible,
}

/// A typed promise
#[derive(Debug)]
pub struct Promise<T: ?Sized>(PhantomData<T>);

impl<T: Reflect + ?Sized> Reflect for Promise<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::promise(T::reflect(cx))
    }
}

/// A promise whose resolution type is not known
#[derive(Debug)]
pub enum JsPromise {}

impl Reflect for JsPromise {
    fn reflect<C: BuildConfig>(_: &mut Cx<'_, C>) -> Type {
        Type::promise(Type::Unknown)
    }
}

/// Any iterable converted to an array on the way in
#[derive(Debug)]
pub struct Sequence<T>(PhantomData<T>);

impl<T: Reflect> Reflect for Sequence<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::array(T::reflect(cx), "Sequence")
    }
}

/// Optional where `undefined` means absent
#[derive(Debug)]
pub struct Optional<T>(PhantomData<T>);

impl<T: Reflect> Reflect for Optional<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::maybe(T::reflect(cx), "Optional")
    }
}

/// Optional where a value of the wrong type also means absent
#[derive(Debug)]
pub struct LenientOptional<T>(PhantomData<T>);

impl<T: Reflect> Reflect for LenientOptional<T> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::maybe(T::reflect(cx), "LenientOptional")
    }
}

/// Record with keys of type `K`, string keys unless stated otherwise
#[derive(Debug)]
pub struct Dict<V, K = String>(PhantomData<(K, V)>);

impl<V: Reflect, K: Reflect> Reflect for Dict<V, K> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        let key = K::reflect(cx);
        let value = V::reflect(cx);
        Type::dict(key, value)
    }
}

/// One of several alternatives, e.g. `OneOf<(i32, String)>`
#[derive(Debug)]
pub struct OneOf<V>(PhantomData<V>);

impl<V: Variants> Reflect for OneOf<V> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        Type::one_of(V::variants(cx))
    }
}

/// A JS callback with a typed signature, e.g. `Function<fn(i32) -> bool>`
#[derive(Debug)]
pub struct Function<F>(PhantomData<F>);

impl<F: Signature> Reflect for Function<F> {
    fn reflect<C: BuildConfig>(cx: &mut Cx<'_, C>) -> Type {
        let return_type = F::return_type(cx);
        let args = F::args(cx);
        Type::function(return_type, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builder;

    #[test]
    fn test_wrappers_are_transparent() {
        let mut builder = Builder::new(());
        assert_eq!(builder.type_of::<Ref<JsObject>>(), Type::Object);
        assert_eq!(builder.type_of::<Local<V8Ref<JsObject>>>(), Type::Object);
        assert_eq!(
            builder.type_of::<NonCoercible<String>>(),
            Type::string("String")
        );
        assert_eq!(
            builder.type_of::<JsRef<JsString>>(),
            Type::string("JsString")
        );
    }

    #[test]
    fn test_tags_win_over_object() {
        let mut builder = Builder::new(());
        assert_eq!(
            builder.type_of::<ArrayBufferView>(),
            Type::builtin(BuiltinTag::ArrayBufferView)
        );
        assert_eq!(
            builder.type_of::<Ref<BufferSource>>(),
            Type::builtin(BuiltinTag::BufferSource)
        );
        assert_eq!(
            builder.type_of::<TypeHandler<Date>>(),
            Type::internal(InternalTag::TypeHandler)
        );
    }

    #[test]
    fn test_untyped_promise() {
        let mut builder = Builder::new(());
        assert_eq!(builder.type_of::<JsPromise>(), Type::promise(Type::Unknown));
        assert_eq!(
            builder.type_of::<Promise<()>>(),
            Type::promise(Type::Void)
        );
    }
}
