//! Declaring the members of resource and struct types.
//!
//! A declared type lists its members through calls on a [`Declaration`],
//! one call per member, in the order they should appear in the schema:
//!
//! ```
//! use rtti_builder::{declared_types, BuildConfig, Builder, Declaration, Declared};
//! use rtti_builder::host::Optional;
//!
//! struct Counter;
//!
//! impl Declared for Counter {
//!     const NAME: &'static str = "Counter";
//!
//!     fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
//!         decl.constructor::<fn(Optional<i32>) -> Counter>()
//!             .method::<fn(i32)>("add")
//!             .readonly_instance_property::<i32>("value");
//!     }
//! }
//!
//! declared_types!(Counter);
//!
//! let mut builder = Builder::new(());
//! let counter = builder.structure::<Counter>();
//! assert_eq!(counter.members.len(), 3);
//! ```

use rtti_schema::{
    BuiltinModule, Constant, Constructor, Extends, IntrinsicBase, Member, Method, Nested, Property,
    Structure, Type,
};

use crate::builder::Cx;
use crate::config::BuildConfig;
use crate::reflect::{Reflect, Signature};

/// A resource or struct type exposed to the scripting runtime.
pub trait Declared {
    /// Simple declared name.
    const NAME: &'static str;

    /// Globally unique key of this type.
    fn fully_qualified_name() -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Register members and metadata, in declaration order.
    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>);
}

/// Implements [`Reflect`](crate::Reflect) for declared types so that an
/// occurrence of one of them reflects as a light structure reference.
#[macro_export]
macro_rules! declared_types {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn reflect<C: $crate::BuildConfig>(cx: &mut $crate::Cx<'_, C>) -> $crate::Type {
                    cx.structure_ref::<$ty>()
                }
            }
        )*
    };
}

#[derive(Clone, Copy)]
struct Placement {
    readonly: bool,
    lazy: bool,
    prototype: bool,
}

const INSTANCE: Placement = Placement {
    readonly: false,
    lazy: false,
    prototype: false,
};

/// Member list under construction for one declared type.
pub struct Declaration<'d, 'a, C> {
    cx: &'d mut Cx<'a, C>,
    structure: Structure,
    has_constructor: bool,
}

impl<'d, 'a, C: BuildConfig> Declaration<'d, 'a, C> {
    pub(crate) fn new(cx: &'d mut Cx<'a, C>, structure: Structure) -> Self {
        Self {
            cx,
            structure,
            has_constructor: false,
        }
    }

    pub(crate) fn finish(self) -> Structure {
        self.structure
    }

    /// Configuration of the current pass, for members that depend on it.
    pub fn config(&self) -> &'a C {
        self.cx.config()
    }

    fn push(&mut self, member: Member) -> &mut Self {
        self.structure.members.push(member);
        self
    }

    fn signature<F: Signature>(&mut self, name: &str, is_static: bool) -> Method {
        let return_type = F::return_type(&mut *self.cx);
        let args = F::args(&mut *self.cx);
        Method {
            name: name.to_string(),
            return_type,
            args,
            is_static,
        }
    }

    /// Instance method with signature `F`, e.g. `fn(i32, Lock) -> bool`.
    ///
    /// Reference arguments need an explicit lifetime (`fn(&'static Lock)`);
    /// see [`Signature`].
    pub fn method<F: Signature>(&mut self, name: &str) -> &mut Self {
        let method = self.signature::<F>(name, false);
        self.push(Member::Method(method))
    }

    pub fn static_method<F: Signature>(&mut self, name: &str) -> &mut Self {
        let method = self.signature::<F>(name, true);
        self.push(Member::Method(method))
    }

    fn property(&mut self, name: &str, ty: Type, placement: Placement) -> &mut Self {
        self.push(Member::Property(Property {
            name: name.to_string(),
            ty,
            readonly: placement.readonly,
            lazy: placement.lazy,
            prototype: placement.prototype,
        }))
    }

    fn typed_property<T: Reflect + ?Sized>(&mut self, name: &str, placement: Placement) -> &mut Self {
        let ty = self.cx.reflect::<T>();
        self.property(name, ty, placement)
    }

    pub fn instance_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(name, INSTANCE)
    }

    pub fn readonly_instance_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(name, Placement { readonly: true, ..INSTANCE })
    }

    /// Instance property evaluated on first access, then cached
    pub fn lazy_instance_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(name, Placement { lazy: true, ..INSTANCE })
    }

    pub fn lazy_readonly_instance_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(
            name,
            Placement {
                readonly: true,
                lazy: true,
                ..INSTANCE
            },
        )
    }

    /// Accessor property installed on the prototype
    pub fn prototype_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(name, Placement { prototype: true, ..INSTANCE })
    }

    pub fn readonly_prototype_property<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(
            name,
            Placement {
                readonly: true,
                prototype: true,
                ..INSTANCE
            },
        )
    }

    /// Lazy property whose value is the export `name` of the JS module `module`.
    pub fn lazy_js_instance_property(&mut self, name: &str, module: &str) -> &mut Self {
        let ty = Type::js_builtin(module, name);
        self.property(name, ty, Placement { lazy: true, ..INSTANCE })
    }

    pub fn lazy_js_readonly_instance_property(&mut self, name: &str, module: &str) -> &mut Self {
        let ty = Type::js_builtin(module, name);
        self.property(
            name,
            ty,
            Placement {
                readonly: true,
                lazy: true,
                ..INSTANCE
            },
        )
    }

    /// Data field of a struct type.
    pub fn field<T: Reflect + ?Sized>(&mut self, name: &str) -> &mut Self {
        self.typed_property::<T>(name, INSTANCE)
    }

    /// Declare the constructor. Only the arguments are recorded; a type has
    /// at most one constructor.
    pub fn constructor<F: Signature>(&mut self) -> &mut Self {
        if self.has_constructor {
            log::warn!(
                "{} declares more than one constructor; keeping the first",
                self.structure.fully_qualified_name
            );
            return self;
        }
        self.has_constructor = true;
        let args = F::args(&mut *self.cx);
        self.push(Member::Constructor(Constructor { args }))
    }

    /// Static constant resolved to its integer value (`Shape::Circle as i64`).
    pub fn static_constant(&mut self, name: &str, value: impl Into<i64>) -> &mut Self {
        self.push(Member::Constant(Constant {
            name: name.to_string(),
            value: value.into(),
        }))
    }

    /// Nested type, expanded in full and inline.
    pub fn nested<T: Declared + ?Sized>(&mut self, name: &str) -> &mut Self {
        let structure = self.cx.structure::<T>();
        self.push(Member::Nested(Nested {
            structure,
            name: name.to_string(),
        }))
    }

    /// Inherit from another declared type. Recorded as a light reference.
    pub fn inherit<B: Declared + ?Sized>(&mut self) -> &mut Self {
        let base = self.cx.reference::<B>();
        self.structure.extends = Some(Extends::Structure(base));
        self
    }

    /// Graft the type onto a host runtime prototype, e.g. `v8::kErrorPrototype`.
    pub fn inherit_intrinsic(&mut self, name: &str) -> &mut Self {
        self.structure.extends = Some(Extends::Intrinsic(IntrinsicBase {
            name: name.to_string(),
        }));
        self
    }

    /// Declare the sync iteration protocol, served by the method `name`.
    pub fn iterable<F: Signature>(&mut self, name: &str) -> &mut Self {
        let iterator = self.signature::<F>(name, false);
        self.structure.iterable = true;
        self.structure.iterator = Some(iterator);
        self
    }

    /// Declare the async iteration protocol, served by the method `name`.
    pub fn async_iterable<F: Signature>(&mut self, name: &str) -> &mut Self {
        let iterator = self.signature::<F>(name, false);
        self.structure.async_iterable = true;
        self.structure.async_iterator = Some(iterator);
        self
    }

    /// Mark the type as a root of the generated declaration files.
    pub fn ts_root(&mut self) -> &mut Self {
        self.structure.ts_root = true;
        self
    }

    pub fn ts_override(&mut self, text: &str) -> &mut Self {
        self.structure.ts_override = Some(text.to_string());
        self
    }

    pub fn ts_define(&mut self, text: &str) -> &mut Self {
        self.structure.ts_define = Some(text.to_string());
        self
    }

    /// Attach the modules of a JS bundle to this type's context.
    pub fn context_js_bundle(
        &mut self,
        modules: impl IntoIterator<Item = BuiltinModule>,
    ) -> &mut Self {
        self.structure
            .builtin_modules
            .get_or_insert_with(Vec::new)
            .extend(modules);
        self
    }
}
