//! Schema tree for reflected API types
//!
//! Defines the value types produced by the introspection engine: one
//! [`Type`] per type occurrence and one [`Structure`] per declared resource
//! or struct type. Both are immutable trees once built and serialize with
//! the field names used by the downstream declaration generator.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Describes a single type occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Type {
    /// No value (`()` / undefined)
    #[serde(rename = "voidt")]
    Void,
    /// Boolean
    #[serde(rename = "boolt")]
    Bool,
    /// Opaque host value the engine cannot say anything about
    Unknown,
    /// Generic host object
    Object,
    /// Numeric primitive, keyed by its source spelling
    Number(NumberType),
    /// String-like primitive, keyed by its source spelling
    String(StringType),
    Promise(PromiseType),
    Array(ArrayType),
    Maybe(MaybeType),
    Dict(DictType),
    OneOf(OneOfType),
    Function(FunctionType),
    /// Host runtime built-in (buffer views, functions, dates)
    Builtin(BuiltinType),
    /// Engine plumbing (locks, isolates, callback info)
    #[serde(rename = "jsgImpl")]
    Internal(InternalType),
    /// Value resolved lazily from a JS module export
    JsBuiltin(JsBuiltinType),
    /// Light reference to a declared structure
    Structure(StructureRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromiseType {
    pub value: Box<Type>,
}

/// Array-like container; `name` is the container spelling (`Vec`, `slice`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub name: String,
}

/// Optional value; `name` distinguishes the absence semantics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaybeType {
    pub value: Box<Type>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictType {
    pub key: Box<Type>,
    pub value: Box<Type>,
}

/// Tagged union; variants keep declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfType {
    pub variants: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionType {
    pub return_type: Box<Type>,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinType {
    #[serde(rename = "type")]
    pub ty: BuiltinTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalType {
    #[serde(rename = "type")]
    pub ty: InternalTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsBuiltinType {
    pub module: String,
    pub export: String,
}

/// Name and key of a declared structure, without its members
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRef {
    pub name: String,
    pub fully_qualified_name: String,
}

/// Host runtime built-in types recognized ahead of structural matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinTag {
    #[serde(rename = "v8Uint8Array")]
    Uint8Array,
    #[serde(rename = "v8ArrayBufferView")]
    ArrayBufferView,
    #[serde(rename = "jsgBufferSource")]
    BufferSource,
    #[serde(rename = "kjDate")]
    Date,
    #[serde(rename = "v8Function")]
    Function,
    #[serde(rename = "v8ArrayBuffer")]
    ArrayBuffer,
}

impl BuiltinTag {
    /// Get the wire spelling of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uint8Array => "v8Uint8Array",
            Self::ArrayBufferView => "v8ArrayBufferView",
            Self::BufferSource => "jsgBufferSource",
            Self::Date => "kjDate",
            Self::Function => "v8Function",
            Self::ArrayBuffer => "v8ArrayBuffer",
        }
    }
}

impl std::fmt::Display for BuiltinTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engine-internal plumbing types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalTag {
    #[serde(rename = "configuration")]
    Configuration,
    #[serde(rename = "v8Isolate")]
    Isolate,
    #[serde(rename = "jsgLock")]
    Lock,
    #[serde(rename = "jsgTypeHandler")]
    TypeHandler,
    #[serde(rename = "jsgUnimplemented")]
    Unimplemented,
    #[serde(rename = "jsgVarargs")]
    Varargs,
    #[serde(rename = "jsgSelfRef")]
    SelfRef,
    #[serde(rename = "v8FunctionCallbackInfo")]
    FunctionCallbackInfo,
    #[serde(rename = "v8PropertyCallbackInfo")]
    PropertyCallbackInfo,
    #[serde(rename = "jsgName")]
    Name,
}

impl InternalTag {
    /// Get the wire spelling of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Isolate => "v8Isolate",
            Self::Lock => "jsgLock",
            Self::TypeHandler => "jsgTypeHandler",
            Self::Unimplemented => "jsgUnimplemented",
            Self::Varargs => "jsgVarargs",
            Self::SelfRef => "jsgSelfRef",
            Self::FunctionCallbackInfo => "v8FunctionCallbackInfo",
            Self::PropertyCallbackInfo => "v8PropertyCallbackInfo",
            Self::Name => "jsgName",
        }
    }
}

impl std::fmt::Display for InternalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Type {
    pub fn number(name: impl Into<String>) -> Self {
        Type::Number(NumberType { name: name.into() })
    }

    pub fn string(name: impl Into<String>) -> Self {
        Type::String(StringType { name: name.into() })
    }

    pub fn promise(value: Type) -> Self {
        Type::Promise(PromiseType {
            value: Box::new(value),
        })
    }

    pub fn array(element: Type, name: impl Into<String>) -> Self {
        Type::Array(ArrayType {
            element: Box::new(element),
            name: name.into(),
        })
    }

    pub fn maybe(value: Type, name: impl Into<String>) -> Self {
        Type::Maybe(MaybeType {
            value: Box::new(value),
            name: name.into(),
        })
    }

    pub fn dict(key: Type, value: Type) -> Self {
        Type::Dict(DictType {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn one_of(variants: Vec<Type>) -> Self {
        Type::OneOf(OneOfType { variants })
    }

    pub fn function(return_type: Type, args: Vec<Type>) -> Self {
        Type::Function(FunctionType {
            return_type: Box::new(return_type),
            args,
        })
    }

    pub fn builtin(ty: BuiltinTag) -> Self {
        Type::Builtin(BuiltinType { ty })
    }

    pub fn internal(ty: InternalTag) -> Self {
        Type::Internal(InternalType { ty })
    }

    pub fn js_builtin(module: impl Into<String>, export: impl Into<String>) -> Self {
        Type::JsBuiltin(JsBuiltinType {
            module: module.into(),
            export: export.into(),
        })
    }

    /// Check if this type is a primitive leaf (void, bool, number, string)
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Void | Type::Bool | Type::Number(_) | Type::String(_)
        )
    }

    /// Get the structure reference if this is one
    pub fn as_structure_ref(&self) -> Option<&StructureRef> {
        match self {
            Type::Structure(r) => Some(r),
            _ => None,
        }
    }

    /// Check whether an `Unknown` leaf appears anywhere in this type.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Type::Unknown => true,
            Type::Promise(p) => p.value.contains_unknown(),
            Type::Array(a) => a.element.contains_unknown(),
            Type::Maybe(m) => m.value.contains_unknown(),
            Type::Dict(d) => d.key.contains_unknown() || d.value.contains_unknown(),
            Type::OneOf(o) => o.variants.iter().any(Type::contains_unknown),
            Type::Function(f) => {
                f.return_type.contains_unknown() || f.args.iter().any(Type::contains_unknown)
            }
            Type::Void
            | Type::Bool
            | Type::Object
            | Type::Number(_)
            | Type::String(_)
            | Type::Builtin(_)
            | Type::Internal(_)
            | Type::JsBuiltin(_)
            | Type::Structure(_) => false,
        }
    }
}

impl From<StructureRef> for Type {
    fn from(r: StructureRef) -> Self {
        Type::Structure(r)
    }
}

/// A method (instance or static), also used for iterator entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub return_type: Type,
    pub args: Vec<Type>,
    #[serde(rename = "static")]
    pub is_static: bool,
}

/// A property; the four placement flags are independent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    pub readonly: bool,
    pub lazy: bool,
    pub prototype: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub args: Vec<Type>,
}

/// A constant resolved to its literal value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub value: i64,
}

/// A nested type declaration, expanded inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nested {
    pub structure: Rc<Structure>,
    pub name: String,
}

/// One declared member of a structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Member {
    Method(Method),
    Property(Property),
    Constructor(Constructor),
    Constant(Constant),
    Nested(Nested),
}

impl Member {
    /// Get the member's declared name. Constructors are unnamed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Method(m) => Some(&m.name),
            Member::Property(p) => Some(&p.name),
            Member::Constant(c) => Some(&c.name),
            Member::Nested(n) => Some(&n.name),
            Member::Constructor(_) => None,
        }
    }

    fn contains_unknown(&self) -> bool {
        match self {
            Member::Method(m) => {
                m.return_type.contains_unknown() || m.args.iter().any(Type::contains_unknown)
            }
            Member::Property(p) => p.ty.contains_unknown(),
            Member::Constructor(c) => c.args.iter().any(Type::contains_unknown),
            Member::Constant(_) | Member::Nested(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrinsicBase {
    pub name: String,
}

/// What a structure inherits from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extends {
    /// Grafted onto a host runtime prototype
    #[serde(rename = "intrinsic")]
    Intrinsic(IntrinsicBase),
    /// Another declared structure, by light reference only
    #[serde(rename = "structure")]
    Structure(StructureRef),
}

/// A module from the JS bundle attached to a structure's context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinModule {
    pub specifier: String,
    pub ts_declarations: String,
}

impl BuiltinModule {
    pub fn new(specifier: impl Into<String>, ts_declarations: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            ts_declarations: ts_declarations.into(),
        }
    }
}

/// Full shape of one declared resource or struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    pub name: String,
    /// Members in declaration order
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    pub iterable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterator: Option<Method>,
    pub async_iterable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub async_iterator: Option<Method>,
    /// Globally unique key of this structure
    pub fully_qualified_name: String,
    pub ts_root: bool,
    /// Verbatim override text; `None` is distinct from an empty override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_define: Option<String>,
    /// Present only when a JS bundle context is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin_modules: Option<Vec<BuiltinModule>>,
}

impl Structure {
    /// Create a member-less structure with every flag at its default.
    pub fn new(name: impl Into<String>, fully_qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            extends: None,
            iterable: false,
            iterator: None,
            async_iterable: false,
            async_iterator: None,
            fully_qualified_name: fully_qualified_name.into(),
            ts_root: false,
            ts_override: None,
            ts_define: None,
            builtin_modules: None,
        }
    }

    /// Light reference to this structure
    pub fn to_ref(&self) -> StructureRef {
        StructureRef {
            name: self.name.clone(),
            fully_qualified_name: self.fully_qualified_name.clone(),
        }
    }

    /// Find the first member with the given name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == Some(name))
    }

    /// Get the constructor, if one was declared
    pub fn constructor(&self) -> Option<&Constructor> {
        self.members.iter().find_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }

    /// Names of the members whose types contain an `Unknown` leaf.
    ///
    /// Constructors are reported as `"constructor"`. Nested structures are
    /// not descended into; they are audited as structures of their own.
    pub fn unknown_members(&self) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .members
            .iter()
            .filter(|m| m.contains_unknown())
            .map(|m| m.name().unwrap_or("constructor"))
            .collect();

        for iterator in [&self.iterator, &self.async_iterator].into_iter().flatten() {
            if iterator.return_type.contains_unknown()
                || iterator.args.iter().any(Type::contains_unknown)
            {
                found.push(&iterator.name);
            }
        }
        found
    }
}
