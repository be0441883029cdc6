use std::any::type_name;
use std::rc::Rc;

use rtti_encoder::{structure_to_text, type_to_text};
use rtti_schema::{Extends, Member};

use crate::host::*;
use crate::{declared_types, BuildConfig, Builder, BuiltinModule, Declaration, Declared, FeatureFlags};

fn t_type<T: crate::Reflect + ?Sized>() -> String {
    let mut builder = Builder::new(());
    type_to_text(&builder.type_of::<T>())
}

fn t_structure<T: Declared + ?Sized>() -> String {
    let mut builder = Builder::new(());
    structure_to_text(&builder.structure::<T>())
}

fn fqn<T: ?Sized>() -> &'static str {
    type_name::<T>()
}

// ---- types used by the scenarios below ----

struct Base;

impl Declared for Base {
    const NAME: &'static str = "Base";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.inherit_intrinsic("v8::kIteratorPrototype");
    }
}

struct TestResource;

impl Declared for TestResource {
    const NAME: &'static str = "TestResource";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.inherit::<Base>()
            .method::<fn(i32, f64)>("instanceMethod")
            .static_method::<fn() -> i32>("staticMethod")
            .instance_property::<i32>("size")
            .readonly_instance_property::<i32>("readonlySize")
            .lazy_instance_property::<i32>("lazySize")
            .lazy_readonly_instance_property::<i32>("lazyReadonlySize")
            .prototype_property::<i32>("protoSize")
            .readonly_prototype_property::<i32>("protoReadonlySize")
            .constructor::<fn(Optional<String>) -> Ref<TestResource>>();
    }
}

struct TestNested;

impl Declared for TestNested {
    const NAME: &'static str = "TestNested";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.nested::<Base>("Base");
    }
}

struct TestConstant;

#[allow(dead_code)]
enum Shape {
    Circle = 2,
}

impl TestConstant {
    const ENABLED: i32 = 1;
}

impl Declared for TestConstant {
    const NAME: &'static str = "TestConstant";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.static_constant("ENABLED", Self::ENABLED)
            .static_constant("CIRCLE", Shape::Circle as i64);
    }
}

struct TestLazyJsProperty;

impl Declared for TestLazyJsProperty {
    const NAME: &'static str = "TestLazyJsProperty";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.context_js_bundle([BuiltinModule::new("testBundle:internal", "foo: string")])
            .lazy_js_instance_property("JsProperty", "js-module")
            .lazy_js_readonly_instance_property("JsReadonlyProperty", "js-readonly-module");
    }
}

struct TestStruct;

impl Declared for TestStruct {
    const NAME: &'static str = "TestStruct";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.field::<i32>("a").field::<bool>("b");
    }
}

struct TestSymbolTable;

impl Declared for TestSymbolTable {
    const NAME: &'static str = "TestSymbolTable";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn(Ref<TestResource>)>("acceptResource")
            .method::<fn(TestSymbolTable)>("recursiveTypeFunction");
    }
}

struct TestTypeScriptResourceType;

impl Declared for TestTypeScriptResourceType {
    const NAME: &'static str = "TestTypeScriptResourceType";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.readonly_instance_property::<i32>("thing")
            .ts_root()
            .ts_define("interface Define {}")
            .ts_override("{ readonly thing: 42 }");
    }
}

struct TestTypeScriptStruct;

impl Declared for TestTypeScriptStruct {
    const NAME: &'static str = "TestTypeScriptStruct";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.field::<i32>("structThing")
            .ts_root()
            .ts_define("interface StructDefine {}")
            .ts_override("RenamedStructThing { structThing: 42 }");
    }
}

// Mutual references through method arguments.
struct Left;
struct Right;

impl Declared for Left {
    const NAME: &'static str = "Left";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn(Right)>("toRight");
    }
}

impl Declared for Right {
    const NAME: &'static str = "Right";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn() -> Option<Left>>("toLeft");
    }
}

// A type nested inside itself.
struct Recursive;

impl Declared for Recursive {
    const NAME: &'static str = "Recursive";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.readonly_instance_property::<i32>("depth")
            .nested::<Recursive>("Inner");
    }
}

// Nested types that point back at their parent.
struct Outer;
struct Inner;

impl Declared for Outer {
    const NAME: &'static str = "Outer";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.nested::<Inner>("Inner");
    }
}

impl Declared for Inner {
    const NAME: &'static str = "Inner";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn() -> Outer>("parent");
    }
}

struct Gated;

impl Declared for Gated {
    const NAME: &'static str = "Gated";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn()>("always");
        if decl.config().is_enabled("experimental") {
            decl.method::<fn() -> JsPromise>("experimental");
        }
    }
}

struct TwoConstructors;

impl Declared for TwoConstructors {
    const NAME: &'static str = "TwoConstructors";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.constructor::<fn(i32) -> TwoConstructors>()
            .constructor::<fn(String, bool) -> TwoConstructors>();
    }
}

struct Entries;

impl Declared for Entries {
    const NAME: &'static str = "Entries";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.iterable::<fn() -> Vec<OneOf<(String, i32)>>>("entries")
            .async_iterable::<fn(Optional<bool>) -> Promise<JsValue>>("values");
    }
}

// Reference arguments spelled with an explicit lifetime.
struct BorrowingArgs;

impl Declared for BorrowingArgs {
    const NAME: &'static str = "BorrowingArgs";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn(&'static TestStruct, &'static mut Lock)>("accept");
    }
}

declared_types!(
    BorrowingArgs,
    Base,
    TestResource,
    TestNested,
    TestConstant,
    TestLazyJsProperty,
    TestStruct,
    TestSymbolTable,
    TestTypeScriptResourceType,
    TestTypeScriptStruct,
    Left,
    Right,
    Recursive,
    Outer,
    Inner,
    Gated,
    TwoConstructors,
    Entries,
);

// ---- type occurrences ----

#[test]
fn test_primitive_types() {
    assert_eq!(t_type::<()>(), "(voidt = void)");
    assert_eq!(t_type::<bool>(), "(boolt = void)");
    assert_eq!(t_type::<JsValue>(), "(unknown = void)");
}

#[test]
fn test_number_types() {
    assert_eq!(t_type::<i8>(), "(number = (name = \"i8\"))");
    assert_eq!(t_type::<u8>(), "(number = (name = \"u8\"))");
    assert_eq!(t_type::<i16>(), "(number = (name = \"i16\"))");
    assert_eq!(t_type::<u16>(), "(number = (name = \"u16\"))");
    assert_eq!(t_type::<i32>(), "(number = (name = \"i32\"))");
    assert_eq!(t_type::<u32>(), "(number = (name = \"u32\"))");
    assert_eq!(t_type::<i64>(), "(number = (name = \"i64\"))");
    assert_eq!(t_type::<u64>(), "(number = (name = \"u64\"))");
    assert_eq!(t_type::<f64>(), "(number = (name = \"f64\"))");
}

#[test]
fn test_string_types() {
    assert_eq!(t_type::<String>(), "(string = (name = \"String\"))");
    assert_eq!(t_type::<&str>(), "(string = (name = \"str\"))");
    assert_eq!(t_type::<JsString>(), "(string = (name = \"JsString\"))");
    assert_eq!(t_type::<ByteString>(), "(string = (name = \"ByteString\"))");
    assert_eq!(t_type::<UsvString>(), "(string = (name = \"UsvString\"))");
    assert_eq!(t_type::<UsvStr>(), "(string = (name = \"UsvStr\"))");
}

#[test]
fn test_object_types() {
    assert_eq!(t_type::<JsObject>(), "(object = void)");
    assert_eq!(t_type::<Ref<JsObject>>(), "(object = void)");
}

#[test]
fn test_promises() {
    assert_eq!(t_type::<Promise<()>>(), "(promise = (value = (voidt = void)))");
    assert_eq!(
        t_type::<Promise<i32>>(),
        "(promise = (value = (number = (name = \"i32\"))))"
    );
    assert_eq!(t_type::<JsPromise>(), "(promise = (value = (unknown = void)))");
}

#[test]
fn test_generic_types() {
    assert_eq!(t_type::<Ref<JsObject>>(), "(object = void)");
    assert_eq!(t_type::<V8Ref<JsObject>>(), "(object = void)");
    assert_eq!(t_type::<HashableV8Ref<JsObject>>(), "(object = void)");
    assert_eq!(t_type::<Local<JsObject>>(), "(object = void)");
    assert_eq!(t_type::<Identified<JsObject>>(), "(object = void)");
    assert_eq!(t_type::<MemoizedIdentity<JsObject>>(), "(object = void)");
    assert_eq!(
        t_type::<NonCoercible<String>>(),
        "(string = (name = \"String\"))"
    );

    assert_eq!(
        t_type::<Vec<i32>>(),
        "(array = (element = (number = (name = \"i32\")), name = \"Vec\"))"
    );
    assert_eq!(
        t_type::<&[i32]>(),
        "(array = (element = (number = (name = \"i32\")), name = \"slice\"))"
    );
    assert_eq!(
        t_type::<Sequence<i32>>(),
        "(array = (element = (number = (name = \"i32\")), name = \"Sequence\"))"
    );

    assert_eq!(
        t_type::<Option<i32>>(),
        "(maybe = (value = (number = (name = \"i32\")), name = \"Option\"))"
    );
    assert_eq!(
        t_type::<Optional<i32>>(),
        "(maybe = (value = (number = (name = \"i32\")), name = \"Optional\"))"
    );
    assert_eq!(
        t_type::<LenientOptional<i32>>(),
        "(maybe = (value = (number = (name = \"i32\")), name = \"LenientOptional\"))"
    );

    assert_eq!(
        t_type::<Dict<i32>>(),
        "(dict = (key = (string = (name = \"String\")), value = (number = (name = \"i32\"))))"
    );
    assert_eq!(
        t_type::<Dict<i32, f64>>(),
        "(dict = (key = (number = (name = \"f64\")), value = (number = (name = \"i32\"))))"
    );

    assert_eq!(
        t_type::<OneOf<(i32, f64)>>(),
        "(oneOf = (variants = [(number = (name = \"i32\")), (number = (name = \"f64\"))]))"
    );
    assert_eq!(
        t_type::<OneOf<(i32, f64, String)>>(),
        "(oneOf = (variants = [\
         (number = (name = \"i32\")), \
         (number = (name = \"f64\")), \
         (string = (name = \"String\"))]))"
    );
}

#[test]
fn test_builtins() {
    assert_eq!(t_type::<BufferSource>(), "(builtin = (type = jsgBufferSource))");
    assert_eq!(t_type::<Uint8Array>(), "(builtin = (type = v8Uint8Array))");
    assert_eq!(t_type::<ArrayBufferView>(), "(builtin = (type = v8ArrayBufferView))");
    assert_eq!(t_type::<ArrayBuffer>(), "(builtin = (type = v8ArrayBuffer))");
    assert_eq!(t_type::<JsFunction>(), "(builtin = (type = v8Function))");
    assert_eq!(t_type::<Date>(), "(builtin = (type = kjDate))");
}

#[test]
fn test_internal_types() {
    assert_eq!(t_type::<Lock>(), "(jsgImpl = (type = jsgLock))");
    assert_eq!(t_type::<SelfRef>(), "(jsgImpl = (type = jsgSelfRef))");
    assert_eq!(t_type::<Unimplemented>(), "(jsgImpl = (type = jsgUnimplemented))");
    assert_eq!(t_type::<Varargs>(), "(jsgImpl = (type = jsgVarargs))");
    assert_eq!(t_type::<&mut Isolate>(), "(jsgImpl = (type = v8Isolate))");
    assert_eq!(t_type::<Configuration>(), "(jsgImpl = (type = configuration))");
    assert_eq!(t_type::<Name>(), "(jsgImpl = (type = jsgName))");
    assert_eq!(t_type::<TypeHandler<Date>>(), "(jsgImpl = (type = jsgTypeHandler))");
    assert_eq!(
        t_type::<FunctionCallbackInfo<JsValue>>(),
        "(jsgImpl = (type = v8FunctionCallbackInfo))"
    );
    assert_eq!(
        t_type::<PropertyCallbackInfo<JsValue>>(),
        "(jsgImpl = (type = v8PropertyCallbackInfo))"
    );
}

#[test]
fn test_functions() {
    assert_eq!(
        t_type::<Function<fn() -> i32>>(),
        "(function = (returnType = (number = (name = \"i32\")), args = []))"
    );
    assert_eq!(
        t_type::<Function<fn(i32, f64)>>(),
        "(function = (returnType = (voidt = void), args = [(number = (name = \"i32\")), (number = (name = \"f64\"))]))"
    );
}

#[test]
fn test_static_reference_arguments() {
    assert_eq!(
        t_type::<Function<fn(&'static i32, &'static mut String) -> &'static bool>>(),
        t_type::<Function<fn(i32, String) -> bool>>()
    );

    let mut builder = Builder::new(());
    let borrowed = builder.structure::<BorrowingArgs>();
    match borrowed.member("accept") {
        Some(Member::Method(m)) => {
            assert_eq!(m.args.len(), 2);
            assert_eq!(m.args[0].as_structure_ref().unwrap().name, "TestStruct");
            assert_eq!(type_to_text(&m.args[1]), "(jsgImpl = (type = jsgLock))");
        }
        other => panic!("unexpected member {:?}", other),
    }
}

#[test]
fn test_reference_modifiers() {
    let bare = t_type::<i32>();
    assert_eq!(t_type::<&i32>(), bare);
    assert_eq!(t_type::<&mut i32>(), bare);
    assert_eq!(t_type::<&&mut i32>(), bare);
}

// ---- structures ----

#[test]
fn test_resource_reference() {
    assert_eq!(
        t_type::<TestResource>(),
        format!(
            "(structure = (name = \"TestResource\", fullyQualifiedName = \"{}\"))",
            fqn::<TestResource>()
        )
    );
}

#[test]
fn test_reference_matches_expanded_structure() {
    let mut builder = Builder::new(());
    let reference = builder.type_of::<TestResource>();
    let expanded = builder.structure::<TestResource>();
    assert_eq!(reference, rtti_schema::Type::from(expanded.to_ref()));
}

#[test]
fn test_resource_structure() {
    assert_eq!(
        t_structure::<Base>(),
        format!(
            "(name = \"Base\", members = [], \
             extends = (intrinsic = (name = \"v8::kIteratorPrototype\")), \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false)",
            fqn::<Base>()
        )
    );

    assert_eq!(
        t_structure::<TestResource>(),
        format!(
            "(name = \"TestResource\", members = [\
             (method = (name = \"instanceMethod\", returnType = (voidt = void), args = [(number = (name = \"i32\")), (number = (name = \"f64\"))], static = false)), \
             (method = (name = \"staticMethod\", returnType = (number = (name = \"i32\")), args = [], static = true)), \
             (property = (name = \"size\", type = (number = (name = \"i32\")), readonly = false, lazy = false, prototype = false)), \
             (property = (name = \"readonlySize\", type = (number = (name = \"i32\")), readonly = true, lazy = false, prototype = false)), \
             (property = (name = \"lazySize\", type = (number = (name = \"i32\")), readonly = false, lazy = true, prototype = false)), \
             (property = (name = \"lazyReadonlySize\", type = (number = (name = \"i32\")), readonly = true, lazy = true, prototype = false)), \
             (property = (name = \"protoSize\", type = (number = (name = \"i32\")), readonly = false, lazy = false, prototype = true)), \
             (property = (name = \"protoReadonlySize\", type = (number = (name = \"i32\")), readonly = true, lazy = false, prototype = true)), \
             (constructor = (args = [(maybe = (value = (string = (name = \"String\")), name = \"Optional\"))]))], \
             extends = (structure = (name = \"Base\", fullyQualifiedName = \"{}\")), \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false)",
            fqn::<Base>(),
            fqn::<TestResource>()
        )
    );
}

#[test]
fn test_nested_structure() {
    assert_eq!(
        t_structure::<TestNested>(),
        format!(
            "(name = \"TestNested\", members = [(nested = (structure = (\
             name = \"Base\", members = [], \
             extends = (intrinsic = (name = \"v8::kIteratorPrototype\")), \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false), \
             name = \"Base\"))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false)",
            fqn::<Base>(),
            fqn::<TestNested>()
        )
    );
}

#[test]
fn test_constant_members() {
    assert_eq!(
        t_structure::<TestConstant>(),
        format!(
            "(name = \"TestConstant\", members = [\
             (constant = (name = \"ENABLED\", value = 1)), \
             (constant = (name = \"CIRCLE\", value = 2))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false)",
            fqn::<TestConstant>()
        )
    );
}

#[test]
fn test_lazy_js_property() {
    assert_eq!(
        t_structure::<TestLazyJsProperty>(),
        format!(
            "(name = \"TestLazyJsProperty\", members = [\
             (property = (name = \"JsProperty\", type = (jsBuiltin = (module = \"js-module\", export = \"JsProperty\")), readonly = false, lazy = true, prototype = false)), \
             (property = (name = \"JsReadonlyProperty\", type = (jsBuiltin = (module = \"js-readonly-module\", export = \"JsReadonlyProperty\")), readonly = true, lazy = true, prototype = false))], \
             iterable = false, asyncIterable = false, fullyQualifiedName = \"{}\", tsRoot = false, \
             builtinModules = [(specifier = \"testBundle:internal\", tsDeclarations = \"foo: string\")])",
            fqn::<TestLazyJsProperty>()
        )
    );
}

#[test]
fn test_struct_reference() {
    assert_eq!(
        t_type::<TestStruct>(),
        format!(
            "(structure = (name = \"TestStruct\", fullyQualifiedName = \"{}\"))",
            fqn::<TestStruct>()
        )
    );
}

#[test]
fn test_struct_structure() {
    assert_eq!(
        t_structure::<TestStruct>(),
        format!(
            "(name = \"TestStruct\", members = [\
             (property = (name = \"a\", type = (number = (name = \"i32\")), readonly = false, lazy = false, prototype = false)), \
             (property = (name = \"b\", type = (boolt = void), readonly = false, lazy = false, prototype = false))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = false)",
            fqn::<TestStruct>()
        )
    );
}

#[test]
fn test_symbol_table() {
    let mut builder = Builder::new(());
    let structure = builder.structure::<TestSymbolTable>();

    assert_eq!(
        structure_to_text(&structure),
        format!(
            "(name = \"TestSymbolTable\", members = [\
             (method = (name = \"acceptResource\", returnType = (voidt = void), args = [(structure = (name = \"TestResource\", fullyQualifiedName = \"{resource}\"))], static = false)), \
             (method = (name = \"recursiveTypeFunction\", returnType = (voidt = void), args = [(structure = (name = \"TestSymbolTable\", fullyQualifiedName = \"{table}\"))], static = false))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{table}\", tsRoot = false)",
            resource = fqn::<TestResource>(),
            table = fqn::<TestSymbolTable>()
        )
    );

    assert!(builder.lookup(fqn::<TestSymbolTable>()).is_some());
    let resource = builder.lookup(fqn::<TestResource>()).unwrap();
    assert!(!resource.members.is_empty());
    // Reached only through `extends` of TestResource.
    assert!(builder.lookup(fqn::<Base>()).is_some());
    assert!(builder.lookup(fqn::<TestStruct>()).is_none());
}

#[test]
fn test_typescript_macros() {
    assert_eq!(
        t_structure::<TestTypeScriptResourceType>(),
        format!(
            "(name = \"TestTypeScriptResourceType\", members = [\
             (property = (name = \"thing\", type = (number = (name = \"i32\")), readonly = true, lazy = false, prototype = false))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = true, \
             tsOverride = \"{{ readonly thing: 42 }}\", \
             tsDefine = \"interface Define {{}}\")",
            fqn::<TestTypeScriptResourceType>()
        )
    );
    assert_eq!(
        t_structure::<TestTypeScriptStruct>(),
        format!(
            "(name = \"TestTypeScriptStruct\", members = [\
             (property = (name = \"structThing\", type = (number = (name = \"i32\")), readonly = false, lazy = false, prototype = false))], \
             iterable = false, asyncIterable = false, \
             fullyQualifiedName = \"{}\", tsRoot = true, \
             tsOverride = \"RenamedStructThing {{ structThing: 42 }}\", \
             tsDefine = \"interface StructDefine {{}}\")",
            fqn::<TestTypeScriptStruct>()
        )
    );
}

// ---- symbol table behavior ----

#[test]
fn test_structure_is_memoized() {
    let mut builder = Builder::new(());
    let first = builder.structure::<TestResource>();
    let second = builder.structure::<TestResource>();
    assert!(Rc::ptr_eq(&first, &second));

    let found = builder.lookup(fqn::<TestResource>()).unwrap();
    assert!(Rc::ptr_eq(&first, &found));
}

#[test]
fn test_reference_does_not_expand_inline() {
    let mut builder = Builder::new(());
    let ty = builder.type_of::<Vec<TestStruct>>();
    let element = match &ty {
        rtti_schema::Type::Array(array) => array.element.as_structure_ref().unwrap(),
        other => panic!("expected an array, got {:?}", other),
    };
    assert_eq!(element.name, "TestStruct");

    // Expanded after the query, so lookup sees the members.
    let expanded = builder.lookup(fqn::<TestStruct>()).unwrap();
    assert_eq!(expanded.members.len(), 2);
}

#[test]
fn test_mutual_references() {
    let mut builder = Builder::new(());
    let left = builder.structure::<Left>();

    match left.member("toRight") {
        Some(Member::Method(m)) => {
            assert_eq!(m.args[0].as_structure_ref().unwrap().name, "Right");
        }
        other => panic!("unexpected member {:?}", other),
    }

    let right = builder.lookup(fqn::<Right>()).unwrap();
    match right.member("toLeft") {
        Some(Member::Method(m)) => {
            assert_eq!(
                type_to_text(&m.return_type),
                format!(
                    "(maybe = (value = (structure = (name = \"Left\", fullyQualifiedName = \"{}\")), name = \"Option\"))",
                    fqn::<Left>()
                )
            );
        }
        other => panic!("unexpected member {:?}", other),
    }
    assert_eq!(builder.symbols().len(), 2);
}

#[test]
fn test_self_nesting_terminates() {
    let mut builder = Builder::new(());
    let recursive = builder.structure::<Recursive>();

    assert_eq!(recursive.members.len(), 2);
    match &recursive.members[1] {
        Member::Nested(nested) => {
            assert_eq!(nested.name, "Inner");
            assert_eq!(nested.structure.fully_qualified_name, fqn::<Recursive>());
            assert!(nested.structure.members.is_empty());
        }
        other => panic!("expected a nested member, got {:?}", other),
    }

    // The table holds the full expansion, not the placeholder.
    let found = builder.lookup(fqn::<Recursive>()).unwrap();
    assert!(Rc::ptr_eq(&recursive, &found));
}

#[test]
fn test_nested_back_reference() {
    let mut builder = Builder::new(());
    let outer = builder.structure::<Outer>();

    let inner = match &outer.members[0] {
        Member::Nested(nested) => Rc::clone(&nested.structure),
        other => panic!("expected a nested member, got {:?}", other),
    };
    match inner.member("parent") {
        Some(Member::Method(m)) => {
            assert_eq!(m.return_type.as_structure_ref().unwrap().name, "Outer");
        }
        other => panic!("unexpected member {:?}", other),
    }

    let looked_up = builder.lookup(fqn::<Inner>()).unwrap();
    assert!(Rc::ptr_eq(&inner, &looked_up));
}

#[test]
fn test_inherit_records_reference_only() {
    let mut builder = Builder::new(());
    let resource = builder.structure::<TestResource>();
    match &resource.extends {
        Some(Extends::Structure(base)) => {
            assert_eq!(base.name, "Base");
            assert_eq!(base.fully_qualified_name, fqn::<Base>());
        }
        other => panic!("unexpected extends {:?}", other),
    }
}

#[test]
fn test_carry_over_symbols() {
    let mut first = Builder::new(());
    let resource = first.structure::<TestResource>();

    let mut second = Builder::with_symbols((), first.into_symbols());
    assert!(second.lookup(fqn::<Base>()).is_some());
    let again = second.structure::<TestResource>();
    assert!(Rc::ptr_eq(&resource, &again));
}

#[test]
fn test_fresh_builder_has_empty_table() {
    let mut builder = Builder::new(());
    builder.structure::<TestResource>();

    let fresh = Builder::new(());
    assert!(fresh.symbols().is_empty());
    assert!(fresh.lookup(fqn::<TestResource>()).is_none());
}

// ---- configuration and supplements ----

#[test]
fn test_config_gates_members() {
    let mut plain = Builder::new(FeatureFlags::new());
    assert!(plain.config().is_empty());
    assert_eq!(plain.structure::<Gated>().members.len(), 1);

    let mut flagged = Builder::new(FeatureFlags::new().with("experimental"));
    assert!(flagged.config().is_enabled("experimental"));
    let gated = flagged.structure::<Gated>();
    assert_eq!(gated.members.len(), 2);
    assert_eq!(gated.unknown_members(), vec!["experimental"]);
}

#[test]
fn test_duplicate_constructor_keeps_first() {
    let mut builder = Builder::new(());
    let structure = builder.structure::<TwoConstructors>();
    assert_eq!(structure.members.len(), 1);
    assert_eq!(
        structure.constructor().unwrap().args,
        vec![rtti_schema::Type::number("i32")]
    );
}

#[test]
fn test_iteration_protocols() {
    let mut builder = Builder::new(());
    let entries = builder.structure::<Entries>();
    assert!(entries.members.is_empty());
    assert!(entries.iterable);
    assert!(entries.async_iterable);

    let text = structure_to_text(&entries);
    assert!(text.contains(
        "iterable = true, iterator = (name = \"entries\", returnType = (array = (element = (oneOf = (variants = [\
         (string = (name = \"String\")), (number = (name = \"i32\"))])), name = \"Vec\")), args = [], static = false), "
    ));
    assert!(text.contains(
        "asyncIterable = true, asyncIterator = (name = \"values\", returnType = (promise = (value = (unknown = void))), \
         args = [(maybe = (value = (boolt = void), name = \"Optional\"))], static = false), "
    ));
    assert_eq!(entries.unknown_members(), vec!["values"]);
}

#[test]
fn test_sorted_symbols() {
    let mut builder = Builder::new(());
    builder.structure::<TestSymbolTable>();
    let names: Vec<String> = builder
        .symbols()
        .sorted()
        .iter()
        .map(|s| s.fully_qualified_name.clone())
        .collect();
    let mut expected = names.clone();
    expected.sort();
    assert_eq!(names, expected);
    assert_eq!(names.len(), 3);
}
