//! Canonical text form of the schema tree.
//!
//! Matches the Cap'n Proto text codec: structs as `(field = value, ...)`,
//! unions as a single `(variant = value)` pair, void variants as
//! `(variant = void)`, lists as `[a, b]`. Absent optional fields are
//! omitted.

use std::fmt::Write;

use rtti_schema::{
    BuiltinModule, Extends, Member, Method, Structure, StructureRef, Type,
};

/// Render a type to its canonical text.
pub fn type_to_text(ty: &Type) -> String {
    let mut out = String::new();
    write_type(&mut out, ty);
    out
}

/// Render a structure to its canonical text.
pub fn structure_to_text(structure: &Structure) -> String {
    let mut out = String::new();
    write_structure(&mut out, structure);
    out
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_list<T>(out: &mut String, items: &[T], mut write_item: impl FnMut(&mut String, &T)) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_item(out, item);
    }
    out.push(']');
}

fn write_bool(out: &mut String, value: bool) {
    out.push_str(if value { "true" } else { "false" });
}

fn write_structure_ref(out: &mut String, r: &StructureRef) {
    out.push_str("(name = ");
    write_string(out, &r.name);
    out.push_str(", fullyQualifiedName = ");
    write_string(out, &r.fully_qualified_name);
    out.push(')');
}

fn write_named(out: &mut String, name: &str) {
    out.push_str("(name = ");
    write_string(out, name);
    out.push(')');
}

fn write_type(out: &mut String, ty: &Type) {
    match ty {
        Type::Void => out.push_str("(voidt = void)"),
        Type::Bool => out.push_str("(boolt = void)"),
        Type::Unknown => out.push_str("(unknown = void)"),
        Type::Object => out.push_str("(object = void)"),
        Type::Number(n) => {
            out.push_str("(number = ");
            write_named(out, &n.name);
            out.push(')');
        }
        Type::String(s) => {
            out.push_str("(string = ");
            write_named(out, &s.name);
            out.push(')');
        }
        Type::Promise(p) => {
            out.push_str("(promise = (value = ");
            write_type(out, &p.value);
            out.push_str("))");
        }
        Type::Array(a) => {
            out.push_str("(array = (element = ");
            write_type(out, &a.element);
            out.push_str(", name = ");
            write_string(out, &a.name);
            out.push_str("))");
        }
        Type::Maybe(m) => {
            out.push_str("(maybe = (value = ");
            write_type(out, &m.value);
            out.push_str(", name = ");
            write_string(out, &m.name);
            out.push_str("))");
        }
        Type::Dict(d) => {
            out.push_str("(dict = (key = ");
            write_type(out, &d.key);
            out.push_str(", value = ");
            write_type(out, &d.value);
            out.push_str("))");
        }
        Type::OneOf(o) => {
            out.push_str("(oneOf = (variants = ");
            write_list(out, &o.variants, write_type);
            out.push_str("))");
        }
        Type::Function(f) => {
            out.push_str("(function = (returnType = ");
            write_type(out, &f.return_type);
            out.push_str(", args = ");
            write_list(out, &f.args, write_type);
            out.push_str("))");
        }
        Type::Builtin(b) => {
            let _ = write!(out, "(builtin = (type = {}))", b.ty);
        }
        Type::Internal(i) => {
            let _ = write!(out, "(jsgImpl = (type = {}))", i.ty);
        }
        Type::JsBuiltin(js) => {
            out.push_str("(jsBuiltin = (module = ");
            write_string(out, &js.module);
            out.push_str(", export = ");
            write_string(out, &js.export);
            out.push_str("))");
        }
        Type::Structure(r) => {
            out.push_str("(structure = ");
            write_structure_ref(out, r);
            out.push(')');
        }
    }
}

fn write_method(out: &mut String, method: &Method) {
    out.push_str("(name = ");
    write_string(out, &method.name);
    out.push_str(", returnType = ");
    write_type(out, &method.return_type);
    out.push_str(", args = ");
    write_list(out, &method.args, write_type);
    out.push_str(", static = ");
    write_bool(out, method.is_static);
    out.push(')');
}

fn write_member(out: &mut String, member: &Member) {
    match member {
        Member::Method(m) => {
            out.push_str("(method = ");
            write_method(out, m);
            out.push(')');
        }
        Member::Property(p) => {
            out.push_str("(property = (name = ");
            write_string(out, &p.name);
            out.push_str(", type = ");
            write_type(out, &p.ty);
            out.push_str(", readonly = ");
            write_bool(out, p.readonly);
            out.push_str(", lazy = ");
            write_bool(out, p.lazy);
            out.push_str(", prototype = ");
            write_bool(out, p.prototype);
            out.push_str("))");
        }
        Member::Constructor(c) => {
            out.push_str("(constructor = (args = ");
            write_list(out, &c.args, write_type);
            out.push_str("))");
        }
        Member::Constant(c) => {
            out.push_str("(constant = (name = ");
            write_string(out, &c.name);
            let _ = write!(out, ", value = {}))", c.value);
        }
        Member::Nested(n) => {
            out.push_str("(nested = (structure = ");
            write_structure(out, &n.structure);
            out.push_str(", name = ");
            write_string(out, &n.name);
            out.push_str("))");
        }
    }
}

fn write_extends(out: &mut String, extends: &Extends) {
    match extends {
        Extends::Intrinsic(i) => {
            out.push_str("(intrinsic = ");
            write_named(out, &i.name);
            out.push(')');
        }
        Extends::Structure(r) => {
            out.push_str("(structure = ");
            write_structure_ref(out, r);
            out.push(')');
        }
    }
}

fn write_builtin_module(out: &mut String, module: &BuiltinModule) {
    out.push_str("(specifier = ");
    write_string(out, &module.specifier);
    out.push_str(", tsDeclarations = ");
    write_string(out, &module.ts_declarations);
    out.push(')');
}

fn write_structure(out: &mut String, s: &Structure) {
    out.push_str("(name = ");
    write_string(out, &s.name);
    out.push_str(", members = ");
    write_list(out, &s.members, write_member);

    if let Some(extends) = &s.extends {
        out.push_str(", extends = ");
        write_extends(out, extends);
    }

    out.push_str(", iterable = ");
    write_bool(out, s.iterable);
    if let Some(iterator) = &s.iterator {
        out.push_str(", iterator = ");
        write_method(out, iterator);
    }

    out.push_str(", asyncIterable = ");
    write_bool(out, s.async_iterable);
    if let Some(iterator) = &s.async_iterator {
        out.push_str(", asyncIterator = ");
        write_method(out, iterator);
    }

    out.push_str(", fullyQualifiedName = ");
    write_string(out, &s.fully_qualified_name);
    out.push_str(", tsRoot = ");
    write_bool(out, s.ts_root);

    if let Some(text) = &s.ts_override {
        out.push_str(", tsOverride = ");
        write_string(out, text);
    }
    if let Some(text) = &s.ts_define {
        out.push_str(", tsDefine = ");
        write_string(out, text);
    }
    if let Some(modules) = &s.builtin_modules {
        out.push_str(", builtinModules = ");
        write_list(out, modules, write_builtin_module);
    }
    out.push(')');
}
