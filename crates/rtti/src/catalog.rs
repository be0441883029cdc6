//! Sample API catalog: the Python runtime's reader and bundler resources.

use std::rc::Rc;

use rtti_builder::host::{JsRef, JsString, Lock, Optional};
use rtti_builder::{
    declared_types, BuildConfig, Builder, BuiltinModule, Declaration, Declared, FeatureFlags,
    Structure,
};

/// Feature that exposes snapshot uploads on the bundler.
pub const SNAPSHOT_UPLOAD: &str = "python-snapshot-upload";

/// Reads files out of the packages tarball.
pub struct PackagesTarReader;

impl Declared for PackagesTarReader {
    const NAME: &'static str = "PackagesTarReader";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn(Lock, i32, Vec<u8>) -> i32>("read");
    }
}

/// Worker bundle metadata handed to the Python bootstrap.
pub struct PyodideMetadataReader;

impl Declared for PyodideMetadataReader {
    const NAME: &'static str = "PyodideMetadataReader";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn() -> bool>("isWorkerd")
            .method::<fn() -> bool>("isTracing")
            .method::<fn() -> String>("getMainModule")
            .method::<fn(Lock) -> Vec<JsRef<JsString>>>("getNames")
            .method::<fn(Lock) -> Vec<JsRef<JsString>>>("getRequirements")
            .method::<fn(Lock) -> Vec<i32>>("getSizes")
            .method::<fn(Lock, i32, i32, Vec<u8>) -> i32>("read")
            .method::<fn() -> bool>("hasMemorySnapshot")
            .method::<fn() -> i32>("getMemorySnapshotSize")
            .method::<fn(i32, Vec<u8>) -> i32>("readMemorySnapshot")
            .method::<fn()>("disposeMemorySnapshot");
    }
}

/// Size and requirement list of a stored memory snapshot.
pub struct SnapshotInfo;

impl Declared for SnapshotInfo {
    const NAME: &'static str = "SnapshotInfo";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.field::<i32>("size")
            .field::<Vec<String>>("requirements")
            .ts_override("{ size: number; requirements: string[] }");
    }
}

/// Carries memory snapshots between the runtime and the deploy pipeline.
pub struct ArtifactBundler;

impl Declared for ArtifactBundler {
    const NAME: &'static str = "ArtifactBundler";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.method::<fn() -> bool>("hasMemorySnapshot")
            .method::<fn() -> i32>("getMemorySnapshotSize")
            .method::<fn(i32, Vec<u8>) -> i32>("readMemorySnapshot")
            .method::<fn()>("disposeMemorySnapshot")
            .method::<fn() -> Optional<SnapshotInfo>>("getSnapshotInfo")
            .static_method::<fn() -> bool>("isEnabled");

        if decl.config().is_enabled(SNAPSHOT_UPLOAD) {
            decl.method::<fn(Lock, Vec<u8>)>("storeMemorySnapshot");
        }
    }
}

/// Entry point of the Python runtime API.
pub struct PythonRuntime;

impl Declared for PythonRuntime {
    const NAME: &'static str = "PythonRuntime";

    fn declare<C: BuildConfig>(decl: &mut Declaration<'_, '_, C>) {
        decl.context_js_bundle([
            BuiltinModule::new("pyodide-internal:snapshot", "export function restore(): void;"),
            BuiltinModule::new("pyodide-internal:setupPackages", "export const packages: string[];"),
        ])
        .nested::<PackagesTarReader>("PackagesTarReader")
        .nested::<PyodideMetadataReader>("PyodideMetadataReader")
        .readonly_instance_property::<ArtifactBundler>("artifacts")
        .lazy_js_readonly_instance_property("snapshot", "pyodide-internal:snapshot")
        .static_constant("SNAPSHOT_VERSION", 2)
        .ts_root()
        .ts_define("type PythonModuleName = string;");
    }
}

declared_types!(
    PackagesTarReader,
    PyodideMetadataReader,
    SnapshotInfo,
    ArtifactBundler,
    PythonRuntime,
);

/// One root type of the catalog.
#[derive(Debug)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub fully_qualified_name: fn() -> String,
    pub expand: fn(&mut Builder<FeatureFlags>) -> Rc<Structure>,
}

impl CatalogEntry {
    /// Match by simple or fully-qualified name.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || (self.fully_qualified_name)() == name
    }
}

fn expand<T: Declared>(builder: &mut Builder<FeatureFlags>) -> Rc<Structure> {
    builder.structure::<T>()
}

macro_rules! entry {
    ($ty:ty) => {
        CatalogEntry {
            name: <$ty as Declared>::NAME,
            fully_qualified_name: <$ty as Declared>::fully_qualified_name,
            expand: expand::<$ty>,
        }
    };
}

pub const CATALOG: &[CatalogEntry] = &[
    entry!(PythonRuntime),
    entry!(PackagesTarReader),
    entry!(PyodideMetadataReader),
    entry!(ArtifactBundler),
    entry!(SnapshotInfo),
];

/// Find a catalog root by simple or fully-qualified name.
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.matches(name))
}

/// Expand the given roots into `builder`'s symbol table.
pub fn reflect<'e>(
    builder: &mut Builder<FeatureFlags>,
    roots: impl IntoIterator<Item = &'e CatalogEntry>,
) {
    for entry in roots {
        log::info!("reflecting {}", entry.name);
        (entry.expand)(builder);
    }
}
