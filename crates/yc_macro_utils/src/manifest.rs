use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The facade package re-exporting every `yc_*` crate.
const FACADE_NAME: &str = "yconf";
/// Prefix of the member crates, stripped when going through the facade.
const MEMBER_PREFIX: &str = "yc_";

/// A parsed view of the invoking crate's `Cargo.toml`, used to emit paths
/// that resolve from the crate being expanded.
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A `yc_*` crate reached through the `yconf` facade resolves to
///    `::yconf::short_name` (e.g. `yc_reflect` -> `::yconf::reflect`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise the absolute path `::crate_name` is returned.
///
/// A crate referring to itself should declare `extern crate self as name;`
/// so that rule 4 also holds inside the crate and its doc tests.
///
/// # Example
///
/// ```rust
/// # use yc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("yc_reflect"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn load(path: &PathBuf) -> Self {
        let modified_time = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        let manifest = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            manifest,
            modified_time,
        }
    }

    fn parse_path(path: &str) -> Option<syn::Path> {
        syn::parse_str(path).ok()
    }

    fn absolute(name: &str) -> syn::Path {
        Self::parse_path(&format!("::{name}")).unwrap_or_else(|| {
            panic!("`{name}` is not a valid crate name");
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Self::parse_path(&format!("::{FACADE_NAME}::{module}"));
        }
        None
    }

    /// Returns the [`syn::Path`] under which the package `name` is reachable
    /// from the invoking crate. See the type-level documentation for the rules.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(name);
        };

        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::absolute(name)
    }

    /// Runs `func` with the [`Manifest`] of the invoking crate.
    ///
    /// Parsed manifests are cached per path and refreshed when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };

        let modified_time = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time.is_some()
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path);
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).ok(),
            modified_time: None,
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nyc_reflect = \"0.0.1\"\nyconf = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("yc_reflect")), "::yc_reflect");
    }

    #[test]
    fn facade_dependency_maps_to_module() {
        let m = manifest("[dev-dependencies]\nyconf = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("yc_reflect")), "::yconf::reflect");
    }

    #[test]
    fn unknown_falls_back_to_absolute() {
        let m = manifest("[dependencies]\nserde = \"1\"\n");
        assert_eq!(path_string(&m.get_crate_path("yc_reflect")), "::yc_reflect");
    }
}
