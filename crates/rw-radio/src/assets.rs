//! Runtime assets required by rendered radio lists.
//!
//! A document with at least one radio list needs the runtime script and
//! stylesheet. When bundling is enabled the transform copies them next to the
//! rendered output, then records them in the document's [`DocumentEnv`].
//!
//! The runtime files ship inside this crate (`assets/`) and are embedded via
//! `rust-embed`. A custom asset directory replaces them.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::TransformError;

/// Runtime files built into the crate.
#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
struct BuiltinAssets;

/// File name of the built-in runtime script.
pub const BUILTIN_SCRIPT: &str = "radio-extension.js";
/// File name of the built-in runtime stylesheet.
pub const BUILTIN_STYLE: &str = "radio-extension.css";

/// Get a built-in runtime file by name.
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[must_use]
pub fn builtin_asset(name: &str) -> Option<Cow<'static, [u8]>> {
    BuiltinAssets::get(name).map(|file| file.data)
}

/// Assets a document asks the host page to load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Script paths, in insertion order.
    pub script: Vec<String>,
    /// Stylesheet paths, in insertion order.
    pub style: Vec<String>,
}

/// Per-document side channel shared with the host pipeline.
///
/// Reuse one `DocumentEnv` for every pass over the same document; assets are
/// recorded and bundled once no matter how many passes need them.
#[derive(Clone, Debug, Default)]
pub struct DocumentEnv {
    /// Required assets, read by the host's page template.
    pub meta: DocumentMeta,
    /// Asset paths already copied for this document.
    pub bundled: HashSet<String>,
}

impl DocumentEnv {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the runtime script and stylesheet, skipping ones already present.
    pub fn require_runtime(&mut self, script: &str, style: &str) {
        push_unique(&mut self.meta.script, script);
        push_unique(&mut self.meta.style, style);
    }
}

fn push_unique(paths: &mut Vec<String>, path: &str) {
    if !paths.iter().any(|existing| existing == path) {
        paths.push(path.to_owned());
    }
}

/// One runtime file to bundle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RuntimeFile<'a> {
    /// Destination relative to the output root (e.g. `_assets/radio.js`).
    pub path: &'a str,
    /// Built-in file used when no asset directory is configured.
    pub builtin: &'static str,
}

/// Copy runtime files to `output`.
///
/// With an `assets_dir` the source of each file is the file of the same name
/// in that directory; without one it is the built-in file. Paths already in
/// `bundled` are skipped.
pub(crate) fn copy_runtime_files(
    assets_dir: Option<&Path>,
    output: &Path,
    files: &[RuntimeFile<'_>],
    bundled: &mut HashSet<String>,
) -> Result<(), TransformError> {
    for file in files {
        if bundled.contains(file.path) {
            continue;
        }
        let destination = output.join(file.path);
        match assets_dir {
            Some(dir) => {
                let file_name = Path::new(file.path).file_name().unwrap_or_default();
                let source = dir.join(file_name);
                if !source.is_file() {
                    return Err(TransformError::MissingAsset(source));
                }
                write_file(&destination, |dest| std::fs::copy(&source, dest).map(drop))?;
                tracing::debug!(
                    source = %source.display(),
                    destination = %destination.display(),
                    "Bundled runtime asset"
                );
            }
            None => {
                let data = builtin_asset(file.builtin)
                    .ok_or_else(|| TransformError::MissingAsset(PathBuf::from(file.builtin)))?;
                write_file(&destination, |dest| std::fs::write(dest, &data))?;
                tracing::debug!(
                    builtin = file.builtin,
                    destination = %destination.display(),
                    "Bundled built-in runtime asset"
                );
            }
        }
        bundled.insert(file.path.to_owned());
    }
    Ok(())
}

fn write_file(
    destination: &Path,
    write: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<(), TransformError> {
    let bundle_error = |source| TransformError::Bundle {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(bundle_error)?;
    }
    write(destination).map_err(bundle_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_require_runtime_once() {
        let mut env = DocumentEnv::new();
        env.require_runtime("_assets/radio.js", "_assets/radio.css");
        env.require_runtime("_assets/radio.js", "_assets/radio.css");

        assert_eq!(env.meta.script, vec!["_assets/radio.js".to_owned()]);
        assert_eq!(env.meta.style, vec!["_assets/radio.css".to_owned()]);
    }

    fn files<'a>(script: &'a str, style: &'a str) -> [RuntimeFile<'a>; 2] {
        [
            RuntimeFile {
                path: script,
                builtin: BUILTIN_SCRIPT,
            },
            RuntimeFile {
                path: style,
                builtin: BUILTIN_STYLE,
            },
        ]
    }

    #[test]
    fn test_copy_runtime_files() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("radio.js"), "js").unwrap();
        std::fs::write(assets.path().join("radio.css"), "css").unwrap();
        let mut bundled = HashSet::new();

        copy_runtime_files(
            Some(assets.path()),
            output.path(),
            &files("_assets/radio.js", "_assets/radio.css"),
            &mut bundled,
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(output.path().join("_assets/radio.js")).unwrap(),
            "js"
        );
        assert_eq!(
            std::fs::read_to_string(output.path().join("_assets/radio.css")).unwrap(),
            "css"
        );
        assert!(bundled.contains("_assets/radio.js"));
    }

    #[test]
    fn test_copy_skips_already_bundled() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let mut bundled = HashSet::from(["_assets/radio.js".to_owned()]);

        // Source is missing, but the path was already bundled.
        let [script, _] = files("_assets/radio.js", "_assets/radio.css");
        copy_runtime_files(Some(assets.path()), output.path(), &[script], &mut bundled).unwrap();

        assert!(!output.path().join("_assets/radio.js").exists());
    }

    #[test]
    fn test_copy_missing_asset() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let mut bundled = HashSet::new();

        let [script, _] = files("radio.js", "radio.css");
        let err = copy_runtime_files(Some(assets.path()), output.path(), &[script], &mut bundled)
            .unwrap_err();

        assert!(matches!(err, TransformError::MissingAsset(path) if path.ends_with("radio.js")));
        assert!(bundled.is_empty());
    }

    #[test]
    fn test_copy_builtin_runtime() {
        let output = tempfile::tempdir().unwrap();
        let mut bundled = HashSet::new();

        // Custom destination names still get the built-in contents.
        copy_runtime_files(
            None,
            output.path(),
            &files("static/tabs.js", "static/tabs.css"),
            &mut bundled,
        )
        .unwrap();

        let script = std::fs::read(output.path().join("static/tabs.js")).unwrap();
        let style = std::fs::read(output.path().join("static/tabs.css")).unwrap();
        assert_eq!(Some(script), builtin_asset(BUILTIN_SCRIPT).map(Cow::into_owned));
        assert_eq!(Some(style), builtin_asset(BUILTIN_STYLE).map(Cow::into_owned));
        assert_eq!(bundled.len(), 2);
    }

    #[test]
    fn test_builtin_runtime_uses_markup_contract() {
        let script = builtin_asset(BUILTIN_SCRIPT).unwrap();
        let script = std::str::from_utf8(&script).unwrap();
        for name in [
            rw_radio_common::CONTAINER_CLASS,
            rw_radio_common::HEADER_LIST_CLASS,
            rw_radio_common::HEADER_CLASS,
            rw_radio_common::PANEL_CLASS,
            rw_radio_common::GROUP_ATTR,
            rw_radio_common::KEY_ATTR,
            rw_radio_common::ID_ATTR,
            rw_radio_common::ACTIVE_ATTR,
            rw_radio_common::GLOBAL_NAME,
        ] {
            assert!(script.contains(name), "runtime script does not use {name}");
        }

        let style = builtin_asset(BUILTIN_STYLE).unwrap();
        let style = std::str::from_utf8(&style).unwrap();
        assert!(style.contains(".rw-radio-panel.active"));
    }
}
