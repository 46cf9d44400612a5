//! Module resolver: turns `include NAME` into notation lines.
//!
//! Standard library modules win over scripts of the same name. Anything else
//! is read through a [`ScriptLoader`] and compiled by a child compiler whose
//! expressions are spliced into the includer. Styling inside the included
//! script (colors, folders, sliders) does not carry over.
//!
//! Names are relative to the including script: `include b` inside `lib/a`
//! loads `lib/b`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::callstack::module_key;
use crate::compiler::Compiler;
use crate::defaults;
use crate::errors::CompileError;
use crate::log::debug;
use crate::stdlib;

/// Source of included scripts.
pub trait ScriptLoader {
    /// Read the script at `path`, relative to the root of the script tree.
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Reads scripts relative to a base directory, trying `NAME` and then
/// `NAME.dscript`.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, path: &Path) -> [PathBuf; 2] {
        let exact = self.root.join(path);
        let mut with_extension = exact.clone().into_os_string();
        with_extension.push(".");
        with_extension.push(defaults::SCRIPT_EXTENSION);
        [exact, PathBuf::from(with_extension)]
    }
}

impl ScriptLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        for file in self.candidates(path) {
            if file.is_file() {
                debug!(file = %file.display(), "loading include");
                return std::fs::read_to_string(&file);
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "no script `{}` under {}",
                path.display(),
                self.root.display()
            ),
        ))
    }
}

/// Scripts held in memory, keyed by path. `lib/util` and `lib/util.dscript`
/// name the same script.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    scripts: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.scripts.insert(name.into(), source.into());
    }
}

impl ScriptLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        let key = module_key(path);
        self.scripts
            .iter()
            .find(|(name, _)| module_key(Path::new(name.as_str())) == key)
            .map(|(_, source)| source.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, key))
    }
}

/// Notation lines for `include name`, or `None` when nothing by that name
/// could be found.
///
/// Including a script that is already being compiled further up the stack is
/// fatal.
pub(crate) fn resolve(
    compiler: &mut Compiler,
    name: &str,
) -> Result<Option<Vec<String>>, CompileError> {
    if let Some(fragments) = stdlib::lookup(name) {
        debug!(name, "including standard library module");
        return Ok(Some(fragments.iter().map(|f| f.to_string()).collect()));
    }

    let path = compiler.module_path(name);
    if compiler.call_stack().contains_module(&path) {
        return Err(compiler.circular_include(name, &path));
    }

    let source = match compiler.loader().load(&path) {
        Ok(source) => source,
        Err(err) => {
            debug!(name, %err, "include not found");
            let _ = err;
            return Ok(None);
        }
    };

    let mut child = compiler.child(name, &path);
    child.parse(&source)?;
    let notations = child.notations();
    compiler.adopt_warnings(child);
    Ok(Some(notations))
}
