//! Call stack of script compilations, used for include-cycle detection and
//! diagnostic traces.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::defaults::SCRIPT_EXTENSION;

/// One compilation on the stack: the script name as written, its module key
/// and the line being compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub key: String,
    pub line: Option<usize>,
}

/// Ordered frames, outermost first.
///
/// Child compilers get a copy with their own frame appended, never a shared
/// reference, so a child can update its line numbers without touching the
/// parent's trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    /// A stack holding a single root frame.
    pub fn root(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            frames: vec![Frame {
                key: module_key(Path::new(&name)),
                name,
                line: None,
            }],
        }
    }

    /// Copy of this stack with a fresh frame for `name` on top. `name` is
    /// also taken as the module's path.
    pub fn child(&self, name: &str) -> Self {
        self.child_at(name, Path::new(name))
    }

    /// Copy of this stack with a frame for `name`, a module found at `path`.
    pub fn child_at(&self, name: impl Into<String>, path: &Path) -> Self {
        let mut frames = self.frames.clone();
        frames.push(Frame {
            name: name.into(),
            key: module_key(path),
            line: None,
        });
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Record the line the innermost frame is compiling.
    pub fn set_line(&mut self, line: usize) {
        if let Some(frame) = self.frames.last_mut() {
            frame.line = Some(line);
        }
    }

    /// Whether the module at `path` is already being compiled.
    pub fn contains_module(&self, path: &Path) -> bool {
        let key = module_key(path);
        self.frames.iter().any(|f| f.key == key)
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if at_normal {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Name used to compare scripts: the normalized path with `/` separators and
/// the script extension dropped, so `lib`, `lib.dscript` and `./lib.dscript`
/// are one module while `sub/lib` is another.
pub fn module_key(path: &Path) -> String {
    let mut path = normalize(path);
    if path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION) {
        path.set_extension("");
    }
    let parts: Vec<_> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    parts.join("/").replace("//", "/")
}

impl fmt::Display for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, frame) in self.frames.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            write!(f, "{:indent$}file {}", "", frame.name, indent = depth * 2)?;
            if let Some(line) = frame.line {
                write!(f, " line {line}")?;
            }
        }
        Ok(())
    }
}
