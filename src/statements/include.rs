//! `include NAME...`
//!
//! Names are separated by whitespace; a name containing spaces can be quoted
//! with `"` or `'`.

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::errors::{CompileError, WarningKind};
use crate::resolve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeStatement;

impl Statement for IncludeStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "include").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let Some(names) = split_names(keyword_args(line, "include").unwrap_or_default()) else {
            compiler.warn(WarningKind::UnterminatedQuote {
                statement: line.to_string(),
            });
            return Ok(());
        };
        if names.is_empty() {
            compiler.warn(WarningKind::MissingIncludeName);
            return Ok(());
        }

        for name in names {
            match resolve::resolve(compiler, &name)? {
                Some(notations) => {
                    for latex in notations {
                        compiler.state_mut().add_expression(latex);
                    }
                }
                None => compiler.warn(WarningKind::UnresolvedInclude { name }),
            }
        }
        Ok(())
    }
}

/// Split on whitespace, keeping quoted runs together. `None` if a quote is
/// left open.
fn split_names(args: &str) -> Option<Vec<String>> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in args.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    names.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return None;
    }
    if in_word {
        names.push(current);
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Options;
    use crate::resolve::MemoryLoader;
    use crate::stdlib;
    use crate::tests::compile_ok;

    #[test]
    fn names_split_like_a_shell() {
        assert_eq!(split_names("a b"), Some(vec!["a".into(), "b".into()]));
        assert_eq!(
            split_names(r#""my lib" 'other one'.dscript"#),
            Some(vec!["my lib".into(), "other one.dscript".into()])
        );
        assert_eq!(split_names(""), Some(vec![]));
        assert_eq!(split_names("\"\""), Some(vec![String::new()]));
        assert_eq!(split_names("\"open"), None);
    }

    #[test]
    fn stdlib_modules_are_spliced_in_order() {
        let c = compile_ok("include vec clamp\ny = 1");
        let mut expected: Vec<String> = stdlib::lookup("vec")
            .unwrap()
            .iter()
            .chain(stdlib::lookup("clamp").unwrap())
            .map(|s| s.to_string())
            .collect();
        expected.push("y=1".into());
        assert_eq!(c.notations(), expected);
    }

    #[test]
    fn included_expressions_take_the_includers_style() {
        let loader = MemoryLoader::new().with("lib", "color #ff0000\nfolder Inner\ng(x) = 2x");
        let mut c = Compiler::with_options(Options::new().seed("s").loader(loader));
        c.parse("color #00ff00\nfolder Outer\ninclude lib").unwrap();
        let entries = c.state().entries();
        assert_eq!(entries.len(), 2);
        let expr = entries[1].as_expression().unwrap();
        assert_eq!(expr.latex, r"g\left(x\right)=2x");
        assert_eq!(expr.color.to_string(), "#00ff00");
        assert_eq!(expr.folder_id.as_deref(), Some("2"));
    }

    #[test]
    fn bad_includes_warn() {
        let c = compile_ok("include\ninclude \"unterminated\ninclude missing");
        let kinds: Vec<_> = c.warnings().iter().map(|w| w.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                WarningKind::MissingIncludeName,
                WarningKind::UnterminatedQuote {
                    statement: "include \"unterminated".into()
                },
                WarningKind::UnresolvedInclude {
                    name: "missing".into()
                },
            ]
        );
    }
}
