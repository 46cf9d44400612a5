//! Include resolution against real files.

use std::fs;
use std::path::Path;

use dscript::{CompileError, Compiler, FsLoader, Options, WarningKind, compile_file, stdlib};

fn write(dir: &Path, name: &str, source: &str) {
    fs::write(dir.join(name), source).unwrap();
}

fn compiler_in(dir: &Path) -> Compiler {
    Compiler::with_options(Options::new().seed("seed").loader(FsLoader::new(dir)))
}

#[test]
fn nested_includes_splice_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "inner.dscript", "c = 3");
    write(dir.path(), "outer.dscript", "b = 2\ninclude inner\nd = 4");
    write(dir.path(), "main.dscript", "a = 1\ninclude outer.dscript\ne = 5");

    let compiler = compile_file(dir.path().join("main.dscript")).unwrap();
    assert_eq!(compiler.notations(), vec!["a=1", "b=2", "c=3", "d=4", "e=5"]);
    let ids: Vec<&str> = compiler.state().entries().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["2", "3", "4", "5", "6"]);
}

#[test]
fn same_file_name_in_a_subdirectory_is_a_different_module() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(dir.path(), "circle.dscript", "include sub/circle\nr = 1");
    write(dir.path(), "sub/circle.dscript", "include ../unit\ns = 2");
    write(dir.path(), "unit.dscript", "u = 3");

    let compiler = compile_file(dir.path().join("circle.dscript")).unwrap();
    assert_eq!(compiler.notations(), vec!["u=3", "s=2", "r=1"]);
    assert!(compiler.warnings().is_empty());
}

#[test]
fn includes_resolve_next_to_the_including_script() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    write(dir.path(), "lib/a.dscript", "include b");
    write(dir.path(), "lib/b.dscript", "q = 2");
    write(dir.path(), "b.dscript", "wrong = 1");

    let mut compiler = compiler_in(dir.path());
    compiler.parse("include lib/a").unwrap();
    assert_eq!(compiler.notations(), vec!["q=2"]);
    assert!(compiler.warnings().is_empty());
}

#[test]
fn cycle_through_a_subdirectory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(dir.path(), "main.dscript", "include sub/circle");
    write(dir.path(), "sub/circle.dscript", "include ../main.dscript");

    let err = compile_file(dir.path().join("main.dscript")).unwrap_err();
    let CompileError::CircularInclude { name, trace, .. } = err else {
        panic!("expected a circular include");
    };
    assert_eq!(name, "../main.dscript");
    assert_eq!(
        trace.to_string(),
        "file main.dscript line 1\n  file sub/circle line 1\n    file ../main.dscript"
    );
}

#[test]
fn self_include_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "loop.dscript", "y = 1\ninclude loop");

    let err = compile_file(dir.path().join("loop.dscript")).unwrap_err();
    match err {
        CompileError::CircularInclude { name, trace, .. } => {
            assert_eq!(name, "loop");
            assert_eq!(trace.to_string(), "file loop.dscript line 2\n  file loop");
        }
        other => panic!("expected a circular include, got {other}"),
    }
}

#[test]
fn transitive_cycle_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.dscript", "include b");
    write(dir.path(), "b.dscript", "x = 1\ninclude c");
    write(dir.path(), "c.dscript", "include a.dscript");

    let err = compile_file(dir.path().join("a.dscript")).unwrap_err();
    let CompileError::CircularInclude { name, trace, .. } = err else {
        panic!("expected a circular include");
    };
    assert_eq!(name, "a.dscript");
    assert_eq!(
        trace.to_string(),
        "file a.dscript line 1\n  file b line 2\n    file c line 1\n      file a.dscript"
    );
}

#[test]
fn including_the_same_script_twice_is_not_a_cycle() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "lib.dscript", "f(x) = x");
    let mut compiler = compiler_in(dir.path());
    compiler.parse("include lib\ninclude lib clamp clamp").unwrap();

    let clamp = stdlib::lookup("clamp").unwrap()[0];
    assert_eq!(
        compiler.notations(),
        vec![r"f\left(x\right)=x", r"f\left(x\right)=x", clamp, clamp]
    );
    assert!(compiler.warnings().is_empty());
}

#[test]
fn missing_files_warn_and_compilation_continues() {
    let dir = tempfile::tempdir().unwrap();
    let mut compiler = compiler_in(dir.path());
    compiler.parse("include nowhere\ny = 1").unwrap();

    assert_eq!(compiler.notations(), vec!["y=1"]);
    let warning = &compiler.warnings()[0];
    assert_eq!(
        warning.kind,
        WarningKind::UnresolvedInclude {
            name: "nowhere".into()
        }
    );
    assert_eq!(warning.trace.current().unwrap().line, Some(1));
}

#[test]
fn warnings_inside_includes_carry_the_full_trace() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "styled.dscript", "y = 2\n\ncolor blue");
    let mut compiler = compiler_in(dir.path());
    compiler.parse("\" intro\ninclude styled").unwrap();

    let warning = &compiler.warnings()[0];
    assert!(matches!(warning.kind, WarningKind::InvalidColor { .. }));
    assert_eq!(
        warning.trace.to_string(),
        "file <root> line 2\n  file styled line 3"
    );
}

#[test]
fn quoted_names_may_contain_spaces() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "my shapes.dscript", "r = 2");
    let mut compiler = compiler_in(dir.path());
    compiler.parse("include \"my shapes\"").unwrap();
    assert_eq!(compiler.notations(), vec!["r=2"]);
}

#[test]
fn circular_include_renders_as_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "self.dscript", "include self");
    let err = compile_file(dir.path().join("self.dscript")).unwrap_err();

    let report = miette::Report::new(err);
    let rendered = format!("{report:?}");
    assert!(rendered.contains("dscript::include::circular"), "{rendered}");
}
