use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn create_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

fn rg_available() -> bool {
    std::process::Command::new("rg")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[cfg(unix)]
fn fake_tool(dir: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-rg");
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A freshly written script can briefly fail with ETXTBSY while another test
/// thread is forking.
fn run_search(
    rt: &tokio::runtime::Runtime,
    executor: &SearchExecutor,
    term: &str,
    root: &Path,
) -> Result<Vec<SearchMatch>> {
    for _ in 0..20 {
        match rt.block_on(executor.search(term, root)) {
            Err(SearchError::Spawn { source, .. }) if source.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(20));
            }
            other => return other,
        }
    }
    rt.block_on(executor.search(term, root))
}

#[test]
fn short_term_spawns_nothing() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let executor = SearchExecutor::new("/definitely/not/a/tool", SearchLimits::default());

    for term in ["", "a", "ab"] {
        let result = rt.block_on(executor.search(term, dir.path())).unwrap();
        assert!(result.is_empty());
    }
}

#[test]
fn missing_tool_is_spawn_error_with_command_line() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let executor = SearchExecutor::new("/definitely/not/a/tool", SearchLimits::default());

    match rt.block_on(executor.search("needle", dir.path())) {
        Err(SearchError::Spawn { command, .. }) => {
            assert_eq!(
                command,
                "/definitely/not/a/tool -F --vimgrep --ignore-case -e needle ."
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn parses_tool_output_in_order() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "printf './b.ts:2:1:second\\n./a.ts:3:7:  const foo = 1;\\nnot a match\\n'",
    );
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    let matches = run_search(&rt, &executor, "foo", dir.path()).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].label, "b.ts:2");
    assert_eq!(matches[1].label, "a.ts:3");
    assert_eq!(matches[1].description, "const foo = 1;");
    assert_eq!(matches[1].file_path, dir.path().join("a.ts"));
}

#[cfg(unix)]
#[test]
fn exit_one_is_empty_success() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(dir.path(), "exit 1");
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    let matches = run_search(&rt, &executor, "nothing", dir.path()).unwrap();
    assert!(matches.is_empty());
}

#[cfg(unix)]
#[test]
fn exit_two_reports_stderr() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(dir.path(), "echo 'regex parse error' >&2\nexit 2");
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    match run_search(&rt, &executor, "broken", dir.path()) {
        Err(SearchError::Exit {
            stderr, command, ..
        }) => {
            assert_eq!(stderr, "regex parse error");
            assert!(command.ends_with("-F --vimgrep --ignore-case -e broken ."));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn runs_in_workspace_root_with_literal_arguments() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "printf './args.txt:1:1:%s|%s|%s|%s|%s|%s|%s\\n' \"$1\" \"$2\" \"$3\" \"$4\" \"$5\" \"$6\" \"$(pwd -P)\"",
    );
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    let matches = run_search(&rt, &executor, "a b; $(x)", dir.path()).unwrap();
    let cwd = dir.path().canonicalize().unwrap();
    assert_eq!(
        matches[0].description,
        format!("-F|--vimgrep|--ignore-case|-e|a b; $(x)|.|{}", cwd.display())
    );
}

#[cfg(unix)]
#[test]
fn dash_leading_term_is_passed_as_a_pattern() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "printf './args.txt:1:1:%s' \"$1\"; shift; for a in \"$@\"; do printf '|%s' \"$a\"; done; echo",
    );
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    for term in ["--verbose", "-> Result", "--pre=touch"] {
        let matches = run_search(&rt, &executor, term, dir.path()).unwrap();
        assert_eq!(
            matches[0].description,
            format!("-F|--vimgrep|--ignore-case|-e|{term}|.")
        );
    }
    assert_eq!(
        executor.command_line("--files"),
        format!("{} -F --vimgrep --ignore-case -e --files .", tool.to_string_lossy())
    );
}

#[cfg(unix)]
#[test]
fn broad_search_is_capped_and_process_killed() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "i=0\nwhile true; do i=$((i+1)); echo \"./f$((i % 50)).txt:$i:1:hit\"; done",
    );
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    let matches = run_search(&rt, &executor, "hit", dir.path()).unwrap();
    assert_eq!(matches.len(), 500);
}

#[cfg(unix)]
#[test]
fn per_file_cap_applies_to_tool_output() {
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "i=0\nwhile [ $i -lt 150 ]; do i=$((i+1)); echo \"./one.txt:$i:1:hit\"; done\necho './two.txt:1:1:hit'",
    );
    let executor = SearchExecutor::new(tool.to_string_lossy(), SearchLimits::default());

    let matches = run_search(&rt, &executor, "hit", dir.path()).unwrap();
    assert_eq!(matches.len(), 101);
    assert_eq!(matches[100].label, "two.txt:1");
}

#[test]
fn real_ripgrep_finds_literal_matches() {
    if !rg_available() {
        return;
    }
    let rt = create_runtime();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "let x = 0;\n\nconst foo = 1;\n").unwrap();
    fs::write(dir.path().join("b.txt"), "nothing here\n").unwrap();

    let executor = SearchExecutor::new("rg", SearchLimits::default());
    let matches = rt.block_on(executor.search("FOO", dir.path())).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].label, "a.ts:3");
    assert_eq!(matches[0].description, "const foo = 1;");
    assert_eq!(matches[0].line, 3);

    let none = rt.block_on(executor.search("zzzqqq", dir.path())).unwrap();
    assert!(none.is_empty());

    fs::write(dir.path().join("c.rs"), "fn f() -> Result<()> {}
").unwrap();
    let arrow = rt.block_on(executor.search("-> result", dir.path())).unwrap();
    assert_eq!(arrow.len(), 1);
    assert_eq!(arrow[0].label, "c.rs:1");
}
