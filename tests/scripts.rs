// Copyright (C) 2024 Bellande Architecture Mechanism Research Innovation Center, Ronaldson Bellande

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use scriptor::{Executor, RuntimeState, ScriptError};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn run(dir: &TempDir, script: &str) -> (Result<(), ScriptError>, RuntimeState, String) {
    let path = dir.path().join("job.script");
    fs::write(&path, script).unwrap();
    let state = RuntimeState::with_dirs(dir.path(), Some("/home/tester".to_string()));
    let mut executor = Executor::new(state, Vec::new());
    let result = executor.run_script(&path);
    let (state, out) = executor.into_parts();
    (result, state, String::from_utf8(out).unwrap())
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").unwrap();
}

#[test]
fn comment_only_script_does_nothing() {
    let dir = tempdir().unwrap();
    let (result, _, out) = run(&dir, "# nothing here\n\n# create x.txt\n");
    result.unwrap();
    assert!(out.is_empty());
    assert!(!dir.path().join("x.txt").exists());
}

#[test]
fn unknown_operation_on_last_line_blocks_earlier_lines() {
    let dir = tempdir().unwrap();
    let (result, _, out) = run(&dir, "create made.txt\nmkdir made_dir\nlaunch rockets\n");
    let err = result.unwrap_err();
    assert!(matches!(err, ScriptError::UnknownOperation { line: 3, .. }));
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("launch"));
    assert!(out.is_empty());
    assert!(!dir.path().join("made.txt").exists());
    assert!(!dir.path().join("made_dir").exists());
}

#[test]
fn arity_error_blocks_execution() {
    let dir = tempdir().unwrap();
    let (result, _, _) = run(&dir, "create made.txt\nwrite only_path.txt\n");
    assert!(matches!(
        result.unwrap_err(),
        ScriptError::Arity {
            line: 2,
            required: 2,
            supplied: 1,
            ..
        }
    ));
    assert!(!dir.path().join("made.txt").exists());
}

#[test]
fn undefined_variable_echoes_empty() {
    let dir = tempdir().unwrap();
    let (result, _, out) = run(&dir, "echo $never_set\n");
    result.unwrap();
    assert_eq!(out, "\n\n");
}

#[test]
fn write_read_echo_pipeline() {
    let dir = tempdir().unwrap();
    let (result, state, out) = run(&dir, "write a.txt \"x\"\nread a.txt $v\necho $v\n");
    result.unwrap();
    assert_eq!(state.variable("v"), Some("x"));
    assert_eq!(out, "\n\nx\n\n");
}

#[test]
fn variables_feed_paths() {
    let dir = tempdir().unwrap();
    let (result, _, _) = run(
        &dir,
        "set folder \"reports\"\nmkdir $folder\ncd $folder\nwrite summary.txt \"done\"\n",
    );
    result.unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("reports").join("summary.txt")).unwrap(),
        "done"
    );
}

#[test]
fn failure_midway_keeps_earlier_side_effects() {
    let dir = tempdir().unwrap();
    let (result, _, _) = run(&dir, "create foo.txt\nwrite foo.txt \"kept\"\ncreate foo.txt\ncreate never.txt\n");
    let err = result.unwrap_err();
    assert!(!err.is_parse_error());
    assert!(matches!(err, ScriptError::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(dir.path().join("foo.txt")).unwrap(), "kept");
    assert!(!dir.path().join("never.txt").exists());
}

#[test]
fn missing_script_is_not_found() {
    let dir = tempdir().unwrap();
    let mut executor = Executor::new(RuntimeState::with_dirs(dir.path(), None), Vec::new());
    assert!(matches!(
        executor.run_script(&dir.path().join("nope.script")),
        Err(ScriptError::NotFound { .. })
    ));
}

#[cfg(unix)]
#[test]
fn find_then_each_echoes_every_match_in_order() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    touch(dir.path(), "a.txt");
    touch(dir.path(), "b.TXT");
    touch(&dir.path().join("docs"), "c.txt");
    touch(dir.path(), "skip.md");

    let (result, state, out) = run(&dir, "find *.txt []results\neach []results \"echo $$\"\n");
    result.unwrap();

    let results = state.group("results").to_vec();
    assert_eq!(results.len(), 3);
    let echoed: Vec<&str> = out.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(echoed, results.iter().map(String::as_str).collect::<Vec<_>>());
}

#[cfg(unix)]
#[test]
fn exec_capture_and_home_expansion() {
    let dir = tempdir().unwrap();
    let (result, state, _) = run(&dir, "exec \"echo ~/bin\" $where\n");
    result.unwrap();
    assert_eq!(state.variable("where"), Some("/home/tester/bin\n"));
}
