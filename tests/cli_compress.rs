//! `treemirror compress` against real directories

mod common;

use std::fs;
use std::time::{Duration, SystemTime};

use common::TestEnv;

#[test]
fn compress_copies_accepted_files_into_mirrored_layout() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");
    env.write_source("trip/day1/b.JPG", b"bbbbbbbb");
    env.write_source("notes.txt", b"not an image");
    env.write_source(".hidden/c.png", b"hidden");
    env.write_source("@eaDir/d.png", b"synology");

    let source = env.source();
    let dest = env.dest();
    let result = env.run(&["compress", source.to_str().unwrap(), dest.to_str().unwrap()]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(fs::read(env.dest_path("a.png")).unwrap(), b"aaaa");
    assert_eq!(
        fs::read(env.dest_path("trip/day1/b.JPG")).unwrap(),
        b"bbbbbbbb"
    );
    assert!(!env.dest_path("notes.txt").exists());
    assert!(!env.dest_path(".hidden").exists());
    assert!(!env.dest_path("@eaDir").exists());
    assert!(result.stdout.contains("Compress: 2 processed, 0 skipped"));
}

#[test]
fn compress_json_emits_ndjson_events() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");

    let source = env.source();
    let dest = env.dest();
    let result = env.run(&[
        "--json",
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    let events = result.events();
    assert!(events.iter().all(|e| e["command"] == "compress"));

    let processed: Vec<_> = events.iter().filter(|e| e["event"] == "processed").collect();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0]["source_bytes"], 4);
    assert_eq!(processed[0]["output_bytes"], 4);

    let last = events.last().unwrap();
    assert_eq!(last["event"], "compress_complete");
    assert_eq!(last["processed"], 1);
    assert_eq!(last["failed"], 0);
}

#[test]
fn second_run_skips_up_to_date_outputs_unless_forced() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");
    let source = env.source();
    let dest = env.dest();
    let args = ["--json", "compress", source.to_str().unwrap(), dest.to_str().unwrap()];

    assert!(env.run(&args).success);

    let second = env.run(&args);
    let last = second.events().pop().unwrap();
    assert_eq!(last["processed"], 0);
    assert_eq!(last["skipped"], 1);

    let mut forced = args.to_vec();
    forced.push("--force");
    let third = env.run(&forced);
    assert_eq!(third.events().pop().unwrap()["processed"], 1);
}

#[test]
fn window_excludes_files_modified_outside_it() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");
    let source = env.source();
    let dest = env.dest();

    let result = env.run(&[
        "--json",
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
        "--before",
        "2000-01-01T00:00:00Z",
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    let events = result.events();
    assert!(events
        .iter()
        .any(|e| e["event"] == "skipped" && e["reason"] == "outside_window"));
    assert!(!env.dest_path("a.png").exists());
}

#[test]
fn window_includes_recent_files() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");
    let source = env.source();
    let dest = env.dest();
    let an_hour_ago = chrono::DateTime::<chrono::Utc>::from(
        SystemTime::now() - Duration::from_secs(3600),
    )
    .to_rfc3339();

    let result = env.run(&[
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
        "--after",
        &an_hour_ago,
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert!(env.dest_path("a.png").exists());
}

#[test]
fn missing_source_fails() {
    let env = TestEnv::new();
    let missing = env.root.path().join("nope");
    let dest = env.dest();

    let result = env.run(&["compress", missing.to_str().unwrap(), dest.to_str().unwrap()]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("directory not found"));
    assert!(!dest.exists());
}

#[test]
fn destination_inside_source_is_refused() {
    let env = TestEnv::new();
    let source = env.source();
    let dest = env.source_path("out");

    let result = env.run(&["compress", source.to_str().unwrap(), dest.to_str().unwrap()]);

    assert!(!result.success);
    assert!(result.stderr.contains("is inside source"));
    assert!(!dest.exists());
}

#[test]
fn unknown_config_key_is_reported_as_warning() {
    let env = TestEnv::new();
    env.write_config("[watch]\ndebounce_sec = 3\n");
    let source = env.source();
    let dest = env.dest();

    let result = env.run(&[
        "--json",
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    let warning = result
        .events()
        .into_iter()
        .find(|e| e["event"] == "config_warning")
        .expect("config_warning event");
    assert_eq!(warning["key"], "debounce_sec");
    assert_eq!(warning["suggestion"], "debounce_secs");
}

#[test]
fn invalid_config_value_is_an_error() {
    let env = TestEnv::new();
    env.write_config("[watch]\nbatch_size = 0\n");
    let source = env.source();
    let dest = env.dest();

    let result = env.run(&["compress", source.to_str().unwrap(), dest.to_str().unwrap()]);

    assert!(!result.success);
    assert!(result.stderr.contains("batch_size"));
}

#[cfg(unix)]
#[test]
fn failing_exec_command_sets_exit_code() {
    let env = TestEnv::new();
    env.write_source("a.png", b"aaaa");
    let source = env.source();
    let dest = env.dest();

    let result = env.run(&[
        "--json",
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
        "--exec",
        "false",
    ]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    let events = result.events();
    assert!(events.iter().any(|e| e["event"] == "transform_failed"));
    assert_eq!(events.last().unwrap()["failed"], 1);
}

#[cfg(unix)]
#[test]
fn exec_command_receives_placeholders() {
    let env = TestEnv::new();
    env.write_source("trip/a.png", b"aaaa");
    let source = env.source();
    let dest = env.dest();

    let result = env.run(&[
        "compress",
        source.to_str().unwrap(),
        dest.to_str().unwrap(),
        "--exec",
        "cp",
        "{input}",
        "{output_dir}",
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(fs::read(env.dest_path("trip/a.png")).unwrap(), b"aaaa");
}
