use std::{
    fs,
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};
use tanuki_config::{scss, watch};
use tanuki_scss_compiler::{watch::WatchHandle, Compiler, Error};
use tempfile::TempDir;

const WATCH_CONFIG: watch::Configuration = watch::Configuration { debounce_ms: 100 };
const SETTLE: Duration = Duration::from_millis(300);
const EVENT_TIMEOUT: Duration = Duration::from_secs(10);
const QUIET_TIMEOUT: Duration = Duration::from_millis(1500);

fn wait_for_output(path: &Path, needle: &str) -> String {
    let deadline = Instant::now() + EVENT_TIMEOUT;
    let mut css = String::new();
    while !css.contains(needle) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(50));
        css = fs::read_to_string(path).unwrap_or_default();
    }
    css
}

fn project() -> (TempDir, scss::Configuration) {
    let dir = TempDir::new().unwrap();
    let source_dir = dir.path().join("sass");
    fs::create_dir(&source_dir).unwrap();
    fs::write(source_dir.join("main.scss"), "a { color: red; }").unwrap();

    let config = scss::Configuration {
        source_dir,
        output_dir: dir.path().join("static"),
        ..scss::Configuration::default()
    };

    (dir, config)
}

fn start_watching(config: &scss::Configuration) -> WatchHandle {
    let compiler = Compiler::new(config).unwrap();
    let handle = WatchHandle::new(&WATCH_CONFIG, compiler.sources()).unwrap();
    thread::sleep(SETTLE);
    handle
}

#[test]
fn modifying_a_source_triggers_one_change() {
    let (_dir, config) = project();
    let handle = start_watching(&config);

    fs::write(config.source_dir.join("main.scss"), "a { color: blue; }").unwrap();

    let changed = handle.next_change(Some(EVENT_TIMEOUT)).unwrap().unwrap();
    assert_eq!(changed.len(), 1);
    assert!(changed[0].ends_with("main.scss"));

    assert_eq!(handle.next_change(Some(QUIET_TIMEOUT)).unwrap(), None);
}

#[test]
fn unrelated_files_are_ignored() {
    let (_dir, config) = project();
    let handle = start_watching(&config);

    fs::write(config.source_dir.join("notes.txt"), "hello").unwrap();

    assert_eq!(handle.next_change(Some(QUIET_TIMEOUT)).unwrap(), None);
}

#[test]
fn partial_changes_are_picked_up() {
    let (_dir, config) = project();
    let handle = start_watching(&config);

    fs::write(config.source_dir.join("_variables.scss"), "$x: 1px;").unwrap();

    let changed = handle.next_change(Some(EVENT_TIMEOUT)).unwrap().unwrap();
    assert!(changed[0].ends_with("_variables.scss"));
}

#[test]
fn queued_changes_are_coalesced() {
    let (_dir, config) = project();
    let handle = start_watching(&config);

    fs::write(config.source_dir.join("main.scss"), "a { color: blue; }").unwrap();
    fs::write(config.source_dir.join("other.scss"), "b { color: blue; }").unwrap();
    thread::sleep(Duration::from_millis(800));

    let changed = handle.next_change(Some(EVENT_TIMEOUT)).unwrap().unwrap();
    let names: Vec<_> = changed
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["main.scss", "other.scss"]);

    assert_eq!(handle.next_change(Some(QUIET_TIMEOUT)).unwrap(), None);
}

#[test]
fn missing_source_dir_is_fatal() {
    let (dir, config) = project();
    let config = scss::Configuration {
        source_dir: dir.path().join("gone"),
        ..config
    };
    let compiler = Compiler::new(&config).unwrap();

    assert!(matches!(
        WatchHandle::new(&WATCH_CONFIG, compiler.sources()),
        Err(Error::MissingSourceDir(..))
    ));
}

#[test]
fn run_rebuilds_on_change() {
    let (_dir, config) = project();
    let output: PathBuf = config.output_dir.join("main.css");
    let source = config.source_dir.join("main.scss");

    let (ready_tx, ready_rx) = mpsc::channel();
    thread::spawn(move || {
        let compiler = Compiler::new(&config).unwrap();
        let handle = WatchHandle::new(&WATCH_CONFIG, compiler.sources()).unwrap();
        ready_tx.send(()).unwrap();
        handle.run(&compiler)
    });

    ready_rx.recv_timeout(EVENT_TIMEOUT).unwrap();
    thread::sleep(SETTLE);
    assert!(!output.exists());

    fs::write(&source, ".changed { color: blue; }").unwrap();

    let css = wait_for_output(&output, ".changed");
    assert!(css.contains(".changed"), "{css}");
}

#[test]
fn run_keeps_going_after_a_broken_stylesheet() {
    let (_dir, config) = project();
    let output_dir = config.output_dir.clone();
    let source_dir = config.source_dir.clone();

    let (ready_tx, ready_rx) = mpsc::channel();
    thread::spawn(move || {
        let compiler = Compiler::new(&config).unwrap();
        let handle = WatchHandle::new(&WATCH_CONFIG, compiler.sources()).unwrap();
        ready_tx.send(()).unwrap();
        handle.run(&compiler)
    });

    ready_rx.recv_timeout(EVENT_TIMEOUT).unwrap();
    thread::sleep(SETTLE);

    fs::write(source_dir.join("main.scss"), ".broken { color: $missing; }").unwrap();
    thread::sleep(QUIET_TIMEOUT);
    assert!(!output_dir.join("main.css").exists());

    fs::write(source_dir.join("other.scss"), ".recovered { color: blue; }").unwrap();

    let css = wait_for_output(&output_dir.join("other.css"), ".recovered");
    assert!(css.contains(".recovered"), "{css}");
}
