use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use pollwatch::{EventKind, Watcher};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

fn counting_action() -> (
    Arc<AtomicUsize>,
    impl FnMut() -> anyhow::Result<()> + Send + 'static,
) {
    let fired = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&fired);
    (fired, move || {
        handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

fn touch(path: &Path, contents: &str) -> std::io::Result<()> {
    sleep(Duration::from_millis(50));
    fs::write(path, contents)
}

#[test]
fn new_file_is_picked_up_as_first_sight() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("existing.txt"), "old")?;

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .folder(dir.path())?
        .on(EventKind::Modified)
        .check_period(Duration::ZERO)
        .run(action)?;

    watcher.run_pending()?;
    assert_eq!(
        fired.load(Ordering::SeqCst),
        0,
        "files present at registration are baselined"
    );

    // A brand-new file has no baseline and counts as modified on sight.
    fs::write(dir.path().join("fresh.txt"), "new")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn file_inside_new_subdirectory_is_picked_up() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("existing.txt"), "old")?;

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .folder(dir.path())?
        .on(EventKind::Modified)
        .check_period(Duration::ZERO)
        .run(action)?;

    watcher.run_pending()?;

    let sub = dir.path().join("nested").join("deeper");
    fs::create_dir_all(&sub)?;
    fs::write(sub.join("late.txt"), "hello")?;

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn modifying_an_existing_file_fires() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("notes.txt");
    fs::write(&file, "v1")?;

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .folder(dir.path())?
        .on(EventKind::Modified)
        .check_period(Duration::ZERO)
        .run(action)?;

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    touch(&file, "v2")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn deleted_file_is_dropped_from_the_walk() -> TestResult {
    let dir = TempDir::new()?;
    let doomed = dir.path().join("doomed.txt");
    let keep = dir.path().join("keep.txt");
    fs::write(&doomed, "bye")?;
    fs::write(&keep, "hi")?;

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .folder(dir.path())?
        .on(EventKind::Modified)
        .check_period(Duration::ZERO)
        .run(action)?;

    watcher.run_pending()?;

    fs::remove_file(&doomed)?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 0, "deletion alone is not a modification");

    touch(&keep, "hi again")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}
