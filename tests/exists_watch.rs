use std::error::Error;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pollwatch::{EventKind, Quantifier, Watcher};
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

#[test]
fn all_of_waits_for_every_file_to_be_nonempty() -> TestResult {
    let dir = TempDir::new()?;
    let f1 = dir.path().join("f1.txt");
    let f2 = dir.path().join("f2.txt");
    fs::write(&f1, "")?;
    fs::write(&f2, "")?;
    let marker = dir.path().join("breadcrumb.txt");

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .files([f1.clone(), f2.clone()], Quantifier::AllOf)
        .on(EventKind::Exists)
        .check_period(Duration::ZERO)
        .breadcrumb(&marker)
        .run(action)?;

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 0, "both files are empty");

    fs::write(&f1, "content")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 0, "f2 is still empty");

    fs::write(&f2, "content")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(marker.exists(), "breadcrumb written on first fire");

    // Spent: the marker suppresses every later evaluation.
    watcher.run_pending()?;
    watcher.run_pending()?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn deleting_the_breadcrumb_rearms_the_job() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("ready.txt");
    fs::write(&file, "done")?;
    let marker = dir.path().join("breadcrumb.txt");

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .files([file.clone()], Quantifier::OneOf)
        .on(EventKind::Exists)
        .check_period(Duration::ZERO)
        .breadcrumb(&marker)
        .run(action)?;

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    fs::remove_file(&marker)?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    Ok(())
}

#[test]
fn vanished_path_stays_tracked_until_it_appears() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("not-yet.txt");
    let marker = dir.path().join("breadcrumb.txt");

    let mut watcher = Watcher::new();
    let (fired, action) = counting_action();
    watcher
        .watch()
        .files([file.clone()], Quantifier::OneOf)
        .on(EventKind::Exists)
        .check_period(Duration::ZERO)
        .breadcrumb(&marker)
        .run(action)?;

    // Absence is a valid state, not an error, and must not prune the path.
    watcher.run_pending()?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    fs::write(&file, "here now")?;
    watcher.run_pending()?;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn breadcrumb_line_mentions_label_and_lag() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("ready.txt");
    fs::write(&file, "done")?;
    let marker = dir.path().join("nested").join("breadcrumb.txt");

    let mut watcher = Watcher::new();
    let (_fired, action) = counting_action();
    watcher
        .watch()
        .files([file.clone()], Quantifier::OneOf)
        .on(EventKind::Exists)
        .check_period(Duration::ZERO)
        .breadcrumb(&marker)
        .label("import batch")
        .run(action)?;

    watcher.run_pending()?;

    let line = fs::read_to_string(&marker)?;
    assert!(line.contains("import batch"));
    assert!(line.contains("0 seconds"));

    Ok(())
}
