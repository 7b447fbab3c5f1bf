//! Session lifecycle against an on-disk SQLite store.
//!
//! Covers the persistence contract across process restarts: settings survive,
//! a running timer is saved on shutdown and comes back paused.

use focusclock_core::storage::{SETTINGS_KEY, TIMER_STATE_KEY};
use focusclock_core::{
    Database, KeyValueStore, Mode, RawSettingsInput, Session, SilentNotifier,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Session<Database> {
    let db = Database::open_at(&dir.path().join("focusclock.db")).unwrap();
    Session::open(db, Box::new(SilentNotifier))
}

#[test]
fn settings_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.update_settings(&RawSettingsInput {
            focus_minutes: Some("1".into()),
            break_minutes: Some("2".into()),
            auto_start_next: Some("true".into()),
            ..Default::default()
        });
    }

    let session = open(&dir);
    assert_eq!(session.settings().focus_minutes, 1);
    assert_eq!(session.settings().break_minutes, 2);
    assert!(session.settings().auto_start_next);
    assert_eq!(session.timer().seconds_left(), 60);
}

#[test]
fn running_timer_resumes_paused_after_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.update_settings(&RawSettingsInput {
            focus_minutes: Some("1".into()),
            ..Default::default()
        });
        session.start();
        // Finish the focus phase, then run 10s into the break.
        for _ in 0..70 {
            session.tick();
        }
        session.start();
        for _ in 0..10 {
            session.tick();
        }
        assert!(session.shutdown());
    }

    let session = open(&dir);
    assert_eq!(session.timer().mode(), Mode::Break);
    assert_eq!(session.timer().completed_focus_count(), 1);
    assert_eq!(session.timer().seconds_left(), 5 * 60 - 10);
    assert!(!session.timer().is_running());
}

#[test]
fn paused_timer_is_not_saved_on_shutdown() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.start();
        session.tick();
        session.pause();
        assert!(!session.shutdown());
    }

    let session = open(&dir);
    assert_eq!(session.timer().seconds_left(), 1500);
}

#[test]
fn corrupt_records_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut db = Database::open_at(&dir.path().join("focusclock.db")).unwrap();
        db.set(SETTINGS_KEY, "{{{").unwrap();
        db.set(TIMER_STATE_KEY, "42").unwrap();
    }

    let session = open(&dir);
    assert_eq!(session.settings().focus_minutes, 25);
    assert_eq!(session.timer().mode(), Mode::Focus);
    assert_eq!(session.timer().seconds_left(), 1500);

    let db = Database::open_at(&dir.path().join("focusclock.db")).unwrap();
    assert!(db.get(SETTINGS_KEY).unwrap().is_none());
    assert!(db.get(TIMER_STATE_KEY).unwrap().is_none());
}
