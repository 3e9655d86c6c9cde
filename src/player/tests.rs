use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::coordinator::Coordinator;
use super::engine::{EngineFactory, MediaEngine};
use super::queue::MediaQueue;
use super::sync::{DragState, PositionSync};
use super::types::{EngineError, PlaybackState};

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineEvent {
    Opened(PathBuf),
    Played(PathBuf),
    Paused(PathBuf),
    Released(PathBuf),
    Sought(PathBuf, Duration),
    /// Gain applied to the engine, recorded as rounded percent.
    Volume(PathBuf, u32),
}

#[derive(Default)]
struct FakeLog {
    events: RefCell<Vec<EngineEvent>>,
    live: RefCell<usize>,
    max_live: RefCell<usize>,
}

impl FakeLog {
    fn push(&self, event: EngineEvent) {
        self.events.borrow_mut().push(event);
    }

    fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

struct FakeFactory {
    log: Rc<FakeLog>,
    duration: Duration,
    position: Duration,
    fail_open: bool,
}

impl FakeFactory {
    fn new(log: Rc<FakeLog>) -> Self {
        Self {
            log,
            duration: Duration::from_secs(180),
            position: Duration::ZERO,
            fail_open: false,
        }
    }
}

impl EngineFactory for FakeFactory {
    type Engine = FakeEngine;

    fn open(&self, path: &Path) -> Result<FakeEngine, EngineError> {
        if self.fail_open {
            return Err(EngineError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing media"),
            });
        }

        *self.log.live.borrow_mut() += 1;
        let live = *self.log.live.borrow();
        let mut max = self.log.max_live.borrow_mut();
        *max = (*max).max(live);

        self.log.push(EngineEvent::Opened(path.to_path_buf()));
        Ok(FakeEngine {
            log: self.log.clone(),
            path: path.to_path_buf(),
            duration: self.duration,
            position: self.position,
        })
    }
}

struct FakeEngine {
    log: Rc<FakeLog>,
    path: PathBuf,
    duration: Duration,
    position: Duration,
}

impl MediaEngine for FakeEngine {
    fn play(&mut self) {
        self.log.push(EngineEvent::Played(self.path.clone()));
    }

    fn pause(&mut self) {
        self.log.push(EngineEvent::Paused(self.path.clone()));
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.duration)
    }

    fn set_volume(&mut self, gain: f32) {
        self.log
            .push(EngineEvent::Volume(self.path.clone(), (gain * 100.0).round() as u32));
    }

    fn seek(&mut self, to: Duration) -> Result<(), EngineError> {
        self.position = to;
        self.log.push(EngineEvent::Sought(self.path.clone(), to));
        Ok(())
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        *self.log.live.borrow_mut() -= 1;
        self.log.push(EngineEvent::Released(self.path.clone()));
    }
}

fn coordinator(log: &Rc<FakeLog>) -> Coordinator<FakeFactory> {
    Coordinator::new(FakeFactory::new(log.clone()), 100)
}

fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

// --- queue ---

#[test]
fn queue_next_and_previous_wrap_around() {
    let mut q = MediaQueue::build_from(vec![p("/a"), p("/b"), p("/c")], 2);

    assert_eq!(q.next(), Some(Path::new("/a")));
    assert_eq!(q.cursor(), Some(0));
    assert_eq!(q.previous(), Some(Path::new("/c")));
    assert_eq!(q.cursor(), Some(2));
}

#[test]
fn queue_is_noop_when_empty() {
    let mut q = MediaQueue::default();

    assert!(q.is_empty());
    assert_eq!(q.next(), None);
    assert_eq!(q.previous(), None);
    assert_eq!(q.current(), None);
    assert_eq!(q.cursor(), None);
}

#[test]
fn queue_clamps_start_index() {
    let q = MediaQueue::build_from(vec![p("/a"), p("/b")], 99);
    assert_eq!(q.current(), Some(Path::new("/b")));
}

// --- coordinator ---

#[test]
fn select_track_starts_playback() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));

    assert!(c.is_playing());
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_track(), Some(Path::new("/a")));
    assert_eq!(c.duration_secs(), 180);
}

#[test]
fn play_is_idempotent_while_playing() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));
    c.play();
    c.play();

    assert!(c.is_playing());
    assert_eq!(log.count(|e| matches!(e, EngineEvent::Played(_))), 1);
}

#[test]
fn play_without_a_selected_track_is_a_noop() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.play();

    assert_eq!(c.state(), PlaybackState::Idle);
    assert!(log.events().is_empty());
}

#[test]
fn select_track_releases_the_old_handle_before_binding_the_new_one() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));
    c.select_track(Path::new("/b"));

    let events = log.events();
    let released_a = events
        .iter()
        .position(|e| *e == EngineEvent::Released(p("/a")))
        .expect("handle for /a never released");
    let opened_b = events
        .iter()
        .position(|e| *e == EngineEvent::Opened(p("/b")))
        .expect("handle for /b never opened");
    assert!(released_a < opened_b);
    assert_eq!(*log.max_live.borrow(), 1);
}

#[test]
fn failed_open_falls_back_to_idle() {
    let log = Rc::new(FakeLog::default());
    let mut factory = FakeFactory::new(log.clone());
    factory.fail_open = true;
    let mut c = Coordinator::new(factory, 100);

    c.select_track(Path::new("/broken"));

    assert_eq!(c.state(), PlaybackState::Idle);
    assert!(!c.is_playing());
    assert_eq!(c.current_track(), None);
}

#[test]
fn pause_keeps_the_handle_and_play_resumes_it() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));
    c.pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(!c.is_playing());

    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    // One handle over the whole pause/resume cycle.
    assert_eq!(log.count(|e| matches!(e, EngineEvent::Opened(_))), 1);
}

#[test]
fn stop_keeps_the_current_track_and_play_restarts_it() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));
    c.stop();

    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_track(), Some(Path::new("/a")));
    assert_eq!(log.count(|e| matches!(e, EngineEvent::Released(_))), 1);

    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(log.count(|e| matches!(e, EngineEvent::Opened(_))), 2);
}

#[test]
fn volume_is_scaled_to_the_engine_range_and_clamped() {
    let log = Rc::new(FakeLog::default());
    let mut c = Coordinator::new(FakeFactory::new(log.clone()), 50);

    c.select_track(Path::new("/a"));
    // Applied once when the session opens.
    assert!(log.events().contains(&EngineEvent::Volume(p("/a"), 50)));

    c.set_volume(200);
    assert_eq!(c.volume(), 100);
    assert!(log.events().contains(&EngineEvent::Volume(p("/a"), 100)));
}

#[test]
fn volume_with_no_handle_sticks_for_the_next_session() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.set_volume(30);
    assert!(log.events().is_empty());

    c.select_track(Path::new("/a"));
    assert!(log.events().contains(&EngineEvent::Volume(p("/a"), 30)));
}

#[test]
fn seek_converts_display_seconds_and_needs_a_handle() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.seek(10);
    assert!(log.events().is_empty());

    c.select_track(Path::new("/a"));
    c.seek(42);
    assert!(
        log.events()
            .contains(&EngineEvent::Sought(p("/a"), Duration::from_secs(42)))
    );
}

#[test]
fn shutdown_releases_the_handle() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);

    c.select_track(Path::new("/a"));
    c.shutdown();

    assert_eq!(*log.live.borrow(), 0);
    assert!(!c.is_playing());
}

// --- position sync ---

#[test]
fn sync_does_not_tick_before_start_or_before_the_interval() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);
    c.select_track(Path::new("/a"));

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();

    assert!(!sync.is_running());
    assert_eq!(sync.poll(t0, &c, DragState::default()), None);

    sync.start(t0);
    assert_eq!(sync.poll(t0 + Duration::from_millis(50), &c, DragState::default()), None);
    assert_eq!(
        sync.poll(t0 + Duration::from_millis(100), &c, DragState::default()),
        Some(0)
    );
}

#[test]
fn sync_publishes_engine_position_while_playing() {
    let log = Rc::new(FakeLog::default());
    let mut factory = FakeFactory::new(log.clone());
    factory.position = Duration::from_secs(7);
    let mut c = Coordinator::new(factory, 100);
    c.select_track(Path::new("/a"));

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();
    sync.start(t0);

    assert_eq!(
        sync.poll(t0 + Duration::from_millis(100), &c, DragState::default()),
        Some(7)
    );
}

#[test]
fn sync_is_suppressed_while_a_seek_drag_is_active() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);
    c.select_track(Path::new("/a"));

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();
    sync.start(t0);

    let drag = DragState {
        seek: true,
        volume: false,
    };
    assert_eq!(sync.poll(t0 + Duration::from_millis(100), &c, drag), None);
    // The tick was consumed; a later poll without the drag publishes again.
    assert_eq!(
        sync.poll(t0 + Duration::from_millis(200), &c, DragState::default()),
        Some(0)
    );
}

#[test]
fn sync_is_silent_while_paused_or_stopped() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);
    c.select_track(Path::new("/a"));
    c.pause();

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();
    sync.start(t0);

    assert_eq!(sync.poll(t0 + Duration::from_millis(100), &c, DragState::default()), None);

    c.stop();
    assert_eq!(sync.poll(t0 + Duration::from_millis(200), &c, DragState::default()), None);
}

#[test]
fn sync_drops_positions_beyond_the_known_duration() {
    let log = Rc::new(FakeLog::default());
    let mut factory = FakeFactory::new(log.clone());
    factory.duration = Duration::from_secs(10);
    factory.position = Duration::from_secs(30);
    let mut c = Coordinator::new(factory, 100);
    c.select_track(Path::new("/a"));

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();
    sync.start(t0);

    assert_eq!(sync.poll(t0 + Duration::from_millis(100), &c, DragState::default()), None);
}

#[test]
fn sync_stop_cancels_the_recurring_tick() {
    let log = Rc::new(FakeLog::default());
    let mut c = coordinator(&log);
    c.select_track(Path::new("/a"));

    let mut sync = PositionSync::new(Duration::from_millis(100));
    let t0 = Instant::now();
    sync.start(t0);
    sync.stop();

    assert!(!sync.is_running());
    assert_eq!(sync.poll(t0 + Duration::from_secs(5), &c, DragState::default()), None);
}
