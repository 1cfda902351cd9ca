#![forbid(unsafe_code)]

//! Deterministic simulation host.
//!
//! [`SimApp`] embeds a [`NavProgram`] with a recording [`SimHost`] and two fake
//! scroll containers, and plays the part of the platform: it turns user
//! actions into [`NavMsg`]s, applies `ScrollTo` requests to the containers,
//! reports the resulting scroll positions back, and (optionally) answers
//! content loads immediately.
//!
//! # Platform model
//!
//! - Scroll containers clamp to `[0, content - viewport]`.
//! - A container is remounted at offset 0 whenever its view is shown again;
//!   any `ScrollTo` issued on that transition is applied after the remount.
//! - Dragging a container that is not being pulled scrolls it natively, so a
//!   drag down at the top of the feed leaves the offset at 0.
//! - Every dispatched message produces one recorded frame; the sequence of
//!   frames is folded into a blake3 digest.

use std::collections::VecDeque;
use std::time::Duration;

use feednav_core::{
    ActiveTab, CancelReason, ConfigError, GestureEvent, NavConfig, NavigationMode, Point,
    PointerId, ScrollPosition, SurfaceKind,
};
use feednav_runtime::{
    ContentLoader, ExternalNavigator, FeedItem, GridItem, Haptics, ItemId, LoadError, LoadTicket,
    NavFrame, NavMsg, NavProgram, NavTarget, ScrollDriver, UserId, ViewModeCoordinator, ViewerId,
};

use crate::determinism::{FRAME, SimClock};
use crate::frame_hash::{FrameHasher, frame_hash};
use crate::script::{Script, Step};

// ---------------------------------------------------------------------------
// Fake scroll container
// ---------------------------------------------------------------------------

/// A scroll container with fixed content height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeScroll {
    offset: f64,
    viewport: f64,
    content: f64,
}

impl FakeScroll {
    #[must_use]
    pub fn new(viewport: f64, content: f64) -> Self {
        Self {
            offset: 0.0,
            viewport,
            content,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content - self.viewport).max(0.0)
    }

    #[must_use]
    pub fn position(&self) -> ScrollPosition {
        ScrollPosition::new(self.offset, self.viewport, self.content)
    }

    /// Clamp and apply; returns whether the offset changed.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        let clamped = offset.clamp(0.0, self.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    pub fn scroll_by(&mut self, dy: f64) -> bool {
        self.scroll_to(self.offset + dy)
    }

    /// Fresh mount: back to the top.
    pub fn remount(&mut self) {
        self.offset = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Recording host
// ---------------------------------------------------------------------------

/// A `ScrollTo` as the host received it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub surface: SurfaceKind,
    pub offset: f64,
    pub smooth: bool,
}

/// A load the host has started but not yet answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingLoad {
    Feed { ticket: LoadTicket, tab: ActiveTab },
    Recall { ticket: LoadTicket },
}

/// Records every effect; queues the ones [`SimApp`] has to act on.
#[derive(Debug, Default)]
pub struct SimHost {
    pub vibrations: Vec<Duration>,
    pub feed_requests: Vec<(LoadTicket, ActiveTab)>,
    pub recall_requests: Vec<LoadTicket>,
    pub navigations: Vec<NavTarget>,
    pub scroll_requests: Vec<ScrollRequest>,
    /// Fault injection: the vibration backend panics.
    pub haptics_panics: bool,
    pending_scrolls: VecDeque<ScrollRequest>,
    pending_loads: VecDeque<PendingLoad>,
}

impl SimHost {
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.pending_loads.len()
    }
}

impl Haptics for SimHost {
    fn vibrate(&mut self, duration: Duration) {
        if self.haptics_panics {
            panic!("simulated vibration backend failure");
        }
        self.vibrations.push(duration);
    }
}

impl ContentLoader for SimHost {
    fn load_feed(&mut self, ticket: LoadTicket, tab: ActiveTab, _viewer: &ViewerId) {
        self.feed_requests.push((ticket, tab));
        self.pending_loads.push_back(PendingLoad::Feed { ticket, tab });
    }

    fn load_recall(&mut self, ticket: LoadTicket, _viewer: &ViewerId) {
        self.recall_requests.push(ticket);
        self.pending_loads.push_back(PendingLoad::Recall { ticket });
    }
}

impl ExternalNavigator for SimHost {
    fn navigate(&mut self, target: &NavTarget) {
        self.navigations.push(target.clone());
    }
}

impl ScrollDriver for SimHost {
    fn scroll_to(&mut self, surface: SurfaceKind, offset: f64, smooth: bool) {
        let request = ScrollRequest {
            surface,
            offset,
            smooth,
        };
        self.scroll_requests.push(request);
        self.pending_scrolls.push_back(request);
    }
}

// ---------------------------------------------------------------------------
// SimApp
// ---------------------------------------------------------------------------

/// How the simulated backend answers loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Loads stay pending until the script completes or fails them.
    Manual,
    /// Every load succeeds as soon as it is issued.
    Immediate { feed_items: usize, recall_items: usize },
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub nav: NavConfig,
    pub viewer: ViewerId,
    pub viewport: f64,
    pub feed_content: f64,
    pub grid_content: f64,
    pub loads: LoadPolicy,
    pub native_drag_scroll: bool,
    pub haptics_panics: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            viewer: ViewerId::new("sim-viewer"),
            viewport: 800.0,
            feed_content: 6000.0,
            grid_content: 3000.0,
            loads: LoadPolicy::Immediate {
                feed_items: 12,
                recall_items: 24,
            },
            native_drag_scroll: true,
            haptics_panics: false,
        }
    }
}

pub struct SimApp {
    program: NavProgram<SimHost>,
    clock: SimClock,
    feed: FakeScroll,
    grid: FakeScroll,
    loads: LoadPolicy,
    native_drag_scroll: bool,
    /// Pointer id and last position of the live drag.
    drag: Option<(u32, Point)>,
    hasher: FrameHasher,
    log: Vec<String>,
}

impl SimApp {
    /// Mount the feed at the top, issue startup loads, and record frame 0.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let host = SimHost {
            haptics_panics: config.haptics_panics,
            ..SimHost::default()
        };
        let program = NavProgram::new(config.nav, config.viewer, host)?;
        let mut app = Self {
            program,
            clock: SimClock::new(),
            feed: FakeScroll::new(config.viewport, config.feed_content),
            grid: FakeScroll::new(config.viewport, config.grid_content),
            loads: config.loads,
            native_drag_scroll: config.native_drag_scroll,
            drag: None,
            hasher: FrameHasher::new(),
            log: Vec::new(),
        };
        app.program.init();
        app.report_scroll(SurfaceKind::Feed);
        app.pump();
        app.record("init");
        Ok(app)
    }

    // --- accessors -------------------------------------------------------

    #[must_use]
    pub fn frame(&self) -> NavFrame {
        self.program.frame()
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.program.coordinator().mode()
    }

    #[must_use]
    pub fn active_tab(&self) -> ActiveTab {
        self.program.coordinator().active_tab()
    }

    #[must_use]
    pub fn coordinator(&self) -> &ViewModeCoordinator {
        self.program.coordinator()
    }

    #[must_use]
    pub fn host(&self) -> &SimHost {
        self.program.host()
    }

    #[must_use]
    pub fn feed_scroll(&self) -> FakeScroll {
        self.feed
    }

    #[must_use]
    pub fn grid_scroll(&self) -> FakeScroll {
        self.grid
    }

    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Digest over every frame recorded so far.
    #[must_use]
    pub fn digest(&self) -> String {
        self.hasher.digest()
    }

    #[must_use]
    pub fn frames_recorded(&self) -> u64 {
        self.hasher.frames()
    }

    /// One JSON object per recorded frame.
    #[must_use]
    pub fn jsonl(&self) -> &[String] {
        &self.log
    }

    // --- user actions ----------------------------------------------------

    pub fn run(&mut self, script: &Script) {
        for step in script.steps() {
            self.apply(step);
        }
    }

    pub fn apply(&mut self, step: &Step) {
        match step {
            Step::Down { pointer, at } => self.pointer_down(*pointer, *at),
            Step::Move { pointer, to } => self.pointer_move(*pointer, *to),
            Step::Up { pointer, at } => self.pointer_up(*pointer, *at),
            Step::Cancel { pointer, reason } => self.cancel(*pointer, *reason),
            Step::Wheel { delta_y } => self.wheel(*delta_y),
            Step::UserScroll { dy } => self.user_scroll(*dy),
            Step::HeaderTap => self.dispatch(NavMsg::HeaderActivated),
            Step::SelectTab(tab) => self.dispatch(NavMsg::SelectTab(*tab)),
            Step::Retry => self.dispatch(NavMsg::Retry),
            Step::Wait(duration) => self.clock.advance(*duration),
            Step::Frames(n) => self.frames(*n),
            Step::CompleteLoads => self.complete_loads(),
            Step::FailLoads(error) => self.fail_loads(error),
        }
    }

    pub fn pointer_down(&mut self, pointer: u32, at: Point) {
        if self.drag.is_none() {
            self.drag = Some((pointer, at));
        }
        self.dispatch(GestureEvent::down(pointer, at.x, at.y).into());
    }

    pub fn pointer_move(&mut self, pointer: u32, to: Point) {
        let previous = match self.drag {
            Some((id, last)) if id == pointer => {
                self.drag = Some((id, to));
                Some(last)
            }
            _ => None,
        };
        self.dispatch(GestureEvent::moved(pointer, to.x, to.y).into());

        if self.native_drag_scroll
            && let Some(last) = previous
            && !self.program.coordinator().active_surface().pull().is_pulling()
        {
            // Content follows the finger: dragging down scrolls toward the top.
            self.user_scroll(last.y - to.y);
        }
    }

    pub fn pointer_up(&mut self, pointer: u32, at: Point) {
        if matches!(self.drag, Some((id, _)) if id == pointer) {
            self.drag = None;
        }
        self.dispatch(GestureEvent::up(pointer, at.x, at.y).into());
    }

    pub fn cancel(&mut self, pointer: Option<u32>, reason: CancelReason) {
        if pointer.is_none() || matches!((self.drag, pointer), (Some((id, _)), Some(p)) if id == p) {
            self.drag = None;
        }
        self.dispatch(
            GestureEvent::Cancel {
                pointer: pointer.map(PointerId),
                reason,
            }
            .into(),
        );
    }

    /// Wheel notch; scrolls the container natively unless it switched mode.
    pub fn wheel(&mut self, delta_y: f64) {
        let before = self.mode();
        self.dispatch(
            GestureEvent::Wheel {
                delta_y,
                delta_x: 0.0,
            }
            .into(),
        );
        if self.mode() == before && self.drag.is_none() {
            self.user_scroll(delta_y);
        }
    }

    /// Native scroll of the mounted container; reports it if it moved.
    pub fn user_scroll(&mut self, dy: f64) {
        let kind = self.mounted();
        let moved = match kind {
            SurfaceKind::Feed => self.feed.scroll_by(dy),
            SurfaceKind::Grid => self.grid.scroll_by(dy),
        };
        if moved {
            let position = self.container(kind).position();
            self.dispatch(GestureEvent::Scroll(position).into());
        }
    }

    pub fn tap_header(&mut self) {
        self.dispatch(NavMsg::HeaderActivated);
    }

    pub fn wait(&mut self, duration: Duration) {
        self.clock.advance(duration);
    }

    /// Advance `n` frames, ticking once per frame.
    pub fn frames(&mut self, n: u32) {
        for _ in 0..n {
            self.clock.advance(FRAME);
            self.dispatch(NavMsg::Tick);
        }
    }

    /// Answer every pending load with canned content.
    pub fn complete_loads(&mut self) {
        let (feed_items, recall_items) = match self.loads {
            LoadPolicy::Immediate {
                feed_items,
                recall_items,
            } => (feed_items, recall_items),
            LoadPolicy::Manual => (6, 9),
        };
        while let Some(load) = self.program.host_mut().pending_loads.pop_front() {
            let msg = match load {
                PendingLoad::Feed { ticket, tab } => NavMsg::FeedLoaded {
                    ticket,
                    tab,
                    result: Ok(feed_page(tab, feed_items)),
                },
                PendingLoad::Recall { ticket } => NavMsg::RecallLoaded {
                    ticket,
                    result: Ok(recall_page(recall_items)),
                },
            };
            self.dispatch(msg);
        }
    }

    /// Fail every pending load with `error`.
    pub fn fail_loads(&mut self, error: &LoadError) {
        while let Some(load) = self.program.host_mut().pending_loads.pop_front() {
            let msg = match load {
                PendingLoad::Feed { ticket, tab } => NavMsg::FeedLoaded {
                    ticket,
                    tab,
                    result: Err(error.clone()),
                },
                PendingLoad::Recall { ticket } => NavMsg::RecallLoaded {
                    ticket,
                    result: Err(error.clone()),
                },
            };
            self.dispatch(msg);
        }
    }

    /// Dispatch one message, play out its effects, and record a frame.
    pub fn dispatch(&mut self, msg: NavMsg) {
        let label = msg.kind();
        let before = self.mode();
        self.program.dispatch(msg, self.clock.now());

        let after = self.mode();
        if after != before {
            self.drag = None;
            match after {
                NavigationMode::Grid => self.grid.remount(),
                NavigationMode::Feed => self.feed.remount(),
            }
            self.report_scroll(self.mounted());
        }
        self.pump();
        self.record(label);
    }

    // --- internals -------------------------------------------------------

    fn mounted(&self) -> SurfaceKind {
        match self.mode() {
            NavigationMode::Feed => SurfaceKind::Feed,
            NavigationMode::Grid => SurfaceKind::Grid,
        }
    }

    fn container(&self, kind: SurfaceKind) -> &FakeScroll {
        match kind {
            SurfaceKind::Feed => &self.feed,
            SurfaceKind::Grid => &self.grid,
        }
    }

    fn report_scroll(&mut self, kind: SurfaceKind) {
        let position = self.container(kind).position();
        self.program
            .dispatch(GestureEvent::Scroll(position).into(), self.clock.now());
    }

    /// Apply queued scroll requests and, under `Immediate`, answer loads.
    fn pump(&mut self) {
        loop {
            if let Some(request) = self.program.host_mut().pending_scrolls.pop_front() {
                self.apply_scroll_request(request);
                continue;
            }
            if let LoadPolicy::Immediate {
                feed_items,
                recall_items,
            } = self.loads
                && let Some(load) = self.program.host_mut().pending_loads.pop_front()
            {
                let msg = match load {
                    PendingLoad::Feed { ticket, tab } => NavMsg::FeedLoaded {
                        ticket,
                        tab,
                        result: Ok(feed_page(tab, feed_items)),
                    },
                    PendingLoad::Recall { ticket } => NavMsg::RecallLoaded {
                        ticket,
                        result: Ok(recall_page(recall_items)),
                    },
                };
                self.program.dispatch(msg, self.clock.now());
                continue;
            }
            break;
        }
    }

    fn apply_scroll_request(&mut self, request: ScrollRequest) {
        if request.surface != self.mounted() {
            tracing::debug!(?request, "scroll request for unmounted surface dropped");
            return;
        }
        let moved = match request.surface {
            SurfaceKind::Feed => self.feed.scroll_to(request.offset),
            SurfaceKind::Grid => self.grid.scroll_to(request.offset),
        };
        if moved {
            self.report_scroll(request.surface);
        }
    }

    fn record(&mut self, label: &'static str) {
        let frame = self.program.frame();
        self.hasher.push(&frame);
        let line = serde_json::json!({
            "seq": self.hasher.frames() - 1,
            "t_ns": self.clock.elapsed_ns(),
            "msg": label,
            "mode": frame.mode.as_str(),
            "tab": frame.active_tab.as_str(),
            "header_y": frame.header_translate_y,
            "pull": frame.pull_progress,
            "feed_offset": frame.feed_offset,
            "hash": frame_hash(&frame),
        });
        self.log.push(line.to_string());
    }
}

fn feed_page(tab: ActiveTab, n: usize) -> Vec<FeedItem> {
    (0..n)
        .map(|i| FeedItem {
            id: ItemId(format!("{}-{i}", tab.as_str())),
            author: UserId(format!("user-{}", i % 5)),
            caption: format!("post {i}"),
        })
        .collect()
}

fn recall_page(n: usize) -> Vec<GridItem> {
    (0..n)
        .map(|i| GridItem {
            id: ItemId(format!("recall-{i}")),
            author: UserId(format!("user-{}", i % 7)),
            thumbnail_url: format!("sim://thumb/{i}"),
        })
        .collect()
}
