#![forbid(unsafe_code)]

//! View-mode coordinator: the single writer of mode, tab and content state.
//!
//! [`ViewModeCoordinator::update`] is the only mutation entry point. It routes
//! gesture events to the active [`Surface`], turns the resulting
//! [`GestureOutcome`] into a mode or tab change, and returns the side effects
//! as a [`Cmd`].
//!
//! # State Machine
//!
//! ```text
//!            ModeSwitch (haptic, recall load if not cached)
//!   ┌──────┐ ─────────────────────────────────────────▶ ┌──────┐
//!   │ Feed │                                            │ Grid │
//!   └──────┘ ◀───────────────────────────────────────── └──────┘
//!            ModeSwitch (haptic, restore feed offset)
//! ```
//!
//! # Invariants
//!
//! 1. `mode == Grid` exactly when a grid surface is mounted.
//! 2. At most one transition is in flight; a `ModeSwitch` before it settles
//!    is dropped.
//! 3. While the grid is mounted the feed surface is frozen, so its last scroll
//!    snapshot is the offset restored on return.
//! 4. The active tab never changes while the grid is mounted.
//! 5. A load result only lands if its ticket is the pending one.

use std::time::Duration;

use feednav_core::{
    Activation, ActiveTab, DoubleActivation, GestureEvent, GestureOutcome, NavConfig,
    NavigationMode, PullDirection, ScrollPosition, Surface, SurfaceKind, SwitchTrigger,
};
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::content::{
    Completion, FeedItem, GridItem, ItemId, LoadError, LoadState, LoadStatus, LoadTicket,
    TicketCounter, UserId, ViewerId,
};
use crate::program::Cmd;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screens outside the controller that it can hand off to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "screen", content = "id", rename_all = "snake_case"))]
pub enum NavTarget {
    /// Full navigation reset (second header activation).
    Home,
    Item(ItemId),
    Profile(UserId),
    Quest(String),
    Chat(UserId),
}

/// Complete input alphabet of the coordinator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavMsg {
    Gesture(GestureEvent),
    /// The header/logo was tapped.
    HeaderActivated,
    SelectTab(ActiveTab),
    Open(NavTarget),
    FeedLoaded {
        ticket: LoadTicket,
        tab: ActiveTab,
        result: Result<Vec<FeedItem>, LoadError>,
    },
    RecallLoaded {
        ticket: LoadTicket,
        result: Result<Vec<GridItem>, LoadError>,
    },
    /// Reissue the failed load for whatever is on screen.
    Retry,
    /// Frame callback.
    Tick,
}

impl NavMsg {
    /// Short static name, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Gesture(event) => event.kind(),
            Self::HeaderActivated => "header_activated",
            Self::SelectTab(_) => "select_tab",
            Self::Open(_) => "open",
            Self::FeedLoaded { .. } => "feed_loaded",
            Self::RecallLoaded { .. } => "recall_loaded",
            Self::Retry => "retry",
            Self::Tick => "tick",
        }
    }
}

impl From<GestureEvent> for NavMsg {
    fn from(event: GestureEvent) -> Self {
        Self::Gesture(event)
    }
}

/// A mode change between its trigger and its visual settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: NavigationMode,
    pub to: NavigationMode,
    pub started_at: Instant,
}

impl ModeTransition {
    #[must_use]
    pub fn is_settled(&self, now: Instant, settle: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= settle
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavFrame {
    pub mode: NavigationMode,
    pub active_tab: ActiveTab,
    /// Header translation of the mounted surface, in `[-header_height, 0]`.
    pub header_translate_y: f64,
    pub pull_progress: f64,
    pub pull_direction: Option<PullDirection>,
    pub indicator_visible: bool,
    /// Releasing now would switch mode.
    pub pull_armed: bool,
    pub transitioning: bool,
    /// Last known feed offset; preserved while the grid is mounted.
    pub feed_offset: f64,
    /// Content state of the active tab.
    pub feed_status: LoadStatus,
    pub recall_status: LoadStatus,
}

pub struct ViewModeCoordinator {
    config: NavConfig,
    viewer: ViewerId,
    mode: NavigationMode,
    tab: ActiveTab,
    feed: Surface,
    grid: Option<Surface>,
    transition: Option<ModeTransition>,
    header_tap: DoubleActivation,
    feed_content: [LoadState<FeedItem>; 2],
    recall: LoadState<GridItem>,
    tickets: TicketCounter,
    last_tick: Option<Instant>,
}

impl ViewModeCoordinator {
    #[must_use]
    pub fn new(config: NavConfig, viewer: ViewerId) -> Self {
        Self {
            feed: Surface::new(SurfaceKind::Feed, &config),
            header_tap: DoubleActivation::new(config.double_activation_window),
            config,
            viewer,
            mode: NavigationMode::Feed,
            tab: ActiveTab::default(),
            grid: None,
            transition: None,
            feed_content: Default::default(),
            recall: LoadState::default(),
            tickets: TicketCounter::default(),
            last_tick: None,
        }
    }

    /// Startup effects: load the initial tab.
    pub fn init(&mut self) -> Cmd {
        self.ensure_feed(self.tab)
    }

    pub fn update(&mut self, msg: NavMsg, now: Instant) -> Cmd {
        let _span = tracing::info_span!(
            "feednav.update",
            msg = msg.kind(),
            mode = self.mode.as_str()
        )
        .entered();

        match msg {
            NavMsg::Gesture(event) => self.on_gesture(&event, now),
            NavMsg::HeaderActivated => self.on_header_activated(now),
            NavMsg::SelectTab(tab) => self.select_tab(tab, "select"),
            NavMsg::Open(target) => {
                debug!(message = "feednav.open", ?target);
                Cmd::Navigate(target)
            }
            NavMsg::FeedLoaded {
                ticket,
                tab,
                result,
            } => {
                let slot = &mut self.feed_content[tab.index()];
                let completion = slot.complete(ticket, result);
                log_completion("feed", ticket, completion, slot.error());
                Cmd::None
            }
            NavMsg::RecallLoaded { ticket, result } => {
                let completion = self.recall.complete(ticket, result);
                log_completion("recall", ticket, completion, self.recall.error());
                Cmd::None
            }
            NavMsg::Retry => self.retry(),
            NavMsg::Tick => self.on_tick(now),
        }
    }

    #[must_use]
    pub fn frame(&self) -> NavFrame {
        let surface = self.active_surface();
        let hint = surface.pull_hint();
        NavFrame {
            mode: self.mode,
            active_tab: self.tab,
            header_translate_y: surface.header().translate_y(),
            pull_progress: hint.progress,
            pull_direction: hint.direction,
            indicator_visible: hint.indicator_visible,
            pull_armed: hint.armed,
            transitioning: self.transition.is_some(),
            feed_offset: self.feed.scroll().offset,
            feed_status: self.feed_content[self.tab.index()].status(),
            recall_status: self.recall.status(),
        }
    }

    // --- accessors -------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn active_tab(&self) -> ActiveTab {
        self.tab
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn viewer(&self) -> &ViewerId {
        &self.viewer
    }

    #[must_use]
    pub fn feed_surface(&self) -> &Surface {
        &self.feed
    }

    #[must_use]
    pub fn grid_surface(&self) -> Option<&Surface> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn transition(&self) -> Option<&ModeTransition> {
        self.transition.as_ref()
    }

    #[must_use]
    pub fn feed_state(&self, tab: ActiveTab) -> &LoadState<FeedItem> {
        &self.feed_content[tab.index()]
    }

    #[must_use]
    pub fn recall_state(&self) -> &LoadState<GridItem> {
        &self.recall
    }

    #[must_use]
    pub fn active_surface(&self) -> &Surface {
        match (self.mode, self.grid.as_ref()) {
            (NavigationMode::Grid, Some(grid)) => grid,
            _ => &self.feed,
        }
    }

    fn active_surface_mut(&mut self) -> &mut Surface {
        match (self.mode, self.grid.as_mut()) {
            (NavigationMode::Grid, Some(grid)) => grid,
            _ => &mut self.feed,
        }
    }

    // --- handlers --------------------------------------------------------

    fn on_gesture(&mut self, event: &GestureEvent, now: Instant) -> Cmd {
        let outcome = self.active_surface_mut().handle(event, now);
        match outcome {
            GestureOutcome::None => Cmd::None,
            GestureOutcome::ModeSwitch { direction, trigger } => {
                self.switch_mode(direction, trigger, now)
            }
            GestureOutcome::TabSwipe(direction) => {
                if self.mode == NavigationMode::Grid {
                    debug!(message = "feednav.tab_switch_blocked", source = "swipe", ?direction);
                    return Cmd::None;
                }
                self.select_tab(direction.apply(self.tab), "swipe")
            }
            GestureOutcome::PullCancelled { distance } => {
                debug!(message = "feednav.pull_cancelled", distance);
                Cmd::None
            }
            GestureOutcome::GestureCancelled(reason) => {
                debug!(message = "feednav.gesture_cancelled", ?reason);
                Cmd::None
            }
            GestureOutcome::Ignored(reason) => {
                debug!(message = "feednav.input_ignored", event = event.kind(), ?reason);
                Cmd::None
            }
        }
    }

    fn switch_mode(
        &mut self,
        direction: PullDirection,
        trigger: SwitchTrigger,
        now: Instant,
    ) -> Cmd {
        if let Some(transition) = self.transition
            && !transition.is_settled(now, self.config.transition_settle)
        {
            debug!(
                message = "feednav.mode_switch_dropped",
                in_flight_to = transition.to.as_str(),
                ?trigger
            );
            return Cmd::None;
        }

        let from = self.mode;
        let to = from.toggled();
        info!(
            message = "feednav.mode_switch",
            from = from.as_str(),
            to = to.as_str(),
            ?direction,
            ?trigger
        );
        self.mode = to;
        self.transition = Some(ModeTransition {
            from,
            to,
            started_at: now,
        });
        let haptic = Cmd::Haptic(self.config.haptic_duration);

        match to {
            NavigationMode::Grid => {
                self.feed.freeze();
                // Until the host measures the grid, only its top edge is known.
                let unmeasured = ScrollPosition::unmeasured(self.feed.scroll().viewport_height);
                self.grid =
                    Some(Surface::new(SurfaceKind::Grid, &self.config).with_scroll(unmeasured));
                let load = self.ensure_recall();
                Cmd::batch(vec![haptic, load])
            }
            NavigationMode::Feed => {
                self.grid = None;
                self.feed.reset_header();
                let restore = Cmd::ScrollTo {
                    surface: SurfaceKind::Feed,
                    offset: self.feed.scroll().offset,
                    smooth: false,
                };
                Cmd::batch(vec![haptic, restore])
            }
        }
    }

    fn select_tab(&mut self, tab: ActiveTab, source: &'static str) -> Cmd {
        if self.mode == NavigationMode::Grid {
            debug!(message = "feednav.tab_switch_blocked", source, to = tab.as_str());
            return Cmd::None;
        }
        if tab == self.tab {
            return Cmd::None;
        }
        info!(
            message = "feednav.tab_switch",
            source,
            from = self.tab.as_str(),
            to = tab.as_str()
        );
        self.tab = tab;
        self.ensure_feed(tab)
    }

    fn on_header_activated(&mut self, now: Instant) -> Cmd {
        match self.header_tap.activate(now) {
            Activation::First => Cmd::ScrollTo {
                surface: self.active_surface().kind(),
                offset: 0.0,
                smooth: true,
            },
            Activation::Second => {
                info!(message = "feednav.external_navigate", target = "home");
                Cmd::Navigate(NavTarget::Home)
            }
        }
    }

    fn on_tick(&mut self, now: Instant) -> Cmd {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last_tick = Some(now);
        self.active_surface_mut().tick(dt);

        if let Some(transition) = self.transition
            && transition.is_settled(now, self.config.transition_settle)
        {
            debug!(message = "feednav.transition_settled", to = transition.to.as_str());
            self.transition = None;
        }
        Cmd::None
    }

    fn retry(&mut self) -> Cmd {
        match self.mode {
            NavigationMode::Grid => match reissue(&mut self.recall, &mut self.tickets) {
                Some(ticket) => Cmd::LoadRecall { ticket },
                None => Cmd::None,
            },
            NavigationMode::Feed => {
                let tab = self.tab;
                match reissue(&mut self.feed_content[tab.index()], &mut self.tickets) {
                    Some(ticket) => Cmd::LoadFeed { ticket, tab },
                    None => Cmd::None,
                }
            }
        }
    }

    fn ensure_feed(&mut self, tab: ActiveTab) -> Cmd {
        let slot = &mut self.feed_content[tab.index()];
        if slot.is_settled_or_pending() {
            debug!(message = "feednav.load_skipped", content = "feed", tab = tab.as_str());
            return Cmd::None;
        }
        let ticket = self.tickets.next();
        slot.start(ticket);
        Cmd::LoadFeed { ticket, tab }
    }

    fn ensure_recall(&mut self) -> Cmd {
        if self.recall.is_settled_or_pending() {
            debug!(message = "feednav.load_skipped", content = "recall");
            return Cmd::None;
        }
        let ticket = self.tickets.next();
        self.recall.start(ticket);
        Cmd::LoadRecall { ticket }
    }
}

fn reissue<T>(state: &mut LoadState<T>, tickets: &mut TicketCounter) -> Option<LoadTicket> {
    let retryable = state.error().is_some_and(LoadError::is_retryable);
    if !retryable {
        debug!(message = "feednav.retry_ignored", status = ?state.status());
        return None;
    }
    let ticket = tickets.next();
    state.start(ticket);
    Some(ticket)
}

fn log_completion(
    content: &'static str,
    ticket: LoadTicket,
    completion: Completion,
    error: Option<&LoadError>,
) {
    match (completion, error) {
        (Completion::Stale, _) => {
            debug!(message = "feednav.load_stale", content, ticket = ticket.0);
        }
        (Completion::Applied, Some(error)) => {
            warn!(
                message = "feednav.load_failed",
                content,
                ticket = ticket.0,
                %error,
                retryable = error.is_retryable()
            );
        }
        (Completion::Applied, None) => {
            debug!(message = "feednav.load_ready", content, ticket = ticket.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn coordinator() -> ViewModeCoordinator {
        let mut c = ViewModeCoordinator::new(NavConfig::default(), ViewerId::new("v"));
        c.update(
            NavMsg::Gesture(GestureEvent::Scroll(ScrollPosition::top(800.0, 6000.0))),
            Instant::now(),
        );
        c
    }

    /// Vertical drag of `dy` in 10 moves starting at `t`; returns the release command.
    fn drag(c: &mut ViewModeCoordinator, dx: f64, dy: f64, t: Instant) -> Cmd {
        c.update(GestureEvent::down(1, 200.0, 300.0).into(), t);
        for i in 1..=10 {
            let f = f64::from(i) / 10.0;
            c.update(
                GestureEvent::moved(1, 200.0 + dx * f, 300.0 + dy * f).into(),
                t + MS_16 * i,
            );
        }
        c.update(
            GestureEvent::up(1, 200.0 + dx, 300.0 + dy).into(),
            t + MS_16 * 11,
        )
    }

    fn scroll(c: &mut ViewModeCoordinator, offset: f64, viewport: f64, content: f64, t: Instant) {
        c.update(
            GestureEvent::Scroll(ScrollPosition::new(offset, viewport, content)).into(),
            t,
        );
    }

    #[test]
    fn long_pull_enters_grid_with_haptic_and_recall_load() {
        let mut c = coordinator();
        let cmds = drag(&mut c, 0.0, 250.0, Instant::now()).into_vec();
        assert_eq!(c.mode(), NavigationMode::Grid);
        assert!(c.grid_surface().is_some());
        assert_eq!(cmds[0], Cmd::Haptic(Duration::from_millis(10)));
        assert!(matches!(cmds[1], Cmd::LoadRecall { .. }));
        assert!(c.frame().transitioning);
    }

    #[test]
    fn short_pull_stays_in_feed() {
        let mut c = coordinator();
        let cmd = drag(&mut c, 0.0, 150.0, Instant::now());
        assert_eq!(cmd, Cmd::None);
        assert_eq!(c.mode(), NavigationMode::Feed);
        assert!(c.frame().indicator_visible);
    }

    #[test]
    fn second_switch_before_settle_is_dropped() {
        let mut c = coordinator();
        let t = Instant::now();
        drag(&mut c, 0.0, 250.0, t);
        scroll(&mut c, 0.0, 800.0, 3000.0, t + MS_16 * 12);
        // Second pull completes ~200ms after the first: still settling.
        let cmd = drag(&mut c, 0.0, 250.0, t + MS_16 * 13);
        assert_eq!(cmd, Cmd::None);
        assert_eq!(c.mode(), NavigationMode::Grid);
    }

    #[test]
    fn switch_allowed_after_settle() {
        let mut c = coordinator();
        let t = Instant::now();
        drag(&mut c, 0.0, 250.0, t);
        let later = t + Duration::from_millis(600);
        c.update(NavMsg::Tick, later);
        assert!(c.transition().is_none());
        scroll(&mut c, 0.0, 800.0, 3000.0, later);
        drag(&mut c, 0.0, 250.0, later);
        assert_eq!(c.mode(), NavigationMode::Feed);
        assert!(c.grid_surface().is_none());
    }

    #[test]
    fn returning_restores_feed_offset() {
        let mut c = coordinator();
        let t = Instant::now();
        // Read down the feed, then come back to the top to pull.
        scroll(&mut c, 1800.0, 800.0, 6000.0, t);
        scroll(&mut c, 0.0, 800.0, 6000.0, t);
        drag(&mut c, 0.0, 250.0, t);

        // Grid scrolls do not touch the frozen feed.
        let later = t + Duration::from_secs(1);
        scroll(&mut c, 0.0, 800.0, 3000.0, later);
        scroll(&mut c, 2200.0, 800.0, 3000.0, later);
        let cmds = drag(&mut c, 0.0, -250.0, later).into_vec();
        assert_eq!(c.mode(), NavigationMode::Feed);
        assert_eq!(
            cmds[1],
            Cmd::ScrollTo {
                surface: SurfaceKind::Feed,
                offset: 0.0,
                smooth: false
            }
        );
        assert_eq!(c.frame().header_translate_y, 0.0);
    }

    #[test]
    fn unmeasured_grid_only_dismisses_from_top() {
        let mut c = coordinator();
        let t = Instant::now();
        drag(&mut c, 0.0, 250.0, t);
        assert_eq!(
            c.grid_surface().map(Surface::boundary),
            Some(feednav_core::Boundary::AtTop)
        );

        let later = t + Duration::from_secs(1);
        let cmd = drag(&mut c, 0.0, -250.0, later);
        assert_eq!(cmd, Cmd::None);
        assert_eq!(c.mode(), NavigationMode::Grid);

        drag(&mut c, 0.0, 250.0, later + Duration::from_secs(1));
        assert_eq!(c.mode(), NavigationMode::Feed);
    }

    #[test]
    fn wheel_enters_grid() {
        let mut c = coordinator();
        let cmds = c
            .update(
                GestureEvent::Wheel {
                    delta_x: 0.0,
                    delta_y: -100.0,
                }
                .into(),
                Instant::now(),
            )
            .into_vec();
        assert_eq!(c.mode(), NavigationMode::Grid);
        assert!(matches!(cmds[0], Cmd::Haptic(_)));
    }

    #[test]
    fn swipe_changes_tab_and_loads_it() {
        let mut c = coordinator();
        let cmd = drag(&mut c, -80.0, 10.0, Instant::now());
        assert_eq!(c.active_tab(), ActiveTab::Friends);
        assert_eq!(c.mode(), NavigationMode::Feed);
        assert!(matches!(
            cmd,
            Cmd::LoadFeed {
                tab: ActiveTab::Friends,
                ..
            }
        ));
        // Discover was never loaded in this test, so going back loads it.
        let back = drag(&mut c, 90.0, 0.0, Instant::now());
        assert_eq!(c.active_tab(), ActiveTab::Discover);
        assert!(matches!(back, Cmd::LoadFeed { .. }));
        // A third switch hits the cache.
        let again = drag(&mut c, -90.0, 0.0, Instant::now());
        assert_eq!(again, Cmd::None);
    }

    #[test]
    fn tabs_locked_in_grid() {
        let mut c = coordinator();
        drag(&mut c, 0.0, 250.0, Instant::now());
        assert_eq!(c.update(NavMsg::SelectTab(ActiveTab::Friends), Instant::now()), Cmd::None);
        drag(&mut c, -120.0, 0.0, Instant::now());
        assert_eq!(c.active_tab(), ActiveTab::Discover);
        assert_eq!(c.mode(), NavigationMode::Grid);
    }

    #[test]
    fn header_taps() {
        let mut c = coordinator();
        let t = Instant::now();
        scroll(&mut c, 900.0, 800.0, 6000.0, t);
        assert_eq!(
            c.update(NavMsg::HeaderActivated, t),
            Cmd::ScrollTo {
                surface: SurfaceKind::Feed,
                offset: 0.0,
                smooth: true
            }
        );
        assert_eq!(
            c.update(NavMsg::HeaderActivated, t + Duration::from_millis(200)),
            Cmd::Navigate(NavTarget::Home)
        );
    }

    #[test]
    fn stale_recall_result_ignored() {
        let mut c = coordinator();
        let cmds = drag(&mut c, 0.0, 250.0, Instant::now()).into_vec();
        let Cmd::LoadRecall { ticket } = cmds[1] else {
            panic!("expected recall load, got {cmds:?}");
        };
        c.update(
            NavMsg::RecallLoaded {
                ticket: LoadTicket(ticket.0 + 100),
                result: Ok(vec![]),
            },
            Instant::now(),
        );
        assert_eq!(c.frame().recall_status, LoadStatus::Loading);
        c.update(NavMsg::RecallLoaded { ticket, result: Ok(vec![]) }, Instant::now());
        assert_eq!(c.frame().recall_status, LoadStatus::Ready { items: 0 });
    }

    #[test]
    fn failed_recall_keeps_mode_and_retries() {
        let mut c = coordinator();
        let cmds = drag(&mut c, 0.0, 250.0, Instant::now()).into_vec();
        let Cmd::LoadRecall { ticket } = cmds[1] else {
            panic!("expected recall load, got {cmds:?}");
        };
        c.update(
            NavMsg::RecallLoaded {
                ticket,
                result: Err(LoadError::Timeout),
            },
            Instant::now(),
        );
        assert_eq!(c.mode(), NavigationMode::Grid);
        assert_eq!(c.frame().recall_status, LoadStatus::Failed { retryable: true });

        let retry = c.update(NavMsg::Retry, Instant::now());
        let Cmd::LoadRecall { ticket: second } = retry else {
            panic!("expected reissued load, got {retry:?}");
        };
        assert!(second > ticket);
        assert_eq!(c.frame().recall_status, LoadStatus::Loading);
    }

    #[test]
    fn unretryable_failure_ignores_retry() {
        let mut c = coordinator();
        let Cmd::LoadFeed { ticket, tab } = c.init() else {
            panic!("expected initial feed load");
        };
        c.update(
            NavMsg::FeedLoaded {
                ticket,
                tab,
                result: Err(LoadError::Unauthorized),
            },
            Instant::now(),
        );
        assert_eq!(c.update(NavMsg::Retry, Instant::now()), Cmd::None);
    }

    #[test]
    fn recall_cached_across_visits() {
        let mut c = coordinator();
        let t = Instant::now();
        let cmds = drag(&mut c, 0.0, 250.0, t).into_vec();
        let Cmd::LoadRecall { ticket } = cmds[1] else {
            panic!("expected recall load");
        };
        c.update(NavMsg::RecallLoaded { ticket, result: Ok(vec![]) }, t);

        let back = t + Duration::from_secs(1);
        scroll(&mut c, 0.0, 800.0, 3000.0, back);
        drag(&mut c, 0.0, 250.0, back);
        assert_eq!(c.mode(), NavigationMode::Feed);

        let again = t + Duration::from_secs(2);
        let cmds = drag(&mut c, 0.0, 250.0, again).into_vec();
        assert_eq!(c.mode(), NavigationMode::Grid);
        assert_eq!(cmds, vec![Cmd::Haptic(Duration::from_millis(10))]);
    }

    #[test]
    fn tick_animates_snap_back() {
        let mut c = coordinator();
        let t = Instant::now();
        drag(&mut c, 0.0, 150.0, t);
        let before = c.frame().pull_progress;
        assert!(before > 0.0);
        for i in 0..120u32 {
            c.update(NavMsg::Tick, t + MS_16 * (12 + i));
        }
        assert_eq!(c.frame().pull_progress, 0.0);
        assert!(!c.frame().indicator_visible);
    }
}
