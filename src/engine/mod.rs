//! The composed navigation state machine.
//!
//! [`GridNavigationEngine`] receives directional, activation, and lifecycle
//! events from the host, updates the focus/detail state accordingly, and
//! exposes the observable outputs a renderer needs. All invalid inputs are
//! absorbed as no-ops; this is interactive UI state, not a data-integrity
//! boundary, and races (a list shrinking under an in-flight move, lifecycle
//! signals arriving out of order) are normal operation.
//!
//! Deferred work (the settling delay before an initial focus claim or a
//! post-dismissal restoration) is held as a single pending action with a
//! deadline and pumped by `Tick` events, so the whole engine runs to
//! completion synchronously per event.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::coordinator::NavigationCoordinator;
use crate::error::{NavError, Result};
use crate::focus::{FocusController, MoveOutcome};
use crate::items::{GridEntry, ItemId, ItemStore};
use crate::logging::{LogLevel, Logger, field};
use crate::metrics::NavMetrics;
use crate::scroll::{NullScrollSync, ScrollRequester, ScrollSync};
use crate::topology::Direction;
use crate::visibility::VisibilityTracker;

pub mod audit;

use audit::{NavAudit, NavAuditEvent, NavAuditStage, NullNavAudit};

/// Configuration knobs for one engine instance.
#[derive(Clone)]
pub struct EngineConfig {
    /// Grid width. Fixed for the engine's lifetime; must be at least 1.
    pub column_count: usize,
    /// Delay between a lifecycle trigger and the focus claim/restore it
    /// schedules, letting the host finish installing its view hierarchy.
    pub settle_delay: Duration,
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<NavMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Audit sink observing engine stages.
    pub audit: Arc<dyn NavAudit>,
    /// Scroll-into-view contract implemented by the presentation layer.
    pub scroll: Arc<dyn ScrollSync>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            column_count: 1,
            settle_delay: Duration::from_millis(40),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "gridnav::engine.metrics".to_string(),
            audit: Arc::new(NullNavAudit),
            scroll: Arc::new(NullScrollSync),
        }
    }
}

impl EngineConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(NavMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Events delivered to the engine by its host.
#[derive(Debug, Clone)]
pub enum NavEvent<T> {
    /// Directional input while the grid is interactive.
    Direction(Direction),
    /// Confirm input: open a detail for the focused entry.
    Activate,
    /// Direct selection (pointer activation) of a specific index,
    /// bypassing the current focus.
    Select { index: usize },
    /// The host replaced the entry sequence wholesale.
    ItemsReplaced(Vec<T>),
    /// The grid surface became frontmost.
    Appeared,
    /// The grid surface stopped being frontmost.
    Disappeared,
    /// The detail presentation was dismissed (user-initiated back action).
    DetailDismissed,
    /// Synthetic clock pulse; runs any due scheduled follow-up.
    Tick { elapsed: Duration },
}

/// Observable engine state for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSnapshot {
    pub focused: Option<usize>,
    pub detail_open: bool,
    pub selected_id: Option<ItemId>,
    pub item_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    InitialClaim,
    Restore { index: usize },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    kind: PendingKind,
    due: Instant,
}

pub struct GridNavigationEngine<T> {
    items: ItemStore<T>,
    focus: FocusController,
    visibility: VisibilityTracker,
    coordinator: NavigationCoordinator<T>,
    pending: Option<Pending>,
    config: EngineConfig,
    started_at: Instant,
    last_metrics_emit: Option<Instant>,
}

impl<T> std::fmt::Debug for GridNavigationEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridNavigationEngine")
            .field("pending", &self.pending)
            .field("column_count", &self.config.column_count)
            .finish_non_exhaustive()
    }
}

impl<T: GridEntry> GridNavigationEngine<T> {
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.column_count == 0 {
            return Err(NavError::InvalidColumnCount);
        }

        let focus = FocusController::new(ScrollRequester::new(Arc::clone(&config.scroll)));
        let engine = Self {
            items: ItemStore::new(),
            focus,
            visibility: VisibilityTracker::new(),
            coordinator: NavigationCoordinator::new(),
            pending: None,
            config,
            started_at: Instant::now(),
            last_metrics_emit: None,
        };

        engine.audit(
            NavAuditStage::EngineConstructed,
            [field("columns", json!(engine.config.column_count))],
        );
        engine.log(
            LogLevel::Info,
            "engine_started",
            [field("columns", json!(engine.config.column_count))],
        );
        Ok(engine)
    }

    /// Dispatch one event. The only error path is a data-integrity failure
    /// in a sequence replacement; every other invalid input is absorbed.
    pub fn handle_event(&mut self, event: NavEvent<T>) -> Result<()> {
        let kind = Self::describe_event(&event);
        self.record_metric(NavMetrics::record_event);

        match event {
            NavEvent::Direction(direction) => self.handle_direction(direction),
            NavEvent::Activate => self.handle_activate(),
            NavEvent::Select { index } => self.handle_select(index),
            NavEvent::ItemsReplaced(entries) => self.handle_items_replaced(entries)?,
            NavEvent::Appeared => self.handle_appeared(),
            NavEvent::Disappeared => self.handle_disappeared(),
            NavEvent::DetailDismissed => self.handle_detail_dismissed(),
            NavEvent::Tick { .. } => self.pump(Instant::now()),
        }

        self.audit(
            NavAuditStage::EventDispatched,
            [field("event", json!(kind))],
        );
        self.maybe_emit_metrics();
        Ok(())
    }

    /// Replay a canned event sequence, stopping at the first error.
    pub fn apply_script(&mut self, events: impl IntoIterator<Item = NavEvent<T>>) -> Result<()> {
        for event in events {
            self.handle_event(event)?;
        }
        Ok(())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub fn is_detail_open(&self) -> bool {
        self.coordinator.is_detail_open()
    }

    pub fn selected(&self) -> Option<&T> {
        self.coordinator.selected()
    }

    pub fn entries(&self) -> &[T] {
        self.items.entries()
    }

    pub fn column_count(&self) -> usize {
        self.config.column_count
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            focused: self.focus.focused(),
            detail_open: self.coordinator.is_detail_open(),
            selected_id: self.coordinator.selected().map(GridEntry::entry_id),
            item_count: self.items.len(),
        }
    }

    fn handle_direction(&mut self, direction: Direction) {
        if self.coordinator.is_detail_open() {
            // Grid interaction is suspended while a detail owns the surface.
            self.record_metric(NavMetrics::record_absorbed_move);
            self.audit(
                NavAuditStage::MoveAbsorbed,
                [field("reason", json!("detail_open"))],
            );
            return;
        }

        let outcome = self.focus.move_focus(
            direction,
            self.items.len(),
            self.config.column_count,
        );
        match outcome {
            MoveOutcome::Moved(index) => {
                self.record_metric(NavMetrics::record_move);
                self.audit(NavAuditStage::FocusMoved, [field("index", json!(index))]);
                self.log(
                    LogLevel::Debug,
                    "focus_moved",
                    [
                        field("direction", json!(format!("{direction:?}"))),
                        field("index", json!(index)),
                    ],
                );
            }
            MoveOutcome::Absorbed => {
                self.record_metric(NavMetrics::record_absorbed_move);
                self.audit(
                    NavAuditStage::MoveAbsorbed,
                    [field("reason", json!("edge"))],
                );
            }
            MoveOutcome::NoFocus => {
                self.record_metric(NavMetrics::record_absorbed_move);
                self.audit(
                    NavAuditStage::MoveAbsorbed,
                    [field("reason", json!("no_focus"))],
                );
            }
        }
    }

    fn handle_activate(&mut self) {
        if self.coordinator.is_detail_open() {
            return;
        }
        let Some(index) = self.focus.focused() else {
            return;
        };
        if let Some(entry) = self.items.get(index).cloned() {
            self.open_detail(index, entry);
        }
    }

    fn handle_select(&mut self, index: usize) {
        if self.coordinator.is_detail_open() {
            return;
        }
        match self.items.get(index).cloned() {
            Some(entry) => self.open_detail(index, entry),
            None => self.log(
                LogLevel::Debug,
                "select_out_of_bounds",
                [field("index", json!(index))],
            ),
        }
    }

    fn open_detail(&mut self, index: usize, entry: T) {
        let id = entry.entry_id();
        self.coordinator.open(index, entry);
        // The grid surrenders the cursor while the detail owns the surface;
        // restoration later works from the remembered-open index.
        self.focus.clear_focus();
        self.record_metric(NavMetrics::record_detail_open);
        self.audit(
            NavAuditStage::DetailOpened,
            [field("index", json!(index)), field("id", json!(id.clone()))],
        );
        self.log(
            LogLevel::Info,
            "detail_opened",
            [field("index", json!(index)), field("id", json!(id))],
        );
    }

    fn handle_items_replaced(&mut self, entries: Vec<T>) -> Result<()> {
        let change = self.items.replace(entries)?;
        let released = self.focus.release_out_of_bounds(self.items.len());

        if change.became_populated && self.visibility.is_visible() {
            self.schedule_initial_claim();
        }

        self.log(
            LogLevel::Info,
            "items_replaced",
            [
                field("previous_count", json!(change.previous_count)),
                field("count", json!(change.count)),
                field("identity_changed", json!(change.identity_changed)),
                field("focus_released", json!(released)),
            ],
        );
        Ok(())
    }

    fn handle_appeared(&mut self) {
        self.visibility.mark_appeared();

        if self.visibility.has_deferred_restore() {
            match self.coordinator.remembered_open() {
                Some(index) => self.schedule_restore(index),
                // Parked flag without a target cannot be serviced; drop it.
                None => {
                    self.visibility.take_deferred_restore();
                }
            }
        } else if self.focus.focused().is_none() && !self.items.is_empty() {
            self.schedule_initial_claim();
        }

        self.log(LogLevel::Debug, "appeared", []);
    }

    fn handle_disappeared(&mut self) {
        self.visibility.mark_disappeared();

        if let Some(pending) = self.pending.take() {
            if let PendingKind::Restore { .. } = pending.kind {
                // The restoration is still owed; retry on the next appearance.
                self.visibility.defer_restore();
            }
            self.audit(
                NavAuditStage::PendingCancelled,
                [field("kind", json!(Self::describe_pending(pending.kind)))],
            );
            self.log(
                LogLevel::Debug,
                "pending_cancelled",
                [field("kind", json!(Self::describe_pending(pending.kind)))],
            );
        }

        self.log(LogLevel::Debug, "disappeared", []);
    }

    fn handle_detail_dismissed(&mut self) {
        let Some(index) = self.coordinator.dismiss() else {
            return;
        };

        self.audit(
            NavAuditStage::DetailDismissed,
            [field("index", json!(index))],
        );

        if self.visibility.is_visible() {
            self.schedule_restore(index);
        } else {
            self.visibility.defer_restore();
            self.record_metric(NavMetrics::record_deferred_restore);
            self.audit(NavAuditStage::RestoreDeferred, [field("index", json!(index))]);
            self.log(
                LogLevel::Info,
                "restore_deferred",
                [field("index", json!(index))],
            );
        }
    }

    fn schedule_initial_claim(&mut self) {
        // Never stomp a scheduled restoration; the claim would steal the
        // cursor from the index the user is returning to.
        if matches!(
            self.pending,
            Some(Pending {
                kind: PendingKind::Restore { .. },
                ..
            })
        ) {
            return;
        }
        self.schedule(PendingKind::InitialClaim);
        self.audit(NavAuditStage::InitialFocusScheduled, []);
    }

    fn schedule_restore(&mut self, index: usize) {
        self.schedule(PendingKind::Restore { index });
        self.audit(
            NavAuditStage::RestoreScheduled,
            [field("index", json!(index))],
        );
        self.log(
            LogLevel::Debug,
            "restore_scheduled",
            [field("index", json!(index))],
        );
    }

    /// Arm the single scheduled follow-up. A newer schedule supersedes any
    /// older one, which is what makes rapid appear/dismiss sequences safe:
    /// only the latest intent survives.
    fn schedule(&mut self, kind: PendingKind) {
        self.pending = Some(Pending {
            kind,
            due: Instant::now() + self.config.settle_delay,
        });
    }

    /// Run the scheduled follow-up if its settling deadline has passed.
    fn pump(&mut self, now: Instant) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.due > now {
            return;
        }
        self.pending = None;

        match pending.kind {
            PendingKind::InitialClaim => {
                if self.visibility.is_visible() && self.focus.claim_initial(self.items.len()) {
                    self.audit(NavAuditStage::InitialFocusClaimed, []);
                    self.log(
                        LogLevel::Info,
                        "initial_focus_claimed",
                        [field("index", json!(0))],
                    );
                }
            }
            PendingKind::Restore { index } => {
                if !self.visibility.is_visible() {
                    // Lost visibility between scheduling and the deadline.
                    self.visibility.defer_restore();
                    return;
                }
                self.visibility.take_deferred_restore();
                if self.focus.set_focus(index, self.items.len()) {
                    self.record_metric(NavMetrics::record_restore);
                    self.audit(
                        NavAuditStage::RestoreCompleted,
                        [field("index", json!(index))],
                    );
                    self.log(
                        LogLevel::Info,
                        "focus_restored",
                        [field("index", json!(index))],
                    );
                } else {
                    self.audit(NavAuditStage::RestoreDropped, [field("index", json!(index))]);
                    self.log(
                        LogLevel::Warn,
                        "restore_target_out_of_bounds",
                        [
                            field("index", json!(index)),
                            field("count", json!(self.items.len())),
                        ],
                    );
                }
            }
        }
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = self.config.logger.as_ref() {
            let _ = logger.emit(level, "gridnav::engine", message, fields);
        }
    }

    fn audit(&self, stage: NavAuditStage, details: impl IntoIterator<Item = (String, Value)>) {
        self.config
            .audit
            .record(NavAuditEvent::with_details(stage, details));
    }

    fn record_metric(&self, record: impl FnOnce(&mut NavMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval == Duration::from_millis(0) {
            return;
        }

        let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        else {
            return;
        };

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = now.duration_since(self.started_at);
        if let Ok(guard) = metrics.lock() {
            let record = guard.snapshot(uptime).to_log_record(&self.config.metrics_target);
            let _ = logger.record(record);
        }
    }

    fn describe_event(event: &NavEvent<T>) -> &'static str {
        match event {
            NavEvent::Direction(_) => "direction",
            NavEvent::Activate => "activate",
            NavEvent::Select { .. } => "select",
            NavEvent::ItemsReplaced(_) => "items_replaced",
            NavEvent::Appeared => "appeared",
            NavEvent::Disappeared => "disappeared",
            NavEvent::DetailDismissed => "detail_dismissed",
            NavEvent::Tick { .. } => "tick",
        }
    }

    fn describe_pending(kind: PendingKind) -> &'static str {
        match kind {
            PendingKind::InitialClaim => "initial_claim",
            PendingKind::Restore { .. } => "restore",
        }
    }
}
