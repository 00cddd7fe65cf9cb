//! Temporal navigation state: the applied period driving the page data, the
//! pending selection the user is still editing, and today's period.

use serde::Deserialize;
use tracing::debug;

use crate::period::Period;

/// How month steps are committed.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavMode {
    /// Steps move the pending selection; `apply` commits it.
    #[default]
    Pending,
    /// Steps commit straight away; pending always equals applied.
    Immediate,
}

/// Where the applied period comes from when a page loads.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitStrategy {
    /// Ask the server to forget the stored date and start from today.
    #[default]
    Reset,
    /// Reuse the date stored in the server session.
    Restore,
}

/// Side effect the caller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Only the display changed.
    Render,
    /// Store the period with `set-viewing-date`, then reload page data.
    Persist(Period),
    /// Clear the stored date with `reset-viewing-date`, then reload page data.
    Reset(Period),
}

impl NavCommand {
    pub fn commits(self) -> bool {
        !matches!(self, Self::Render)
    }
}

/// Whether the projected-balance panel should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancePanel {
    Hidden,
    Load(Period),
}

/// Everything the DOM needs, derived from state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub display_label: String,
    pub applied_label: String,
    pub apply_disabled: bool,
    pub show_applied_hint: bool,
    pub show_not_current_alert: bool,
    pub balance: BalancePanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalNav {
    mode: NavMode,
    applied: Period,
    pending: Period,
    current: Period,
    generation: u64,
}

impl TemporalNav {
    /// Starts on `current`, before the server value is known.
    pub fn new(mode: NavMode, current: Period) -> Self {
        Self {
            mode,
            applied: current,
            pending: current,
            current,
            generation: 0,
        }
    }

    pub fn applied(&self) -> Period {
        self.applied
    }

    pub fn pending(&self) -> Period {
        self.pending
    }

    /// Bumped on every mutation. Async work started at generation `g` is stale
    /// once `generation() != g`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current_generation(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != self.applied
    }

    /// Seeds both applied and pending from the server value.
    pub fn seed(&mut self, applied: Period) {
        debug!(%applied, "seeding temporal navigation");
        self.applied = applied;
        self.pending = applied;
        self.touch();
    }

    /// Refreshes today's period, e.g. after the server reported it.
    pub fn set_current(&mut self, current: Period) {
        if self.current != current {
            self.current = current;
            self.touch();
        }
    }

    pub fn prev_month(&mut self) -> NavCommand {
        self.step(-1)
    }

    pub fn next_month(&mut self) -> NavCommand {
        self.step(1)
    }

    /// Commits the pending selection.
    pub fn apply(&mut self) -> NavCommand {
        self.applied = self.pending;
        self.touch();
        debug!(applied = %self.applied, "applied pending viewing date");
        NavCommand::Persist(self.applied)
    }

    /// Returns to today's period in both applied and pending state.
    pub fn go_to_today(&mut self) -> NavCommand {
        self.applied = self.current;
        self.pending = self.current;
        self.touch();
        debug!(current = %self.current, "reset viewing date to today");
        NavCommand::Reset(self.current)
    }

    /// External setter. Returns `None` and leaves the state untouched when
    /// the input is not a valid calendar month.
    pub fn set_pending(&mut self, month: f64, year: f64) -> Option<NavCommand> {
        let Some(period) = Period::from_js_numbers(month, year) else {
            debug!(month, year, "ignoring invalid pending viewing date");
            return None;
        };
        self.pending = period;
        self.touch();
        Some(match self.mode {
            NavMode::Pending => NavCommand::Render,
            NavMode::Immediate => self.apply(),
        })
    }

    pub fn view(&self) -> NavView {
        let dirty = self.is_dirty();
        let away_from_today = self.applied != self.current;
        let balance = if away_from_today && !dirty {
            BalancePanel::Load(self.applied)
        } else {
            BalancePanel::Hidden
        };

        NavView {
            display_label: self.pending.label(),
            applied_label: self.applied.label(),
            apply_disabled: !dirty,
            show_applied_hint: dirty,
            show_not_current_alert: away_from_today,
            balance,
        }
    }

    fn step(&mut self, months: i32) -> NavCommand {
        self.pending = self.pending.shift(months);
        self.touch();
        match self.mode {
            NavMode::Pending => {
                debug!(pending = %self.pending, "moved pending viewing date");
                NavCommand::Render
            }
            NavMode::Immediate => self.apply(),
        }
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Sends persists one at a time. Commands issued while a request is in
/// flight collapse into the latest, since each one overwrites the stored date.
#[derive(Debug, Default)]
pub struct CommitQueue {
    next: Option<NavCommand>,
    in_flight: bool,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `command`; returns `true` when the caller must start draining.
    pub fn push(&mut self, command: NavCommand) -> bool {
        if let Some(dropped) = self.next.replace(command) {
            debug!(?dropped, "superseded queued commit");
        }
        if self.in_flight {
            false
        } else {
            self.in_flight = true;
            true
        }
    }

    /// Next command to send. `None` ends the drain.
    pub fn pop(&mut self) -> Option<NavCommand> {
        let next = self.next.take();
        if next.is_none() {
            self.in_flight = false;
        }
        next
    }

    /// Nothing newer is waiting behind the request that just finished.
    pub fn is_settled(&self) -> bool {
        self.next.is_none()
    }
}
