//! Coalescing state machine for the development loop.
//!
//! Two axes, build and restart, are each either idle or running with an
//! optional queued successor. A request that arrives while its axis is
//! running is remembered once and replayed when the run finishes, so no two
//! builds (or restarts) ever overlap and no trailing request is lost.
//!
//! The coordinator performs no I/O. Each event returns the [`Action`] the
//! caller must carry out, if any.

/// State of one coordination axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Idle,
    Running {
        /// Another run was requested while this one was in flight
        queued: bool,
    },
}

impl Axis {
    pub fn is_running(self) -> bool {
        matches!(self, Axis::Running { .. })
    }

    fn is_queued(self) -> bool {
        matches!(self, Axis::Running { queued: true })
    }
}

/// Work the caller must start after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartBuild,
    /// Stop the running app (if any) and launch it again
    Restart,
    BroadcastReload,
}

#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    build: Axis,
    restart: Axis,
    reload_pending: bool,
    /// The app has been launched at least once
    app_started: bool,
    /// The running restart is the initial launch
    launching: bool,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self) -> Axis {
        self.build
    }

    pub fn restart(&self) -> Axis {
        self.restart
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// True while the first launch of the app is in flight.
    pub fn is_launching(&self) -> bool {
        self.launching
    }

    pub fn build_requested(&mut self) -> Option<Action> {
        if self.build.is_running() {
            self.build = Axis::Running { queued: true };
            tracing::debug!("build requested while building, queued");
            return None;
        }

        self.build = Axis::Running { queued: false };
        if self.restart.is_running() {
            self.restart = Axis::Running { queued: false };
        }
        self.reload_pending = false;
        Some(Action::StartBuild)
    }

    /// A build cycle ended. The first cycle always launches the app, even
    /// when it failed; later cycles restart it only on success.
    pub fn build_finished(&mut self, success: bool) -> Option<Action> {
        if self.build.is_queued() {
            self.build = Axis::Running { queued: false };
            self.reload_pending = false;
            tracing::debug!("replaying queued build");
            return Some(Action::StartBuild);
        }
        self.build = Axis::Idle;

        if !self.app_started {
            self.app_started = true;
            self.launching = true;
            self.restart = Axis::Running { queued: false };
            return Some(Action::Restart);
        }

        if success {
            self.restart_requested()
        } else {
            None
        }
    }

    pub fn restart_requested(&mut self) -> Option<Action> {
        if self.restart.is_running() {
            self.restart = Axis::Running { queued: true };
            tracing::debug!("restart requested while restarting, queued");
            return None;
        }
        if !self.app_started {
            return None;
        }

        self.restart = Axis::Running { queued: false };
        self.reload_pending = false;
        Some(Action::Restart)
    }

    pub fn restart_finished(&mut self) -> Option<Action> {
        let initial_launch = std::mem::take(&mut self.launching);

        if self.restart.is_queued() {
            self.restart = Axis::Running { queued: false };
            self.reload_pending = false;
            tracing::debug!("replaying queued restart");
            return Some(Action::Restart);
        }
        self.restart = Axis::Idle;

        if !initial_launch && !self.build.is_running() {
            self.reload_pending = true;
        }
        None
    }

    /// The app reported that it is listening.
    pub fn ready(&mut self) -> Option<Action> {
        if std::mem::take(&mut self.reload_pending) {
            Some(Action::BroadcastReload)
        } else {
            None
        }
    }
}
