use std::fmt;

/// Lifecycle of a task manager run.
///
/// Transitions are strictly sequential: `Uninitialized → Initialized → Running → CleanedUp`.
/// `Running` may be entered repeatedly; nothing leaves `CleanedUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initialized,
    Running,
    CleanedUp,
}

impl LifecycleState {
    pub fn can_register(self) -> bool {
        self == Self::Uninitialized
    }

    pub fn can_initialize(self) -> bool {
        self == Self::Uninitialized
    }

    pub fn can_run(self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }

    pub fn can_cleanup(self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::CleanedUp => "cleaned up",
        };
        f.write_str(name)
    }
}
