use crate::poll::CreatePollResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// A notice on screen; `seq` tells a stale dismiss timer apart from the
/// current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub seq: u64,
    pub notice: Notice,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Polls,
    Create,
}

/// Navigation half of the app shell: current tab and the list refresh
/// counter. Toasts live in [`Toasts`] so that a notice never touches the
/// state the tab content is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shell {
    tab: Tab,
    refresh: u64,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn refresh_trigger(&self) -> u64 {
        self.refresh
    }

    /// Applies a create outcome and returns the notice to show. Only a
    /// success changes navigation.
    pub fn poll_created(&mut self, result: &CreatePollResult) -> Notice {
        match result {
            CreatePollResult::Created(id) => {
                self.refresh += 1;
                self.tab = Tab::Polls;
                Notice::success(format!("Poll #{id} created successfully!"))
            }
            CreatePollResult::Failed(msg) if msg.trim().is_empty() => {
                Notice::error("Failed to create poll")
            }
            CreatePollResult::Failed(msg) => Notice::error(msg.clone()),
        }
    }
}

/// The visible toast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toasts {
    toast: Option<Toast>,
    next_seq: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn notify(&mut self, notice: Notice) -> u64 {
        self.next_seq += 1;
        self.toast = Some(Toast {
            seq: self.next_seq,
            notice,
        });
        self.next_seq
    }

    pub fn dismiss(&mut self) {
        self.toast = None;
    }

    /// Hides the toast only if it is still the one with `seq`.
    pub fn expire(&mut self, seq: u64) {
        if self.toast.as_ref().is_some_and(|t| t.seq == seq) {
            self.toast = None;
        }
    }
}
