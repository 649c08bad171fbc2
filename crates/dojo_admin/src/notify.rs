//! Operator-facing notices and confirmations.
//!
//! Controllers never present anything themselves; they hand [`Notice`]s and
//! [`Confirmation`]s to an injected [`Notifier`].

use dojo_core::SUCCESS_NOTICE_TTL;
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Maximum number of toasts kept on screen.
pub const TOAST_LIMIT: usize = 4;

/// Lifetime of a toast whose notice does not dismiss itself.
pub const STICKY_TOAST_TTL: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
    /// `None` keeps the notice up until the operator dismisses it.
    pub auto_dismiss: Option<Duration>,
}

impl Notice {
    /// Success notice that dismisses itself after [`SUCCESS_NOTICE_TTL`].
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            text: text.into(),
            auto_dismiss: Some(SUCCESS_NOTICE_TTL),
        }
    }

    /// Error notice that stays until dismissed.
    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            text: text.into(),
            auto_dismiss: None,
        }
    }
}

/// A yes/no question asked before a destructive or visible action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            confirm_label: confirm_label.into(),
            cancel_label: "Cancelar".to_string(),
        }
    }
}

/// Presents notices and asks confirmations on behalf of the controllers.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    /// `true` when the operator accepted.
    fn confirm(&mut self, request: &Confirmation) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }

    fn confirm(&mut self, request: &Confirmation) -> bool {
        (**self).confirm(request)
    }
}

/// How a [`ToastQueue`] answers confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    Accept,
    #[default]
    Decline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// Bounded stack of toasts, newest last.
///
/// A notice identical to the newest toast extends that toast instead of
/// stacking a duplicate.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    policy: ConfirmPolicy,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(ConfirmPolicy::default())
    }
}

impl ToastQueue {
    pub fn new(policy: ConfirmPolicy) -> Self {
        Self {
            toasts: VecDeque::with_capacity(TOAST_LIMIT),
            policy,
        }
    }

    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        let expires_at = now + notice.auto_dismiss.unwrap_or(STICKY_TOAST_TTL);
        if let Some(last) = self.toasts.back_mut() {
            if last.notice == notice {
                last.expires_at = expires_at;
                return;
            }
        }
        self.toasts.push_back(Toast { notice, expires_at });
        while self.toasts.len() > TOAST_LIMIT {
            self.toasts.pop_front();
        }
    }

    /// Drop every toast that has expired at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn confirm(&mut self, request: &Confirmation) -> bool {
        let accepted = self.policy == ConfirmPolicy::Accept;
        info!(title = %request.title, accepted, "confirmation answered by policy");
        accepted
    }
}
