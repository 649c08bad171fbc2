//! Screen controllers for the dojo admin console.
//!
//! Each screen pairs a [`ListSynchronizer`] with a [`PanelSession`] and talks
//! to the backend only through the `dojo_client` service traits, so the same
//! controllers drive the CLI and the in-memory test fakes.

/// Clients list and create panel.
pub mod clients;
/// Instructors list, create/edit panel and lifecycle toggles.
pub mod instructors;
/// Notices, confirmations and the toast queue.
pub mod notify;
/// Side panel state shared by both screens.
pub mod panel;
/// Authoritative collection, filtered view and polling.
pub mod sync;

pub use clients::ClientsScreen;
pub use instructors::{ActionOutcome, InstructorsScreen};
pub use notify::{ConfirmPolicy, Confirmation, Notice, NoticeLevel, Notifier, Toast, ToastQueue};
pub use panel::{PanelMode, PanelSession, SubmitOutcome};
pub use sync::{FetchResult, ListSynchronizer, PollingHandle};
