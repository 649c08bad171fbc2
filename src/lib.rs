//! Root crate facade for the dojo admin console.

pub use dojo_admin as admin;
pub use dojo_client as client;
pub use dojo_core as core;

pub use dojo_admin::{ClientsScreen, InstructorsScreen, ListSynchronizer, Notifier, ToastQueue};
pub use dojo_client::{ApiClient, ApiError};
pub use dojo_core::{Config, CoreError};
