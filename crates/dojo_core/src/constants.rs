//! Shared constants used across dojo crates.

use std::time::Duration;

/// Default REST base URL; resource collections live directly below it.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default base URL under which persisted photos are served.
pub const DEFAULT_UPLOADS_URL: &str = "http://localhost:8080/uploads";

/// Interval between silent refreshes of a list view.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// How long the inline client success message stays up before the panel closes.
pub const CLIENT_PANEL_CLOSE_DELAY: Duration = Duration::from_millis(1_500);

/// Auto-dismiss delay for success notices.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_millis(2_000);

/// Fallback text when an action failure carries no server message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";

/// Shown when a submit is attempted with an invalid form.
pub const INVALID_FORM_MESSAGE: &str = "Complete todos los campos correctamente";

/// Shown when a create submit is attempted without a photo.
pub const MISSING_PHOTO_MESSAGE: &str = "Seleccione una foto";
