use std::sync::Arc;

use postbox_db::Database;

use crate::email::EmailPolicy;

pub type AppState = Arc<AppStateInner>;

/// Everything a request handler needs, built once by the server at startup.
pub struct AppStateInner {
    pub db: Database,
    pub email_policy: EmailPolicy,
}
