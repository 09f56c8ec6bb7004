//! Database initialization and shared application state
//!
//! Only the demo user and their settings are persisted: campaign and link
//! records are an in-memory store seeded at startup, so dashboard "writes"
//! (creating a link) are transient by design and vanish on restart. The
//! embedded redb database keeps the theme preference across restarts.

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use std::sync::Arc;

use crate::model::{Campaign, Theme, TrackedLink, User, UserSettings};

/// User accounts table
///
/// Key: user id as string
/// Value: JSON-serialized User as string
///
/// Example:
/// - Key: "usr_demo"
/// - Value: '{"id":"usr_demo","name":"Jason","email":"demo@linkboard.dev"}'
pub const TABLE_USERS: TableDefinition<&str, &str> = TableDefinition::new("users_v1");

/// Per-user settings table
///
/// Key: user id as string
/// Value: JSON-serialized UserSettings as string
pub const TABLE_SETTINGS: TableDefinition<&str, &str> = TableDefinition::new("settings_v1");

/// The single account the demo authentication resolves every session to
pub const DEMO_USER_ID: &str = "usr_demo";

/// Application state shared across all request handlers
///
/// The campaign list is immutable after seeding. The link list accepts
/// transient appends; writers take the lock, build the replacement list and
/// swap it wholesale, so readers never observe a partial update.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,

    /// Static campaign record store
    pub campaigns: Arc<Vec<Campaign>>,

    /// Link record store; seeded at startup, transiently appended to
    pub links: Arc<RwLock<Vec<TrackedLink>>>,
}

/// Initializes the embedded database and seeds the demo account
///
/// This function:
/// 1. Creates or opens the database file at the specified path
/// 2. Opens the users and settings tables
/// 3. Writes the demo user, keeping any previously saved theme
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "data.db")
///
/// # Returns
///
/// * `Ok(Database)` - Successfully initialized database instance
/// * `Err(redb::Error)` - Database initialization error
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        let mut users = write_txn.open_table(TABLE_USERS)?;
        let mut settings = write_txn.open_table(TABLE_SETTINGS)?;

        // Re-seed the account record on every start; any rename ships with
        // the binary
        let user = User {
            id: DEMO_USER_ID.to_string(),
            name: "Jason".to_string(),
            email: "demo@linkboard.dev".to_string(),
        };
        let user_json = serde_json::to_string(&user).unwrap();
        users.insert(DEMO_USER_ID, user_json.as_str())?;

        // Settings are only defaulted when absent so a saved theme survives
        // restarts
        if settings.get(DEMO_USER_ID)?.is_none() {
            let defaults = UserSettings {
                theme: Theme::Light,
            };
            let settings_json = serde_json::to_string(&defaults).unwrap();
            settings.insert(DEMO_USER_ID, settings_json.as_str())?;
        }
    }
    write_txn.commit()?;

    Ok(db)
}
