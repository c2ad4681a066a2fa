//! Application-wide constants

pub const TOKEN_LENGTH: usize = 16;
pub const SESSIONS_COLLECTION: &str = "sessions";
pub const USERS_COLLECTION: &str = "users";
pub const TOKEN_FIELD: &str = "token";
pub const USERNAME_FIELD: &str = "username";
pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const TOKEN_STORAGE_KEY: &str = "persist-pomodoro-token";
pub const ROOT_BANNER: &str = "this is the server of the persist pomodoro timer";
pub const NOT_FOUND_BODY: &str = "page not found";
