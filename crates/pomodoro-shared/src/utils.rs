//! Utility functions

use chrono::Utc;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Token prefix safe to print in logs; tokens double as bearer credentials.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}
