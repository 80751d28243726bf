/// Environment variable names read by [`InitConfig::from_env`].
///
/// These are purely helpers; handlers themselves never look at the
/// environment.
///
/// [`InitConfig::from_env`]: crate::init::InitConfig::from_env

/// Text prepended to every line written by the default text handler.
pub const EVENTS_PREFIX_ENV: &str = "EVENTS_PREFIX";

/// `1`/`true` renders event args below the message line.
pub const EVENTS_ENABLE_ARGS_ENV: &str = "EVENTS_ENABLE_ARGS";

/// strftime layout for the default text handler; empty disables the time.
pub const EVENTS_TIME_FORMAT_ENV: &str = "EVENTS_TIME_FORMAT";

/// `1`/`true` selects the text handler even when stdout is not a terminal.
pub const EVENTS_FORCE_TEXT_ENV: &str = "EVENTS_FORCE_TEXT";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a boolean flag; `1`, `true`, `yes` and `on` (any case) are true.
pub fn env_flag(key: &str) -> bool {
    matches!(
        env_or(key, "").trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(env_or("EVENTS_TEST_UNSET_VARIABLE", "fallback"), "fallback");
    }

    #[test]
    fn env_flag_parses_truthy_values() {
        std::env::set_var("EVENTS_TEST_FLAG_ON", "Yes");
        std::env::set_var("EVENTS_TEST_FLAG_OFF", "0");
        assert!(env_flag("EVENTS_TEST_FLAG_ON"));
        assert!(!env_flag("EVENTS_TEST_FLAG_OFF"));
        assert!(!env_flag("EVENTS_TEST_FLAG_UNSET"));
    }
}
