//! Environment lookups.

/// Reads an optional environment variable.
///
/// Unset and empty (after trimming) variables are both reported as `None`, so
/// `FINDASH_CONFIG=` in a shell behaves like not exporting it at all.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn unset_var_is_none() {
        // SAFETY: serialised test, no other thread touches the environment.
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_UNSET") };
        assert_eq!(get_env_var_opt("SHARED_UTILS_TEST_UNSET"), None);
    }

    #[test]
    #[serial]
    fn blank_var_is_none_and_value_is_trimmed() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", "   ") };
        assert_eq!(get_env_var_opt("SHARED_UTILS_TEST_BLANK"), None);

        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", " findash.toml ") };
        assert_eq!(
            get_env_var_opt("SHARED_UTILS_TEST_BLANK").as_deref(),
            Some("findash.toml")
        );
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_BLANK") };
    }
}
