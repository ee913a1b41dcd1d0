use std::collections::HashMap;

/// Snapshot of the process environment taken once at startup.
///
/// Absent keys and keys holding an empty string are treated identically:
/// both read back as "not set".
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Capture the current process environment.
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `name`, or `None` when it is missing or empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_are_not_set() {
        let env = Env::from_pairs([("EMPTY", ""), ("SET", "1")]);
        assert!(!env.is_set("MISSING"));
        assert!(!env.is_set("EMPTY"));
        assert_eq!(env.get("EMPTY"), None);
        assert_eq!(env.get("SET"), Some("1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("CI_SOURCE_TEST_NON_UTF8", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
        std::env::set_var("CI_SOURCE_TEST_UTF8", "yes");

        let env = Env::from_process();
        assert!(!env.is_set("CI_SOURCE_TEST_NON_UTF8"));
        assert_eq!(env.get("CI_SOURCE_TEST_UTF8"), Some("yes"));

        std::env::remove_var("CI_SOURCE_TEST_NON_UTF8");
        std::env::remove_var("CI_SOURCE_TEST_UTF8");
    }

    #[test]
    fn test_whitespace_value_counts_as_set() {
        let env = Env::from_pairs([("SPACE", " ")]);
        assert!(env.is_set("SPACE"));
    }
}
