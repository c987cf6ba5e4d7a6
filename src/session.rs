// File: src/session.rs
// Cookie handling standing in for the browser's `credentials: include`.
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Applies one `Set-Cookie` header value. Returns true if the jar changed.
    ///
    /// Only `name=value` and `Max-Age` are honoured; the server is a single
    /// origin so domain and path scoping do not matter.
    pub fn store_set_cookie(&mut self, header: &str) -> bool {
        let mut parts = header.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
            return false;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return false;
        }

        let expired = parts.any(|attr| {
            attr.split_once('=').is_some_and(|(k, v)| {
                k.trim().eq_ignore_ascii_case("max-age")
                    && v.trim().parse::<i64>().is_ok_and(|secs| secs <= 0)
            })
        });

        if expired || value.is_empty() {
            return self.cookies.remove(name).is_some();
        }
        self.cookies.insert(name.to_string(), value.to_string()) != Some(value.to_string())
    }

    /// Value for the `Cookie` request header, if there is anything to send.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }
}

/// On-disk home of the cookie jar.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable or missing files yield an empty jar.
    pub fn load(&self) -> CookieJar {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                CookieJar::default()
            }),
            Err(_) => CookieJar::default(),
        }
    }

    pub fn save(&self, jar: &CookieJar) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(jar)?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        FileExt::lock_exclusive(&file)?;
        file.set_len(0)?;
        file.write_all(raw.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cookie_keeps_only_name_and_value() {
        let mut jar = CookieJar::default();
        assert!(jar.store_set_cookie("JSESSIONID=abc123; Path=/; HttpOnly"));
        assert_eq!(jar.get("JSESSIONID"), Some("abc123"));
        assert_eq!(jar.header_value().as_deref(), Some("JSESSIONID=abc123"));
    }

    #[test]
    fn same_cookie_twice_is_not_a_change() {
        let mut jar = CookieJar::default();
        assert!(jar.store_set_cookie("sid=1"));
        assert!(!jar.store_set_cookie("sid=1; Path=/"));
        assert!(jar.store_set_cookie("sid=2"));
    }

    #[test]
    fn quoted_values_are_sent_back_verbatim() {
        let mut jar = CookieJar::default();
        jar.store_set_cookie(r#"sid="abc"; Path=/"#);
        assert_eq!(jar.header_value().as_deref(), Some(r#"sid="abc""#));
    }

    #[test]
    fn max_age_zero_removes() {
        let mut jar = CookieJar::default();
        jar.store_set_cookie("sid=1");
        jar.store_set_cookie("theme=dark");
        assert!(jar.store_set_cookie("sid=; Max-Age=0; Path=/"));
        assert_eq!(jar.header_value().as_deref(), Some("theme=dark"));
    }

    #[test]
    fn malformed_headers_are_ignored() {
        let mut jar = CookieJar::default();
        assert!(!jar.store_set_cookie("garbage"));
        assert!(!jar.store_set_cookie("=value"));
        assert!(jar.is_empty());
        assert_eq!(jar.header_value(), None);
    }

    #[test]
    fn store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("data").join("session.json"));
        assert!(store.load().is_empty());

        let mut jar = CookieJar::default();
        jar.store_set_cookie("sid=xyz");
        store.save(&jar).unwrap();
        assert_eq!(store.load(), jar);

        // A shorter jar must not leave trailing bytes from the previous one.
        jar.clear();
        store.save(&jar).unwrap();
        assert!(store.load().is_empty());

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }
}
