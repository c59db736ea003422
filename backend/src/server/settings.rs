//! Service settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 80;
const DEFAULT_IMAGES: &str = "./images/";

fn default_fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogue.json")
}

/// Values controlling the listener and storage selection.
///
/// Read from `CATALOGUE_*` environment variables, CLI flags and config
/// files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Directory holding product images.
    pub images: Option<PathBuf>,
    /// PostgreSQL DSN. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// JSON fixture seeding the in-memory store.
    pub fixture_path: Option<PathBuf>,
}

impl ServerSettings {
    /// Interface to bind, `0.0.0.0` by default.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Listener port, 80 by default.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    ///
    /// Returns an error when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let ip = self.host().parse().map_err(|err| {
            std::io::Error::other(format!("invalid host {:?}: {err}", self.host()))
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Image root, `./images/` by default.
    #[must_use]
    pub fn images(&self) -> PathBuf {
        self.images
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES))
    }

    /// Database DSN, treating a blank value as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Seed file for the in-memory store, the bundled fixture by default.
    #[must_use]
    pub fn fixture_path(&self) -> PathBuf {
        self.fixture_path
            .clone()
            .unwrap_or_else(default_fixture_path)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 5] = [
        "CATALOGUE_HOST",
        "CATALOGUE_PORT",
        "CATALOGUE_IMAGES",
        "CATALOGUE_DATABASE_URL",
        "CATALOGUE_FIXTURE_PATH",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("catalogue")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 80);
        assert_eq!(settings.images(), PathBuf::from("./images/"));
        assert!(settings.database_url().is_none());
        assert_eq!(settings.fixture_path(), default_fixture_path());
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "0.0.0.0:80".parse::<SocketAddr>().expect("socket address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOGUE_HOST", Some("127.0.0.1".to_owned())),
            ("CATALOGUE_PORT", Some("8081".to_owned())),
            ("CATALOGUE_IMAGES", Some("/srv/images".to_owned())),
            (
                "CATALOGUE_DATABASE_URL",
                Some("postgres://catalogue@db/socksdb".to_owned()),
            ),
            ("CATALOGUE_FIXTURE_PATH", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "127.0.0.1:8081".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(settings.images(), PathBuf::from("/srv/images"));
        assert_eq!(
            settings.database_url(),
            Some("postgres://catalogue@db/socksdb")
        );
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let _guard = lock_env([("CATALOGUE_DATABASE_URL", Some("  ".to_owned()))]);
        assert!(load_from_empty_args().database_url().is_none());
    }

    #[rstest]
    fn non_ip_host_is_rejected() {
        let _guard = lock_env([
            ("CATALOGUE_HOST", Some("catalogue.local".to_owned())),
            ("CATALOGUE_PORT", None),
        ]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
