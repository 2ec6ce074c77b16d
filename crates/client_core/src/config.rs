use std::{collections::HashMap, fs, path::Path};

use shared::domain::REFRESH_QUERY;
use tracing::warn;

pub const SETTINGS_FILE: &str = "gallery.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub refresh_query: String,
    pub thumbnail_px: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            refresh_query: REFRESH_QUERY.into(),
            thumbnail_px: 128,
        }
    }
}

/// Defaults, then `gallery.toml` in the working directory, then the environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut ClientSettings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<HashMap<String, String>>(&raw) {
        Ok(file_cfg) => apply_overrides(settings, |name| {
            let key = match name {
                "APP__SERVER_URL" => "server_url",
                "APP__REFRESH_QUERY" => "refresh_query",
                "APP__THUMBNAIL_PX" => "thumbnail_px",
                _ => return None,
            };
            file_cfg.get(key).cloned()
        }),
        Err(err) => warn!("ignoring unreadable settings file '{}': {err}", path.display()),
    }
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("GALLERY_SERVER_URL") {
        settings.server_url = normalize_server_url(&v);
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = normalize_server_url(&v);
    }

    if let Some(v) = lookup("APP__REFRESH_QUERY") {
        settings.refresh_query = v;
    }

    if let Some(v) = lookup("APP__THUMBNAIL_PX") {
        match v.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => settings.thumbnail_px = parsed,
            _ => warn!("ignoring invalid thumbnail size '{v}'"),
        }
    }
}

pub fn normalize_server_url(raw_server_url: &str) -> String {
    let trimmed = raw_server_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return ClientSettings::default().server_url;
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn trims_trailing_slashes_and_whitespace() {
        assert_eq!(
            normalize_server_url(" http://gallery.local:5000// "),
            "http://gallery.local:5000"
        );
    }

    #[test]
    fn empty_server_url_falls_back_to_default() {
        assert_eq!(normalize_server_url("  "), "http://127.0.0.1:5000");
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let env = HashMap::from([
            ("GALLERY_SERVER_URL", "http://plain:1"),
            ("APP__SERVER_URL", "http://prefixed:2/"),
            ("APP__THUMBNAIL_PX", "256"),
        ]);
        let mut settings = ClientSettings::default();
        apply_overrides(&mut settings, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(settings.server_url, "http://prefixed:2");
        assert_eq!(settings.thumbnail_px, 256);
        assert_eq!(settings.refresh_query, "any");
    }

    #[test]
    fn invalid_thumbnail_size_keeps_default() {
        let mut settings = ClientSettings::default();
        apply_overrides(&mut settings, |name| {
            (name == "APP__THUMBNAIL_PX").then(|| "0".to_string())
        });
        assert_eq!(settings.thumbnail_px, 128);
    }

    #[test]
    fn reads_flat_settings_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = env::temp_dir().join(format!("gallery_client_test_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");
        let path = temp_root.join(SETTINGS_FILE);
        fs::write(
            &path,
            "server_url = \"http://files:8080/\"\nrefresh_query = \"recent\"\n",
        )
        .expect("write settings");

        let mut settings = ClientSettings::default();
        apply_file(&mut settings, &path);

        assert_eq!(settings.server_url, "http://files:8080");
        assert_eq!(settings.refresh_query, "recent");
        assert_eq!(settings.thumbnail_px, 128);

        fs::remove_dir_all(temp_root).expect("cleanup");
    }

    #[test]
    fn missing_settings_file_is_ignored() {
        let mut settings = ClientSettings::default();
        apply_file(&mut settings, Path::new("/nonexistent/gallery.toml"));
        assert_eq!(settings, ClientSettings::default());
    }
}
