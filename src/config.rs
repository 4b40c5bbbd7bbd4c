use chrono::Offset;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub upload_url: String,
    pub upload_field_name: String,
    pub capture_file_name: String,
    pub jpeg_quality: u8,
    pub request_timeout: Option<Duration>,
    pub camera_index: u32,
    pub fake_camera: bool,
    pub preview_rate: Duration,
    pub window_title: String,
    pub title: String,
    pub subtitle: String,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_url: "http://localhost:3000/upload".to_string(),
            upload_field_name: "file".to_string(),
            capture_file_name: "captured.jpg".to_string(),
            jpeg_quality: 92,
            request_timeout: None,
            camera_index: 0,
            fake_camera: false,
            preview_rate: Duration::from_millis(33),
            window_title: "Privio".to_string(),
            title: "Privio".to_string(),
            subtitle: "Traffic Signal Violation Detection System".to_string(),
            logger_timezone: chrono::Utc.fix(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies `PRIVIO_*` overrides on top of the defaults. Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("PRIVIO_UPLOAD_URL").filter(|url| !url.trim().is_empty()) {
            config.upload_url = url.trim().to_string();
        }

        if let Some(index) = lookup("PRIVIO_CAMERA_INDEX").and_then(|v| v.trim().parse().ok()) {
            config.camera_index = index;
        }

        if let Some(fake) = lookup("PRIVIO_FAKE_CAMERA") {
            config.fake_camera = !matches!(fake.trim().to_lowercase().as_str(), "" | "0" | "false");
        }

        if let Some(secs) = lookup("PRIVIO_REQUEST_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_point_at_local_upload_endpoint() {
        let config = Config::default();

        assert_eq!(config.upload_url, "http://localhost:3000/upload");
        assert_eq!(config.upload_field_name, "file");
        assert_eq!(config.capture_file_name, "captured.jpg");
        assert_eq!(config.request_timeout, None);
        assert!(!config.fake_camera);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PRIVIO_UPLOAD_URL", " http://example.test/predict "),
            ("PRIVIO_CAMERA_INDEX", "2"),
            ("PRIVIO_FAKE_CAMERA", "1"),
            ("PRIVIO_REQUEST_TIMEOUT_SECS", "15"),
        ]));

        assert_eq!(config.upload_url, "http://example.test/predict");
        assert_eq!(config.camera_index, 2);
        assert!(config.fake_camera);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            ("PRIVIO_UPLOAD_URL", "  "),
            ("PRIVIO_CAMERA_INDEX", "front"),
            ("PRIVIO_FAKE_CAMERA", "false"),
        ]));

        assert_eq!(config.upload_url, Config::default().upload_url);
        assert_eq!(config.camera_index, 0);
        assert!(!config.fake_camera);
    }
}
