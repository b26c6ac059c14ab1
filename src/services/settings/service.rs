use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::EngineSettings;

const CONFIG_FILE_NAME: &str = "layout.toml";

/// Default location of the engine configuration file
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CalendarLayout", "CalendarLayout")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Engine settings persisted as TOML
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings; a missing file yields the defaults
    pub fn get(&self) -> Result<EngineSettings> {
        if !self.path.exists() {
            log::debug!(
                "No settings at {}, using defaults",
                self.path.display()
            );
            return Ok(EngineSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: EngineSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &EngineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::period::Granularity;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SettingsService) {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("config").join(CONFIG_FILE_NAME));
        (dir, service)
    }

    #[test]
    fn test_get_default_settings() {
        let (_dir, service) = setup();

        let settings = service.get().unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_update_settings() {
        let (_dir, service) = setup();

        let mut settings = service.get().unwrap();
        settings.start_hour = 7;
        settings.end_hour = 22;
        settings.default_granularity = Granularity::Week;
        settings.time_zone = Some("Europe/Lisbon".to_string());
        settings.latest_date = NaiveDate::from_ymd_opt(2030, 12, 31);

        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert_eq!(updated, settings);
    }

    #[test]
    fn test_update_invalid_settings() {
        let (_dir, service) = setup();

        let settings = EngineSettings {
            start_hour: 12,
            end_hour: 10,
            ..EngineSettings::default()
        };

        assert!(service.update(&settings).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let (_dir, service) = setup();
        fs::create_dir_all(service.path().parent().unwrap()).unwrap();
        fs::write(service.path(), "start_hour = 6\ndefault_granularity = \"month\"\n").unwrap();

        let settings = service.get().unwrap();
        assert_eq!(settings.start_hour, 6);
        assert_eq!(settings.end_hour, 20);
        assert_eq!(settings.default_granularity, Granularity::Month);
    }

    #[test]
    fn test_invalid_file_contents_are_rejected() {
        let (_dir, service) = setup();
        fs::create_dir_all(service.path().parent().unwrap()).unwrap();
        fs::write(service.path(), "start_hour = 21\nend_hour = 9\n").unwrap();

        let err = service.get().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn test_reset_settings() {
        let (_dir, service) = setup();

        let mut settings = service.get().unwrap();
        settings.first_day_of_week = 0;
        service.update(&settings).unwrap();

        service.reset().unwrap();
        assert_eq!(service.get().unwrap().first_day_of_week, 1);
    }
}
