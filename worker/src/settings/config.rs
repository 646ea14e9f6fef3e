use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use crate::settings::config_model::SettingsConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to deserialize config.")]
    Serde(#[from] serde_yaml::Error),
    #[error("Failed to open config file")]
    Io(#[from] std::io::Error),
    #[error("Unknown time zone {0}")]
    Timezone(String),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

pub fn settings_path() -> String {
    dotenv::var("SETTINGS_FILE").unwrap_or(format!("configs/{}.yaml", "production"))
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<SettingsConfig, ConfigError> {
    info!("Loading {}", path.as_ref().to_string_lossy());
    let mut file = File::open(path)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;
    let t: SettingsConfig = serde_yaml::from_str(&s)?;

    Ok(t)
}

#[cfg(test)]
mod tests {
    use crate::settings::config_model::ErrorPolicy;
    use super::*;

    #[test]
    fn test_load_settings() {
        let settings = load_settings(format!("configs/{}.yaml", "test"))
            .expect("Failed to load settings file.");

        if let Err(err) = settings.validate() {
            panic!("Validation error: {}", err);
        }

        assert_eq!(settings.error_policy, ErrorPolicy::ContinueOnError);
        assert_eq!(settings.timezone().unwrap(), chrono_tz::Europe::Helsinki);
        assert_eq!(
            settings.countries.get("finland").map(String::as_str),
            Some("10YFI-1--------U")
        );
        assert_eq!(settings.countries.len(), 3);
        assert_eq!(settings.storage.table, "electricity_monthly_pricing_test");
    }

    #[test]
    fn test_load_production_settings() {
        let settings = load_settings(format!("configs/{}.yaml", "production"))
            .expect("Failed to load settings file.");

        assert!(settings.validate().is_ok());
        assert_eq!(settings.error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_load_missing_settings() {
        let err = load_settings("configs/missing.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_settings_with_unknown_policy() {
        let err = serde_yaml::from_str::<SettingsConfig>(
            "error_policy: retry\ncountries:\n  finland: 10YFI-1--------U\n",
        )
        .unwrap_err();

        assert!(err.to_string().contains("retry"));
    }
}
