use crate::infrastructure::error::InfraError;
use std::fs;
use std::path::Path;

const APP_JSON: &str = "app.json";
const DEFAULT_TIMEZONE: &str = "America/New_York";

pub fn ensure_default_config(config_dir: &Path) -> Result<(), InfraError> {
    let path = config_dir.join(APP_JSON);
    if !path.exists() {
        let value = serde_json::json!({
            "schema": 1,
            "appName": "Slotbook",
            "timezone": DEFAULT_TIMEZONE,
        });
        let formatted = serde_json::to_string_pretty(&value)?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<serde_json::Value, InfraError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| InfraError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != 1 {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

pub fn read_timezone(config_dir: &Path) -> Result<Option<String>, InfraError> {
    let app = read_config(&config_dir.join(APP_JSON))?;
    Ok(app
        .get("timezone")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn temp_config_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "slotbook-config-{tag}-{}",
            Utc::now().timestamp_micros()
        ));
        fs::create_dir_all(&dir).expect("create config dir");
        dir
    }

    #[test]
    fn defaults_are_written_once_and_readable() {
        let dir = temp_config_dir("defaults");
        ensure_default_config(&dir).expect("seed defaults");
        assert_eq!(
            read_timezone(&dir).expect("read timezone"),
            Some(DEFAULT_TIMEZONE.to_string())
        );

        // A second call leaves existing contents alone.
        fs::write(
            dir.join(APP_JSON),
            "{\"schema\": 1, \"timezone\": \"Asia/Tokyo\"}\n",
        )
        .expect("overwrite config");
        ensure_default_config(&dir).expect("seed again");
        assert_eq!(
            read_timezone(&dir).expect("read timezone"),
            Some("Asia/Tokyo".to_string())
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unsupported_schema_is_rejected() {
        let dir = temp_config_dir("schema");
        fs::write(dir.join(APP_JSON), "{\"schema\": 2}\n").expect("write config");
        assert!(read_timezone(&dir).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
