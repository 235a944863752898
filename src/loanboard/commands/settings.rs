use crate::commands::{CmdMessage, CmdResult};
use crate::config::{Settings, SETTING_KEYS};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(settings: &mut Settings, action: SettingsAction) -> Result<CmdResult> {
    match action {
        SettingsAction::ShowAll => Ok(CmdResult::default().with_settings(settings.clone())),
        SettingsAction::ShowKey(key) => {
            let value = settings.get(&key).ok_or_else(|| unknown_key(&key))?;
            Ok(CmdResult::default().with_message(CmdMessage::info(format!("{} = {}", key, value))))
        }
        SettingsAction::Set(key, value) => {
            settings.set(&key, &value)?;
            let shown = settings.get(&key).unwrap_or_default();
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("Set {} = {}", key, shown)))
                .with_settings(settings.clone())
                .mark_mutated())
        }
    }
}

fn unknown_key(key: &str) -> CatalogError {
    CatalogError::Api(format!(
        "Unknown setting: {} (expected one of {})",
        key,
        SETTING_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_masked_token() {
        let mut settings = Settings::default();
        let result = run(
            &mut settings,
            SettingsAction::Set("token".into(), "ghp_abcdef".into()),
        )
        .unwrap();
        assert!(result.mutated);
        assert_eq!(settings.github_token, "ghp_abcdef");
        assert_eq!(result.messages[0].content, "Set token = ******cdef");
    }

    #[test]
    fn show_key_does_not_mutate() {
        let mut settings = Settings::default();
        let result = run(&mut settings, SettingsAction::ShowKey("file-name".into())).unwrap();
        assert!(!result.mutated);
        assert_eq!(result.messages[0].content, "file-name = zalocash");
        assert!(run(&mut settings, SettingsAction::ShowKey("nope".into())).is_err());
    }

    #[test]
    fn invalid_value_keeps_settings() {
        let mut settings = Settings::default();
        let err = run(
            &mut settings,
            SettingsAction::Set("file-name".into(), "  ".into()),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(settings, Settings::default());
    }
}
