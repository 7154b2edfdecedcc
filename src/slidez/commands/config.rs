use crate::commands::{CmdMessage, CmdResult};
use crate::config::SlidezConfig;
use crate::error::{Result, SlidezError};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = SlidezConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = SlidezConfig::load(config_dir)?;
            match config.get(&key) {
                Some(value) => Ok(CmdResult::default().with_message(CmdMessage::info(value))),
                None => Err(SlidezError::MalformedInput(format!("unknown config key '{}'", key))),
            }
        }
        ConfigAction::Set(key, value) => {
            let mut config = SlidezConfig::load(config_dir)?;
            config.set(&key, &value)?;
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val)))
                .with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempdir().unwrap();
        let set = ConfigAction::Set("default-layout".into(), "title_only".into());
        let result = run(dir.path(), set).unwrap();
        let message = &result.messages[0].content;
        assert_eq!(message, "default-layout set to TITLE_ONLY");

        let shown = run(dir.path(), ConfigAction::ShowKey("default-layout".into())).unwrap();
        assert_eq!(shown.messages[0].content, "TITLE_ONLY");

        let all = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().default_layout, "TITLE_ONLY");
    }

    #[test]
    fn unknown_key_fails_for_show_and_set() {
        let dir = tempdir().unwrap();
        let err = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap_err();
        assert!(matches!(err, SlidezError::MalformedInput(ref m) if m.contains("colour")));

        let set = ConfigAction::Set("colour".into(), "red".into());
        let err = run(dir.path(), set).unwrap_err();
        assert!(matches!(err, SlidezError::MalformedInput(_)));
    }
}
