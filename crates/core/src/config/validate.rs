use super::{types::Config, ConfigError};
use crate::runner::Tool;

/// Validate configuration
/// Currently validates:
/// - Every tool path is non-empty
/// - Timeouts are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for tool in [Tool::Pandoc, Tool::Magick, Tool::Ffmpeg, Tool::Soffice] {
        if config.tools.program(tool).as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "tools.{} cannot be empty",
                tool.name()
            )));
        }
    }

    if config.timeouts.probe_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeouts.probe_secs cannot be 0".to_string(),
        ));
    }

    if config.timeouts.conversion_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeouts.conversion_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TimeoutConfig, ToolsConfig};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_tool_path_fails() {
        let config = Config {
            tools: ToolsConfig::default().with_program(Tool::Soffice, ""),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("soffice")));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let config = Config {
            timeouts: TimeoutConfig {
                probe_secs: 0,
                conversion_secs: 60,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
