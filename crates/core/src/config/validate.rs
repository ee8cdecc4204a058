use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Input and output formats are not blank
/// - Output extension starts with a dot and is not just the dot
/// - A configured reference document exists
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let converter = &config.converter;

    if converter.input_format.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.input_format cannot be empty".to_string(),
        ));
    }

    if converter.output_format.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.output_format cannot be empty".to_string(),
        ));
    }

    let ext = &converter.output_extension;
    if !ext.starts_with('.') || ext.len() < 2 {
        return Err(ConfigError::ValidationError(format!(
            "converter.output_extension must look like \".docx\", got {:?}",
            ext
        )));
    }

    if let Some(reference) = &converter.reference_doc {
        if !reference.is_file() {
            return Err(ConfigError::ValidationError(format!(
                "converter.reference_doc does not exist: {}",
                reference.display()
            )));
        }
    }

    Ok(())
}
