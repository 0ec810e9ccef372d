//! Manifest loader with TOML parsing and environment variable substitution

use super::manifest::Manifest;
use super::schema::ManifestConfig;
use crate::domain::errors::FactoryError;
use crate::domain::result::Result;
use crate::registry::ProviderRegistry;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads a field manifest from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into a [`ManifestConfig`]
/// 4. Validates field names and marker kinds
/// 5. Resolves provider names through `registry`
///
/// # Errors
///
/// Returns [`FactoryError::Configuration`] if:
/// - File cannot be found or read
/// - Environment variable substitution fails
/// - TOML parsing fails
/// - Validation fails
/// - A provider name is not registered
///
/// # Examples
///
/// ```no_run
/// use obfuscation_markers::config::load_manifest;
/// use obfuscation_markers::registry::ProviderRegistry;
///
/// let registry = ProviderRegistry::with_builtins();
/// let manifest = load_manifest("fields.toml", &registry).expect("Failed to load manifest");
/// ```
pub fn load_manifest(path: impl AsRef<Path>, registry: &ProviderRegistry) -> Result<Manifest> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FactoryError::Configuration(format!(
            "Manifest file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FactoryError::Configuration(format!(
            "Failed to read manifest file {}: {}",
            path.display(),
            e
        ))
    })?;

    let manifest = parse_manifest(&contents, registry)?;
    tracing::info!(
        path = %path.display(),
        fields = manifest.elements().len(),
        "Loaded field manifest"
    );
    Ok(manifest)
}

/// Parses and resolves manifest text
///
/// # Errors
///
/// Same as [`load_manifest`], minus the file errors.
pub fn parse_manifest(contents: &str, registry: &ProviderRegistry) -> Result<Manifest> {
    let contents = substitute_env_vars(contents)?;

    let config: ManifestConfig = toml::from_str(&contents)
        .map_err(|e| FactoryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    Manifest::resolve(&config, registry)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FactoryError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(FactoryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{Marker, ObfuscateFixedValue};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("OBFUSCATION_MARKERS_TEST_VALUE", "[hidden]");
        let input = "value = \"${OBFUSCATION_MARKERS_TEST_VALUE}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "value = \"[hidden]\"");
        std::env::remove_var("OBFUSCATION_MARKERS_TEST_VALUE");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("OBFUSCATION_MARKERS_MISSING_A");
        std::env::remove_var("OBFUSCATION_MARKERS_MISSING_B");
        let input = "a = \"${OBFUSCATION_MARKERS_MISSING_A}\"\nb = \"${OBFUSCATION_MARKERS_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("OBFUSCATION_MARKERS_MISSING_A"));
        assert!(message.contains("OBFUSCATION_MARKERS_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("OBFUSCATION_MARKERS_IN_COMMENT");
        let input = "# value = \"${OBFUSCATION_MARKERS_IN_COMMENT}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let result = load_manifest("nonexistent.toml", &ProviderRegistry::new());
        assert!(matches!(result, Err(FactoryError::Configuration(_))));
    }

    #[test]
    fn test_load_manifest_valid() {
        std::env::set_var("OBFUSCATION_MARKERS_TEST_REPLACEMENT", "<secret>");
        let toml_content = r#"
[[fields]]
name = "api_key"
markers = [{ kind = "fixed_value", value = "${OBFUSCATION_MARKERS_TEST_REPLACEMENT}" }]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manifest = load_manifest(temp_file.path(), &ProviderRegistry::new()).unwrap();
        std::env::remove_var("OBFUSCATION_MARKERS_TEST_REPLACEMENT");

        assert_eq!(
            manifest.element("api_key").unwrap().markers(),
            &[Marker::from(ObfuscateFixedValue::new("<secret>"))]
        );
    }

    #[test]
    fn test_parse_manifest_invalid_toml() {
        let result = parse_manifest("[[fields]\nname = ", &ProviderRegistry::new());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_parse_manifest_validation_failure() {
        let result = parse_manifest(
            "[[fields]]\nname = \"a\"\n\n[[fields]]\nname = \"a\"\n",
            &ProviderRegistry::new(),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Manifest validation failed"));
    }
}
