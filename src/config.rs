//! `input.yml` loading.
//!
//! The same file also drives the collector, so keys this tool does not use
//! (credentials, command lists) are accepted and ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::{AuditError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub devices: Vec<String>,
    pub output_directory: PathBuf,
    /// Check names, in report order.
    pub audit: Vec<String>,
    #[serde(default)]
    pub custom_show_tech_support: Vec<String>,
    /// Worker threads; 0 means one per CPU.
    #[serde(default)]
    pub jobs: usize,
}

impl AuditConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AuditError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: AuditConfig =
            serde_yaml::from_str(raw).map_err(|e| AuditError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.devices.is_empty() {
            return Err(AuditError::Config("'devices' must list at least one device".to_string()));
        }
        if let Some(blank) = self.devices.iter().find(|d| d.trim().is_empty()) {
            return Err(AuditError::Config(format!("invalid device name {:?}", blank)));
        }
        if self.audit.is_empty() {
            return Err(AuditError::Config("'audit' must list at least one check".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"
devices:
  - 10.83.28.203
  - leaf2
output_directory: output
username: arista
password: arista
json_cmds:
  - show version
audit:
  - print_hostname
  - check_bgp
custom_show_tech_support:
  - show version
"#;

    #[test]
    fn parses_collector_input_file() {
        let config = AuditConfig::parse(INPUT).unwrap();
        assert_eq!(config.devices, vec!["10.83.28.203", "leaf2"]);
        assert_eq!(config.output_directory, PathBuf::from("output"));
        assert_eq!(config.audit, vec!["print_hostname", "check_bgp"]);
        assert_eq!(config.custom_show_tech_support, vec!["show version"]);
        assert_eq!(config.jobs, 0);
    }

    #[test]
    fn rejects_empty_device_list() {
        let err = AuditConfig::parse("devices: []\noutput_directory: out\naudit: [bgp]\n").unwrap_err();
        assert!(err.to_string().contains("devices"));
    }

    #[test]
    fn rejects_missing_audit_key() {
        let err = AuditConfig::parse("devices: [leaf1]\noutput_directory: out\n").unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn load_reports_path_on_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.yml");
        let err = AuditConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("input.yml"));

        std::fs::write(&path, INPUT).unwrap();
        assert_eq!(AuditConfig::load(&path).unwrap().devices.len(), 2);
    }
}
