use anyhow::{Context, Result};

use crate::models::AdmissionPolicy;

/// Environment variable selecting the admission policy
pub const ADMISSION_ENV_VAR: &str = "VIBER_BLAST_ADMISSION";

/// Configuration for the normalization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// What to do with rows whose contact number is not 11 characters
    pub admission: AdmissionPolicy,
}

impl PipelineConfig {
    pub fn new(admission: AdmissionPolicy) -> Self {
        Self { admission }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source; unset means default
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admission = match lookup(ADMISSION_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => value
                .parse::<AdmissionPolicy>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {} value", ADMISSION_ENV_VAR))?,
            _ => AdmissionPolicy::default(),
        };

        Ok(Self { admission })
    }

    /// Replace the admission policy when one was given explicitly
    pub fn with_admission(mut self, admission: Option<AdmissionPolicy>) -> Self {
        if let Some(admission) = admission {
            self.admission = admission;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_defaults_to_strict() {
        let config = PipelineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.admission, AdmissionPolicy::Strict);

        let config = PipelineConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config.admission, AdmissionPolicy::Strict);
    }

    #[test]
    fn test_reads_policy() {
        let config = PipelineConfig::from_lookup(|key| {
            (key == ADMISSION_ENV_VAR).then(|| "PERMISSIVE".to_string())
        })
        .unwrap();
        assert_eq!(config.admission, AdmissionPolicy::Permissive);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = PipelineConfig::from_lookup(|_| Some("loose".to_string())).unwrap_err();
        assert!(format!("{:#}", err).contains(ADMISSION_ENV_VAR));
    }

    #[test]
    fn test_explicit_policy_overrides() {
        let config = PipelineConfig::default().with_admission(Some(AdmissionPolicy::Permissive));
        assert_eq!(config.admission, AdmissionPolicy::Permissive);
        assert_eq!(config.with_admission(None), config);
    }
}
