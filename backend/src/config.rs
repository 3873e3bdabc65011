//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `CMS_*` environment variables (and any configuration
//! file OrthoConfig discovers), falling back to the defaults below.

use std::path::PathBuf;

use example_data::SeedRegistry;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ExampleDataSeedingError;
use crate::domain::complaints::Complaint;
use crate::domain::example_data::seed_complaints;

const DEFAULT_STORAGE_DIR: &str = ".cms";

/// Settings for the `cms` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CMS")]
pub struct CmsSettings {
    /// Directory holding the persisted key-value files.
    pub storage_dir: Option<PathBuf>,
    /// Seed the demo complaints the first time the store is read.
    pub seed_demo_data: Option<bool>,
    /// Optional seed registry replacing the bundled demo data.
    pub registry_path: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: Option<bool>,
}

impl CmsSettings {
    /// Return the configured storage directory, falling back to `.cms`.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Whether a fresh store receives the demo complaints. Defaults to `true`.
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }

    pub fn registry_path(&self) -> Option<&PathBuf> {
        self.registry_path.as_ref()
    }

    pub fn log_json(&self) -> bool {
        self.log_json.unwrap_or(false)
    }

    /// Complaints written to an empty store on first read: the registry's
    /// complaints when seeding is enabled, otherwise none.
    pub fn initial_complaints(
        &self,
        registry: &SeedRegistry,
    ) -> Result<Vec<Complaint>, ExampleDataSeedingError> {
        if self.seed_demo_data() {
            seed_complaints(registry)
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> CmsSettings {
        CmsSettings::load_from_iter([OsString::from("cms")]).expect("config should load")
    }

    fn bundled() -> SeedRegistry {
        SeedRegistry::bundled().expect("bundled registry")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("CMS_STORAGE_DIR", None::<String>),
            ("CMS_SEED_DEMO_DATA", None::<String>),
            ("CMS_REGISTRY_PATH", None::<String>),
            ("CMS_LOG_JSON", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.storage_dir(), PathBuf::from(".cms"));
        assert!(settings.seed_demo_data());
        assert!(settings.registry_path().is_none());
        assert!(!settings.log_json());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CMS_STORAGE_DIR", Some("/tmp/cms-state".to_owned())),
            ("CMS_SEED_DEMO_DATA", Some("false".to_owned())),
            ("CMS_REGISTRY_PATH", Some("/tmp/seeds.json".to_owned())),
            ("CMS_LOG_JSON", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.storage_dir(), PathBuf::from("/tmp/cms-state"));
        assert!(!settings.seed_demo_data());
        assert_eq!(
            settings.registry_path(),
            Some(&PathBuf::from("/tmp/seeds.json"))
        );
        assert!(settings.log_json());
    }

    #[rstest]
    #[case(None, 10)]
    #[case(Some("true"), 10)]
    #[case(Some("false"), 0)]
    fn seeding_setting_controls_initial_complaints(
        #[case] seed_demo_data: Option<&str>,
        #[case] expected: usize,
    ) {
        let _guard = lock_env([
            ("CMS_SEED_DEMO_DATA", seed_demo_data.map(str::to_owned)),
            ("CMS_REGISTRY_PATH", None::<String>),
        ]);

        let complaints = load_from_empty_args()
            .initial_complaints(&bundled())
            .expect("seed complaints convert");
        assert_eq!(complaints.len(), expected);
    }
}
