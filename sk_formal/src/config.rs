//! Checker configuration, loaded from a YAML file.

use serde::{Deserialize, Serialize};
use sk_domain::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How the engine searches. Both check the same property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Bounded search with a SAT solver.
    Sat,
    /// Decision diagrams.
    Bdd,
}

impl Strategy {
    /// The value the engine's `engine` option takes.
    pub fn engine_tag(&self) -> &'static str {
        match self {
            Strategy::Sat => "sat",
            Strategy::Bdd => "bdd",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.engine_tag())
    }
}

impl std::str::FromStr for Strategy {
    type Err = SKError;

    fn from_str(s: &str) -> SKResult<Strategy> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sat" => Ok(Strategy::Sat),
            "bdd" => Ok(Strategy::Bdd),
            other => Err(SKError::Config(format!("unknown strategy '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// A name looked up on PATH, or a path to the executable.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Wall-clock ceiling for one engine run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            executable: default_executable(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EngineSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The executable to start, or `EngineUnavailable`.
    pub fn resolve(&self) -> SKResult<PathBuf> {
        which::which(&self.executable).map_err(|e| {
            SKError::EngineUnavailable(format!("{}: {e}", self.executable.display()))
        })
    }
}

/// Main checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub engine: EngineSettings,

    /// Deepest step the bounded check explores.
    #[serde(default = "default_bound")]
    pub bound: u32,

    /// Run in this order against every board.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,

    /// Where the model files go.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Also check every box on its own.
    pub iterative: bool,
}

fn default_executable() -> PathBuf {
    PathBuf::from("nuXmv")
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_bound() -> u32 {
    20
}
fn default_strategies() -> Vec<Strategy> {
    vec![Strategy::Sat, Strategy::Bdd]
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_models")
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            engine: EngineSettings::default(),
            bound: default_bound(),
            strategies: default_strategies(),
            output_dir: default_output_dir(),
            iterative: false,
        }
    }
}

impl CheckConfig {
    pub fn load(path: &Path) -> SKResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| SKError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when there is no file at `path`.
    pub fn load_or_default(path: &Path) -> SKResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> SKResult<()> {
        if self.strategies.is_empty() {
            return Err(SKError::Config("at least one strategy is needed".into()));
        }
        if self.engine.timeout_secs == 0 {
            return Err(SKError::Config("engine.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn defaults() {
        let c = CheckConfig::default();
        assert_eq!(c.engine.executable, PathBuf::from("nuXmv"));
        assert_eq!(c.engine.timeout(), Duration::from_secs(60));
        assert_eq!(c.bound, 20);
        assert_eq!(c.strategies, vec![Strategy::Sat, Strategy::Bdd]);
        assert!(!c.iterative);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c: CheckConfig = serde_yaml::from_str("bound: 7\nengine:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(c.bound, 7);
        assert_eq!(c.engine.timeout_secs, 5);
        assert_eq!(c.engine.executable, PathBuf::from("nuXmv"));
        assert_eq!(c.strategies, vec![Strategy::Sat, Strategy::Bdd]);

        let c: CheckConfig = serde_yaml::from_str("strategies: [bdd]\niterative: true\n").unwrap();
        assert_eq!(c.strategies, vec![Strategy::Bdd]);
        assert!(c.iterative);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.yaml");
        assert_eq!(CheckConfig::load_or_default(&path).unwrap(), CheckConfig::default());
        assert!(matches!(CheckConfig::load(&path), Err(SKError::Io(_))));

        std::fs::write(&path, "strategies: []\n").unwrap();
        assert!(matches!(CheckConfig::load(&path), Err(SKError::Config(_))));

        std::fs::write(&path, "bound: [1, 2]\n").unwrap();
        assert!(matches!(CheckConfig::load(&path), Err(SKError::Config(_))));

        std::fs::write(&path, "output_dir: out\nbound: 3\n").unwrap();
        let c = CheckConfig::load_or_default(&path).unwrap();
        assert_eq!(c.output_dir, PathBuf::from("out"));
        assert_eq!(c.bound, 3);
    }

    #[test]
    fn strategies_from_text() {
        assert_eq!("SAT".parse::<Strategy>().unwrap(), Strategy::Sat);
        assert_eq!("bdd".parse::<Strategy>().unwrap(), Strategy::Bdd);
        assert!("smt".parse::<Strategy>().is_err());
    }

    #[test]
    fn missing_executables_are_unavailable() {
        let s = EngineSettings {
            executable: PathBuf::from("surely-no-such-model-checker"),
            timeout_secs: 1,
        };
        assert!(matches!(s.resolve(), Err(SKError::EngineUnavailable(_))));
    }
}
