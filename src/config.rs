use std::{
    ffi::OsString,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, vectorizer::DEFAULT_PARALLEL_THRESHOLD};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "career-recommender.toml";
/// Env var naming an explicit config file
pub const CONFIG_ENV: &str = "CAREER_RECOMMENDER_CONFIG";

const CORPUS_ENV: &str = "CAREER_RECOMMENDER_CORPUS";
const TOP_K_ENV: &str = "CAREER_RECOMMENDER_TOP_K";
const PARALLEL_THRESHOLD_ENV: &str = "CAREER_RECOMMENDER_PARALLEL_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// CSV file with `Career` and `Description` columns
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("career.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Number of careers recommended per query
    pub top_k: NonZeroUsize,
    /// Corpus size from which scoring runs on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    corpus: Option<CorpusPatch>,
    ranking: Option<RankingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CorpusPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RankingPatch {
    top_k: Option<NonZeroUsize>,
    parallel_threshold: Option<usize>,
}

impl Config {
    /// Defaults, then the config file, then environment overrides.
    ///
    /// The file is `explicit_path` if given, else `$CAREER_RECOMMENDER_CONFIG`,
    /// else `./career-recommender.toml` when it exists.
    /// An explicitly named file must exist.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit_path, |key| std::env::var_os(key))
    }

    /// [`Config::load`] reading variables through `env` instead of the process environment
    pub fn load_with_env<F>(explicit_path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(env)?;
        Ok(config)
    }

    /// Defaults overlaid with the file at `path`; the environment is not consulted
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_patch(Self::read_patch(path)?);
        Ok(config)
    }

    /// Parse a config document; absent keys keep their defaults
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config = Self::default();
        config.merge_patch(toml::from_str(raw)?);
        Ok(config)
    }

    fn read_patch(path: &Path) -> Result<ConfigPatch> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(corpus) = patch.corpus {
            if let Some(path) = corpus.path {
                self.corpus.path = path;
            }
        }
        if let Some(ranking) = patch.ranking {
            if let Some(top_k) = ranking.top_k {
                self.ranking.top_k = top_k;
            }
            if let Some(threshold) = ranking.parallel_threshold {
                self.ranking.parallel_threshold = threshold;
            }
        }
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(path) = env(CORPUS_ENV) {
            self.corpus.path = PathBuf::from(path);
        }
        if let Some(top_k) = env_parse::<NonZeroUsize>(TOP_K_ENV, env(TOP_K_ENV))? {
            self.ranking.top_k = top_k;
        }
        if let Some(threshold) = env_parse::<usize>(PARALLEL_THRESHOLD_ENV, env(PARALLEL_THRESHOLD_ENV))? {
            self.ranking.parallel_threshold = threshold;
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, raw: Option<OsString>) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    let invalid = |value: String, reason: String| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
        reason,
    };
    let value = raw
        .into_string()
        .map_err(|raw| invalid(raw.to_string_lossy().into_owned(), "not valid UTF-8".to_string()))?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(invalid(value, err.to_string())),
    }
}
