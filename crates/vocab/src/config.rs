use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_SKIP_PREFIXES: [&str; 2] = ["<doc", "</doc"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub corpus: CorpusCfg,
    pub model: VocabCfg,
    #[serde(default)]
    pub splitter: SplitterCfg,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusCfg {
    pub root: PathBuf,
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabCfg {
    /// Upper bound on non-reserved entries.
    pub max_vocab_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitterCfg {
    #[default]
    Whitespace,
    Regex {
        pattern: String,
    },
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, max_vocab_size: usize) -> Self {
        Self {
            corpus: CorpusCfg {
                root: root.into(),
                skip_prefixes: default_skip_prefixes(),
            },
            model: VocabCfg { max_vocab_size },
            splitter: SplitterCfg::default(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cfg = serde_json::from_reader(reader)?;
        Ok(cfg)
    }
}

fn default_skip_prefixes() -> Vec<String> {
    DEFAULT_SKIP_PREFIXES.iter().map(|p| p.to_string()).collect()
}
