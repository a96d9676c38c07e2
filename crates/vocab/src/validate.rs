use crate::config::{Config, SplitterCfg};
use crate::errors::{Error, Result};
use crate::vocabulary::{Vocabulary, RESERVED_TOKENS};
use std::collections::HashSet;

pub fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.corpus.root.as_os_str().is_empty() {
        return Err(Error::InvalidConfig("corpus.root must not be empty"));
    }

    let mut seen = HashSet::new();
    for prefix in &cfg.corpus.skip_prefixes {
        if prefix.is_empty() {
            return Err(Error::Validation(
                "corpus.skip_prefixes must not contain an empty prefix".into(),
            ));
        }
        if !seen.insert(prefix) {
            return Err(Error::Validation(format!(
                "skip prefix '{prefix}' appears multiple times"
            )));
        }
    }

    if let SplitterCfg::Regex { pattern } = &cfg.splitter {
        if pattern.is_empty() {
            return Err(Error::InvalidConfig("splitter.pattern must not be empty"));
        }
    }

    Ok(())
}

pub fn validate_vocabulary(vocab: &Vocabulary, cfg: &Config) -> Result<()> {
    let size = vocab.size();
    if vocab.id_to_frequency().len() != size || vocab.word_to_id_len() != size {
        return Err(Error::Validation(format!(
            "vocabulary tables disagree: words={} frequencies={} lookup={}",
            size,
            vocab.id_to_frequency().len(),
            vocab.word_to_id_len()
        )));
    }

    for (id, token) in RESERVED_TOKENS.iter().enumerate() {
        if vocab.word(id)? != *token {
            return Err(Error::Validation(format!(
                "expected reserved token '{token}' at id {id}"
            )));
        }
    }

    let limit = cfg.model.max_vocab_size.saturating_add(RESERVED_TOKENS.len());
    if size > limit {
        return Err(Error::Validation(format!(
            "vocabulary size {size} exceeds configured limit {limit}"
        )));
    }

    Ok(())
}
