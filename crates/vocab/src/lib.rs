//! Frequency-ranked word vocabularies built from plain-text corpora.
//!
//! A [`VocabBuilder`] walks a tree of text sources, splits every content line
//! into tokens with a pluggable [`LineSplitter`], counts lowercased tokens and
//! assigns ids by descending frequency. Ties are broken by ascending word so
//! the same corpus always produces the same ids.
//!
//! # Reserved ids
//!
//! Ids 0, 1 and 2 are always `<UNK>`, `<s>` and `</s>`. The frequency of
//! `<UNK>` is the mass of every token that did not receive an id; the
//! sentence markers count one occurrence per content line.
//!
//! # Corpus layout
//!
//! Traversal goes through the [`CorpusTree`] capability. [`FsCorpus`] reads a
//! directory tree from disk and [`MemoryCorpus`] keeps documents in memory.
//! Empty lines and lines starting with `<doc` or `</doc` (document markers as
//! produced by Wikipedia extraction dumps) are skipped.
//!
//! # Thread Safety
//!
//! A built [`Vocabulary`] is immutable and `Send + Sync`, so it can be shared
//! across threads without additional synchronization.

pub mod config;
pub mod errors;

mod builder;
mod corpora;
mod splitter;
mod types;
mod validate;
mod vocabulary;

pub use builder::{build_vocab, VocabBuilder};
pub use config::{Config, CorpusCfg, SplitterCfg, VocabCfg};
pub use corpora::{collect_leaves, CorpusTree, FileLines, FsCorpus, MemoryCorpus};
pub use errors::{Error, Result};
pub use splitter::{build_splitter, LineSplitter, RegexSplitter, WhitespaceSplitter};
pub use types::CorpusStats;
pub use vocabulary::{
    Vocabulary, BOS_ID, BOS_TOKEN, EOS_ID, EOS_TOKEN, RESERVED_TOKENS, UNK_ID, UNK_TOKEN,
};

/// Validates `cfg`, scans `cfg.corpus.root` from disk and checks the result.
pub fn build_from_config(cfg: &Config) -> Result<Vocabulary> {
    validate::validate_config(cfg)?;
    let line_splitter = splitter::build_splitter(&cfg.splitter)?;
    log::info!(
        "building vocabulary from {} (max_vocab_size={}, splitter={})",
        cfg.corpus.root.display(),
        cfg.model.max_vocab_size,
        splitter::name(&cfg.splitter)
    );
    let vocab = VocabBuilder::new(cfg.model.max_vocab_size)
        .with_skip_prefixes(cfg.corpus.skip_prefixes.iter().cloned())
        .build(&FsCorpus, cfg.corpus.root.clone(), line_splitter.as_ref())?;
    validate::validate_vocabulary(&vocab, cfg)?;
    Ok(vocab)
}
