use crate::config::DEFAULT_SKIP_PREFIXES;
use crate::corpora::{collect_leaves, is_skipped, CorpusTree};
use crate::errors::Result;
use crate::splitter::LineSplitter;
use crate::vocabulary::{Vocabulary, RESERVED_TOKENS};
use std::collections::HashMap;
use std::fmt::Debug;

/// Scans a corpus and ranks its tokens into a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabBuilder {
    max_vocab_size: usize,
    skip_prefixes: Vec<String>,
}

/// Per-build token counts. Never outlives a single [`VocabBuilder::build`] call.
#[derive(Debug, Default)]
struct FrequencyTable {
    counts: HashMap<String, u64>,
    total_words: u64,
    total_lines: u64,
}

impl FrequencyTable {
    fn add_line(&mut self, tokens: Vec<String>) {
        self.total_lines += 1;
        self.total_words += tokens.len() as u64;
        for token in tokens {
            *self.counts.entry(token.to_lowercase()).or_insert(0) += 1;
        }
    }

    /// Descending by count, ties ascending by word.
    fn into_ranked(self) -> Vec<(u64, String)> {
        let mut ranked: Vec<(u64, String)> = self
            .counts
            .into_iter()
            .map(|(word, count)| (count, word))
            .collect();
        ranked.sort_unstable_by(|(lc, lw), (rc, rw)| rc.cmp(lc).then_with(|| lw.cmp(rw)));
        ranked
    }
}

impl VocabBuilder {
    pub fn new(max_vocab_size: usize) -> Self {
        Self {
            max_vocab_size,
            skip_prefixes: DEFAULT_SKIP_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replaces the line prefixes treated as document markers.
    pub fn with_skip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_vocab_size(&self) -> usize {
        self.max_vocab_size
    }

    /// Reads every leaf under `root`, counts lowercased tokens and assigns ids.
    ///
    /// Any source that fails to open or read aborts the whole build.
    pub fn build<T, S>(&self, corpus: &T, root: T::Node, splitter: &S) -> Result<Vocabulary>
    where
        T: CorpusTree + ?Sized,
        T::Node: Debug,
        S: LineSplitter + ?Sized,
    {
        let table = self.count(corpus, root, splitter)?;
        let vocab = self.assign_ids(table);
        log::info!(
            "vocabulary built: size={} words={} lines={} unk={}",
            vocab.size(),
            vocab.total_words(),
            vocab.total_lines(),
            vocab.unk_frequency()
        );
        Ok(vocab)
    }

    fn count<T, S>(&self, corpus: &T, root: T::Node, splitter: &S) -> Result<FrequencyTable>
    where
        T: CorpusTree + ?Sized,
        T::Node: Debug,
        S: LineSplitter + ?Sized,
    {
        let mut table = FrequencyTable::default();
        for source in collect_leaves(corpus, root)? {
            log::debug!("reading corpus source {:?}", source);
            for line in corpus.open(&source)? {
                let line = line?;
                if is_skipped(&line, &self.skip_prefixes) {
                    continue;
                }
                table.add_line(splitter.split(&line));
            }
        }
        Ok(table)
    }

    fn assign_ids(&self, table: FrequencyTable) -> Vocabulary {
        let mut vocab = Vocabulary::with_reserved(table.total_words, table.total_lines);
        let limit = self.max_vocab_size.saturating_add(RESERVED_TOKENS.len());
        for (count, word) in table.into_ranked() {
            if vocab.size() >= limit {
                break;
            }
            // `<s>`/`</s>` can appear verbatim in text; they keep their reserved id
            // and their occurrences stay with <UNK>.
            if vocab.contains(&word) {
                continue;
            }
            vocab.push(word, count);
        }
        vocab
    }
}

/// Builds a vocabulary of at most `max_vocab_size` words plus reserved symbols.
pub fn build_vocab<T, S>(
    corpus: &T,
    root: T::Node,
    max_vocab_size: usize,
    splitter: &S,
) -> Result<Vocabulary>
where
    T: CorpusTree + ?Sized,
    T::Node: Debug,
    S: LineSplitter + ?Sized,
{
    VocabBuilder::new(max_vocab_size).build(corpus, root, splitter)
}
