use crate::errors::{Error, Result};
use crate::types::CorpusStats;
use std::collections::HashMap;

pub const UNK_TOKEN: &str = "<UNK>";
pub const BOS_TOKEN: &str = "<s>";
pub const EOS_TOKEN: &str = "</s>";

pub const UNK_ID: usize = 0;
pub const BOS_ID: usize = 1;
pub const EOS_ID: usize = 2;

/// Reserved symbols in id order.
pub const RESERVED_TOKENS: [&str; 3] = [UNK_TOKEN, BOS_TOKEN, EOS_TOKEN];

/// Frequency-ranked word table. Immutable once built.
///
/// Ids `0..3` are always `<UNK>`, `<s>` and `</s>`. Remaining ids are ordered
/// by descending corpus frequency, ties broken by ascending word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    id_to_word: Vec<String>,
    word_to_id: HashMap<String, usize>,
    id_to_frequency: Vec<u64>,
    total_words: u64,
    total_lines: u64,
}

impl Vocabulary {
    /// Seeds the reserved entries. `<UNK>` starts with the full word mass and
    /// sentence markers with one occurrence per line.
    pub(crate) fn with_reserved(total_words: u64, total_lines: u64) -> Self {
        let id_to_word: Vec<String> = RESERVED_TOKENS.iter().map(|t| t.to_string()).collect();
        let word_to_id = id_to_word
            .iter()
            .enumerate()
            .map(|(id, word)| (word.clone(), id))
            .collect();
        Self {
            id_to_word,
            word_to_id,
            id_to_frequency: vec![total_words, total_lines, total_lines],
            total_words,
            total_lines,
        }
    }

    /// Appends the next id. Callers guarantee `word` is not already present.
    pub(crate) fn push(&mut self, word: String, count: u64) -> usize {
        let id = self.id_to_word.len();
        self.id_to_frequency[UNK_ID] -= count;
        self.id_to_frequency.push(count);
        self.word_to_id.insert(word.clone(), id);
        self.id_to_word.push(word);
        id
    }

    pub fn size(&self) -> usize {
        self.id_to_word.len()
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    /// Combined frequency of `<UNK>` and every word that was cut.
    pub fn unk_frequency(&self) -> u64 {
        self.id_to_frequency[UNK_ID]
    }

    pub fn frequency(&self, id: usize) -> Result<u64> {
        self.id_to_frequency
            .get(id)
            .copied()
            .ok_or(Error::OutOfRange {
                id,
                size: self.size(),
            })
    }

    pub fn word(&self, id: usize) -> Result<&str> {
        self.id_to_word
            .get(id)
            .map(String::as_str)
            .ok_or(Error::OutOfRange {
                id,
                size: self.size(),
            })
    }

    /// Looks up `word` exactly as given; unknown words map to [`UNK_ID`].
    pub fn id(&self, word: &str) -> usize {
        self.word_to_id.get(word).copied().unwrap_or(UNK_ID)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_to_id.contains_key(word)
    }

    pub fn words_for(&self, ids: &[usize]) -> Result<Vec<&str>> {
        ids.iter().map(|&id| self.word(id)).collect()
    }

    pub fn ids_for<S: AsRef<str>>(&self, words: &[S]) -> Vec<usize> {
        words.iter().map(|w| self.id(w.as_ref())).collect()
    }

    /// `(id, word, frequency)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, u64)> + '_ {
        self.id_to_word
            .iter()
            .zip(&self.id_to_frequency)
            .enumerate()
            .map(|(id, (word, &freq))| (id, word.as_str(), freq))
    }

    pub fn id_to_word(&self) -> &[String] {
        &self.id_to_word
    }

    pub fn id_to_frequency(&self) -> &[u64] {
        &self.id_to_frequency
    }

    pub(crate) fn word_to_id_len(&self) -> usize {
        self.word_to_id.len()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            size: self.size(),
            total_words: self.total_words,
            total_lines: self.total_lines,
            unk_frequency: self.unk_frequency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vocabulary {
        let mut vocab = Vocabulary::with_reserved(6, 2);
        vocab.push("sat".into(), 2);
        vocab.push("the".into(), 2);
        vocab.push("cat".into(), 1);
        vocab
    }

    #[test]
    fn reserved_ids_are_fixed() {
        let vocab = Vocabulary::with_reserved(0, 0);
        assert_eq!(vocab.size(), 3);
        assert_eq!(vocab.word(UNK_ID).unwrap(), "<UNK>");
        assert_eq!(vocab.word(BOS_ID).unwrap(), "<s>");
        assert_eq!(vocab.word(EOS_ID).unwrap(), "</s>");
        assert_eq!(vocab.id("</s>"), EOS_ID);
    }

    #[test]
    fn push_moves_mass_out_of_unk() {
        let vocab = sample();
        assert_eq!(vocab.id_to_frequency(), &[1, 2, 2, 2, 2, 1]);
        assert_eq!(vocab.unk_frequency(), 1);
        assert_eq!(vocab.id("the"), 4);
    }

    #[test]
    fn id_equal_to_size_is_out_of_range() {
        let vocab = sample();
        let size = vocab.size();
        assert!(vocab.word(size - 1).is_ok());
        assert!(matches!(
            vocab.word(size),
            Err(Error::OutOfRange { id, size: s }) if id == size && s == size
        ));
        assert!(matches!(
            vocab.frequency(size),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn words_for_fails_on_any_bad_id() {
        let vocab = sample();
        assert_eq!(vocab.words_for(&[3, 1, 5]).unwrap(), vec!["sat", "<s>", "cat"]);
        assert!(vocab.words_for(&[3, 99, 4]).is_err());
    }

    #[test]
    fn unknown_words_map_to_unk() {
        let vocab = sample();
        assert_eq!(vocab.ids_for(&["cat", "dog", "THE"]), vec![5, UNK_ID, UNK_ID]);
        assert!(!vocab.contains("dog"));
    }

    #[test]
    fn iter_walks_in_id_order() {
        let vocab = sample();
        let rows: Vec<_> = vocab.iter().skip(3).collect();
        assert_eq!(rows, vec![(3, "sat", 2), (4, "the", 2), (5, "cat", 1)]);
    }
}
