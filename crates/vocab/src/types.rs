use serde::{Deserialize, Serialize};

/// Summary of a built vocabulary, suitable for logging or a JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub size: usize,
    pub total_words: u64,
    pub total_lines: u64,
    pub unk_frequency: u64,
}

impl CorpusStats {
    /// Fraction of corpus tokens that map to `<UNK>`.
    pub fn unk_ratio(&self) -> f64 {
        if self.total_words == 0 {
            0.0
        } else {
            self.unk_frequency as f64 / self.total_words as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unk_ratio_handles_empty_corpus() {
        let stats = CorpusStats {
            size: 3,
            total_words: 0,
            total_lines: 0,
            unk_frequency: 0,
        };
        assert_eq!(stats.unk_ratio(), 0.0);
    }

    #[test]
    fn stats_serialize_as_flat_json() {
        let stats = CorpusStats {
            size: 6,
            total_words: 6,
            total_lines: 2,
            unk_frequency: 1,
        };
        let value = serde_json::to_value(stats).expect("serialize");
        assert_eq!(value["size"], 6);
        assert_eq!(value["unk_frequency"], 1);
        assert!((stats.unk_ratio() - 1.0 / 6.0).abs() < 1e-12);
    }
}
