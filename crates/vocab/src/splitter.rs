use crate::config::SplitterCfg;
use crate::errors::Result;
use regex::Regex;

/// Turns one line of text into an ordered sequence of tokens.
///
/// Implementations must be deterministic for a fixed input.
pub trait LineSplitter {
    fn split(&self, line: &str) -> Vec<String>;
}

impl<F> LineSplitter for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn split(&self, line: &str) -> Vec<String> {
        self(line)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSplitter;

impl LineSplitter for WhitespaceSplitter {
    fn split(&self, line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }
}

/// Every non-overlapping match of the pattern is a token.
#[derive(Debug, Clone)]
pub struct RegexSplitter {
    pattern: Regex,
}

impl RegexSplitter {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl LineSplitter for RegexSplitter {
    fn split(&self, line: &str) -> Vec<String> {
        self.pattern
            .find_iter(line)
            .map(|m| m.as_str().to_owned())
            .collect()
    }
}

pub fn build_splitter(cfg: &SplitterCfg) -> Result<Box<dyn LineSplitter>> {
    let splitter: Box<dyn LineSplitter> = match cfg {
        SplitterCfg::Whitespace => Box::new(WhitespaceSplitter),
        SplitterCfg::Regex { pattern } => Box::new(RegexSplitter::new(pattern)?),
    };
    Ok(splitter)
}

pub fn name(cfg: &SplitterCfg) -> &'static str {
    match cfg {
        SplitterCfg::Whitespace => "whitespace",
        SplitterCfg::Regex { .. } => "regex",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_collapses_runs_and_tabs() {
        let tokens = WhitespaceSplitter.split("  the\tcat   sat \r");
        assert_eq!(tokens, vec!["the", "cat", "sat"]);
    }

    #[test]
    fn whitespace_blank_line_yields_nothing() {
        assert!(WhitespaceSplitter.split("   ").is_empty());
    }

    #[test]
    fn regex_keeps_matches_only() {
        let splitter = RegexSplitter::new(r"\w+|[^\w\s]").expect("valid pattern");
        assert_eq!(splitter.split("Hello, world!"), vec!["Hello", ",", "world", "!"]);
    }

    #[test]
    fn regex_rejects_bad_pattern() {
        assert!(RegexSplitter::new("(unclosed").is_err());
    }

    #[test]
    fn closures_are_splitters() {
        let by_comma = |line: &str| -> Vec<String> { line.split(',').map(str::to_owned).collect() };
        assert_eq!(by_comma.split("a,b"), vec!["a", "b"]);
    }

    #[test]
    fn build_from_cfg_picks_impl() {
        let regex = build_splitter(&SplitterCfg::Regex {
            pattern: "[a-z]+".into(),
        })
        .expect("valid pattern");
        assert_eq!(regex.split("ab1cd"), vec!["ab", "cd"]);
        assert_eq!(name(&SplitterCfg::Whitespace), "whitespace");
    }
}
