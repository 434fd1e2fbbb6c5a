//! Noun-phrase extraction backends.
//!
//! The keyword extractor only needs "text in, ordered noun phrases out", so any
//! backend that honours that contract can be plugged in through
//! [`NounPhraseExtractor`].

use serde::Deserialize;

/// Produces noun phrases from free text, in the order they appear.
///
/// Phrases keep their original case; callers normalize them.
pub trait NounPhraseExtractor {
    fn noun_phrases(&self, text: &str) -> Vec<String>;
}

impl<F> NounPhraseExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Longest phrase the chunker will emit before starting a new one.
const MAX_PHRASE_WORDS: usize = 4;

/// Characters that end a clause when they trail a token.
const CLAUSE_END: &[char] = &[',', ';', ':', '!', '?', '.', ')', ']'];
const LEADING_NOISE: &[char] = &['(', '[', '"', '\'', '\u{201c}', '\u{2018}'];
const TRAILING_NOISE: &[char] = &[
    ',', ';', ':', '!', '?', '.', ')', ']', '"', '\'', '\u{201d}', '\u{2019}',
];

/// Words that never belong to a noun phrase: determiners, pronouns,
/// prepositions, conjunctions, auxiliaries and the verbs job ads lean on.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "all",
    "both", "either", "neither", "no", "other", "such", "own", "i", "me", "my", "we", "us",
    "our", "ours", "you", "your", "yours", "he", "him", "his", "she", "her", "it", "its",
    "they", "them", "their", "who", "whom", "whose", "which", "what", "where", "when", "why",
    "how", "about", "above", "across", "after", "against", "along", "among", "around", "as",
    "at", "before", "behind", "below", "between", "beyond", "by", "during", "for", "from",
    "in", "including", "inside", "into", "like", "near", "of", "off", "on", "onto", "out",
    "over", "per", "since", "than", "through", "throughout", "to", "toward", "towards",
    "under", "until", "up", "upon", "via", "with", "within", "without", "and", "or", "but",
    "nor", "so", "yet", "if", "while", "whether", "because", "although", "though", "also",
    "not", "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had",
    "having", "do", "does", "did", "can", "could", "will", "would", "shall", "should", "may",
    "might", "must", "need", "needs", "needed", "want", "wants", "looking", "seeking", "join",
    "joining", "help", "helps", "build", "building", "design", "designing", "develop",
    "developing", "maintain", "maintaining", "create", "creating", "drive", "drives",
    "deliver", "delivering", "ensure", "ensuring", "support", "supporting", "manage",
    "managing", "lead", "leading", "work", "working", "collaborate", "collaborating",
    "write", "writing", "use", "using", "make", "making", "provide", "providing",
    "owning", "bring", "include", "includes", "required", "preferred", "plus", "etc", "more",
    "most", "very", "well", "able", "just", "only", "new",
];

const BREAK_SYMBOLS: &[&str] = &["-", "–", "—", "&", "/", "|", "•", "*", "+"];

/// Rule-based chunker: runs of content words between function words,
/// adverbs and clause punctuation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicChunker;

impl HeuristicChunker {
    fn is_breaker(word: &str) -> bool {
        if word.is_empty() || BREAK_SYMBOLS.contains(&word) {
            return true;
        }
        if !word.chars().any(char::is_alphabetic) {
            return true;
        }
        let lower = word.to_lowercase();
        if FUNCTION_WORDS.contains(&lower.as_str()) {
            return true;
        }
        lower.len() > 4 && lower.ends_with("ly")
    }
}

impl NounPhraseExtractor for HeuristicChunker {
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        fn flush(current: &mut Vec<&str>, phrases: &mut Vec<String>) {
            if !current.is_empty() {
                phrases.push(current.join(" "));
                current.clear();
            }
        }

        for raw in text.split_whitespace() {
            let word = raw
                .trim_start_matches(LEADING_NOISE)
                .trim_end_matches(TRAILING_NOISE);
            let ends_clause = raw.ends_with(CLAUSE_END);

            if Self::is_breaker(word) {
                flush(&mut current, &mut phrases);
                continue;
            }

            if current.len() == MAX_PHRASE_WORDS {
                flush(&mut current, &mut phrases);
            }
            current.push(word);
            if ends_clause {
                flush(&mut current, &mut phrases);
            }
        }
        flush(&mut current, &mut phrases);

        phrases
    }
}

/// Groups `(word, tag)` pairs into adjective/noun runs that end in a noun.
#[cfg(any(feature = "bert", test))]
fn chunk_tagged<'a>(tagged: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    fn is_noun(tag: &str) -> bool {
        tag.starts_with("NN")
    }
    fn is_modifier(tag: &str) -> bool {
        tag.starts_with("JJ")
    }

    let mut phrases = Vec::new();
    let mut run: Vec<(&str, &str)> = Vec::new();

    fn close(run: &mut Vec<(&str, &str)>, phrases: &mut Vec<String>) {
        while run.last().is_some_and(|(_, tag)| !is_noun(tag)) {
            run.pop();
        }
        if !run.is_empty() {
            let words: Vec<&str> = run.iter().map(|(w, _)| *w).collect();
            phrases.push(words.join(" "));
        }
        run.clear();
    }

    for (word, tag) in tagged {
        if is_noun(tag) || is_modifier(tag) {
            run.push((word, tag));
        } else {
            close(&mut run, &mut phrases);
        }
    }
    close(&mut run, &mut phrases);

    phrases
}

/// Chunker backed by rust-bert's part-of-speech pipeline.
#[cfg(feature = "bert")]
pub struct PosTaggerChunker {
    model: rust_bert::pipelines::pos_tagging::POSModel,
}

#[cfg(feature = "bert")]
impl PosTaggerChunker {
    pub fn new() -> anyhow::Result<Self> {
        let model = rust_bert::pipelines::pos_tagging::POSModel::new(Default::default())?;
        Ok(Self { model })
    }
}

#[cfg(feature = "bert")]
impl NounPhraseExtractor for PosTaggerChunker {
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let output = self.model.predict(&[text]);
        let Some(tags) = output.first() else {
            return Vec::new();
        };
        chunk_tagged(tags.iter().map(|t| (t.word.as_str(), t.label.as_str())))
    }
}

/// Backend selection as written in configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NlpBackend {
    #[default]
    Heuristic,
    PosTagger,
}

impl NlpBackend {
    pub fn build(self) -> anyhow::Result<Box<dyn NounPhraseExtractor>> {
        match self {
            NlpBackend::Heuristic => Ok(Box::new(HeuristicChunker)),
            #[cfg(feature = "bert")]
            NlpBackend::PosTagger => Ok(Box::new(PosTaggerChunker::new()?)),
            #[cfg(not(feature = "bert"))]
            NlpBackend::PosTagger => Err(anyhow::anyhow!(
                "the pos-tagger backend requires building with `--features bert`"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_function_words_and_punctuation() {
        let phrases =
            HeuristicChunker.noun_phrases("We need a Python developer with AWS and Docker experience");
        assert_eq!(phrases, vec!["Python developer", "AWS", "Docker experience"]);
    }

    #[test]
    fn clause_punctuation_closes_phrases() {
        let phrases = HeuristicChunker.noun_phrases("Kubernetes, Terraform; (cloud infrastructure).");
        assert_eq!(phrases, vec!["Kubernetes", "Terraform", "cloud infrastructure"]);
    }

    #[test]
    fn keeps_internal_periods() {
        let phrases = HeuristicChunker.noun_phrases("Experience with Node.js.");
        assert_eq!(phrases, vec!["Experience", "Node.js"]);
    }

    #[test]
    fn numbers_and_adverbs_break_phrases() {
        let phrases = HeuristicChunker.noun_phrases("5+ years building highly available payment systems");
        assert_eq!(phrases, vec!["years", "available payment systems"]);
    }

    #[test]
    fn caps_phrase_length() {
        let phrases = HeuristicChunker.noun_phrases("Rust Go Python Java Kotlin Swift");
        assert_eq!(phrases, vec!["Rust Go Python Java", "Kotlin Swift"]);
    }

    #[test]
    fn empty_text_has_no_phrases() {
        assert!(HeuristicChunker.noun_phrases("").is_empty());
        assert!(HeuristicChunker.noun_phrases("  \n\t ").is_empty());
    }

    #[test]
    fn closures_are_extractors() {
        let fixed = |_: &str| vec!["Distributed Tracing".to_string()];
        assert_eq!(fixed.noun_phrases("ignored"), vec!["Distributed Tracing"]);
    }

    #[test]
    fn tagged_runs_end_in_nouns() {
        let tagged = [
            ("We", "PRP"),
            ("need", "VBP"),
            ("a", "DT"),
            ("strong", "JJ"),
            ("backend", "NN"),
            ("engineer", "NN"),
            ("who", "WP"),
            ("is", "VBZ"),
            ("curious", "JJ"),
        ];
        assert_eq!(chunk_tagged(tagged), vec!["strong backend engineer"]);
    }
}
