//! Text vectorization for content-based filtering
//!
//! Tokenizes descriptions, drops English stop words, and weights terms with
//! smoothed TF-IDF. Every document vector is L2 normalized, so the cosine
//! similarity of two documents is their dot product.

use ndarray::{Array2, Axis};
use std::collections::{BTreeMap, HashSet};

/// Standard English stop-word list
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Split text into lowercase word tokens of at least two characters.
///
/// A word is a maximal run of alphanumeric characters or underscores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectorizer fitted on a document corpus
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<&'static str>,
    /// term -> column index, columns in lexical term order
    vocabulary: BTreeMap<String, usize>,
    /// Smoothed IDF weight per column
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::english()
    }
}

impl TfidfVectorizer {
    /// Vectorizer that removes the English stop-word list
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t.as_str()))
            .collect()
    }

    /// Learn the vocabulary and IDF weights, then return the `documents x terms`
    /// matrix of L2-normalized TF-IDF rows.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Array2<f64> {
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.analyze(d.as_ref()))
            .collect();

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for tokens in &analyzed {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        self.vocabulary = doc_freq
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.idf = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut matrix = Array2::<f64>::zeros((documents.len(), self.vocabulary.len()));
        for (row, tokens) in analyzed.iter().enumerate() {
            for token in tokens {
                if let Some(&col) = self.vocabulary.get(token) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }
        for (col, weight) in self.idf.iter().enumerate() {
            matrix.column_mut(col).mapv_inplace(|tf| tf * weight);
        }
        for mut row in matrix.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|x| x / norm);
            }
        }

        tracing::debug!(
            documents = documents.len(),
            terms = self.vocabulary.len(),
            "Fitted TF-IDF vectorizer"
        );

        matrix
    }
}

/// Pairwise cosine similarity between the rows of `vectors`.
///
/// Rows with zero norm have similarity 0 with every row, themselves included.
pub fn cosine_similarity_matrix(vectors: &Array2<f64>) -> Array2<f64> {
    let norms: Vec<f64> = vectors
        .axis_iter(Axis(0))
        .map(|row| row.dot(&row).sqrt())
        .collect();
    let mut similarity = vectors.dot(&vectors.t());
    for ((i, j), value) in similarity.indexed_iter_mut() {
        let denom = norms[i] * norms[j];
        *value = if denom > 0.0 { *value / denom } else { 0.0 };
    }
    similarity
}
