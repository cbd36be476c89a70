use std::collections::{HashMap, HashSet};

/// TF-IDF index over a fixed corpus
///
/// Vocabulary and document frequencies are fixed at build time; queries are
/// vectorized with the same tokenizer and stop-word list, so a term never
/// seen at build time contributes nothing. Weights are raw term frequency
/// times smoothed inverse document frequency (`ln((1+n)/(1+df)) + 1`), and
/// every vector is L2-normalized so cosine similarity reduces to a sparse
/// dot product.
#[derive(Debug, Clone)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    doc_vectors: Vec<Vec<(usize, f32)>>,
}

impl TfidfIndex {
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> =
            corpus.iter().map(|doc| tokenize(doc.as_ref())).collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        // Deterministic term ids: vocabulary in sorted order
        let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
        terms.sort_unstable();

        let doc_count = corpus.len() as f32;
        let idf: Vec<f32> = terms
            .iter()
            .map(|term| {
                let df = document_frequency[*term] as f32;
                ((1.0 + doc_count) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| weigh_and_normalize(tokens, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Sparse L2-normalized vector for arbitrary text; out-of-vocabulary
    /// terms are dropped
    pub fn vectorize(&self, text: &str) -> Vec<(usize, f32)> {
        weigh_and_normalize(&tokenize(text), &self.vocabulary, &self.idf)
    }

    /// Cosine similarity of the query text against every document, in
    /// document order. Scores land in [0, 1]; a query with no known terms
    /// scores 0 everywhere.
    pub fn query_similarity(&self, text: &str) -> Vec<f32> {
        let query = self.vectorize(text);
        self.doc_vectors.iter().map(|doc| dot(&query, doc)).collect()
    }

    /// Full pairwise cosine matrix, row i = similarities of document i
    pub fn pairwise_similarity(&self) -> Vec<Vec<f32>> {
        self.doc_vectors
            .iter()
            .map(|row| self.doc_vectors.iter().map(|other| dot(row, other)).collect())
            .collect()
    }
}

/// Indices of the `limit` best scores, descending; equal scores keep their
/// input order. `exclude` drops one index from consideration entirely.
pub fn rank_descending(scores: &[f32], exclude: Option<usize>, limit: usize) -> Vec<usize> {
    let mut ranked: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| Some(i) != exclude)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked.into_iter().map(|(i, _)| i).collect()
}

/// Lowercase runs of at least two word characters, minus stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| token.chars().count() >= 2 && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

fn weigh_and_normalize(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f32],
) -> Vec<(usize, f32)> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        if let Some(&term_id) = vocabulary.get(token.as_str()) {
            *counts.entry(term_id).or_insert(0) += 1;
        }
    }

    let mut vector: Vec<(usize, f32)> = counts
        .into_iter()
        .map(|(term_id, count)| (term_id, count as f32 * idf[term_id]))
        .collect();
    vector.sort_unstable_by_key(|&(term_id, _)| term_id);

    let norm = vector.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

/// Sparse dot product over term-id-sorted vectors
fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// English stop words, the standard 318-entry IR list. Kept sorted so
/// membership checks can binary search.
const ENGLISH_STOP_WORDS: &[&str] = &[
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
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_corpus() -> Vec<&'static str> {
        vec![
            "space station orbit astronaut mission",
            "love story wedding summer romance",
            "space battle laser fleet mission",
            "quiet village baker bread morning",
        ]
    }

    #[test]
    fn test_stop_word_list_is_sorted() {
        assert!(ENGLISH_STOP_WORDS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Sci-Fi: Space Battles!"),
            vec!["sci", "fi", "space", "battles"]
        );
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        assert_eq!(tokenize("a I at the movies"), vec!["movies"]);
        assert_eq!(tokenize("it is what it is"), Vec::<String>::new());
    }

    #[test]
    fn test_query_matches_own_document_perfectly() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);
        let scores = index.query_similarity(corpus[1]);
        assert!((scores[1] - 1.0).abs() < 1e-5);
        assert!(scores[1] > scores[0]);
        assert!(scores[1] > scores[3]);
    }

    #[test]
    fn test_out_of_vocabulary_query_scores_zero() {
        let index = TfidfIndex::build(&sample_corpus());
        let scores = index.query_similarity("submarine quantum zeppelin");
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_shared_terms_score_higher() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);
        let scores = index.query_similarity("space mission");
        // Documents 0 and 2 share both terms; 1 and 3 share none
        assert!(scores[0] > 0.0);
        assert!(scores[2] > 0.0);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_pairwise_is_symmetric_with_unit_diagonal() {
        let index = TfidfIndex::build(&sample_corpus());
        let matrix = index.pairwise_similarity();
        for i in 0..matrix.len() {
            assert!((matrix[i][i] - 1.0).abs() < 1e-5);
            for j in 0..matrix.len() {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-6);
                assert!(matrix[i][j] >= 0.0 && matrix[i][j] <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_empty_document_scores_zero_even_against_itself() {
        let corpus = vec!["space station orbit", "", "space station orbit"];
        let index = TfidfIndex::build(&corpus);
        let matrix = index.pairwise_similarity();
        assert_eq!(matrix[1][1], 0.0);
        assert_eq!(matrix[0][1], 0.0);
        assert!(matrix[0][2] > 0.99);
    }

    #[test]
    fn test_rank_descending_stable_ties_and_exclude() {
        let scores = vec![0.5, 0.9, 0.5, 0.1, 0.9];
        assert_eq!(rank_descending(&scores, None, 3), vec![1, 4, 0]);
        assert_eq!(rank_descending(&scores, Some(1), 3), vec![4, 0, 2]);
        assert_eq!(rank_descending(&scores, None, 10).len(), 5);
    }

    #[test]
    fn test_empty_corpus_yields_empty_scores() {
        let index = TfidfIndex::build(&Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.query_similarity("anything").is_empty());
    }
}
