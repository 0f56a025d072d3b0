use rank_core::{rank, rank_order, Ranker, RankerConfig, NO_READABLE_TEXT};

const QUERY: &str = "python developer";

#[test]
fn one_score_per_candidate_in_unit_range() {
    let candidates = ["python expert with 5 years experience", "java developer", "", "python developer with sql"];
    let scores = rank(QUERY, &candidates);
    assert_eq!(scores.len(), candidates.len());
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn no_candidates_means_no_scores() {
    let empty: [&str; 0] = [];
    assert!(rank(QUERY, &empty).is_empty());
}

#[test]
fn disjoint_vocabulary_scores_zero() {
    assert_eq!(rank("x y z", &["a b c"]), vec![0.0]);
    assert_eq!(rank(QUERY, &["java kotlin", "go"]), vec![0.0, 0.0]);
}

#[test]
fn unreadable_candidate_scores_zero() {
    let scores = rank(QUERY, &["", NO_READABLE_TEXT, "python"]);
    assert_eq!(scores[0], 0.0);
    assert_eq!(scores[1], 0.0);
    assert!(scores[2] > 0.0);
}

#[test]
fn empty_query_scores_everything_zero() {
    assert_eq!(rank("", &["python", "java"]), vec![0.0, 0.0]);
}

#[test]
fn identical_candidates_score_identically() {
    let scores = rank(QUERY, &["senior python engineer", "java", "senior python engineer"]);
    assert_eq!(scores[0], scores[2]);
}

#[test]
fn copy_of_query_scores_highest() {
    let scores = rank(QUERY, &["python", QUERY, "developer tools"]);
    assert!((scores[1] - 1.0).abs() < 1e-5);
    assert!(scores[1] >= scores[0]);
    assert!(scores[1] >= scores[2]);
}

#[test]
fn permuting_candidates_permutes_scores() {
    let a = ["python expert", "java developer", "python developer with sql"];
    let b = ["python developer with sql", "python expert", "java developer"];
    let sa = rank(QUERY, &a);
    let sb = rank(QUERY, &b);
    assert_eq!(sa[0], sb[1]);
    assert_eq!(sa[1], sb[2]);
    assert_eq!(sa[2], sb[0]);
}

#[test]
fn repeated_calls_share_no_state() {
    let ranker = Ranker::default();
    let first = ranker.rank(QUERY, &["python developer"]);
    let _ = ranker.rank("completely different corpus", &["unrelated words", "python"]);
    assert_eq!(first, ranker.rank(QUERY, &["python developer"]));
}

#[test]
fn python_developer_scenario() {
    let candidates = ["python expert with 5 years experience", "java developer", "python developer with sql"];
    let scores = rank(QUERY, &candidates);
    let order = rank_order(&scores);
    // Full overlap wins. The two single-term matches are ordered by cosine length
    // normalization: the short "java developer" keeps more weight on its match.
    assert_eq!(order[0], 2);
    assert!(scores[0] > 0.0 && scores[1] > 0.0);
    assert!(scores[2] > scores[1] && scores[1] > scores[0]);
    assert!((scores[2] - 0.578).abs() < 1e-2);
    assert!((scores[1] - 0.380).abs() < 1e-2);
    assert!((scores[0] - 0.201).abs() < 1e-2);
}

#[test]
fn stopword_filtering_changes_weights_only_when_enabled() {
    let candidates = ["the python developer of the team", "python developer"];
    let plain = rank(QUERY, &candidates);
    assert!(plain[1] > plain[0]);

    let mut cfg = RankerConfig::default();
    cfg.tokenizer.remove_stopwords = true;
    let filtered = Ranker::new(cfg).unwrap().rank(QUERY, &candidates);
    assert!(filtered[0] > plain[0]);
}

#[test]
fn sublinear_tf_dampens_repetition() {
    let candidates = ["python python python python java", "python java"];
    let raw = rank(QUERY, &candidates);
    let cfg = RankerConfig { sublinear_tf: true, ..RankerConfig::default() };
    let damped = Ranker::new(cfg).unwrap().rank(QUERY, &candidates);
    assert!((raw[0] - damped[0]).abs() > 1e-4);
    assert!(damped.iter().all(|s| (0.0..=1.0).contains(s)));
}
