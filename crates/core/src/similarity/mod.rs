// "Did you mean" ranking by Levenshtein edit distance.

/// Edit distance between two strings with unit cost for insertion, deletion
/// and substitution. Operates on `char`s, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_ch) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_ch) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_ch != b_ch);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Return every candidate tied for the smallest distance to `query`, in
/// candidate order.
pub fn rank<I, S>(query: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut best = usize::MAX;
    let mut closest = Vec::new();

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let distance = levenshtein(query, candidate);
        if distance < best {
            best = distance;
            closest.clear();
        }
        if distance == best {
            closest.push(candidate.to_string());
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── levenshtein ──────────────────────────────────────────────────

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("foo", "foo"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn empty_side_costs_full_length() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abcd", ""), 4);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("foob", "foo"), 1);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    // ── rank ─────────────────────────────────────────────────────────

    #[test]
    fn exact_match_wins() {
        assert_eq!(rank("foo", ["foo", "bar", "fizz"]), vec!["foo"]);
    }

    #[test]
    fn closest_single_candidate() {
        assert_eq!(rank("ad", ["about", "add", "?"]), vec!["add"]);
    }

    #[test]
    fn returns_all_ties_in_order() {
        assert_eq!(rank("cat", ["bat", "dog", "hat", "cart"]), vec!["bat", "hat", "cart"]);
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        assert!(rank("foo", Vec::<String>::new()).is_empty());
    }
}
