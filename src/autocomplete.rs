use ahash::AHashMap;

use crate::catalog::LabelSet;

#[derive(Default)]
struct AutocompleteNode {
    children: AHashMap<char, AutocompleteNode>,
    // Some(..) exactly at word ends.
    value: Option<String>,
}

impl AutocompleteNode {
    fn sorted_children(&self) -> Vec<(char, &AutocompleteNode)> {
        let mut children: Vec<_> = self.children.iter().map(|(c, n)| (*c, n)).collect();
        children.sort_unstable_by_key(|(c, _)| *c);
        children
    }
}

/// Case-insensitive prefix index over service and product labels.
///
/// Words are indexed by their lowercased form; each word end stores the
/// value handed to [`PrefixIndex::insert`], usually the original-case label.
/// Search results come back in lexicographic order of the lowercased words.
#[derive(Default)]
pub struct PrefixIndex {
    root: AutocompleteNode,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: &LabelSet) -> Self {
        let mut index = Self::new();
        for label in labels.iter() {
            index.insert(&label.word, &label.value);
        }
        index
    }

    /// Indexes `word` (lowercased) and stores `value` at its end.
    ///
    /// Inserting the same lowercased word again overwrites the stored value.
    /// An empty word marks the root, so it only shows up for an empty prefix.
    pub fn insert(&mut self, word: &str, value: &str) {
        let mut curr = &mut self.root;
        for c in fold_case(word) {
            curr = curr.children.entry(c).or_default();
        }
        if curr.value.replace(value.to_string()).is_none() {
            self.len += 1;
        }
    }

    pub fn insert_label(&mut self, word: &str) {
        self.insert(word, word);
    }

    /// Every stored value whose word starts with `prefix`, ignoring case.
    ///
    /// An empty prefix returns everything in the index.
    pub fn search(&self, prefix: &str) -> Vec<String> {
        match self.find(prefix) {
            Some(node) => collect_words(node, usize::MAX),
            None => vec![],
        }
    }

    /// The autocomplete panel query: at most `limit` matches, and nothing at
    /// all for a blank input.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        if prefix.trim().is_empty() || limit == 0 {
            return vec![];
        }
        match self.find(prefix) {
            Some(node) => collect_words(node, limit),
            None => vec![],
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.find(word).and_then(|node| node.value.as_deref())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, prefix: &str) -> Option<&AutocompleteNode> {
        let mut curr = &self.root;
        for c in fold_case(prefix) {
            curr = curr.children.get(&c)?;
        }
        Some(curr)
    }
}

// Per character, so context rules such as Greek final sigma cannot make a
// prefix fold differently from the word it starts.
fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

// Pre-order walk with an explicit stack; children are pushed in reverse so
// the smallest character is popped first.
fn collect_words(start: &AutocompleteNode, limit: usize) -> Vec<String> {
    let mut results = Vec::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if let Some(value) = &node.value {
            results.push(value.clone());
            if results.len() >= limit {
                break;
            }
        }
        for (_, child) in node.sorted_children().into_iter().rev() {
            stack.push(child);
        }
    }

    results
}

// Nested maps would otherwise drop recursively, one frame per character.
impl Drop for PrefixIndex {
    fn drop(&mut self) {
        let mut stack: Vec<AutocompleteNode> =
            self.root.children.drain().map(|(_, node)| node).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

impl<'a> FromIterator<&'a str> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a> Extend<&'a str> for PrefixIndex {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert_label(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn marketplace_index() -> PrefixIndex {
        let mut index: PrefixIndex = ["Electrician", "Plumber", "Beauty Parlor"]
            .into_iter()
            .collect();
        index.extend(["Food", "Repair"]);
        index
    }

    #[rstest]
    #[case("e", &["Electrician"])]
    #[case("p", &["Plumber"])]
    #[case("b", &["Beauty Parlor"])]
    #[case("f", &["Food"])]
    #[case("r", &["Repair"])]
    #[case("z", &[])]
    fn finds_marketplace_labels(#[case] prefix: &str, #[case] expected: &[&str]) {
        assert_eq!(marketplace_index().search(prefix), expected);
    }

    #[rstest]
    #[case("ELEC")]
    #[case("elec")]
    #[case("Elec")]
    #[case("eLeCtRiCiAn")]
    fn ignores_case(#[case] prefix: &str) {
        let mut index = PrefixIndex::new();
        index.insert_label("Electrician");
        assert_eq!(index.search(prefix), vec!["Electrician"]);
    }

    #[test]
    fn duplicate_insert_keeps_last_value() {
        let mut index = PrefixIndex::new();
        index.insert("Salon", "Beauty Parlor");
        index.insert("SALON", "Hair Salon");

        assert_eq!(index.search("salon"), vec!["Hair Salon"]);
        assert_eq!(index.get("Salon"), Some("Hair Salon"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn word_that_prefixes_another_still_matches() {
        let index: PrefixIndex = ["Cake Shop", "Cake"].into_iter().collect();
        assert_eq!(index.search("Cake"), vec!["Cake", "Cake Shop"]);
        assert_eq!(index.search("cake "), vec!["Cake Shop"]);
    }

    #[test]
    fn empty_prefix_returns_everything() {
        let index = marketplace_index();
        assert_eq!(
            index.search(""),
            vec!["Beauty Parlor", "Electrician", "Food", "Plumber", "Repair"]
        );
    }

    #[test]
    fn empty_index_matches_nothing() {
        let index = PrefixIndex::new();
        assert!(index.is_empty());
        assert!(index.search("").is_empty());
        assert!(index.search("a").is_empty());
    }

    #[test]
    fn prefix_longer_than_any_word_matches_nothing() {
        let index = marketplace_index();
        assert!(index.search("plumbers").is_empty());
    }

    #[test]
    fn results_are_lexicographic() {
        let index: PrefixIndex = ["Rentals", "Restaurants", "Repair", "Rent a Bike"]
            .into_iter()
            .collect();
        assert_eq!(
            index.search("re"),
            vec!["Rent a Bike", "Rentals", "Repair", "Restaurants"]
        );
    }

    #[test]
    fn synonym_returns_mapped_value() {
        let mut index = PrefixIndex::new();
        index.insert_label("Electrician");
        index.insert("Wiring", "Electrician");

        assert_eq!(index.search("wir"), vec!["Electrician"]);
        assert!(index.contains("wiring"));
        assert!(!index.contains("wir"));
    }

    #[test]
    fn empty_word_only_matches_empty_prefix() {
        let mut index = PrefixIndex::new();
        index.insert("", "anything");
        index.insert_label("Grocery");

        assert_eq!(index.search(""), vec!["anything", "Grocery"]);
        assert_eq!(index.search("g"), vec!["Grocery"]);
    }

    #[test]
    fn suggest_caps_results() {
        let index: PrefixIndex = ["Street Food", "Stationery", "Stitching", "Storage"]
            .into_iter()
            .collect();
        assert_eq!(index.suggest("st", 2), vec!["Stationery", "Stitching"]);
        assert_eq!(index.suggest("st", 10).len(), 4);
        assert!(index.suggest("st", 0).is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn suggest_hides_panel_for_blank_input(#[case] prefix: &str) {
        assert!(marketplace_index().suggest(prefix, 10).is_empty());
    }

    #[test]
    fn handles_unicode_labels() {
        let index: PrefixIndex = ["Čaj", "Café"].into_iter().collect();
        assert_eq!(index.search("ČA"), vec!["Čaj"]);
        assert_eq!(index.search("CAF"), vec!["Café"]);
    }

    #[test]
    fn final_sigma_folds_the_same_in_prefix_and_word() {
        let mut index = PrefixIndex::new();
        index.insert_label("ΟΔΟΣΑ");
        assert_eq!(index.search("ΟΔΟΣ"), vec!["ΟΔΟΣΑ"]);
        assert_eq!(index.search("οδοσ"), vec!["ΟΔΟΣΑ"]);

        index.insert_label("ΟΔΟΣ");
        assert_eq!(index.search("οδοσ"), vec!["ΟΔΟΣ", "ΟΔΟΣΑ"]);
        assert!(index.contains("οδοσ"));
    }

    #[test]
    fn deep_chains_do_not_overflow() {
        let long = "a".repeat(100_000);
        let mut index = PrefixIndex::new();
        index.insert_label(&long);
        index.insert_label("a");

        let results = index.search("a");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], "a");
    }
}
