//! Word Categories
//!
//! The flat `{name, words}` lists the engine draws secret words from, plus the
//! ingestion checks applied to user-defined categories.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum words a user-defined category must carry.
pub const MIN_CUSTOM_WORDS: usize = 2;

/// A named list of candidate secret words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, unique within a category set.
    pub name: String,
    /// Candidate words, in authoring order.
    pub words: Vec<String>,
}

impl Category {
    /// Build a category from raw input, trimming the name and every word and
    /// dropping words that are empty after trimming.
    pub fn new<N, I, W>(name: N, words: I) -> Self
    where
        N: AsRef<str>,
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        Self {
            name: name.as_ref().trim().to_string(),
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Build a category from a comma-separated word list.
    pub fn from_csv(name: &str, words: &str) -> Self {
        Self::new(name, words.split(','))
    }

    /// Check the category is fit to be added as a user-defined category.
    pub fn validate(&self) -> Result<(), CategoryError> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if self.words.len() < MIN_CUSTOM_WORDS {
            return Err(CategoryError::TooFewWords {
                name: self.name.clone(),
                found: self.words.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for word in &self.words {
            if !seen.insert(word.as_str()) {
                return Err(CategoryError::DuplicateWord {
                    name: self.name.clone(),
                    word: word.clone(),
                });
            }
        }
        Ok(())
    }

    /// Whether the category can be drawn from at all.
    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }
}

/// Category ingestion errors.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Name is blank.
    #[error("category needs a name")]
    EmptyName,
    /// Fewer than [`MIN_CUSTOM_WORDS`] words.
    #[error("category '{name}' needs at least {min} words, found {found}", min = MIN_CUSTOM_WORDS)]
    TooFewWords {
        /// Category name.
        name: String,
        /// Number of words supplied.
        found: usize,
    },
    /// The same word appears twice.
    #[error("category '{name}' lists '{word}' more than once")]
    DuplicateWord {
        /// Category name.
        name: String,
        /// Repeated word.
        word: String,
    },
    /// Another category already uses this name (case-insensitive).
    #[error("a category named '{0}' already exists")]
    DuplicateName(String),
    /// Word list document could not be parsed.
    #[error("invalid category document: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// CATEGORY SET
// =============================================================================

/// On-disk shape of a word list document.
#[derive(Debug, Serialize, Deserialize)]
struct CategoryDocument {
    categories: Vec<Category>,
}

/// Bundled categories.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Animals",
        &["Lion", "Penguin", "Giraffe", "Dolphin", "Kangaroo", "Owl", "Octopus", "Zebra"],
    ),
    (
        "Food",
        &["Pizza", "Sushi", "Taco", "Pancake", "Curry", "Burger", "Salad", "Dumpling"],
    ),
    (
        "Places",
        &["Beach", "Library", "Airport", "Museum", "Hospital", "Casino", "Farm", "Stadium"],
    ),
    (
        "Jobs",
        &["Pilot", "Chef", "Dentist", "Firefighter", "Teacher", "Plumber", "Astronaut", "Judge"],
    ),
];

/// An ordered collection of categories with unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled categories.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN
                .iter()
                .map(|(name, words)| Category::new(name, words.iter()))
                .collect(),
        }
    }

    /// Parse a `{"categories": [{"name": .., "words": [..]}]}` document.
    ///
    /// Entries are taken as authored; only name uniqueness is enforced.
    pub fn from_json(json: &str) -> Result<Self, CategoryError> {
        let doc: CategoryDocument = serde_json::from_str(json)?;
        let mut set = Self::new();
        for category in doc.categories {
            let category = Category::new(&category.name, &category.words);
            if set.contains(&category.name) {
                return Err(CategoryError::DuplicateName(category.name));
            }
            set.categories.push(category);
        }
        Ok(set)
    }

    /// Serialize to the document shape read by [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Result<String, CategoryError> {
        let doc = CategoryDocument {
            categories: self.categories.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Add a user-defined category after validating it.
    pub fn insert_custom(&mut self, category: Category) -> Result<(), CategoryError> {
        category.validate()?;
        if self.contains(&category.name) {
            return Err(CategoryError::DuplicateName(category.name));
        }
        self.categories.push(category);
        Ok(())
    }

    /// Remove a category by exact name. Returns it if present.
    pub fn remove(&mut self, name: &str) -> Option<Category> {
        let idx = self.categories.iter().position(|c| c.name == name)?;
        Some(self.categories.remove(idx))
    }

    /// Case-insensitive name lookup.
    pub fn contains(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.categories.iter().any(|c| c.name.to_lowercase() == lower)
    }

    /// Category names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Borrow the categories as the flat list the engine consumes.
    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    /// Append every category of `other` whose name is not already present.
    pub fn merge(&mut self, other: CategorySet) {
        for category in other.categories {
            if !self.contains(&category.name) {
                self.categories.push(category);
            }
        }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<Vec<Category>> for CategorySet {
    fn from(categories: Vec<Category>) -> Self {
        let mut set = Self::new();
        for category in categories {
            if !set.contains(&category.name) {
                set.categories.push(category);
            }
        }
        set
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_drops_blanks() {
        let c = Category::from_csv("  Fruit ", "apple, pear ,, ,plum");
        assert_eq!(c.name, "Fruit");
        assert_eq!(c.words, vec!["apple", "pear", "plum"]);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            Category::new("", ["a", "b"]).validate(),
            Err(CategoryError::EmptyName)
        ));
        assert!(matches!(
            Category::new("X", ["a"]).validate(),
            Err(CategoryError::TooFewWords { found: 1, .. })
        ));
        assert!(matches!(
            Category::new("X", ["a", "b", "a"]).validate(),
            Err(CategoryError::DuplicateWord { ref word, .. }) if word == "a"
        ));
        assert!(Category::new("X", ["a", "b"]).validate().is_ok());
    }

    #[test]
    fn test_insert_custom_rejects_duplicate_name_case_insensitive() {
        let mut set = CategorySet::builtin();
        let err = set
            .insert_custom(Category::new("animals", ["cat", "dog"]))
            .unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateName(ref name) if name == "animals"));

        set.insert_custom(Category::new("Colors", ["red", "blue"])).unwrap();
        assert!(set.contains("COLORS"));
    }

    #[test]
    fn test_remove() {
        let mut set = CategorySet::builtin();
        let before = set.len();
        assert!(set.remove("Food").is_some());
        assert!(set.remove("Food").is_none());
        assert_eq!(set.len(), before - 1);
    }

    #[test]
    fn test_builtin_categories_are_valid() {
        let set = CategorySet::builtin();
        assert!(!set.is_empty());
        for c in set.as_slice() {
            c.validate().unwrap();
        }
    }

    #[test]
    fn test_json_document() {
        let json = r#"{"categories":[{"name":"Fruit","words":["apple","pear"]},{"name":"X","words":["solo"]}]}"#;
        let set = CategorySet::from_json(json).unwrap();
        assert_eq!(set.names(), vec!["Fruit", "X"]);

        let again = CategorySet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again, set);

        let dup = r#"{"categories":[{"name":"A","words":["x"]},{"name":"a","words":["y"]}]}"#;
        assert!(matches!(
            CategorySet::from_json(dup),
            Err(CategoryError::DuplicateName(_))
        ));

        assert!(matches!(
            CategorySet::from_json("not json"),
            Err(CategoryError::Parse(_))
        ));
    }

    #[test]
    fn test_merge_keeps_first() {
        let mut set = CategorySet::from(vec![Category::new("A", ["x", "y"])]);
        set.merge(CategorySet::from(vec![
            Category::new("a", ["z", "w"]),
            Category::new("B", ["p", "q"]),
        ]));
        assert_eq!(set.names(), vec!["A", "B"]);
        assert_eq!(set.as_slice()[0].words, vec!["x", "y"]);
    }
}
