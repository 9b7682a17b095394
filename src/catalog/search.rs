//! Search criteria and matching rules.

use super::Record;

/// Criteria for [`super::Catalog::search`].
///
/// Every supplied field must match. Title and author match as substrings,
/// category must match exactly after normalization. A criterion that is
/// blank after trimming is treated as not supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl SearchCriteria {
    pub fn title<S: Into<String>>(mut self, title: S) -> SearchCriteria {
        self.title = Some(title.into());
        self
    }

    pub fn author<S: Into<String>>(mut self, author: S) -> SearchCriteria {
        self.author = Some(author.into());
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> SearchCriteria {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        supplied(&self.title).is_none()
            && supplied(&self.author).is_none()
            && supplied(&self.category).is_none()
    }

    pub fn matches(&self, record: &Record, case_sensitive: bool) -> bool {
        field_matches(&self.title, &record.title, case_sensitive, contains)
            && field_matches(&self.author, &record.author, case_sensitive, contains)
            && field_matches(&self.category, &record.category, case_sensitive, equals)
    }
}

fn supplied(criterion: &Option<String>) -> Option<&str> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

fn normalize(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_owned()
    } else {
        s.to_lowercase()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

fn equals(value: &str, expected: &str) -> bool {
    value.trim() == expected
}

fn field_matches(
    criterion: &Option<String>,
    value: &Option<String>,
    case_sensitive: bool,
    compare: fn(&str, &str) -> bool,
) -> bool {
    let Some(criterion) = supplied(criterion) else {
        return true;
    };
    match value {
        Some(value) => compare(
            &normalize(value, case_sensitive),
            &normalize(criterion, case_sensitive),
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Record {
        Record::new(1)
            .with_title("Dune")
            .with_author("Frank Herbert")
            .with_category("Science Fiction")
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = SearchCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&dune(), false));
        assert!(criteria.matches(&Record::new(2), true));
    }

    #[test]
    fn blank_criterion_counts_as_omitted() {
        let criteria = SearchCriteria::default().title("   ");
        assert!(criteria.is_empty());
        assert!(criteria.matches(&Record::new(2), false));
    }

    #[test]
    fn title_and_author_are_substring_matches() {
        assert!(SearchCriteria::default().title("un").matches(&dune(), false));
        assert!(SearchCriteria::default()
            .author("herb")
            .matches(&dune(), false));
        assert!(!SearchCriteria::default()
            .author("asimov")
            .matches(&dune(), false));
    }

    #[test]
    fn category_requires_exact_match() {
        assert!(SearchCriteria::default()
            .category("science fiction")
            .matches(&dune(), false));
        assert!(SearchCriteria::default()
            .category(" Science Fiction ")
            .matches(&dune(), true));
        assert!(!SearchCriteria::default()
            .category("science")
            .matches(&dune(), false));
    }

    #[test]
    fn case_sensitive_search_respects_case() {
        assert!(!SearchCriteria::default().title("dune").matches(&dune(), true));
        assert!(SearchCriteria::default().title("Dune").matches(&dune(), true));
    }

    #[test]
    fn absent_field_never_matches_supplied_criterion() {
        let untitled = Record::new(3).with_author("Frank Herbert");
        assert!(!SearchCriteria::default().title("d").matches(&untitled, false));
        assert!(SearchCriteria::default()
            .author("frank")
            .matches(&untitled, false));
    }

    #[test]
    fn all_supplied_criteria_must_match() {
        let criteria = SearchCriteria::default().title("dune").author("asimov");
        assert!(!criteria.matches(&dune(), false));
    }
}
