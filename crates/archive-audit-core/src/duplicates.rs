use ahash::AHashMap;
use serde::Serialize;

/// A path string that occurs more than once in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePath {
    pub path: String,
    pub occurrences: usize,
}

/// Every distinct path occurring at least twice, sorted by path.
pub fn find_duplicates(paths: &[String]) -> Vec<DuplicatePath> {
    let mut counts: AHashMap<&str, usize> = AHashMap::with_capacity(paths.len());
    for path in paths {
        *counts.entry(path.as_str()).or_insert(0) += 1;
    }

    let mut duplicates: Vec<DuplicatePath> = counts
        .into_iter()
        .filter(|&(_, occurrences)| occurrences > 1)
        .map(|(path, occurrences)| DuplicatePath {
            path: path.to_string(),
            occurrences,
        })
        .collect();
    duplicates.sort_by(|a, b| a.path.cmp(&b.path));
    duplicates
}

/// Number of distinct path strings that occur more than once.
pub fn count_duplicates(paths: &[String]) -> usize {
    find_duplicates(paths).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_distinct_strings_not_occurrences() {
        let folder_paths = paths(&["/a/b", "/a/b", "/a/b", "/a"]);
        assert_eq!(count_duplicates(&folder_paths), 1);
        assert_eq!(
            find_duplicates(&folder_paths),
            vec![DuplicatePath {
                path: "/a/b".to_string(),
                occurrences: 3,
            }]
        );
    }

    #[test]
    fn test_unique_paths_report_no_duplicates() {
        assert_eq!(count_duplicates(&paths(&["/a", "/a/b", "/c"])), 0);
    }

    #[test]
    fn test_empty_multiset_reports_zero() {
        assert_eq!(count_duplicates(&[]), 0);
    }

    #[test]
    fn test_duplicates_sorted_by_path() {
        let found = find_duplicates(&paths(&["/z", "/m", "/z", "/m", "/q"]));
        let names: Vec<&str> = found.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(names, vec!["/m", "/z"]);
    }
}
