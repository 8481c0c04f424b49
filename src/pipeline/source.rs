//! Where produced items come from. A directory walker can implement [`PathSource`] later
//! without touching the producer.

use crate::Item;
use crate::utils::config::DEFAULT_PATHS;

/// Finite source of directory paths.
pub trait PathSource {
    fn paths(&self) -> Vec<Item>;
}

/// Fixed, in-process list of paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPaths(Vec<Item>);

impl StaticPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Item>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StaticPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PATHS)
    }
}

impl PathSource for StaticPaths {
    fn paths(&self) -> Vec<Item> {
        self.0.clone()
    }
}

impl PathSource for Vec<Item> {
    fn paths(&self) -> Vec<Item> {
        self.clone()
    }
}

impl PathSource for [&str] {
    fn paths(&self) -> Vec<Item> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let src = StaticPaths::default();
        assert_eq!(src.len(), 3);
        assert_eq!(src.paths(), vec!["/tmp", "/home/x/Downloads", "/home/x/go"]);
    }

    #[test]
    fn test_slice_source_keeps_order() {
        let src: &[&str] = &["/b", "/a"];
        assert_eq!(src.paths(), vec!["/b".to_string(), "/a".to_string()]);
    }

    #[test]
    fn test_empty_source() {
        assert!(StaticPaths::new(Vec::<String>::new()).is_empty());
    }
}
