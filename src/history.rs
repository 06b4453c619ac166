use color_eyre::eyre;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::criteria::SearchCriteria;

const MAX_HISTORY_SIZE: usize = 100;

/// Submitted searches, most recent first.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    pub searches: Vec<SearchCriteria>,
}

impl SearchHistory {
    pub fn new(searches: Vec<SearchCriteria>) -> Self {
        Self { searches }
    }

    pub fn add_search(&mut self, criteria: SearchCriteria) {
        // Remove existing occurrence if present
        self.searches.retain(|s| s != &criteria);

        self.searches.insert(0, criteria);

        if self.searches.len() > MAX_HISTORY_SIZE {
            self.searches.truncate(MAX_HISTORY_SIZE);
        }
    }

    pub fn latest(&self) -> Option<&SearchCriteria> {
        self.searches.first()
    }
}

fn get_history_path() -> eyre::Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| eyre::eyre!("Could not find config directory"))?;

    Ok(config_dir.join("property-search").join("history.json"))
}

pub async fn load_history() -> eyre::Result<SearchHistory> {
    load_history_from(&get_history_path()?).await
}

pub async fn save_history(history: &SearchHistory) -> eyre::Result<()> {
    save_history_to(&get_history_path()?, history).await
}

async fn load_history_from(path: &Path) -> eyre::Result<SearchHistory> {
    if !fs::try_exists(path).await? {
        return Ok(SearchHistory::default());
    }

    let contents = fs::read_to_string(path).await?;
    let searches: Vec<SearchCriteria> = serde_json::from_str(&contents)?;

    Ok(SearchHistory::new(searches))
}

async fn save_history_to(path: &Path, history: &SearchHistory) -> eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let contents = serde_json::to_string_pretty(&history.searches)?;
    fs::write(path, contents).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::PropertyType;

    fn with_postcode(postcode: &str) -> SearchCriteria {
        SearchCriteria {
            postcode: postcode.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn newest_first_without_duplicates() {
        let mut history = SearchHistory::default();
        history.add_search(with_postcode("BR1"));
        history.add_search(with_postcode("NW1"));
        history.add_search(with_postcode("BR1"));

        assert_eq!(
            history.searches,
            vec![with_postcode("BR1"), with_postcode("NW1")]
        );
        assert_eq!(history.latest(), Some(&with_postcode("BR1")));
    }

    #[test]
    fn differing_fields_are_not_duplicates() {
        let mut history = SearchHistory::default();
        history.add_search(with_postcode("BR1"));
        history.add_search(SearchCriteria {
            property_type: PropertyType::House,
            ..with_postcode("BR1")
        });

        assert_eq!(history.searches.len(), 2);
    }

    #[test]
    fn size_is_capped() {
        let mut history = SearchHistory::default();
        for bedrooms in 0..=MAX_HISTORY_SIZE as u32 {
            history.add_search(SearchCriteria {
                min_bedrooms: Some(bedrooms),
                ..Default::default()
            });
        }

        assert_eq!(history.searches.len(), MAX_HISTORY_SIZE);
        assert_eq!(
            history.latest().and_then(|c| c.min_bedrooms),
            Some(MAX_HISTORY_SIZE as u32)
        );
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let path = std::env::temp_dir()
            .join(format!("property-search-missing-{}", std::process::id()))
            .join("history.json");

        let history = load_history_from(&path).await.unwrap();

        assert!(history.searches.is_empty());
    }

    #[tokio::test]
    async fn saved_history_loads_back() {
        let dir = std::env::temp_dir().join(format!("property-search-history-{}", std::process::id()));
        let path = dir.join("history.json");
        let mut history = SearchHistory::default();
        history.add_search(with_postcode("SW19"));
        history.add_search(with_postcode("BR1"));

        save_history_to(&path, &history).await.unwrap();
        let loaded = load_history_from(&path).await.unwrap();
        fs::remove_dir_all(&dir).await.unwrap();

        assert_eq!(loaded.searches, history.searches);
    }
}
