use std::sync::Arc;

use anyhow::Result;

use crate::data_provider::NewsSource;
use crate::types::NewsCategory;
use crate::widgets::news::load_for_category;
use crate::widgets::NewsStatus;

pub async fn execute(sources: &[Arc<dyn NewsSource>], category: NewsCategory) -> Result<()> {
    let (items, status) = load_for_category(sources, category, true).await;

    println!("{} headlines ({})", category, status_label(&status));
    for item in &items {
        println!("  {}", item.title);
        if item.published_label.is_empty() {
            println!("    {}", item.source_name);
        } else {
            println!("    {} \u{b7} {}", item.source_name, item.published_label);
        }
    }
    Ok(())
}

fn status_label(status: &NewsStatus) -> String {
    match status {
        NewsStatus::Loading => "loading".to_string(),
        NewsStatus::Live(name) => format!("live from {name}"),
        NewsStatus::FromCache => "cached".to_string(),
        NewsStatus::Fallback => "offline fallback".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache;
    use crate::dev::mock_client::MockNewsSource;

    #[tokio::test]
    async fn test_execute_prints_without_error() {
        let _guard = cache::TEST_MUTEX.lock().await;
        cache::clear().await;
        let sources: Vec<Arc<dyn NewsSource>> = vec![Arc::new(MockNewsSource::new("wire"))];
        assert!(execute(&sources, NewsCategory::Science).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_with_no_sources_falls_back() {
        let _guard = cache::TEST_MUTEX.lock().await;
        cache::clear().await;
        let sources: Vec<Arc<dyn NewsSource>> = Vec::new();
        assert!(execute(&sources, NewsCategory::Business).await.is_ok());
    }
}
