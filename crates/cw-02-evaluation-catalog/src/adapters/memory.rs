//! In-memory catalog store.
//!
//! The outer map lock is only held to find or add a config; each config has
//! its own lock, so an option replacement blocks readers of that one config
//! and nothing else.

use parking_lot::RwLock;
use shared_types::{ConfigId, Criterion, Perspective, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{EvaluationConfig, EvaluationOption};
use crate::error::{CatalogError, CatalogResult};
use crate::ports::CatalogStore;

type ConfigCell = Arc<RwLock<EvaluationConfig>>;

#[derive(Default)]
pub struct InMemoryCatalogStore {
    configs: RwLock<HashMap<ConfigId, ConfigCell>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, id: ConfigId) -> Option<ConfigCell> {
        self.configs.read().get(&id).cloned()
    }

    /// Total configs, active or not.
    pub fn len(&self) -> usize {
        self.configs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn find_active(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Option<EvaluationConfig>> {
        let configs = self.configs.read();
        Ok(configs.values().find_map(|cell| {
            let config = cell.read();
            (config.is_active && config.perspective == perspective && config.criterion == criterion)
                .then(|| config.clone())
        }))
    }

    fn get(&self, id: ConfigId) -> CatalogResult<Option<EvaluationConfig>> {
        Ok(self.cell(id).map(|cell| cell.read().clone()))
    }

    fn list_active(
        &self,
        perspective: Option<Perspective>,
        criterion: Option<Criterion>,
    ) -> CatalogResult<Vec<EvaluationConfig>> {
        let mut configs: Vec<EvaluationConfig> = self
            .configs
            .read()
            .values()
            .map(|cell| cell.read().clone())
            .filter(|c| {
                c.is_active
                    && perspective.map_or(true, |p| c.perspective == p)
                    && criterion.map_or(true, |k| c.criterion == k)
            })
            .collect();
        configs.sort_by_key(|c| (c.perspective, c.criterion));
        Ok(configs)
    }

    fn insert(&self, config: EvaluationConfig) -> CatalogResult<()> {
        let mut configs = self.configs.write();
        let taken = configs.values().any(|cell| {
            let existing = cell.read();
            existing.is_active
                && existing.perspective == config.perspective
                && existing.criterion == config.criterion
        });
        if taken {
            return Err(CatalogError::DuplicateConfig {
                perspective: config.perspective,
                criterion: config.criterion,
            });
        }
        configs.insert(config.id, Arc::new(RwLock::new(config)));
        Ok(())
    }

    fn replace_options(
        &self,
        id: ConfigId,
        options: Vec<EvaluationOption>,
        now: Timestamp,
    ) -> CatalogResult<EvaluationConfig> {
        let cell = self.cell(id).ok_or(CatalogError::ConfigNotFound(id))?;
        let mut config = cell.write();
        if !config.is_active {
            return Err(CatalogError::ConfigInactive(id));
        }
        config.options.clear();
        config.options.extend(options);
        config.updated_at = now;
        Ok(config.clone())
    }

    fn deactivate(&self, id: ConfigId, now: Timestamp) -> CatalogResult<EvaluationConfig> {
        let cell = self.cell(id).ok_or(CatalogError::ConfigNotFound(id))?;
        let mut config = cell.write();
        config.deactivate(now);
        Ok(config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{validate_options, OptionInput};
    use chrono::Utc;
    use std::thread;

    fn config(perspective: Perspective, criterion: Criterion, n: u32) -> EvaluationConfig {
        let inputs = (0..n).map(|i| OptionInput::new(format!("opt {i}"), i + 1, i)).collect();
        let options = validate_options(perspective, criterion, inputs).unwrap();
        EvaluationConfig::new(perspective, criterion, options, Utc::now())
    }

    #[test]
    fn test_one_active_config_per_pair() {
        let store = InMemoryCatalogStore::new();
        let first = config(Perspective::User, Criterion::Impact, 3);
        store.insert(first.clone()).unwrap();

        assert_eq!(
            store.insert(config(Perspective::User, Criterion::Impact, 2)),
            Err(CatalogError::DuplicateConfig {
                perspective: Perspective::User,
                criterion: Criterion::Impact,
            })
        );
        store
            .insert(config(Perspective::Admin, Criterion::Impact, 2))
            .unwrap();

        store.deactivate(first.id, Utc::now()).unwrap();
        store
            .insert(config(Perspective::User, Criterion::Impact, 4))
            .unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store
                .find_active(Perspective::User, Criterion::Impact)
                .unwrap()
                .map(|c| c.options.len()),
            Some(4)
        );
    }

    #[test]
    fn test_replace_inactive_rejected() {
        let store = InMemoryCatalogStore::new();
        let cfg = config(Perspective::User, Criterion::Time, 2);
        store.insert(cfg.clone()).unwrap();
        store.deactivate(cfg.id, Utc::now()).unwrap();

        assert_eq!(
            store.replace_options(cfg.id, vec![], Utc::now()),
            Err(CatalogError::ConfigInactive(cfg.id))
        );
        let unknown = ConfigId::new();
        assert_eq!(
            store.replace_options(unknown, vec![], Utc::now()),
            Err(CatalogError::ConfigNotFound(unknown))
        );
    }

    #[test]
    fn test_list_active_filters() {
        let store = InMemoryCatalogStore::new();
        store.insert(config(Perspective::User, Criterion::Time, 2)).unwrap();
        store.insert(config(Perspective::Admin, Criterion::Time, 2)).unwrap();
        store.insert(config(Perspective::Admin, Criterion::Urgency, 2)).unwrap();

        assert_eq!(store.list_active(None, None).unwrap().len(), 3);
        assert_eq!(store.list_active(Some(Perspective::Admin), None).unwrap().len(), 2);
        assert_eq!(store.list_active(None, Some(Criterion::Time)).unwrap().len(), 2);
        assert_eq!(
            store
                .list_active(Some(Perspective::User), Some(Criterion::Urgency))
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn test_readers_never_see_empty_options_mid_replace() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let cfg = config(Perspective::User, Criterion::Difficulty, 5);
        store.insert(cfg.clone()).unwrap();

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for round in 0..200u32 {
                    let n = round % 4 + 1;
                    let inputs = (0..n).map(|i| OptionInput::new("x", i + 1, i)).collect();
                    let options =
                        validate_options(Perspective::User, Criterion::Difficulty, inputs).unwrap();
                    store.replace_options(cfg.id, options, Utc::now()).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let seen = store
                .find_active(Perspective::User, Criterion::Difficulty)
                .unwrap()
                .unwrap();
            assert!(!seen.options.is_empty());
        }
        writer.join().unwrap();
    }
}
