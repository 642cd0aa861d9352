//! Evaluation Catalog Service
//!
//! Reads go through the `OptionCache`; every write invalidates the pair it
//! touched before returning. A read that loaded from the store before such a
//! write does not refill the cache.

use shared_types::{Clock, ConfigId, Criterion, Perspective};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::OptionCache;
use crate::domain::{
    default_options, points_range, validate_options, EvaluationConfig, EvaluationOption,
    OptionInput,
};
use crate::error::{CatalogError, CatalogResult};
use crate::ports::{CatalogStore, EvaluationCatalogApi};

pub struct EvaluationCatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Arc<OptionCache>,
    clock: Arc<dyn Clock>,
}

impl EvaluationCatalogService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        cache: Arc<OptionCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
        }
    }

    fn existing(&self, id: ConfigId) -> CatalogResult<EvaluationConfig> {
        self.store.get(id)?.ok_or(CatalogError::ConfigNotFound(id))
    }

    fn insert_new(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<EvaluationOption>,
    ) -> CatalogResult<EvaluationConfig> {
        let config = EvaluationConfig::new(perspective, criterion, options, self.clock.now());
        self.store.insert(config.clone())?;
        self.cache.invalidate(perspective, criterion);
        info!(
            config_id = %config.id,
            %perspective,
            %criterion,
            options = config.options.len(),
            "Evaluation config created"
        );
        Ok(config)
    }

    /// Create the reference vocabulary for every pair that has no active
    /// config. Returns how many configs were created.
    pub fn seed_defaults(&self) -> CatalogResult<usize> {
        let mut created = 0;
        for perspective in Perspective::ALL {
            for &criterion in perspective.criteria() {
                if self.store.find_active(perspective, criterion)?.is_some() {
                    continue;
                }
                let Some(inputs) = default_options(perspective, criterion) else {
                    continue;
                };
                let options = validate_options(perspective, criterion, inputs)?;
                match self.insert_new(perspective, criterion, options) {
                    Ok(_) => created += 1,
                    Err(CatalogError::DuplicateConfig { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        if created > 0 {
            info!(created, "Seeded default evaluation vocabularies");
        }
        Ok(created)
    }
}

impl EvaluationCatalogApi for EvaluationCatalogService {
    fn get_options(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Vec<EvaluationOption>> {
        if let Some(options) = self.cache.get(perspective, criterion) {
            return Ok(options);
        }

        let generation = self.cache.generation(perspective, criterion);
        let options = self
            .store
            .find_active(perspective, criterion)?
            .map(|config| config.active_options())
            .unwrap_or_default();
        debug!(%perspective, %criterion, count = options.len(), "Loaded options from store");
        self.cache.put(perspective, criterion, generation, options.clone());
        Ok(options)
    }

    fn upsert_options(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig> {
        let options = validate_options(perspective, criterion, options)?;

        if let Some(active) = self.store.find_active(perspective, criterion)? {
            return self.replace_validated(active.id, perspective, criterion, options);
        }

        match self.insert_new(perspective, criterion, options.clone()) {
            // Lost a race with a concurrent create: fall back to replacing.
            Err(CatalogError::DuplicateConfig { .. }) => {
                let active = self
                    .store
                    .find_active(perspective, criterion)?
                    .ok_or(CatalogError::NoActiveConfig {
                        perspective,
                        criterion,
                    })?;
                self.replace_validated(active.id, perspective, criterion, options)
            }
            other => other,
        }
    }

    fn deactivate(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<EvaluationConfig> {
        let active = self
            .store
            .find_active(perspective, criterion)?
            .ok_or(CatalogError::NoActiveConfig {
                perspective,
                criterion,
            })?;
        self.deactivate_by_id(active.id)
    }

    fn create_config(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig> {
        let options = validate_options(perspective, criterion, options)?;
        self.insert_new(perspective, criterion, options)
    }

    fn list_configs(
        &self,
        perspective: Option<Perspective>,
        criterion: Option<Criterion>,
    ) -> CatalogResult<Vec<EvaluationConfig>> {
        self.store.list_active(perspective, criterion)
    }

    fn get_config(&self, id: ConfigId) -> CatalogResult<EvaluationConfig> {
        self.existing(id)
    }

    fn replace_options(
        &self,
        id: ConfigId,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig> {
        let config = self.existing(id)?;
        let options = validate_options(config.perspective, config.criterion, options)?;
        self.replace_validated(id, config.perspective, config.criterion, options)
    }

    fn deactivate_by_id(&self, id: ConfigId) -> CatalogResult<EvaluationConfig> {
        let config = self.store.deactivate(id, self.clock.now())?;
        self.cache.invalidate(config.perspective, config.criterion);
        info!(
            config_id = %id,
            perspective = %config.perspective,
            criterion = %config.criterion,
            "Evaluation config deactivated"
        );
        Ok(config)
    }

    fn score_range(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Option<(u32, u32)>> {
        Ok(points_range(&self.get_options(perspective, criterion)?))
    }
}

impl EvaluationCatalogService {
    fn replace_validated(
        &self,
        id: ConfigId,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<EvaluationOption>,
    ) -> CatalogResult<EvaluationConfig> {
        let config = self.store.replace_options(id, options, self.clock.now())?;
        self.cache.invalidate(perspective, criterion);
        info!(
            config_id = %id,
            %perspective,
            %criterion,
            options = config.options.len(),
            "Evaluation options replaced"
        );
        Ok(config)
    }
}
