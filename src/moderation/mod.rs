//! Moderation ledger
//!
//! Every approval status change of a catalog entity is recorded as an
//! `approval_changes` row. The ledger is the only writer of those rows and the
//! only code that updates an entity's live `approval_status`; both happen in
//! one transaction.
//!
//! Transitions on the same entity are serialized with a per-entity async lock.
//! The status update itself is a compare-and-set on the prior status, so a
//! writer in another process cannot slip in between the read and the write
//! unnoticed. Losing that race rolls back and retries.

mod error;
pub mod registry;

pub use error::{ModerationError, TransitionRejection};
pub use registry::{EntityRef, EntityRegistry, Moderatable, StatusTable};

use crate::app_config::ModerationConfig;
use crate::orm::{approval_changes, ApprovalStatus};
use chrono::Utc;
use dashmap::DashMap;
use futures::lock::Mutex;
use sea_orm::{
    entity::*, query::*, ActiveEnum, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    PaginatorTrait, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// A status change as it arrives from an API layer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransitionRequest {
    #[validate(length(min = 1, max = 50))]
    pub entity_kind: String,
    pub entity_id: i32,
    pub new_status: String,
    pub acting_user: i32,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub reasoning: String,
}

/// One page of an entity's history, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub changes: Vec<approval_changes::Model>,
    /// Zero-based
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

pub struct ModerationLedger {
    registry: EntityRegistry,
    config: ModerationConfig,
    locks: DashMap<EntityRef, Arc<Mutex<()>>>,
}

impl ModerationLedger {
    pub fn new(registry: EntityRegistry, config: ModerationConfig) -> Self {
        Self {
            registry,
            config,
            locks: DashMap::new(),
        }
    }

    /// Ledger over every catalog entity kind, configured from the global config
    pub fn from_app_config() -> Self {
        Self::new(EntityRegistry::catalog(), crate::app_config::moderation())
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Number of entities with a transition in flight
    pub fn entities_in_flight(&self) -> usize {
        self.locks.len()
    }

    fn table(&self, entity: &EntityRef) -> Result<&dyn StatusTable, ModerationError> {
        self.registry
            .resolve(&entity.kind)
            .ok_or_else(|| ModerationError::EntityNotFound(entity.clone()))
    }

    /// Change an entity's approval status and append the change to its history.
    pub async fn record_transition(
        &self,
        db: &DatabaseConnection,
        entity_kind: &str,
        entity_id: i32,
        new_status: ApprovalStatus,
        acting_user: i32,
        reasoning: &str,
    ) -> Result<approval_changes::Model, ModerationError> {
        let entity = EntityRef::new(entity_kind, entity_id);
        let table = self.table(&entity)?;

        let lock = self.locks.entry(entity.clone()).or_default().clone();
        let result = {
            let _guard = lock.lock().await;
            self.transition_with_retries(db, table, &entity, new_status, acting_user, reasoning)
                .await
        };
        drop(lock);
        self.locks
            .remove_if(&entity, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    /// Validate and apply a request received as strings.
    pub async fn submit(
        &self,
        db: &DatabaseConnection,
        request: &TransitionRequest,
    ) -> Result<approval_changes::Model, ModerationError> {
        request.validate().map_err(|e| {
            log::debug!("Transition request validation failed: {}", e);
            TransitionRejection::Malformed(e.to_string())
        })?;
        let new_status: ApprovalStatus = request.new_status.parse()?;

        self.record_transition(
            db,
            &request.entity_kind,
            request.entity_id,
            new_status,
            request.acting_user,
            &request.reasoning,
        )
        .await
    }

    async fn transition_with_retries(
        &self,
        db: &DatabaseConnection,
        table: &dyn StatusTable,
        entity: &EntityRef,
        new_status: ApprovalStatus,
        acting_user: i32,
        reasoning: &str,
    ) -> Result<approval_changes::Model, ModerationError> {
        let mut conflicts = 0;
        loop {
            let txn = db.begin().await?;
            match apply_transition(&txn, table, entity, new_status, acting_user, reasoning).await {
                Ok(Some(change)) => {
                    txn.commit().await?;
                    log::info!(
                        "{} moved from {} to {} by user {}",
                        entity,
                        change
                            .change_from
                            .map(|s| s.as_str())
                            .unwrap_or("nothing"),
                        change.change_to,
                        acting_user
                    );
                    return Ok(change);
                }
                Ok(None) => {
                    txn.rollback().await?;
                    conflicts += 1;
                    if conflicts > self.config.max_conflict_retries {
                        log::error!(
                            "Giving up on {} after {} conflicting writes",
                            entity,
                            conflicts
                        );
                        return Err(ModerationError::Contended(entity.clone()));
                    }
                    log::warn!(
                        "Status of {} changed during transition, retrying ({}/{})",
                        entity,
                        conflicts,
                        self.config.max_conflict_retries
                    );
                }
                Err(e) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        log::error!("Rollback failed for {}: {}", entity, rollback_err);
                    }
                    if let ModerationError::Database(db_err) = &e {
                        log::error!("Failed to record transition for {}: {}", entity, db_err);
                    }
                    return Err(e);
                }
            }
        }
    }

    /// The entity's live status, read from its own table.
    pub async fn current_status<C: ConnectionTrait>(
        &self,
        db: &C,
        entity_kind: &str,
        entity_id: i32,
    ) -> Result<ApprovalStatus, ModerationError> {
        let entity = EntityRef::new(entity_kind, entity_id);
        let table = self.table(&entity)?;
        read_status(db, table, &entity).await
    }

    /// Every recorded change for an entity, oldest first. Rows outlive the
    /// entity, so this also works after it has been deleted.
    pub async fn history_for<C: ConnectionTrait>(
        &self,
        db: &C,
        entity_kind: &str,
        entity_id: i32,
    ) -> Result<Vec<approval_changes::Model>, ModerationError> {
        let entity = EntityRef::new(entity_kind, entity_id);
        self.table(&entity)?;
        Ok(history_query(&entity).all(db).await?)
    }

    /// Paginated [`Self::history_for`]. `per_page` falls back to the configured page size.
    pub async fn history_page<C: ConnectionTrait>(
        &self,
        db: &C,
        entity_kind: &str,
        entity_id: i32,
        page: usize,
        per_page: Option<usize>,
    ) -> Result<HistoryPage, ModerationError> {
        let entity = EntityRef::new(entity_kind, entity_id);
        self.table(&entity)?;

        let per_page = per_page.unwrap_or(self.config.history_page_size).max(1);
        let paginator = history_query(&entity).paginate(db, per_page);
        let total_items = paginator.num_items().await?;
        let total_pages = paginator.num_pages().await?;
        let changes = paginator.fetch_page(page).await?;

        Ok(HistoryPage {
            changes,
            page,
            per_page,
            total_items,
            total_pages,
        })
    }

    /// Latest changes across all entity kinds, newest first
    pub async fn recent_changes<C: ConnectionTrait>(
        &self,
        db: &C,
        limit: u64,
    ) -> Result<Vec<approval_changes::Model>, ModerationError> {
        Ok(approval_changes::Entity::find()
            .order_by_desc(approval_changes::Column::ChangedAt)
            .order_by_desc(approval_changes::Column::Id)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// Every change made by one user, oldest first
    pub async fn changes_by_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
    ) -> Result<Vec<approval_changes::Model>, ModerationError> {
        Ok(approval_changes::Entity::find()
            .filter(approval_changes::Column::ChangedBy.eq(user_id))
            .order_by_asc(approval_changes::Column::ChangedAt)
            .order_by_asc(approval_changes::Column::Id)
            .all(db)
            .await?)
    }
}

fn changes_of(entity: &EntityRef) -> Select<approval_changes::Entity> {
    approval_changes::Entity::find()
        .filter(approval_changes::Column::EntityKind.eq(entity.kind.as_str()))
        .filter(approval_changes::Column::EntityId.eq(entity.id))
}

fn history_query(entity: &EntityRef) -> Select<approval_changes::Entity> {
    changes_of(entity)
        .order_by_asc(approval_changes::Column::ChangedAt)
        .order_by_asc(approval_changes::Column::Id)
}

async fn read_status<C: ConnectionTrait>(
    db: &C,
    table: &dyn StatusTable,
    entity: &EntityRef,
) -> Result<ApprovalStatus, ModerationError> {
    let backend = db.get_database_backend();
    let row = db
        .query_one(backend.build(&table.select_status(entity.id)))
        .await?
        .ok_or_else(|| ModerationError::EntityNotFound(entity.clone()))?;
    let raw: String = row.try_get("", &table.status_column_name())?;

    Ok(ApprovalStatus::try_from_value(&raw)?)
}

/// One attempt inside an open transaction. A missing entity is reported
/// before any rejection of the status itself. `Ok(None)` means the
/// compare-and-set lost to a concurrent writer.
async fn apply_transition(
    txn: &DatabaseTransaction,
    table: &dyn StatusTable,
    entity: &EntityRef,
    new_status: ApprovalStatus,
    acting_user: i32,
    reasoning: &str,
) -> Result<Option<approval_changes::Model>, ModerationError> {
    let current = read_status(txn, table, entity).await?;
    if !table.accepts(new_status) {
        return Err(TransitionRejection::NotApplicable {
            kind: entity.kind.clone(),
            status: new_status,
        }
        .into());
    }
    if current == new_status {
        return Err(TransitionRejection::Unchanged(current).into());
    }

    let backend = txn.get_database_backend();
    let updated = txn
        .execute(backend.build(&table.compare_and_set(entity.id, current, new_status)))
        .await?;
    if updated.rows_affected() == 0 {
        return Ok(None);
    }

    // Keep history in non-decreasing time order even if the clock stepped back
    let previous = changes_of(entity)
        .order_by_desc(approval_changes::Column::ChangedAt)
        .order_by_desc(approval_changes::Column::Id)
        .one(txn)
        .await?;
    let now = Utc::now().naive_utc();
    let changed_at = match previous {
        Some(prev) if prev.changed_at > now => prev.changed_at,
        _ => now,
    };

    let change = approval_changes::ActiveModel {
        change_from: Set(Some(current)),
        change_to: Set(new_status),
        changed_at: Set(changed_at),
        reasoning: Set(reasoning.to_owned()),
        changed_by: Set(Some(acting_user)),
        entity_kind: Set(entity.kind.clone()),
        entity_id: Set(entity.id),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(Some(change))
}
