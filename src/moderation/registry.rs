//! Entity kinds the ledger can moderate.
//!
//! A ledger row points at its entity with an [`EntityRef`] (kind + id) instead
//! of a typed foreign key. The [`EntityRegistry`] turns the kind back into a
//! [`StatusTable`], which knows how to read and compare-and-set the status
//! column of that entity's table.

use crate::orm::{self, ApprovalStatus};
use sea_orm::sea_query::{Expr, SelectStatement, UpdateStatement};
use sea_orm::{
    ActiveEnum, ColumnTrait, EntityTrait, IdenStatic, QueryFilter, QuerySelect, QueryTrait,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Tagged reference to a moderated entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityRef {
    pub kind: String,
    pub id: i32,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, id: i32) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// An entity with an `approval_status` column.
pub trait Moderatable: EntityTrait {
    /// Discriminator stored in `approval_changes.entity_kind`
    const KIND: &'static str;
    /// Whether account lifecycle statuses apply
    const ACCOUNT_LIFECYCLE: bool = false;

    fn id_column() -> Self::Column;
    fn status_column() -> Self::Column;
}

/// Type-erased access to one entity table's status column.
pub trait StatusTable: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Column name to read from the row returned by [`Self::select_status`]
    fn status_column_name(&self) -> String;

    fn accepts(&self, status: ApprovalStatus) -> bool;

    /// `SELECT approval_status FROM <table> WHERE id = ?`
    fn select_status(&self, id: i32) -> SelectStatement;

    /// `UPDATE <table> SET approval_status = next WHERE id = ? AND approval_status = expected`
    fn compare_and_set(
        &self,
        id: i32,
        expected: ApprovalStatus,
        next: ApprovalStatus,
    ) -> UpdateStatement;
}

struct Table<E>(PhantomData<fn() -> E>);

impl<E: Moderatable> StatusTable for Table<E> {
    fn kind(&self) -> &'static str {
        E::KIND
    }

    fn status_column_name(&self) -> String {
        E::status_column().as_str().to_owned()
    }

    fn accepts(&self, status: ApprovalStatus) -> bool {
        E::ACCOUNT_LIFECYCLE || !status.is_account_status()
    }

    fn select_status(&self, id: i32) -> SelectStatement {
        E::find()
            .select_only()
            .column(E::status_column())
            .filter(E::id_column().eq(id))
            .into_query()
    }

    fn compare_and_set(
        &self,
        id: i32,
        expected: ApprovalStatus,
        next: ApprovalStatus,
    ) -> UpdateStatement {
        E::update_many()
            .col_expr(E::status_column(), Expr::value(next.to_value()))
            .filter(E::id_column().eq(id))
            .filter(E::status_column().eq(expected.to_value()))
            .into_query()
    }
}

/// Maps entity kinds to their status tables
#[derive(Clone, Default)]
pub struct EntityRegistry {
    tables: HashMap<&'static str, Arc<dyn StatusTable>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every catalog entity kind
    pub fn catalog() -> Self {
        let mut registry = Self::new();
        registry
            .register::<orm::users::Entity>()
            .register::<orm::authors::Entity>()
            .register::<orm::books::Entity>()
            .register::<orm::genres::Entity>()
            .register::<orm::link_sources::Entity>()
            .register::<orm::links::Entity>();
        registry
    }

    pub fn register<E: Moderatable>(&mut self) -> &mut Self {
        self.register_table(Arc::new(Table::<E>(PhantomData)))
    }

    /// Register a hand-written status table, e.g. one backed by a view.
    pub fn register_table(&mut self, table: Arc<dyn StatusTable>) -> &mut Self {
        let kind = table.kind();
        if self.tables.insert(kind, table).is_some() {
            log::warn!("Entity kind {} registered twice; keeping the later one", kind);
        }
        self
    }

    pub fn resolve(&self, kind: &str) -> Option<&dyn StatusTable> {
        self.tables.get(kind).map(|t| t.as_ref())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.tables.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.tables.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
