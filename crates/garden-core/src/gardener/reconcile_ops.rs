//! Reconciliation entry points for the Gardener.

use super::{reconciler, Gardener};
use crate::{error::Result, params::Id, reconcile::ReconcileReport};

impl Gardener {
    /// Reconciles every container in the grower's non-retired gardens.
    ///
    /// Run at startup and by the periodic job.
    pub async fn reconcile_all(&self) -> Result<ReconcileReport> {
        let user = self.user.clone();
        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).reconcile_all(&user)
        })
        .await
    }

    /// Reconciles every container of one garden, retired or not.
    pub async fn reconcile_garden(&self, params: &Id) -> Result<ReconcileReport> {
        let garden_id = params.id;
        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).reconcile_garden(garden_id)
        })
        .await
    }

    pub async fn reconcile_container(&self, params: &Id) -> Result<ReconcileReport> {
        let container_id = params.id;
        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).reconcile_container(container_id)
        })
        .await
    }

    pub async fn reconcile_instance(&self, params: &Id) -> Result<ReconcileReport> {
        let instance_id = params.id;
        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).reconcile_instance(instance_id)
        })
        .await
    }
}
