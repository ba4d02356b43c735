//! Equipment, maintenance history, task and task log methods for [`MaintClient`].
//!
//! Typed wrappers over the generic CRUD endpoints. The generic forms are also
//! public for callers that work with any [`Resource`].

use serde::Serialize;

use crate::client::MaintClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{
    Equipment, EquipmentParams, HistoryParams, MaintenanceHistory, MaintenanceTask, Resource,
    TaskLog, TaskLogParams, TaskParams,
};

fn filter(name: &'static str, value: Option<i64>) -> Vec<(&'static str, String)> {
    value
        .map(|v| vec![(name, v.to_string())])
        .unwrap_or_default()
}

impl MaintClient {
    /// List any resource collection.
    pub async fn list<R: Resource>(&self, query: &[(&str, String)]) -> Result<Vec<R>> {
        endpoints::list(&self.session, query).await
    }

    /// Get any resource by id.
    pub async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        endpoints::get(&self.session, id).await
    }

    /// Create any resource.
    pub async fn create<R, B>(&self, body: &B) -> Result<R>
    where
        R: Resource,
        B: Serialize + Sync + ?Sized,
    {
        endpoints::create(&self.session, body).await
    }

    /// Update any resource.
    pub async fn update<R, B>(&self, id: &str, body: &B) -> Result<Option<R>>
    where
        R: Resource,
        B: Serialize + Sync + ?Sized,
    {
        endpoints::update(&self.session, id, body).await
    }

    /// Delete any resource.
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        endpoints::delete::<R>(&self.session, id).await
    }

    // Equipment

    pub async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        self.list(&[]).await
    }

    pub async fn get_equipment(&self, id: i64) -> Result<Equipment> {
        self.get(&id.to_string()).await
    }

    pub async fn create_equipment(&self, params: &EquipmentParams) -> Result<Equipment> {
        self.create(params).await
    }

    pub async fn update_equipment(
        &self,
        id: i64,
        params: &EquipmentParams,
    ) -> Result<Option<Equipment>> {
        self.update(&id.to_string(), params).await
    }

    pub async fn delete_equipment(&self, id: i64) -> Result<()> {
        self.delete::<Equipment>(&id.to_string()).await
    }

    // Maintenance history

    /// List maintenance history, optionally for one piece of equipment.
    pub async fn list_history(&self, equipment_id: Option<i64>) -> Result<Vec<MaintenanceHistory>> {
        self.list(&filter("equipmentId", equipment_id)).await
    }

    pub async fn get_history(&self, id: i64) -> Result<MaintenanceHistory> {
        self.get(&id.to_string()).await
    }

    pub async fn create_history(&self, params: &HistoryParams) -> Result<MaintenanceHistory> {
        self.create(params).await
    }

    pub async fn update_history(
        &self,
        id: i64,
        params: &HistoryParams,
    ) -> Result<Option<MaintenanceHistory>> {
        self.update(&id.to_string(), params).await
    }

    pub async fn delete_history(&self, id: i64) -> Result<()> {
        self.delete::<MaintenanceHistory>(&id.to_string()).await
    }

    // Tasks

    /// List tasks, optionally for one piece of equipment.
    pub async fn list_tasks(&self, equipment_id: Option<i64>) -> Result<Vec<MaintenanceTask>> {
        self.list(&filter("equipmentId", equipment_id)).await
    }

    pub async fn get_task(&self, id: i64) -> Result<MaintenanceTask> {
        self.get(&id.to_string()).await
    }

    pub async fn create_task(&self, params: &TaskParams) -> Result<MaintenanceTask> {
        self.create(params).await
    }

    pub async fn update_task(
        &self,
        id: i64,
        params: &TaskParams,
    ) -> Result<Option<MaintenanceTask>> {
        self.update(&id.to_string(), params).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.delete::<MaintenanceTask>(&id.to_string()).await
    }

    // Task logs

    /// List task logs, optionally for one task.
    pub async fn list_task_logs(&self, task_id: Option<i64>) -> Result<Vec<TaskLog>> {
        self.list(&filter("taskId", task_id)).await
    }

    pub async fn get_task_log(&self, id: i64) -> Result<TaskLog> {
        self.get(&id.to_string()).await
    }

    pub async fn create_task_log(&self, params: &TaskLogParams) -> Result<TaskLog> {
        self.create(params).await
    }

    pub async fn delete_task_log(&self, id: i64) -> Result<()> {
        self.delete::<TaskLog>(&id.to_string()).await
    }
}
