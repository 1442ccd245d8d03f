//! Department manager
//!
//! CRUD over the department tree plus the parent-candidate computation
//! that keeps the tree acyclic from the console side.

use crate::client::ApiClient;
use crate::core::context::SharedContext;
use crate::core::types::{Department, DepartmentInput};
use crate::utils::error::Result;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Fetch-render-mutate unit for departments
#[derive(Debug)]
pub struct DepartmentManager {
    context: SharedContext,
    client: Arc<ApiClient>,
    snapshot: RwLock<Vec<Department>>,
}

impl DepartmentManager {
    /// Create a manager bound to the given context
    pub fn new(context: SharedContext) -> Self {
        let client = Arc::clone(context.directory().client());
        Self {
            context,
            client,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Last fetched department list
    pub fn snapshot(&self) -> Vec<Department> {
        self.snapshot.read().clone()
    }

    /// Fetch all departments of the current enterprise
    pub async fn refresh(&self) -> Result<Vec<Department>> {
        let enterprise_id = self.context.require_enterprise()?;
        let departments: Vec<Department> = self
            .client
            .get(&format!("/api/enterprises/{}/departments", enterprise_id))
            .await?;
        *self.snapshot.write() = departments.clone();
        Ok(departments)
    }

    /// Create a department, then refetch
    pub async fn create(&self, input: &DepartmentInput) -> Result<Vec<Department>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .post_ack(
                &format!("/api/enterprises/{}/departments", enterprise_id),
                input,
            )
            .await?;
        info!(name = %input.name, "Department created");
        self.refresh().await
    }

    /// Update a department, then refetch
    pub async fn update(&self, department_id: Uuid, input: &DepartmentInput) -> Result<Vec<Department>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .put_ack(
                &format!(
                    "/api/enterprises/{}/departments?departmentId={}",
                    enterprise_id, department_id
                ),
                input,
            )
            .await?;
        info!(department = %department_id, "Department updated");
        self.refresh().await
    }

    /// Delete a department, then refetch
    pub async fn delete(&self, department_id: Uuid) -> Result<Vec<Department>> {
        self.context.require_admin()?;
        let enterprise_id = self.context.require_enterprise()?;
        self.client
            .delete_ack(&format!(
                "/api/enterprises/{}/departments?departmentId={}",
                enterprise_id, department_id
            ))
            .await?;
        info!(department = %department_id, "Department deleted");
        self.refresh().await
    }

    /// Ids of all (transitive) children of `department_id` in the snapshot
    pub fn descendants_of(&self, department_id: Uuid) -> HashSet<Uuid> {
        descendants(&self.snapshot.read(), department_id)
    }

    /// Departments that may become the parent of `department_id`.
    ///
    /// Never contains the department itself or any of its descendants, so
    /// re-parenting through this list cannot create a cycle.
    pub fn parent_candidates(&self, department_id: Uuid) -> Vec<Department> {
        let snapshot = self.snapshot.read();
        let excluded = descendants(&snapshot, department_id);
        snapshot
            .iter()
            .filter(|d| d.id != department_id && !excluded.contains(&d.id))
            .cloned()
            .collect()
    }
}

/// Transitive children of `root` within `departments`
fn descendants(departments: &[Department], root: Uuid) -> HashSet<Uuid> {
    let mut found = HashSet::new();
    let mut frontier = vec![root];

    while let Some(parent) = frontier.pop() {
        for dept in departments {
            if dept.parent_id == Some(parent) && found.insert(dept.id) {
                frontier.push(dept.id);
            }
        }
    }
    found
}
