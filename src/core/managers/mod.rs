//! Resource managers
//!
//! Each manager is an independent fetch-render-mutate unit over one family
//! of enterprise-scoped endpoints. The enterprise context is injected at
//! construction; admin-gated mutations pre-check the role there and the
//! backend re-checks authoritatively. After every mutation the manager
//! refetches the full collection instead of patching its local snapshot,
//! trading efficiency for correctness against stale reads. There is no
//! cross-manager consistency guarantee; concurrent edits from other
//! sessions resolve last-write-wins in the backend.

pub mod accounts;
pub mod budgets;
pub mod departments;
pub mod health;
pub mod invites;
pub mod permissions;
pub mod pools;

pub use accounts::AiAccountManager;
pub use budgets::BudgetManager;
pub use departments::DepartmentManager;
pub use health::ModelHealthManager;
pub use invites::InviteManager;
pub use permissions::PermissionManager;
pub use pools::AccountPoolManager;
