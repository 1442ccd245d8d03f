//! Command-line console
//!
//! Each admin page becomes a subcommand family over the library managers.
//! Library errors are collapsed here into a single user-facing failure
//! line; the structured error stays in the logs.

pub mod render;

use crate::core::context::SharedContext;
use crate::core::dashboard::DashboardComposer;
use crate::core::managers::{
    AccountPoolManager, AiAccountManager, BudgetManager, DepartmentManager, InviteManager,
    ModelHealthManager, PermissionManager,
};
use crate::core::oauth::OauthLinkFlow;
use crate::core::types::{
    AccountPoolInput, AiAccountInput, BudgetInput, Credentials, DepartmentInput, EnterpriseRole,
    LoadBalanceStrategy, Platform, PoolType, TimeRange,
};
use crate::config::PollingConfig;
use crate::monitoring::{AlertPoller, ModelHealthPoller};
use crate::utils::error::{ConsoleError, Result};
use crate::Console;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Admin console for the carpool platform
#[derive(Debug, Parser)]
#[command(name = "console", version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, env = "CONSOLE_CONFIG")]
    pub config: Option<String>,

    /// Enterprise to operate in (defaults to the most recently accessed)
    #[arg(long, env = "CONSOLE_ENTERPRISE")]
    pub enterprise: Option<Uuid>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands, one family per admin page
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List enterprises and switch between them
    #[command(subcommand)]
    Enterprises(EnterprisesCmd),
    /// Overview counts for the current enterprise
    Dashboard,
    /// Department tree management
    #[command(subcommand)]
    Departments(DepartmentsCmd),
    /// Account pool management
    #[command(subcommand)]
    Pools(PoolsCmd),
    /// AI account management
    #[command(subcommand)]
    Accounts(AccountsCmd),
    /// Costs, budgets, and budget alerts
    #[command(subcommand)]
    Budget(BudgetCmd),
    /// Roles and scoped grants
    #[command(subcommand)]
    Permissions(PermissionsCmd),
    /// Member invitations
    #[command(subcommand)]
    Invites(InvitesCmd),
    /// Link a provider account through the OAuth flow
    OauthLink {
        /// Carpool group to link the account into
        #[arg(long)]
        group: Uuid,
        /// Provider platform (claude, gemini, openai, ...)
        #[arg(long)]
        platform: String,
    },
    /// Keep alert and model-health snapshots refreshing until interrupted
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum EnterprisesCmd {
    /// Show the switcher view (recent and other)
    List,
    /// Switch to another enterprise
    Switch {
        /// Target enterprise id
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum DepartmentsCmd {
    /// List all departments
    List,
    /// Create a department
    Create {
        /// Display name
        name: String,
        /// Parent department
        #[arg(long)]
        parent: Option<Uuid>,
        /// Budget cap in cents
        #[arg(long)]
        budget: Option<u64>,
    },
    /// Rename or re-parent a department
    Update {
        /// Department to change
        id: Uuid,
        /// New display name
        #[arg(long)]
        name: String,
        /// New parent department
        #[arg(long)]
        parent: Option<Uuid>,
        /// New budget cap in cents
        #[arg(long)]
        budget: Option<u64>,
    },
    /// Delete a department
    Delete {
        /// Department to delete
        id: Uuid,
    },
    /// Show the valid parent choices for a department
    Parents {
        /// Department being edited
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum PoolsCmd {
    /// List all pools
    List,
    /// Create a pool
    Create {
        /// Display name
        name: String,
        /// shared or dedicated
        #[arg(long, default_value = "shared")]
        pool_type: String,
        /// round_robin, least_connections, or weighted
        #[arg(long, default_value = "round_robin")]
        strategy: String,
        /// Per-account concurrent load ceiling
        #[arg(long)]
        max_load: Option<u32>,
        /// Selection priority
        #[arg(long)]
        priority: Option<i32>,
    },
    /// Delete a pool
    Delete {
        /// Pool to delete
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountsCmd {
    /// List all AI accounts
    List,
    /// Create an api-key account
    Create {
        /// Provider platform (claude, gemini, openai, ...)
        #[arg(long)]
        platform: String,
        /// API key
        #[arg(long)]
        api_key: String,
        /// Daily token cap
        #[arg(long)]
        daily_limit: Option<u64>,
    },
    /// Enable an account
    Enable {
        /// Account to enable
        id: Uuid,
    },
    /// Disable an account
    Disable {
        /// Account to disable
        id: Uuid,
    },
    /// Delete an account (must be unbound first)
    Delete {
        /// Account to delete
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum BudgetCmd {
    /// Aggregated spend over a window
    Costs {
        /// today, week, month, or quarter
        #[arg(long, default_value = "month")]
        range: String,
    },
    /// Current budget alerts
    Alerts,
    /// Set a budget limit (owner/admin only)
    Set {
        /// Limit in cents
        limit: u64,
        /// Department to cap; omit for the enterprise-wide budget
        #[arg(long)]
        department: Option<Uuid>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PermissionsCmd {
    /// List role definitions and current grants
    List,
    /// Grant a role to a user
    Assign {
        /// User to grant to
        #[arg(long)]
        user: Uuid,
        /// Role to grant
        #[arg(long)]
        role: Uuid,
        /// Department or group to scope the grant to
        #[arg(long)]
        scope: Option<Uuid>,
    },
    /// Revoke a role from a user
    Revoke {
        /// User to revoke from
        #[arg(long)]
        user: Uuid,
        /// Role to revoke
        #[arg(long)]
        role: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum InvitesCmd {
    /// Invite a batch of addresses (at most 50)
    Batch {
        /// Addresses to invite
        emails: Vec<String>,
        /// Role invitees receive (owner, admin, member, viewer)
        #[arg(long, default_value = "member")]
        role: String,
    },
    /// Create a shareable invite link
    Link {
        /// Cap on how many times the link may be used
        #[arg(long)]
        max_uses: Option<u32>,
    },
}

/// Run one parsed command to completion
pub async fn run(cli: Cli) -> Result<()> {
    let console = match &cli.config {
        Some(path) => Console::from_file(path).await?,
        None => Console::from_env().await?,
    };
    let context = console.context();

    // Everything except the switcher itself needs a current enterprise.
    if !matches!(cli.command, Command::Enterprises(_)) {
        select_enterprise(&context, cli.enterprise).await?;
    }

    match cli.command {
        Command::Enterprises(cmd) => enterprises(&context, cmd).await,
        Command::Dashboard => dashboard(&context).await,
        Command::Departments(cmd) => departments(&context, cmd).await,
        Command::Pools(cmd) => pools(&context, cmd).await,
        Command::Accounts(cmd) => accounts(&context, cmd).await,
        Command::Budget(cmd) => budget(&context, cmd).await,
        Command::Permissions(cmd) => permissions(&context, cmd).await,
        Command::Invites(cmd) => invites(&context, cmd).await,
        Command::OauthLink { group, platform } => oauth_link(&context, group, &platform).await,
        Command::Watch => watch(&context, console.config().polling()).await,
    }
}

/// Pick the working enterprise: the explicit flag, or the most recently
/// accessed membership.
async fn select_enterprise(context: &SharedContext, explicit: Option<Uuid>) -> Result<()> {
    if let Some(id) = explicit {
        context.switch_enterprise(id).await?;
        return Ok(());
    }

    let view = context.directory().switcher_view().await?;
    let membership = view
        .recent
        .into_iter()
        .next()
        .ok_or_else(|| ConsoleError::NotFound("you belong to no enterprise".to_string()))?;
    context.set_current(membership);
    Ok(())
}

async fn enterprises(context: &SharedContext, cmd: EnterprisesCmd) -> Result<()> {
    match cmd {
        EnterprisesCmd::List => {
            let view = context.directory().switcher_view().await?;
            let row = |m: &crate::core::types::Membership| {
                vec![
                    m.enterprise_id.to_string(),
                    m.enterprise.name.clone(),
                    m.role.to_string(),
                    render::opt(&m.last_accessed.map(|t| t.to_rfc3339())),
                ]
            };
            println!("Recent:");
            render::table(
                &["id", "name", "role", "last accessed"],
                &view.recent.iter().map(row).collect::<Vec<_>>(),
            );
            if !view.other.is_empty() {
                println!("\nOther:");
                render::table(
                    &["id", "name", "role", "last accessed"],
                    &view.other.iter().map(row).collect::<Vec<_>>(),
                );
            }
        }
        EnterprisesCmd::Switch { id } => match context.select(id).await? {
            Some(m) => println!("Switched to {} as {}", m.enterprise.name, m.role),
            None => println!("Already in that enterprise"),
        },
    }
    Ok(())
}

async fn dashboard(context: &SharedContext) -> Result<()> {
    let summary = DashboardComposer::new(context.clone()).compose().await?;
    println!("{} ({})", summary.enterprise, summary.role);
    render::table(
        &["members", "departments", "pools", "accounts", "enabled", "open alerts", "unhealthy"],
        &[vec![
            summary.members.to_string(),
            summary.departments.to_string(),
            summary.pools.to_string(),
            summary.accounts.to_string(),
            summary.enabled_accounts.to_string(),
            summary.open_alerts.to_string(),
            summary.unhealthy_models.to_string(),
        ]],
    );
    Ok(())
}

async fn departments(context: &SharedContext, cmd: DepartmentsCmd) -> Result<()> {
    let manager = DepartmentManager::new(context.clone());
    let list = match cmd {
        DepartmentsCmd::List => manager.refresh().await?,
        DepartmentsCmd::Create { name, parent, budget } => {
            manager
                .create(&DepartmentInput {
                    name,
                    parent_id: parent,
                    budget_limit: budget,
                })
                .await?
        }
        DepartmentsCmd::Update { id, name, parent, budget } => {
            manager
                .update(
                    id,
                    &DepartmentInput {
                        name,
                        parent_id: parent,
                        budget_limit: budget,
                    },
                )
                .await?
        }
        DepartmentsCmd::Delete { id } => manager.delete(id).await?,
        DepartmentsCmd::Parents { id } => {
            manager.refresh().await?;
            manager.parent_candidates(id)
        }
    };

    render::table(
        &["id", "name", "parent", "budget"],
        &list
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    render::opt(&d.parent_id),
                    render::opt(&d.budget_limit),
                ]
            })
            .collect::<Vec<_>>(),
    );
    Ok(())
}

async fn pools(context: &SharedContext, cmd: PoolsCmd) -> Result<()> {
    let manager = AccountPoolManager::new(context.clone());
    let list = match cmd {
        PoolsCmd::List => manager.refresh().await?,
        PoolsCmd::Create {
            name,
            pool_type,
            strategy,
            max_load,
            priority,
        } => {
            manager
                .create(&AccountPoolInput {
                    name,
                    pool_type: parse_pool_type(&pool_type)?,
                    load_balance_strategy: parse_strategy(&strategy)?,
                    max_load_per_account: max_load,
                    priority,
                    account_bindings: Vec::new(),
                    group_bindings: Vec::new(),
                })
                .await?
        }
        PoolsCmd::Delete { id } => manager.delete(id).await?,
    };

    render::table(
        &["id", "name", "type", "strategy", "accounts", "groups"],
        &list
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    format!("{:?}", p.pool_type).to_lowercase(),
                    format!("{:?}", p.load_balance_strategy),
                    p.account_bindings.len().to_string(),
                    p.group_bindings.len().to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );
    Ok(())
}

async fn accounts(context: &SharedContext, cmd: AccountsCmd) -> Result<()> {
    let manager = AiAccountManager::new(context.clone());
    let list = match cmd {
        AccountsCmd::List => manager.refresh().await?,
        AccountsCmd::Create {
            platform,
            api_key,
            daily_limit,
        } => {
            manager
                .create(&AiAccountInput {
                    platform: parse_platform(&platform),
                    credentials: Credentials::ApiKey { key: api_key },
                    daily_limit,
                    proxy: None,
                })
                .await?
        }
        AccountsCmd::Enable { id } => manager.set_enabled(id, true).await?,
        AccountsCmd::Disable { id } => manager.set_enabled(id, false).await?,
        AccountsCmd::Delete { id } => manager.delete(id).await?,
    };

    render::table(
        &["id", "platform", "auth", "status", "enabled", "daily limit"],
        &list
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.platform.to_string(),
                    format!("{:?}", a.auth_type).to_lowercase(),
                    render::opt(&a.status),
                    a.is_enabled.to_string(),
                    render::opt(&a.daily_limit),
                ]
            })
            .collect::<Vec<_>>(),
    );
    Ok(())
}

async fn budget(context: &SharedContext, cmd: BudgetCmd) -> Result<()> {
    let manager = BudgetManager::new(context.clone());
    match cmd {
        BudgetCmd::Costs { range } => {
            let summary = manager.costs(parse_range(&range)?).await?;
            println!(
                "total: {} ({} tokens)",
                render::cents(summary.total_cost),
                summary.total_tokens
            );
            render::table(
                &["platform", "cost", "tokens"],
                &summary
                    .by_platform
                    .iter()
                    .map(|p| {
                        vec![
                            p.platform.clone(),
                            render::cents(p.cost),
                            p.tokens.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        BudgetCmd::Alerts => {
            let alerts = manager.refresh_alerts().await?;
            render::table(
                &["severity", "message", "usage", "acknowledged"],
                &alerts
                    .iter()
                    .map(|a| {
                        vec![
                            format!("{:?}", a.severity).to_lowercase(),
                            a.message.clone(),
                            render::opt(&a.usage_ratio.map(|r| format!("{:.0}%", r * 100.0))),
                            a.acknowledged.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        BudgetCmd::Set { limit, department } => {
            manager
                .set_budget(&BudgetInput {
                    department_id: department,
                    budget_limit: limit,
                })
                .await?;
            println!("Budget limit set");
        }
    }
    Ok(())
}

async fn permissions(context: &SharedContext, cmd: PermissionsCmd) -> Result<()> {
    let manager = PermissionManager::new(context.clone());
    let listing = match cmd {
        PermissionsCmd::List => manager.refresh().await?,
        PermissionsCmd::Assign { user, role, scope } => {
            manager
                .assign_role(
                    user,
                    &crate::core::managers::permissions::RoleGrant {
                        role_id: role,
                        scope_id: scope,
                        expires_at: None,
                    },
                )
                .await?
        }
        PermissionsCmd::Revoke { user, role } => manager.revoke_role(user, role).await?,
    };

    println!("Roles:");
    render::table(
        &["id", "name", "level", "permissions"],
        &listing
            .roles
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    format!("{:?}", r.level).to_lowercase(),
                    r.permissions.len().to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );
    println!("\nGrants:");
    render::table(
        &["user", "role", "scope", "expires"],
        &listing
            .grants
            .iter()
            .map(|g| {
                vec![
                    g.user_id.to_string(),
                    g.role_id.to_string(),
                    format!("{:?}", g.scope).to_lowercase(),
                    render::opt(&g.expires_at.map(|t| t.to_rfc3339())),
                ]
            })
            .collect::<Vec<_>>(),
    );
    Ok(())
}

async fn invites(context: &SharedContext, cmd: InvitesCmd) -> Result<()> {
    let manager = InviteManager::new(context.clone());
    match cmd {
        InvitesCmd::Batch { emails, role } => {
            let raw: Vec<&str> = emails.iter().map(String::as_str).collect();
            let report = manager.batch_invite(&raw, parse_role(&role)?).await?;
            println!(
                "{} invited, {} failed, {} dropped as malformed",
                report.succeeded,
                report.failed,
                report.dropped.len()
            );
            for outcome in report.outcomes.iter().filter(|o| !o.success) {
                println!(
                    "  {}: {}",
                    outcome.email,
                    outcome.error.as_deref().unwrap_or("rejected")
                );
            }
        }
        InvitesCmd::Link { max_uses } => {
            let link = manager.create_invite_link(max_uses).await?;
            println!("{}", link.url);
            if let Some(expires) = link.expires_at {
                println!("expires: {}", expires.to_rfc3339());
            }
        }
    }
    Ok(())
}

async fn oauth_link(context: &SharedContext, group: Uuid, platform: &str) -> Result<()> {
    let client = Arc::clone(context.directory().client());
    let mut flow = OauthLinkFlow::new(client, group, parse_platform(platform));

    let auth_url = flow.generate_auth_url().await?;
    println!("Open this URL in a browser and authorize:");
    println!("  {}", auth_url);
    println!("Paste the code (or the full redirect URL), empty line to abort:");

    let input = read_line()?;
    if !flow.can_exchange(&input) {
        return Err(ConsoleError::Validation("no code entered".to_string()));
    }

    let account = flow.exchange_code(&input).await?;
    println!("Linked {} account {}", account.platform, account.id);
    Ok(())
}

async fn watch(context: &SharedContext, polling: &PollingConfig) -> Result<()> {
    let budgets = Arc::new(BudgetManager::new(context.clone()));
    let health = Arc::new(ModelHealthManager::new(context.clone()));

    let alert_poller = AlertPoller::new(Arc::clone(&budgets), polling);
    let health_poller = ModelHealthPoller::new(Arc::clone(&health), polling);
    alert_poller.start();
    health_poller.start();
    println!("Watching alerts and model health, ctrl-c to stop");

    tokio::signal::ctrl_c().await?;

    alert_poller.stop();
    health_poller.stop();
    println!(
        "\n{} open alerts, {} unhealthy models",
        budgets.open_alert_count(),
        health.unhealthy_count()
    );
    Ok(())
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_platform(value: &str) -> Platform {
    match value.to_lowercase().as_str() {
        "claude" => Platform::Claude,
        "gemini" => Platform::Gemini,
        "openai" => Platform::OpenAi,
        other => Platform::Other(other.to_string()),
    }
}

fn parse_role(value: &str) -> Result<EnterpriseRole> {
    match value.to_lowercase().as_str() {
        "owner" => Ok(EnterpriseRole::Owner),
        "admin" => Ok(EnterpriseRole::Admin),
        "member" => Ok(EnterpriseRole::Member),
        "viewer" => Ok(EnterpriseRole::Viewer),
        other => Err(ConsoleError::Validation(format!("unknown role: {}", other))),
    }
}

fn parse_pool_type(value: &str) -> Result<PoolType> {
    match value.to_lowercase().as_str() {
        "shared" => Ok(PoolType::Shared),
        "dedicated" => Ok(PoolType::Dedicated),
        other => Err(ConsoleError::Validation(format!(
            "unknown pool type: {}",
            other
        ))),
    }
}

fn parse_strategy(value: &str) -> Result<LoadBalanceStrategy> {
    match value.to_lowercase().as_str() {
        "round_robin" => Ok(LoadBalanceStrategy::RoundRobin),
        "least_connections" => Ok(LoadBalanceStrategy::LeastConnections),
        "weighted" => Ok(LoadBalanceStrategy::Weighted),
        other => Err(ConsoleError::Validation(format!(
            "unknown strategy: {}",
            other
        ))),
    }
}

fn parse_range(value: &str) -> Result<TimeRange> {
    match value.to_lowercase().as_str() {
        "today" => Ok(TimeRange::Today),
        "week" => Ok(TimeRange::Week),
        "month" => Ok(TimeRange::Month),
        "quarter" => Ok(TimeRange::Quarter),
        other => Err(ConsoleError::Validation(format!(
            "unknown time range: {}",
            other
        ))),
    }
}

/// Collapse an error into the single user-facing line and log the detail
pub fn report_failure(err: &ConsoleError) {
    error!("{}", err);
    eprintln!("{}", err.user_message());
}
