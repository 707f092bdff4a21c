//! SeaORM entities for the portal's table contract.
//!
//! Table and column names are an external contract shared with the
//! managed database and must not drift.

pub mod article;
pub mod auth_audit_log;
pub mod buyer;
pub mod farmer;
pub mod harvest;
pub mod inventory_item;
pub mod officer;
pub mod refresh_token;
pub mod sales_report;
pub mod seedling_distribution;
pub mod system_setting;
pub mod team_member;
