//! Table enumeration
//!
//! The fixed set of tables the store manages. Each table knows its store
//! name and the key the legacy web client used for the same collection in
//! its local storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table in the structured store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Articles,
    Tiers,
    TierTypes,
    Invoices,
    Transactions,
    Employees,
    DailySales,
    Families,
    SubFamilies,
    Recipes,
}

impl Table {
    /// Every table, in load order (reference tables first).
    pub const ALL: [Table; 10] = [
        Table::TierTypes,
        Table::Families,
        Table::SubFamilies,
        Table::Articles,
        Table::Tiers,
        Table::Invoices,
        Table::Transactions,
        Table::Employees,
        Table::DailySales,
        Table::Recipes,
    ];

    /// Reference tables seeded during migration.
    pub const REFERENCE: [Table; 3] = [Table::TierTypes, Table::Families, Table::SubFamilies];

    /// Data tables bulk-loaded from the legacy client during migration.
    pub const DATA: [Table; 7] = [
        Table::Invoices,
        Table::Employees,
        Table::Transactions,
        Table::DailySales,
        Table::Recipes,
        Table::Articles,
        Table::Tiers,
    ];

    /// Tables included in a backup bundle, in export order.
    pub const BACKUP: [Table; 4] = [
        Table::Invoices,
        Table::Employees,
        Table::Articles,
        Table::Tiers,
    ];

    /// Name of the table in the structured store and in backup bundles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Articles => "articles",
            Table::Tiers => "tiers",
            Table::TierTypes => "tier_types",
            Table::Invoices => "invoices",
            Table::Transactions => "transactions",
            Table::Employees => "employees",
            Table::DailySales => "daily_sales",
            Table::Families => "families",
            Table::SubFamilies => "sub_families",
            Table::Recipes => "recipes",
        }
    }

    /// Key the legacy web client used for this collection in local storage.
    ///
    /// These are read verbatim during migration and never written back.
    pub fn legacy_key(&self) -> &'static str {
        match self {
            Table::Articles => "articles",
            Table::Tiers => "tiers",
            Table::TierTypes => "typesTiers",
            Table::Invoices => "factures",
            Table::Transactions => "transactions",
            Table::Employees => "employes",
            Table::DailySales => "ventesJournalieres",
            Table::Families => "familles",
            Table::SubFamilies => "sousFamilles",
            Table::Recipes => "recettes",
        }
    }

    /// Resolve a store/bundle table name back to the enum.
    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
