//! Transactions against a goal and recurring contribution templates.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{shift_month, shift_year, Displayable, Identifiable};

/// Whether a transaction adds to or draws from a goal balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Signed multiplier applied to the transaction amount.
    pub fn sign(self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// Which of a goal's two balances a transaction touches. Cash and Pix are
/// independent ledgers; an expense tagged one method never draws from the
/// other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Pix,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
        };
        f.write_str(label)
    }
}

/// Caller input for a transaction, before validation and application.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub amount: f64,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, method: PaymentMethod, amount: f64) -> Self {
        Self {
            kind,
            method,
            amount,
            category: None,
            note: None,
        }
    }
}

/// An applied transaction record. Append-only intent; the tracker keeps only
/// resulting goal balances, so these records are not a reconstructable ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl Transaction {
    pub fn from_input(
        goal_id: Uuid,
        input: &NewTransaction,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            kind: input.kind,
            method: input.method,
            amount: input.amount,
            category: input.category.clone(),
            note: input.note.clone(),
            created_at: now,
            user_id,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} {} {}", self.id, self.kind, self.method)
    }
}

/// Cadence of a recurring contribution template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Calculates the next due date after `from` according to the cadence.
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::weeks(1),
            Frequency::Monthly => shift_month(from, 1),
            Frequency::Yearly => shift_year(from, 1),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// A declarative template for a future transaction. No scheduler fires these;
/// callers may list due templates and apply them explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub amount: f64,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransaction {
    pub fn new(
        goal_id: Uuid,
        kind: TransactionKind,
        method: PaymentMethod,
        amount: f64,
        frequency: Frequency,
        next_due_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            kind,
            method,
            amount,
            frequency,
            next_due_date,
            category: None,
            note: None,
            is_active: true,
            created_at: now,
        }
    }

    pub fn is_due(&self, on: NaiveDate) -> bool {
        self.is_active && self.next_due_date <= on
    }

    /// Moves the due date one cadence step forward.
    pub fn advance(&mut self) {
        self.next_due_date = self.frequency.next_date(self.next_due_date);
    }

    /// Input for applying this template as a concrete transaction.
    pub fn to_input(&self) -> NewTransaction {
        NewTransaction {
            kind: self.kind,
            method: self.method,
            amount: self.amount,
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}
