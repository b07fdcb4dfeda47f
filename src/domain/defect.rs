use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AccountId, CustomerId, DefectArea, DefectDescription, DefectId, DefectSeverity,
};

/// Defect recorded against a customer's property during an inspection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Defect {
    pub id: DefectId,
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub area: DefectArea,
    pub category: Option<String>,
    pub description: DefectDescription,
    pub recommendation: Option<String>,
    pub severity: DefectSeverity,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDefect {
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub area: DefectArea,
    pub category: Option<String>,
    pub description: DefectDescription,
    pub recommendation: Option<String>,
    pub severity: DefectSeverity,
}
