use serde::Deserialize;
use validator::Validate;

use crate::domain::defect::NewDefect;
use crate::domain::types::{
    AccountId, CustomerId, DefectArea, DefectDescription, DefectSeverity,
};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
/// Payload for recording a defect against a customer.
pub struct AddDefectForm {
    pub customer_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub area: String,
    #[validate(length(max = 200))]
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    pub recommendation: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl AddDefectForm {
    pub fn into_new_defect(self, account_id: AccountId) -> Result<NewDefect, FormError> {
        self.validate()?;
        let severity = match self.severity.as_deref() {
            Some(value) => value.parse::<DefectSeverity>()?,
            None => DefectSeverity::default(),
        };
        Ok(NewDefect {
            account_id,
            customer_id: CustomerId::new(self.customer_id)?,
            area: DefectArea::new(self.area)?,
            category: self
                .category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            description: DefectDescription::new(self.description)?,
            recommendation: self
                .recommendation
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            severity,
        })
    }
}
