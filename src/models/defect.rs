use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::defect::{Defect as DomainDefect, NewDefect as DomainNewDefect};
use crate::domain::types::{
    AccountId, CustomerId, DefectArea, DefectDescription, DefectId, DefectSeverity,
    TypeConstraintError,
};
use crate::list_query::{Column, EntityDescriptor, ListEntity};
use crate::paging::SortDirection;

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::defects)]
/// Diesel model for [`crate::domain::defect::Defect`].
pub struct Defect {
    pub id: i32,
    pub account_id: i32,
    pub customer_id: i32,
    pub area: String,
    pub category: Option<String>,
    pub description: String,
    pub recommendation: Option<String>,
    pub severity: String,
    pub created_at: NaiveDateTime,
}

impl ListEntity for Defect {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        source: "defects",
        select: &[
            "id",
            "account_id",
            "customer_id",
            "area",
            "category",
            "description",
            "recommendation",
            "severity",
            "created_at",
        ],
        columns: &[
            Column::new("Id", "id"),
            Column::searchable("Area", "area"),
            Column::searchable("Category", "category"),
            Column::searchable("Description", "description"),
            Column::new("Severity", "severity"),
            Column::new("CreatedAt", "created_at"),
        ],
        default_sort: &[("CreatedAt", SortDirection::Desc), ("Id", SortDirection::Desc)],
        tie_breaker: "id",
    };
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::defects)]
/// Insertable form of [`Defect`].
pub struct NewDefect<'a> {
    pub account_id: i32,
    pub customer_id: i32,
    pub area: &'a str,
    pub category: Option<&'a str>,
    pub description: &'a str,
    pub recommendation: Option<&'a str>,
    pub severity: &'a str,
}

impl TryFrom<Defect> for DomainDefect {
    type Error = TypeConstraintError;

    fn try_from(defect: Defect) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DefectId::try_from(defect.id)?,
            account_id: AccountId::try_from(defect.account_id)?,
            customer_id: CustomerId::try_from(defect.customer_id)?,
            area: DefectArea::new(defect.area)?,
            category: defect.category,
            description: DefectDescription::new(defect.description)?,
            recommendation: defect.recommendation,
            severity: defect.severity.parse::<DefectSeverity>()?,
            created_at: defect.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDefect> for NewDefect<'a> {
    fn from(defect: &'a DomainNewDefect) -> Self {
        Self {
            account_id: defect.account_id.get(),
            customer_id: defect.customer_id.get(),
            area: defect.area.as_str(),
            category: defect.category.as_deref(),
            description: defect.description.as_str(),
            recommendation: defect.recommendation.as_deref(),
            severity: defect.severity.as_str(),
        }
    }
}
