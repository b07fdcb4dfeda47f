use diesel::prelude::*;

use crate::{
    domain::defect::{Defect, NewDefect},
    list_query::ListQueryEngine,
    models::defect::{Defect as DbDefect, NewDefect as DbNewDefect},
    paging::PageResult,
    repository::{
        DefectListQuery, DefectReader, DefectWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl DefectReader for DieselRepository {
    fn list_defects(&self, query: DefectListQuery) -> RepositoryResult<PageResult<Defect>> {
        let mut conn = self.conn()?;
        let page = ListQueryEngine::new(&mut conn)
            .fetch::<DbDefect>(Some(&query.predicate()), &query.paging)?;

        page.try_map(Defect::try_from)
            .map_err(RepositoryError::from)
    }
}

impl DefectWriter for DieselRepository {
    fn create_defect(&self, new_defect: &NewDefect) -> RepositoryResult<Defect> {
        use crate::schema::{customers, defects};

        let mut conn = self.conn()?;

        let owned = customers::table
            .filter(customers::id.eq(new_defect.customer_id.get()))
            .filter(customers::account_id.eq(new_defect.account_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;
        if owned == 0 {
            return Err(RepositoryError::NotFound);
        }

        let insertable: DbNewDefect = new_defect.into();
        let created = diesel::insert_into(defects::table)
            .values(&insertable)
            .get_result::<DbDefect>(&mut conn)?;

        Ok(Defect::try_from(created)?)
    }
}
