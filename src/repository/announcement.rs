//! Repository implementation for announcements.

use diesel::prelude::*;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::types::AnnouncementId;
use crate::models::announcement::{
    Announcement as DbAnnouncement, NewAnnouncement as DbNewAnnouncement,
    UpdateAnnouncement as DbUpdateAnnouncement,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AnnouncementReader, AnnouncementWriter, DieselRepository, ListOrder, RangeQuery, RangeReader,
};

impl RangeReader<Announcement> for DieselRepository {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<Announcement>)> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;

        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total: i64 = announcements::table.count().get_result(conn)?;

            let items = announcements::table.into_boxed();
            let items = match query.order {
                ListOrder::Latest => {
                    items.order((announcements::created_at.desc(), announcements::id.desc()))
                }
                ListOrder::Oldest => {
                    items.order((announcements::created_at.asc(), announcements::id.asc()))
                }
                ListOrder::IdAscending => items.order(announcements::id.asc()),
            };

            let rows = items
                .offset(query.offset())
                .limit(query.limit())
                .load::<DbAnnouncement>(conn)?;

            Ok((total, rows))
        })?;

        let items = rows
            .into_iter()
            .map(Announcement::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total as usize, items))
    }
}

impl AnnouncementReader for DieselRepository {
    fn get_announcement_by_id(&self, id: AnnouncementId) -> RepositoryResult<Option<Announcement>> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let row = announcements::table
            .find(id.get())
            .first::<DbAnnouncement>(&mut conn)
            .optional()?;

        row.map(Announcement::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl AnnouncementWriter for DieselRepository {
    fn create_announcement(&self, new: &NewAnnouncement) -> RepositoryResult<Announcement> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let insertable: DbNewAnnouncement = new.into();

        let row = diesel::insert_into(announcements::table)
            .values(&insertable)
            .get_result::<DbAnnouncement>(&mut conn)?;

        Ok(Announcement::try_from(row)?)
    }

    fn update_announcement(
        &self,
        id: AnnouncementId,
        updates: &NewAnnouncement,
    ) -> RepositoryResult<Announcement> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let changes: DbUpdateAnnouncement = updates.into();

        let row = diesel::update(announcements::table.find(id.get()))
            .set(&changes)
            .get_result::<DbAnnouncement>(&mut conn)?;

        Ok(Announcement::try_from(row)?)
    }

    fn delete_announcement(&self, id: AnnouncementId) -> RepositoryResult<()> {
        use crate::schema::announcements;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(announcements::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
