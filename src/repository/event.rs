//! Repository implementation for events.

use diesel::prelude::*;

use crate::domain::event::{Event, NewEvent};
use crate::domain::types::EventId;
use crate::models::event::{
    Event as DbEvent, NewEvent as DbNewEvent, UpdateEvent as DbUpdateEvent,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EventReader, EventWriter, ListOrder, RangeQuery, RangeReader,
};

impl RangeReader<Event> for DieselRepository {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<Event>)> {
        use crate::schema::events;

        let mut conn = self.conn()?;

        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total: i64 = events::table.count().get_result(conn)?;

            let items = events::table.into_boxed();
            let items = match query.order {
                ListOrder::Latest => items.order((events::created_at.desc(), events::id.desc())),
                ListOrder::Oldest => items.order((events::created_at.asc(), events::id.asc())),
                ListOrder::IdAscending => items.order(events::id.asc()),
            };

            let rows = items
                .offset(query.offset())
                .limit(query.limit())
                .load::<DbEvent>(conn)?;

            Ok((total, rows))
        })?;

        let items = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total as usize, items))
    }
}

impl EventReader for DieselRepository {
    fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<Event>> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        let row = events::table
            .find(id.to_string())
            .first::<DbEvent>(&mut conn)
            .optional()?;

        row.map(Event::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl EventWriter for DieselRepository {
    fn create_event(&self, new: &NewEvent) -> RepositoryResult<Event> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        let insertable = DbNewEvent::with_id(EventId::new(), new);

        let row = diesel::insert_into(events::table)
            .values(&insertable)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(Event::try_from(row)?)
    }

    fn update_event(&self, id: EventId, updates: &NewEvent) -> RepositoryResult<Event> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        let changes: DbUpdateEvent = updates.into();

        let row = diesel::update(events::table.find(id.to_string()))
            .set(&changes)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(Event::try_from(row)?)
    }

    fn delete_event(&self, id: EventId) -> RepositoryResult<()> {
        use crate::schema::events;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(events::table.find(id.to_string())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
