//! Repository implementation for news.

use diesel::prelude::*;

use crate::domain::news::{NewNews, News};
use crate::domain::types::NewsId;
use crate::models::news::{NewNews as DbNewNews, News as DbNews, UpdateNews as DbUpdateNews};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ListOrder, NewsReader, NewsWriter, RangeQuery, RangeReader,
};

impl RangeReader<News> for DieselRepository {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<News>)> {
        use crate::schema::news;

        let mut conn = self.conn()?;

        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total: i64 = news::table.count().get_result(conn)?;

            let items = news::table.into_boxed();
            let items = match query.order {
                ListOrder::Latest => {
                    items.order((news::created_at.desc(), news::id.desc()))
                }
                ListOrder::Oldest => {
                    items.order((news::created_at.asc(), news::id.asc()))
                }
                ListOrder::IdAscending => items.order(news::id.asc()),
            };

            let rows = items
                .offset(query.offset())
                .limit(query.limit())
                .load::<DbNews>(conn)?;

            Ok((total, rows))
        })?;

        let items = rows
            .into_iter()
            .map(News::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total as usize, items))
    }
}

impl NewsReader for DieselRepository {
    fn get_news_by_id(&self, id: NewsId) -> RepositoryResult<Option<News>> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let row = news::table
            .find(id.get())
            .first::<DbNews>(&mut conn)
            .optional()?;

        row.map(News::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl NewsWriter for DieselRepository {
    fn create_news(&self, new: &NewNews) -> RepositoryResult<News> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let insertable: DbNewNews = new.into();

        let row = diesel::insert_into(news::table)
            .values(&insertable)
            .get_result::<DbNews>(&mut conn)?;

        Ok(News::try_from(row)?)
    }

    fn update_news(
        &self,
        id: NewsId,
        updates: &NewNews,
    ) -> RepositoryResult<News> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let changes: DbUpdateNews = updates.into();

        let row = diesel::update(news::table.find(id.get()))
            .set(&changes)
            .get_result::<DbNews>(&mut conn)?;

        Ok(News::try_from(row)?)
    }

    fn delete_news(&self, id: NewsId) -> RepositoryResult<()> {
        use crate::schema::news;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(news::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
