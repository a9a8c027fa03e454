//! Repository implementation for articles.

use diesel::prelude::*;

use crate::domain::article::{Article, NewArticle};
use crate::domain::types::ArticleId;
use crate::models::article::{
    Article as DbArticle, NewArticle as DbNewArticle, UpdateArticle as DbUpdateArticle,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ArticleReader, ArticleWriter, DieselRepository, ListOrder, RangeQuery, RangeReader,
};

impl RangeReader<Article> for DieselRepository {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<Article>)> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total: i64 = articles::table.count().get_result(conn)?;

            let items = articles::table.into_boxed();
            let items = match query.order {
                ListOrder::Latest => {
                    items.order((articles::created_at.desc(), articles::id.desc()))
                }
                ListOrder::Oldest => {
                    items.order((articles::created_at.asc(), articles::id.asc()))
                }
                ListOrder::IdAscending => items.order(articles::id.asc()),
            };

            let rows = items
                .offset(query.offset())
                .limit(query.limit())
                .load::<DbArticle>(conn)?;

            Ok((total, rows))
        })?;

        let items = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total as usize, items))
    }
}

impl ArticleReader for DieselRepository {
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let row = articles::table
            .find(id.get())
            .first::<DbArticle>(&mut conn)
            .optional()?;

        row.map(Article::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, new: &NewArticle) -> RepositoryResult<Article> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let insertable: DbNewArticle = new.into();

        let row = diesel::insert_into(articles::table)
            .values(&insertable)
            .get_result::<DbArticle>(&mut conn)?;

        Ok(Article::try_from(row)?)
    }

    fn update_article(
        &self,
        id: ArticleId,
        updates: &NewArticle,
    ) -> RepositoryResult<Article> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let changes: DbUpdateArticle = updates.into();

        let row = diesel::update(articles::table.find(id.get()))
            .set(&changes)
            .get_result::<DbArticle>(&mut conn)?;

        Ok(Article::try_from(row)?)
    }

    fn delete_article(&self, id: ArticleId) -> RepositoryResult<()> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(articles::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
