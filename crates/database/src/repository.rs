use crate::DbError;
use core_types::{Category, Joke, JokeCounts, NewJoke, SetCounts, VoteAction};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::Transaction;

/// The result of assigning a category to a joke by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// No category carries the requested name; nothing was written.
    CategoryNotFound,
    /// The joke is linked to the category and labelled with its name.
    Assigned { category_id: i32 },
}

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Category membership lives in `joke_categories`. The `jokes.category` label
/// is a cache of the most recently assigned category name and is rewritten in
/// the same transaction as every association change.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Picks one joke uniformly at random, or `None` when there are no jokes.
    pub async fn get_random_joke(&self) -> Result<Option<Joke>, DbError> {
        let joke = sqlx::query_as::<_, Joke>(
            "SELECT id, category, joke, likes, dislikes FROM jokes ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(joke)
    }

    /// Picks one random joke belonging to the named category.
    pub async fn get_random_joke_in_category(
        &self,
        category: &str,
    ) -> Result<Option<Joke>, DbError> {
        let joke = sqlx::query_as::<_, Joke>(
            r#"
            SELECT j.id, j.category, j.joke, j.likes, j.dislikes
            FROM jokes AS j
            JOIN joke_categories AS jc ON jc.joke_id = j.id
            JOIN categories AS c ON c.id = jc.category_id
            WHERE c.name = $1
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(joke)
    }

    /// Fetches all categories, oldest first.
    pub async fn get_all_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    /// Fetches all jokes, oldest first.
    pub async fn get_all_jokes(&self) -> Result<Vec<Joke>, DbError> {
        let jokes = sqlx::query_as::<_, Joke>(
            "SELECT id, category, joke, likes, dislikes FROM jokes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jokes)
    }

    /// Fetches every joke associated with the named category.
    pub async fn get_jokes_in_category(&self, category: &str) -> Result<Vec<Joke>, DbError> {
        let jokes = sqlx::query_as::<_, Joke>(
            r#"
            SELECT j.id, j.category, j.joke, j.likes, j.dislikes
            FROM jokes AS j
            JOIN joke_categories AS jc ON jc.joke_id = j.id
            JOIN categories AS c ON c.id = jc.category_id
            WHERE c.name = $1
            ORDER BY j.id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(jokes)
    }

    /// Inserts a joke with zeroed counters and returns its id.
    ///
    /// The label is stored as sent. When it names a category (see
    /// [`NewJoke::category_to_link`]), that category is created if needed and
    /// the joke is linked to it, all in one transaction.
    pub async fn save_joke(&self, new_joke: &NewJoke) -> Result<i32, DbError> {
        let mut tx: Transaction<Postgres> = self.pool.begin().await?;

        let joke_id: i32 =
            sqlx::query_scalar("INSERT INTO jokes (category, joke) VALUES ($1, $2) RETURNING id")
                .bind(new_joke.category.as_deref())
                .bind(new_joke.joke.as_deref())
                .fetch_one(&mut *tx)
                .await?;

        if let Some(name) = new_joke.category_to_link() {
            sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&mut *tx)
                .await?;
            sqlx::query(
                r#"
                INSERT INTO joke_categories (joke_id, category_id)
                SELECT $1, id FROM categories WHERE name = $2
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(joke_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(joke_id)
    }

    /// Atomically increments one counter of a joke.
    /// Returns the counters after the update, or `None` if the id is unknown.
    pub async fn apply_vote(
        &self,
        joke_id: i32,
        action: VoteAction,
    ) -> Result<Option<JokeCounts>, DbError> {
        let sql = match action {
            VoteAction::Like => {
                "UPDATE jokes SET likes = likes + 1 WHERE id = $1 RETURNING id, likes, dislikes"
            }
            VoteAction::Dislike => {
                "UPDATE jokes SET dislikes = dislikes + 1 WHERE id = $1 RETURNING id, likes, dislikes"
            }
        };
        let counts = sqlx::query_as::<_, JokeCounts>(sql)
            .bind(joke_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(counts)
    }

    /// Overwrites both counters of a joke.
    /// Negative values are rejected by the table's check constraints.
    pub async fn set_joke_counts(
        &self,
        joke_id: i32,
        counts: SetCounts,
    ) -> Result<Option<JokeCounts>, DbError> {
        let counts = sqlx::query_as::<_, JokeCounts>(
            "UPDATE jokes SET likes = $1, dislikes = $2 WHERE id = $3 RETURNING id, likes, dislikes",
        )
        .bind(counts.likes)
        .bind(counts.dislikes)
        .bind(joke_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Deletes a joke and, through the foreign keys, its associations.
    /// Returns the number of jokes removed (0 for an unknown id).
    pub async fn delete_joke(&self, joke_id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM jokes WHERE id = $1")
            .bind(joke_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Creates a category and returns its id.
    /// A duplicate name surfaces as the database's unique-violation error.
    pub async fn save_category(&self, name: Option<&str>) -> Result<i32, DbError> {
        let id: i32 = sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Links a joke to the category with the given name and relabels the joke.
    ///
    /// Assigning the same pair twice is a no-op for the association. An unknown
    /// joke id fails on the foreign key.
    pub async fn assign_category(
        &self,
        joke_id: i32,
        category: &str,
    ) -> Result<AssignOutcome, DbError> {
        let mut tx: Transaction<Postgres> = self.pool.begin().await?;

        let category_id: Option<i32> =
            sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                .bind(category)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(category_id) = category_id else {
            return Ok(AssignOutcome::CategoryNotFound);
        };

        sqlx::query(
            "INSERT INTO joke_categories (joke_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(joke_id)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE jokes SET category = $1 WHERE id = $2")
            .bind(category)
            .bind(joke_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(AssignOutcome::Assigned { category_id })
    }

    /// Deletes a category. Its associations go with it through the foreign key;
    /// the jokes themselves stay. Jokes labelled with the deleted name are
    /// relabelled with another category they still belong to, or cleared.
    /// Returns the number of categories removed (0 for an unknown id).
    pub async fn delete_category(&self, category_id: i32) -> Result<u64, DbError> {
        let mut tx: Transaction<Postgres> = self.pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM categories WHERE id = $1 RETURNING name")
                .bind(category_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(name) = name else {
            return Ok(0);
        };

        sqlx::query(
            r#"
            UPDATE jokes AS j
            SET category = (
                SELECT c.name
                FROM joke_categories AS jc
                JOIN categories AS c ON c.id = jc.category_id
                WHERE jc.joke_id = j.id
                ORDER BY c.id DESC
                LIMIT 1
            )
            WHERE j.category = $1
            "#,
        )
        .bind(&name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(category_id, %name, "Category deleted.");
        Ok(1)
    }
}
