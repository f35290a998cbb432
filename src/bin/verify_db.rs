use deck_backend::infrastructure::migrations::{
    column_exists, STACKS_TABLE, STALENESS_GRADIENT_COLUMN,
};
use sqlx::sqlite::SqlitePool;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:deck.db".into());
    let pool = SqlitePool::connect(&database_url).await?;

    let tables: Vec<String> = sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .fetch_all(&pool)
        .await?;

    println!("Tables: {}", tables.join(", "));

    let stack_count: i64 = sqlx::query_scalar("SELECT count(*) FROM deck_stacks")
        .fetch_one(&pool)
        .await?;

    println!("Stack count: {}", stack_count);

    let mut conn = pool.acquire().await?;
    let has_column = column_exists(&mut conn, STACKS_TABLE, STALENESS_GRADIENT_COLUMN).await?;

    println!("{}.{} present: {}", STACKS_TABLE, STALENESS_GRADIENT_COLUMN, has_column);

    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await?;

    println!("Journal mode: {}", journal_mode);

    Ok(())
}
