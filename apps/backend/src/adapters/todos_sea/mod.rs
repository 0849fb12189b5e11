//! SeaORM adapter for the todos table.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::todos;

pub mod dto;

pub use dto::{TodoCreate, TodoUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find_by_id(id).one(conn).await
}

/// Rows of one page, oldest first, plus the total row count. A page whose
/// offset overflows `u64` holds no rows.
pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page_index: u64,
    per_page: u64,
) -> Result<(Vec<todos::Model>, u64), sea_orm::DbErr> {
    let paginator = todos::Entity::find()
        .order_by_asc(todos::Column::CreatedAt)
        .order_by_asc(todos::Column::Id)
        .paginate(conn, per_page);

    let total = paginator.num_items().await?;
    if page_index.checked_mul(per_page).is_none() {
        return Ok((Vec::new(), total));
    }
    let rows = paginator.fetch_page(page_index).await?;
    Ok((rows, total))
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    todos::Entity::find().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = todos::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(dto.title),
        description: Set(dto.description),
        completed: Set(dto.completed),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoUpdate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let active = todos::ActiveModel {
        id: sea_orm::Unchanged(dto.id),
        title: Set(dto.title),
        description: Set(dto.description),
        completed: Set(dto.completed),
        created_at: sea_orm::NotSet,
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    active.update(conn).await
}

/// Delete by id; returns the number of rows removed.
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = todos::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
