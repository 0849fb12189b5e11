use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Todos {
    Table,
    CreatedAt,
}

const INDEX_NAME: &str = "idx_todos_created_at";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // List pages are ordered by creation time.
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Todos::Table)
                    .col(Todos::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Todos::Table).to_owned())
            .await
    }
}
