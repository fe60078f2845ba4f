use crate::entities::prelude::*;
use crate::entities::{request_responses, requests, reviews};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        for mut stmt in [
            schema.create_table_from_entity(Reviews),
            schema.create_table_from_entity(Requests),
            schema.create_table_from_entity(RequestResponses),
        ] {
            manager.create_table(stmt.if_not_exists().to_owned()).await?;
        }

        // One review per (hero, user); the upsert relies on this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_hero_user")
                    .table(Reviews)
                    .col(reviews::Column::HeroId)
                    .col(reviews::Column::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_hero_created")
                    .table(Reviews)
                    .col(reviews::Column::HeroId)
                    .col(reviews::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_user_id")
                    .table(Requests)
                    .col(requests::Column::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_hero_status")
                    .table(Requests)
                    .col(requests::Column::HeroId)
                    .col(requests::Column::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_request_responses_request_id")
                    .table(RequestResponses)
                    .col(request_responses::Column::RequestId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestResponses).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Requests).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews).to_owned())
            .await?;

        Ok(())
    }
}
