use crate::constants::HERO_ROSTER;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Heroes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Heroes are provisioned once here; end users never create them.
        let now = crate::models::timestamp::now();
        let mut insert = Query::insert()
            .into_table(Heroes)
            .columns([
                crate::entities::heroes::Column::Id,
                crate::entities::heroes::Column::Name,
                crate::entities::heroes::Column::Price,
                crate::entities::heroes::Column::Description,
                crate::entities::heroes::Column::Image,
                crate::entities::heroes::Column::CreatedAt,
            ])
            .to_owned();

        for hero in HERO_ROSTER {
            insert.values_panic([
                uuid::Uuid::new_v4().to_string().into(),
                hero.name.into(),
                hero.price.into(),
                hero.description.into(),
                format!("/assets/images/{}.png", hero.name.to_lowercase()).into(),
                now.clone().into(),
            ]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Heroes).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
