use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::OwnerUserId).uuid().not_null())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Wishpoint).integer().not_null())
                    .col(ColumnDef::new(Companies::Step).string().not_null())
                    .col(ColumnDef::new(Companies::Scale).integer().not_null())
                    .col(ColumnDef::new(Companies::Startmoney).integer().not_null())
                    .col(ColumnDef::new(Companies::Numemploy).integer().not_null())
                    .col(ColumnDef::new(Companies::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Companies::Table, Companies::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-owner name uniqueness always holds; it is implied by the
        // global scope and is the invariant of the owner scope.
        manager
            .create_index(
                Index::create()
                    .table(Companies::Table)
                    .col(Companies::OwnerUserId)
                    .col(Companies::Name)
                    .unique()
                    .name("uq_companies_owner_user_id_name")
                    .to_owned(),
            )
            .await?;

        // The system-wide unique index exists only in global scope; a
        // deployment opting into COMPANY_NAME_SCOPE=owner at migration time
        // must run the server with the same setting.
        if !matches!(std::env::var("COMPANY_NAME_SCOPE").as_deref(), Ok("owner")) {
            manager
                .create_index(
                    Index::create()
                        .table(Companies::Table)
                        .col(Companies::Name)
                        .unique()
                        .name("uq_companies_name")
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    OwnerUserId,
    Name,
    Wishpoint,
    Step,
    Scale,
    Startmoney,
    Numemploy,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
