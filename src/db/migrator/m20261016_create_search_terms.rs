use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchTerms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchTerms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchTerms::Term).string().not_null())
                    .col(ColumnDef::new(SearchTerms::SearchedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Serves the newest-first read and retention purges
        manager
            .create_index(
                Index::create()
                    .name("idx_search_terms_searched_at")
                    .table(SearchTerms::Table)
                    .col(SearchTerms::SearchedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchTerms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchTerms {
    Table,
    Id,
    Term,
    SearchedAt,
}
