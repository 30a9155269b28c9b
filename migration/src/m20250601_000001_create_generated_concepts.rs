// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only log of generated concepts
        manager
            .create_table(
                Table::create()
                    .table(GeneratedConcepts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneratedConcepts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeneratedConcepts::FormData).json().not_null())
                    .col(ColumnDef::new(GeneratedConcepts::ConceptData).json().not_null())
                    .col(ColumnDef::new(GeneratedConcepts::DemoUrl).string_len(255))
                    .col(
                        ColumnDef::new(GeneratedConcepts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_concepts_created_at")
                    .table(GeneratedConcepts::Table)
                    .col(GeneratedConcepts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneratedConcepts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GeneratedConcepts {
    Table,
    Id,
    FormData,
    ConceptData,
    DemoUrl,
    CreatedAt,
}
