// `MigrationTrait` declares `&SchemaManager` with an elided lifetime; under
// `async_trait` the impl signature must match it exactly, so the
// `elided_lifetimes_in_paths` lint (denied crate-wide) must be allowed here.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_plans_table::Migration),
            Box::new(m20240101_000003_create_customer_plans_table::Migration),
            Box::new(m20240101_000004_create_transactions_table::Migration),
        ]
    }
}

mod m20240101_000001_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Description).string().null())
                        .col(ColumnDef::new(Customers::Email).string().not_null())
                        .col(ColumnDef::new(Customers::Age).integer().not_null())
                        .to_owned(),
                )
                .await?;

            // The unique index is authoritative for email uniqueness; the
            // application-level check is only a fast-path reject.
            manager
                .create_index(
                    Index::create()
                        .name("idx_customers_email_unique")
                        .table(Customers::Table)
                        .col(Customers::Email)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        Table,
        Id,
        Name,
        Description,
        Email,
        Age,
    }
}

mod m20240101_000002_create_plans_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_plans_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Plans::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Plans::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Plans::Name).string().not_null())
                        .col(
                            ColumnDef::new(Plans::Price)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Plans::Description).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Plans::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Plans {
        Table,
        Id,
        Name,
        Price,
        Description,
    }
}

mod m20240101_000003_create_customer_plans_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_customers_table::Customers;
    use super::m20240101_000002_create_plans_table::Plans;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_customer_plans_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CustomerPlans::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CustomerPlans::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CustomerPlans::CustomerId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CustomerPlans::PlanId).integer().not_null())
                        .col(
                            ColumnDef::new(CustomerPlans::Status)
                                .string_len(16)
                                .not_null()
                                .default("active"),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_customer_plans_customer")
                                .from(CustomerPlans::Table, CustomerPlans::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_customer_plans_plan")
                                .from(CustomerPlans::Table, CustomerPlans::PlanId)
                                .to(Plans::Table, Plans::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One membership row per pair; re-linking upserts the status.
            manager
                .create_index(
                    Index::create()
                        .name("idx_customer_plans_pair_unique")
                        .table(CustomerPlans::Table)
                        .col(CustomerPlans::CustomerId)
                        .col(CustomerPlans::PlanId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CustomerPlans::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum CustomerPlans {
        Table,
        Id,
        CustomerId,
        PlanId,
        Status,
    }
}

mod m20240101_000004_create_transactions_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_customers_table::Customers;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Transactions::Amount)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::CustomerId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transactions_customer")
                                .from(Transactions::Table, Transactions::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_transactions_customer")
                        .table(Transactions::Table)
                        .col(Transactions::CustomerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Transactions {
        Table,
        Id,
        Amount,
        Description,
        CustomerId,
    }
}
