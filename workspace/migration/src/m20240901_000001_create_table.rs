use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string_len(Users::Role, 20))
                    .col(string_null(Users::HallName))
                    .col(string_len(Users::AccountStatus, 20).default("PENDING"))
                    .col(date_time(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create halls table
        manager
            .create_table(
                Table::create()
                    .table(Halls::Table)
                    .if_not_exists()
                    .col(pk_auto(Halls::Id))
                    .col(string(Halls::HallCode).unique_key())
                    .col(string(Halls::HallName).unique_key())
                    .col(string(Halls::FullName))
                    .col(string_null(Halls::HallShortName))
                    .col(string_len(Halls::HallType, 10))
                    .col(integer(Halls::Capacity))
                    .col(integer(Halls::CurrentOccupancy).default(0))
                    .col(string(Halls::Provost))
                    .col(string(Halls::Email))
                    .col(string(Halls::Phone))
                    .col(string(Halls::OfficeLocation))
                    .col(string(Halls::OfficeHours))
                    .col(string_len_null(Halls::Description, 1000))
                    .col(string_null(Halls::ImageUrl))
                    .col(string_len_null(Halls::Facilities, 1000))
                    .col(boolean(Halls::IsActive).default(true))
                    .col(date_time(Halls::CreatedAt))
                    .col(date_time(Halls::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create complaints table
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaints::Id))
                    .col(string_len(Complaints::Title, 200))
                    .col(string_len(Complaints::Description, 1000))
                    .col(string(Complaints::Category))
                    .col(string_len(Complaints::Priority, 10))
                    .col(string_len(Complaints::Status, 20).default("OPEN"))
                    .col(integer(Complaints::UserId))
                    .col(string_len_null(Complaints::AdminResponse, 1000))
                    .col(integer_null(Complaints::RespondedBy))
                    .col(date_time(Complaints::CreatedAt))
                    .col(date_time_null(Complaints::UpdatedAt))
                    .col(date_time_null(Complaints::ResolvedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_user")
                            .from(Complaints::Table, Complaints::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_user_id")
                    .table(Complaints::Table)
                    .col(Complaints::UserId)
                    .to_owned(),
            )
            .await?;

        // Create complaint_notes table
        manager
            .create_table(
                Table::create()
                    .table(ComplaintNotes::Table)
                    .if_not_exists()
                    .col(pk_auto(ComplaintNotes::Id))
                    .col(integer(ComplaintNotes::ComplaintId))
                    .col(string_len(ComplaintNotes::Note, 1000))
                    .col(integer(ComplaintNotes::AuthorId))
                    .col(date_time(ComplaintNotes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_note_complaint")
                            .from(ComplaintNotes::Table, ComplaintNotes::ComplaintId)
                            .to(Complaints::Table, Complaints::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create meals table
        manager
            .create_table(
                Table::create()
                    .table(Meals::Table)
                    .if_not_exists()
                    .col(pk_auto(Meals::Id))
                    .col(integer(Meals::HallId))
                    .col(string_len(Meals::MealType, 10))
                    .col(string(Meals::MealName))
                    .col(string_len_null(Meals::Description, 500))
                    .col(decimal(Meals::Price).decimal_len(10, 2))
                    .col(integer(Meals::Quantity))
                    .col(date_time(Meals::MealDate))
                    .col(boolean(Meals::IsAvailable).default(true))
                    .col(date_time(Meals::CreatedAt))
                    .col(date_time(Meals::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meal_hall")
                            .from(Meals::Table, Meals::HallId)
                            .to(Halls::Table, Halls::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_meals_hall_id")
                    .table(Meals::Table)
                    .col(Meals::HallId)
                    .to_owned(),
            )
            .await?;

        // Create menu_items table
        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(pk_auto(MenuItems::Id))
                    .col(string(MenuItems::HallName))
                    .col(string(MenuItems::MealTime))
                    .col(string(MenuItems::ItemName))
                    .col(decimal(MenuItems::Price).decimal_len(10, 2))
                    .col(date(MenuItems::Date))
                    .to_owned(),
            )
            .await?;

        // Create hall_notices table
        manager
            .create_table(
                Table::create()
                    .table(HallNotices::Table)
                    .if_not_exists()
                    .col(pk_auto(HallNotices::Id))
                    .col(string(HallNotices::Title))
                    .col(text(HallNotices::Description))
                    .col(string(HallNotices::HallName))
                    .col(string(HallNotices::Priority))
                    .col(boolean(HallNotices::Published).default(true))
                    .col(string_null(HallNotices::AttachmentUrl))
                    .col(date_time(HallNotices::CreatedAt))
                    .col(date_time(HallNotices::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation so foreign keys never dangle
        manager
            .drop_table(Table::drop().table(HallNotices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Meals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ComplaintNotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Halls::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    HallName,
    AccountStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Halls {
    Table,
    Id,
    HallCode,
    HallName,
    FullName,
    HallShortName,
    HallType,
    Capacity,
    CurrentOccupancy,
    Provost,
    Email,
    Phone,
    OfficeLocation,
    OfficeHours,
    Description,
    ImageUrl,
    Facilities,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    Title,
    Description,
    Category,
    Priority,
    Status,
    UserId,
    AdminResponse,
    RespondedBy,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum ComplaintNotes {
    Table,
    Id,
    ComplaintId,
    Note,
    AuthorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Meals {
    Table,
    Id,
    HallId,
    MealType,
    MealName,
    Description,
    Price,
    Quantity,
    MealDate,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MenuItems {
    Table,
    Id,
    HallName,
    MealTime,
    ItemName,
    Price,
    Date,
}

#[derive(DeriveIden)]
enum HallNotices {
    Table,
    Id,
    Title,
    Description,
    HallName,
    Priority,
    Published,
    AttachmentUrl,
    CreatedAt,
    UpdatedAt,
}
