use anyhow::Result;
use chrono::Utc;
use model::entities::user::{self, AccountStatus, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, EntityTrait, QueryFilter, Set};
use tracing::{debug, error, info, trace};

use crate::auth::{ensure_password_strength, ensure_university_email, hash_password};
use crate::config::Settings;

/// Inserts an approved admin, or promotes the account if the email is already registered.
pub async fn create_admin(
    settings: &Settings,
    name: &str,
    email: &str,
    password: &str,
    hall_name: Option<String>,
) -> Result<()> {
    trace!("Entering create_admin function");
    ensure_university_email(email)?;
    ensure_password_strength(password)?;

    let db = match Database::connect(&settings.database_url).await {
        Ok(connection) => {
            debug!("Connected to database: {}", settings.database_url);
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", settings.database_url, e);
            return Err(e.into());
        }
    };

    let password_hash = hash_password(password, settings.bcrypt_cost)?;

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&db)
        .await?;

    match existing {
        Some(found) => {
            let id = found.id;
            let mut active: user::ActiveModel = found.into();
            active.name = Set(name.to_string());
            active.password_hash = Set(password_hash);
            active.role = Set(Role::Admin);
            active.account_status = Set(AccountStatus::Approved);
            if hall_name.is_some() {
                active.hall_name = Set(hall_name);
            }
            active.update(&db).await?;
            info!("Promoted existing user {} ({}) to approved admin", id, email);
        }
        None => {
            let created = user::ActiveModel {
                name: Set(name.to_string()),
                email: Set(email.to_string()),
                password_hash: Set(password_hash),
                role: Set(Role::Admin),
                hall_name: Set(hall_name),
                account_status: Set(AccountStatus::Approved),
                created_at: Set(Utc::now().naive_utc()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
            info!("Created admin {} with id {}", email, created.id);
        }
    }

    Ok(())
}
