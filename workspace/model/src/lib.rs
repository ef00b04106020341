pub mod entities;

use sea_orm::ActiveEnum;

/// Parses a string-backed enum from user input.
///
/// Values are stored upper-case in the database (`IN_PROGRESS`, `CANTEEN_MANAGER`),
/// but path segments and query strings often arrive in lower case or with
/// surrounding whitespace, so the input is normalized before lookup.
pub fn parse_active_enum<E>(raw: &str) -> Option<E>
where
    E: ActiveEnum<Value = String>,
{
    let normalized = raw.trim().to_uppercase().replace(['-', ' '], "_");
    E::try_from_value(&normalized).ok()
}
