//! Family business logic - Creation, invite codes, and membership.
//!
//! A family is created together with an admin membership for its creator in
//! one transaction. Other users join by presenting the family's invite code.
//! The `(user, family)` membership pair is unique at the storage layer, so a
//! second join of the same family surfaces as a constraint violation.

use crate::{
    entities::{Family, FamilyMember, Role, User, family, family_member, user},
    errors::{Error, Result},
};
use chrono::Utc;
use rand::Rng;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

const INVITE_CODE_LEN: usize = 8;
const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random 8-character invite code from uppercase letters and
/// digits.
///
/// Codes are opaque tokens. Uniqueness is not checked here; the unique index
/// on `families.invite_code` rejects the (vanishingly rare) collision at
/// commit time, and the error surfaces to the caller.
#[must_use]
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Creates a new family and makes the creator its admin.
///
/// Both rows are written in one transaction: a family never exists without
/// at least one admin membership.
pub async fn create_family(
    db: &DatabaseConnection,
    name: &str,
    creator_user_id: i32,
) -> Result<(family::Model, family_member::Model)> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Family name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;
    let now = Utc::now();

    let new_family = family::ActiveModel {
        name: Set(name.trim().to_string()),
        invite_code: Set(generate_invite_code()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let membership = family_member::ActiveModel {
        user_id: Set(creator_user_id),
        family_id: Set(new_family.id),
        role: Set(Role::Admin),
        joined_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok((new_family, membership))
}

/// Finds a family by its invite code.
pub async fn get_family_by_invite_code(
    db: &DatabaseConnection,
    invite_code: &str,
) -> Result<Option<family::Model>> {
    Family::find()
        .filter(family::Column::InviteCode.eq(invite_code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a family by its unique ID.
pub async fn get_family_by_id(
    db: &DatabaseConnection,
    family_id: i32,
) -> Result<Option<family::Model>> {
    Family::find_by_id(family_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Joins a user to the family behind an invite code, as a regular member.
///
/// A duplicate join of the same family fails with a uniqueness violation
/// from the storage layer; an unknown code fails with
/// [`Error::InviteCodeNotFound`].
pub async fn join_family(
    db: &DatabaseConnection,
    invite_code: &str,
    user_id: i32,
) -> Result<(family::Model, family_member::Model)> {
    let joined_family = get_family_by_invite_code(db, invite_code)
        .await?
        .ok_or_else(|| Error::InviteCodeNotFound {
            code: invite_code.to_string(),
        })?;

    let membership = family_member::ActiveModel {
        user_id: Set(user_id),
        family_id: Set(joined_family.id),
        role: Set(Role::Member),
        joined_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok((joined_family, membership))
}

/// Lists the families a user belongs to, ordered by name.
pub async fn get_families_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<family::Model>> {
    let family_ids: Vec<i32> = FamilyMember::find()
        .filter(family_member::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.family_id)
        .collect();

    Family::find()
        .filter(family::Column::Id.is_in(family_ids))
        .order_by_asc(family::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a family's members with their user rows, oldest membership first.
pub async fn get_family_members(
    db: &DatabaseConnection,
    family_id: i32,
) -> Result<Vec<(family_member::Model, user::Model)>> {
    let rows = FamilyMember::find()
        .find_also_related(User)
        .filter(family_member::Column::FamilyId.eq(family_id))
        .order_by_asc(family_member::Column::JoinedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(membership, user)| user.map(|u| (membership, u)))
        .collect())
}

/// Removes a user's membership in a family.
///
/// Returns true if a membership row was removed. The user's expense history
/// in the family is kept.
pub async fn remove_member(
    db: &DatabaseConnection,
    family_id: i32,
    user_id: i32,
) -> Result<bool> {
    let result = FamilyMember::delete_many()
        .filter(family_member::Column::FamilyId.eq(family_id))
        .filter(family_member::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Deletes a family row.
///
/// Memberships, expenses, incomes, templates, and family-scoped categories
/// are removed by the cascade rules declared on the schema.
pub async fn delete_family(db: &DatabaseConnection, family_id: i32) -> Result<bool> {
    let result = Family::delete_by_id(family_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_invite_code_format() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert_eq!(code.len(), 8);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[tokio::test]
    async fn test_create_family_assigns_distinct_codes() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, 1).await?;

        let (first, _) = create_family(&db, "First", user.id).await?;
        let (second, _) = create_family(&db, "Second", user.id).await?;

        assert_ne!(first.invite_code, second.invite_code);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_family_makes_creator_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, 1).await?;

        let (created, membership) = create_family(&db, "Smiths", user.id).await?;

        assert_eq!(created.name, "Smiths");
        assert_eq!(membership.user_id, user.id);
        assert_eq!(membership.family_id, created.id);
        assert_eq!(membership.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_family_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, 1).await?;

        let result = create_family(&db, "  ", user.id).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_join_family_by_invite_code() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, 1).await?;
        let bob = create_test_user(&db, 2).await?;
        let (created, _) = create_family(&db, "Smiths", alice.id).await?;

        let (joined, membership) = join_family(&db, &created.invite_code, bob.id).await?;

        assert_eq!(joined.id, created.id);
        assert_eq!(membership.role, Role::Member);

        let members = get_family_members(&db, created.id).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].1.id, alice.id);
        assert_eq!(members[1].1.id, bob.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_join_family_unknown_code() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, 1).await?;

        let result = join_family(&db, "NOSUCH00", user.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InviteCodeNotFound { code } if code == "NOSUCH00"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_join_family_twice_violates_uniqueness() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, 1).await?;
        let bob = create_test_user(&db, 2).await?;
        let (created, _) = create_family(&db, "Smiths", alice.id).await?;

        join_family(&db, &created.invite_code, bob.id).await?;
        let result = join_family(&db, &created.invite_code, bob.id).await;

        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_families_for_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, 1).await?;
        let bob = create_test_user(&db, 2).await?;

        let (zoo, _) = create_family(&db, "Zoo", alice.id).await?;
        let (arc, _) = create_family(&db, "Arc", alice.id).await?;
        create_family(&db, "Bobs", bob.id).await?;

        let families = get_families_for_user(&db, alice.id).await?;
        assert_eq!(families.len(), 2);
        // Ordered by name
        assert_eq!(families[0].id, arc.id);
        assert_eq!(families[1].id, zoo.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_member() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, 1).await?;
        let bob = create_test_user(&db, 2).await?;
        let (created, _) = create_family(&db, "Smiths", alice.id).await?;
        join_family(&db, &created.invite_code, bob.id).await?;

        assert!(remove_member(&db, created.id, bob.id).await?);
        assert!(!remove_member(&db, created.id, bob.id).await?);

        let members = get_family_members(&db, created.id).await?;
        assert_eq!(members.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_family_cascades_memberships() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, 1).await?;
        let (created, _) = create_family(&db, "Smiths", alice.id).await?;

        assert!(delete_family(&db, created.id).await?);

        let memberships = FamilyMember::find().all(&db).await?;
        assert!(memberships.is_empty());

        // The user itself is untouched
        assert!(
            crate::core::user::get_user_by_telegram_id(&db, 1)
                .await?
                .is_some()
        );

        Ok(())
    }
}
