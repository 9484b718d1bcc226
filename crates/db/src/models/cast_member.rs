//! Cast member row model.

use catalog_core::cast_member::{CastMember, CastMemberProps, CastMemberType};
use catalog_core::error::CoreError;
use catalog_core::identifier::CastMemberId;
use catalog_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `cast_members` table. `type` is the numeric role code.
#[derive(Debug, Clone, FromRow)]
pub struct CastMemberRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub cast_member_type: i16,
    pub created_at: Timestamp,
}

impl TryFrom<CastMemberRow> for CastMember {
    type Error = CoreError;

    /// Fails only if the row carries a role code the schema should have
    /// rejected.
    fn try_from(row: CastMemberRow) -> Result<Self, Self::Error> {
        let cast_member_type = CastMemberType::try_from(row.cast_member_type).map_err(|_| {
            CoreError::Internal(format!(
                "cast member {} has unknown type code {}",
                row.id, row.cast_member_type
            ))
        })?;
        Ok(CastMember::restore(CastMemberProps {
            cast_member_id: CastMemberId::from_uuid(row.id),
            name: row.name,
            cast_member_type,
            created_at: row.created_at,
        }))
    }
}
