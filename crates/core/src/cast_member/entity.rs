use core::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{AggregateRoot, Entity};
use crate::error::CoreError;
use crate::identifier::CastMemberId;
use crate::impl_entity_eq;
use crate::notification::Notification;
use crate::types::{now, Timestamp};
use crate::validation::{self, FieldErrors, MAX_NAME_CHARS};

/// Role of a cast member. Stored and transmitted as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum CastMemberType {
    Director = 1,
    Actor = 2,
}

impl CastMemberType {
    pub fn code(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for CastMemberType {
    type Error = CoreError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CastMemberType::Director),
            2 => Ok(CastMemberType::Actor),
            other => Err(CoreError::invalid_field(
                "type",
                format!("type must be 1 (director) or 2 (actor), got {other}"),
            )),
        }
    }
}

impl From<CastMemberType> for i16 {
    fn from(value: CastMemberType) -> Self {
        value.code()
    }
}

impl fmt::Display for CastMemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastMemberType::Director => f.write_str("director"),
            CastMemberType::Actor => f.write_str("actor"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CastMemberProps {
    pub cast_member_id: CastMemberId,
    pub name: String,
    pub cast_member_type: CastMemberType,
    pub created_at: Timestamp,
}

impl CastMemberProps {
    pub fn new(name: impl Into<String>, cast_member_type: CastMemberType) -> Self {
        Self {
            cast_member_id: CastMemberId::new(),
            name: name.into(),
            cast_member_type,
            created_at: now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CastMember {
    cast_member_id: CastMemberId,
    name: String,
    cast_member_type: CastMemberType,
    created_at: Timestamp,
    notification: Notification,
}

impl_entity_eq!(CastMember);

impl CastMember {
    pub fn new(props: CastMemberProps) -> Result<Self, CoreError> {
        rules(&props.name).into_result()?;
        Ok(Self::restore(props))
    }

    /// Rehydrate persisted state without re-running the rules.
    pub fn restore(props: CastMemberProps) -> Self {
        Self {
            cast_member_id: props.cast_member_id,
            name: props.name,
            cast_member_type: props.cast_member_type,
            created_at: props.created_at,
            notification: Notification::new(),
        }
    }

    pub fn cast_member_id(&self) -> CastMemberId {
        self.cast_member_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cast_member_type(&self) -> CastMemberType {
        self.cast_member_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate();
    }

    pub fn change_type(&mut self, cast_member_type: CastMemberType) {
        self.cast_member_type = cast_member_type;
        self.validate();
    }
}

fn rules(name: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validation::not_blank(&mut errors, "name", name);
    validation::max_chars(&mut errors, "name", name, MAX_NAME_CHARS);
    errors
}

impl Entity for CastMember {
    type Id = CastMemberId;
    const NAME: &'static str = "CastMember";

    fn entity_id(&self) -> &CastMemberId {
        &self.cast_member_id
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn validate(&mut self) {
        rules(&self.name).record(&mut self.notification);
    }
}

impl AggregateRoot for CastMember {}

#[cfg(test)]
impl CastMember {
    /// Valid cast member created `age_secs` seconds ago.
    pub(crate) fn fake(name: &str, cast_member_type: CastMemberType, age_secs: i64) -> Self {
        let mut props = CastMemberProps::new(name, cast_member_type);
        props.created_at = now() - chrono::Duration::seconds(age_secs);
        Self::new(props).expect("fake cast member is valid")
    }

    /// `count` cast members named `"{prefix} 1"` onwards, oldest first, one
    /// second apart, alternating actor and director.
    pub(crate) fn fakes(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count)
            .map(|i| {
                let t = if i % 2 == 1 {
                    CastMemberType::Actor
                } else {
                    CastMemberType::Director
                };
                Self::fake(&format!("{prefix} {i}"), t, (count + 1 - i) as i64)
            })
            .collect()
    }
}
