use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::cast_member::{
    CastMember, CastMemberFilter, CastMemberProps, CastMemberRepository, CastMemberType,
};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::identifier::CastMemberId;
use crate::search::{SearchInput, SearchParams};
use crate::types::{now, Timestamp};
use crate::use_case::{parse_input_id, PaginationOutput, UseCase};
use crate::validation::validate_input;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMemberOutput {
    pub id: CastMemberId,
    pub name: String,
    #[serde(rename = "type")]
    pub cast_member_type: CastMemberType,
    pub created_at: Timestamp,
}

impl From<&CastMember> for CastMemberOutput {
    fn from(member: &CastMember) -> Self {
        Self {
            id: member.cast_member_id(),
            name: member.name().to_string(),
            cast_member_type: member.cast_member_type(),
            created_at: member.created_at(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCastMemberInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    pub cast_member_type: CastMemberType,
}

pub struct CreateCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl CreateCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for CreateCastMemberUseCase {
    type Input = CreateCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: CreateCastMemberInput) -> Result<CastMemberOutput, CoreError> {
        validate_input(&input)?;
        let member = CastMember::new(CastMemberProps {
            cast_member_id: CastMemberId::new(),
            name: input.name,
            cast_member_type: input.cast_member_type,
            created_at: now(),
        })?;
        self.repo.insert(&member).await?;
        Ok(CastMemberOutput::from(&member))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetCastMemberInput {
    pub id: String,
}

pub struct GetCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl GetCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for GetCastMemberUseCase {
    type Input = GetCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: GetCastMemberInput) -> Result<CastMemberOutput, CoreError> {
        let id: CastMemberId = parse_input_id(&input.id)?;
        let member = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(CastMember::NAME, id))?;
        Ok(CastMemberOutput::from(&member))
    }
}

pub type ListCastMembersInput = SearchInput<CastMemberFilter>;

pub struct ListCastMembersUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl ListCastMembersUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for ListCastMembersUseCase {
    type Input = ListCastMembersInput;
    type Output = PaginationOutput<CastMemberOutput>;

    async fn execute(
        &self,
        input: ListCastMembersInput,
    ) -> Result<PaginationOutput<CastMemberOutput>, CoreError> {
        let params = SearchParams::<CastMemberFilter>::new(input);
        let result = self.repo.search(&params).await?;
        Ok(PaginationOutput::from_search_result(result, |member| {
            CastMemberOutput::from(&member)
        }))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCastMemberInput {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub cast_member_type: Option<CastMemberType>,
}

impl UpdateCastMemberInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

pub struct UpdateCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl UpdateCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for UpdateCastMemberUseCase {
    type Input = UpdateCastMemberInput;
    type Output = CastMemberOutput;

    async fn execute(&self, input: UpdateCastMemberInput) -> Result<CastMemberOutput, CoreError> {
        let id: CastMemberId = parse_input_id(&input.id)?;
        validate_input(&input)?;

        let mut member = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CoreError::not_found(CastMember::NAME, id))?;

        if let Some(name) = input.name {
            member.change_name(name);
        }
        if let Some(cast_member_type) = input.cast_member_type {
            member.change_type(cast_member_type);
        }

        if member.notification().has_errors() {
            return Err(CoreError::EntityValidation(member.notification().clone()));
        }

        self.repo.update(&member).await?;
        Ok(CastMemberOutput::from(&member))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCastMemberInput {
    pub id: String,
}

pub struct DeleteCastMemberUseCase {
    repo: Arc<dyn CastMemberRepository>,
}

impl DeleteCastMemberUseCase {
    pub fn new(repo: Arc<dyn CastMemberRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for DeleteCastMemberUseCase {
    type Input = DeleteCastMemberInput;
    type Output = ();

    async fn execute(&self, input: DeleteCastMemberInput) -> Result<(), CoreError> {
        let id: CastMemberId = parse_input_id(&input.id)?;
        self.repo.delete(&id).await
    }
}
