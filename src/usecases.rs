use uuid::Uuid;

use crate::balance::Balances;
use crate::dto::{CreateGroupRequest, CreateMemberRequest, NewExpense};
use crate::error::UseCaseError;
use crate::repository::GroupRepository;
use crate::schemas::{Expense, Group, Member};

async fn load_group(
    repository: &dyn GroupRepository,
    group_id: &str,
) -> Result<Group, UseCaseError> {
    repository
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| UseCaseError::GroupNotFound(group_id.to_string()))
}

pub async fn create_group(
    repository: &dyn GroupRepository,
    request: CreateGroupRequest,
) -> Result<Group, UseCaseError> {
    let mut group = Group::new(Uuid::new_v4().to_string(), request.name);
    for member in request.members {
        group.add_member(Member {
            id: member.id,
            name: member.name,
        })?;
    }
    repository.save(&group).await?;
    tracing::info!(group_id = group.id(), "group created");
    Ok(group)
}

pub async fn add_member(
    repository: &dyn GroupRepository,
    group_id: &str,
    request: CreateMemberRequest,
) -> Result<Group, UseCaseError> {
    let mut group = load_group(repository, group_id).await?;
    group.add_member(Member {
        id: request.id,
        name: request.name,
    })?;
    repository.save(&group).await?;
    Ok(group)
}

pub async fn add_expense(
    repository: &dyn GroupRepository,
    group_id: &str,
    expense: NewExpense,
) -> Result<Group, UseCaseError> {
    let mut group = load_group(repository, group_id).await?;
    group.add_expense(Expense {
        id: Uuid::new_v4().to_string(),
        name: expense.name,
        amount_in_cents: expense.amount_in_cents,
        payer_id: expense.payer_id,
        participants: expense.participants,
    })?;
    repository.save(&group).await?;
    Ok(group)
}

pub async fn get_group(
    repository: &dyn GroupRepository,
    group_id: &str,
) -> Result<Group, UseCaseError> {
    load_group(repository, group_id).await
}

pub async fn get_balances(
    repository: &dyn GroupRepository,
    group_id: &str,
) -> Result<(Group, Balances), UseCaseError> {
    let group = load_group(repository, group_id).await?;
    let balances = group.balances();
    Ok((group, balances))
}

pub async fn delete_group(
    repository: &dyn GroupRepository,
    group_id: &str,
) -> Result<bool, UseCaseError> {
    let deleted = repository.delete(group_id).await?;
    if deleted {
        tracing::info!(group_id, "group deleted");
    }
    Ok(deleted)
}
