use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{bson::doc, options::ReplaceOptions, Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;
use crate::schemas::{Expense, Group, Member};

/// Storage boundary for whole-aggregate snapshots. `save` is an idempotent
/// upsert of the full group state; there is no partial update of members or
/// expenses.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, RepositoryError>;
    async fn save(&self, group: &Group) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
}

const COLLECTION: &str = "Groups";

#[derive(Debug, Deserialize, Serialize)]
struct MemberDocument {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct ExpenseDocument {
    id: String,
    name: String,
    amount_in_cents: i64,
    payer_id: String,
    participants: Vec<String>,
}

/// One document per group: the group metadata plus its member and expense
/// records, i.e. the whole partition for that group id.
#[derive(Debug, Deserialize, Serialize)]
struct GroupDocument {
    id: String,
    name: String,
    members: Vec<MemberDocument>,
    expenses: Vec<ExpenseDocument>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl GroupDocument {
    fn from_group(group: &Group, timestamp: DateTime<Utc>) -> Self {
        GroupDocument {
            id: group.id().to_string(),
            name: group.name.clone(),
            members: group
                .members()
                .iter()
                .map(|member| MemberDocument {
                    id: member.id.clone(),
                    name: member.name.clone(),
                })
                .collect(),
            expenses: group
                .expenses()
                .iter()
                .map(|expense| ExpenseDocument {
                    id: expense.id.clone(),
                    name: expense.name.clone(),
                    amount_in_cents: expense.amount_in_cents,
                    payer_id: expense.payer_id.clone(),
                    participants: expense.participants.clone(),
                })
                .collect(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    fn into_group(self) -> Group {
        let members = self
            .members
            .into_iter()
            .map(|member| Member {
                id: member.id,
                name: member.name,
            })
            .collect();
        let expenses = self
            .expenses
            .into_iter()
            .map(|expense| Expense {
                id: expense.id,
                name: expense.name,
                amount_in_cents: expense.amount_in_cents,
                payer_id: expense.payer_id,
                participants: expense.participants,
            })
            .collect();
        Group::from_parts(self.id, self.name, members, expenses)
    }
}

pub struct MongoGroupRepository {
    groups: Collection<GroupDocument>,
}

impl MongoGroupRepository {
    pub fn new(client: &Client, database_name: &str) -> Self {
        MongoGroupRepository {
            groups: client.database(database_name).collection(COLLECTION),
        }
    }
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, RepositoryError> {
        let document = self.groups.find_one(doc! { "id": id }, None).await?;
        Ok(document.map(GroupDocument::into_group))
    }

    async fn save(&self, group: &Group) -> Result<(), RepositoryError> {
        let document = GroupDocument::from_group(group, Utc::now());
        self.groups
            .replace_one(
                doc! { "id": group.id() },
                &document,
                ReplaceOptions::builder().upsert(true).build(),
            )
            .await?;
        tracing::debug!(group_id = group.id(), "group saved");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = self.groups.delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
