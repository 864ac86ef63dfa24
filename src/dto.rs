use serde::{Deserialize, Serialize};

use crate::balance::Balances;
use crate::currency::{from_cents, to_cents, CurrencyCode};
use crate::error::ValidationError;
use crate::schemas::Group;

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub id: String,
    pub name: String,
}

impl CreateMemberRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("member id", &self.id)?;
        require("member name", &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub members: Vec<CreateMemberRequest>,
}

impl CreateGroupRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("group name", &self.name)?;
        for member in &self.members {
            member.validate()?;
        }
        Ok(())
    }
}

/// Expense payload. Clients either send `amountInCents` directly or the
/// older `amount` (currency units) plus `currencyCode` pair, which is
/// converted on the way in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub name: String,
    #[serde(default)]
    pub amount_in_cents: Option<i64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency_code: Option<String>,
    pub payer_id: String,
    pub participants: Vec<String>,
}

/// A checked expense payload with the amount resolved to cents. The only way
/// to get one is through `CreateExpenseRequest::validate`.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub amount_in_cents: i64,
    pub payer_id: String,
    pub participants: Vec<String>,
}

impl CreateExpenseRequest {
    pub fn validate(self) -> Result<NewExpense, ValidationError> {
        require("expense name", &self.name)?;
        require("payerId", &self.payer_id)?;
        if self.participants.is_empty() {
            return Err(ValidationError::new("participants must not be empty"));
        }
        for participant in &self.participants {
            require("participant id", participant)?;
        }

        let amount_in_cents = match (self.amount_in_cents, self.amount) {
            (Some(cents), None) => cents,
            (None, Some(units)) => {
                let currency = match &self.currency_code {
                    None => CurrencyCode::Usd,
                    Some(code) => code
                        .parse()
                        .map_err(|err: crate::currency::UnsupportedCurrency| {
                            ValidationError::new(err.to_string())
                        })?,
                };
                to_cents(units, currency)
            }
            (Some(_), Some(_)) => {
                return Err(ValidationError::new(
                    "amount and amountInCents are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(ValidationError::new(
                    "either amount or amountInCents is required",
                ))
            }
        };
        if amount_in_cents < 1 {
            return Err(ValidationError::new("amountInCents must be at least 1"));
        }

        Ok(NewExpense {
            name: self.name,
            amount_in_cents,
            payer_id: self.payer_id,
            participants: self.participants,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesQuery {
    pub currency: Option<String>,
}

impl BalancesQuery {
    pub fn currency_code(&self) -> Result<CurrencyCode, ValidationError> {
        match &self.currency {
            None => Ok(CurrencyCode::Usd),
            Some(code) => code
                .parse()
                .map_err(|err: crate::currency::UnsupportedCurrency| {
                    ValidationError::new(err.to_string())
                }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: String,
    pub name: String,
    pub amount_in_cents: i64,
    pub payer_id: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub members: Vec<MemberResponse>,
    pub expenses: Vec<ExpenseResponse>,
}

impl GroupResponse {
    pub fn from_group(group: &Group) -> Self {
        GroupResponse {
            id: group.id().to_string(),
            name: group.name.clone(),
            members: group
                .members()
                .iter()
                .map(|member| MemberResponse {
                    id: member.id.clone(),
                    name: member.name.clone(),
                })
                .collect(),
            expenses: group
                .expenses()
                .iter()
                .map(|expense| ExpenseResponse {
                    id: expense.id.clone(),
                    name: expense.name.clone(),
                    amount_in_cents: expense.amount_in_cents,
                    payer_id: expense.payer_id.clone(),
                    participants: expense.participants.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub member_id: String,
    pub member_name: String,
    pub amount_in_cents: i64,
    pub amount: f64,
    pub currency_code: CurrencyCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalancesResponse {
    pub group_id: String,
    pub balances: Vec<BalanceEntry>,
}

impl GroupBalancesResponse {
    /// Entries follow member insertion order so responses are stable across
    /// calls.
    pub fn from_balances(group: &Group, balances: &Balances, currency: CurrencyCode) -> Self {
        let entries = group
            .members()
            .iter()
            .map(|member| {
                let cents = balances.get(&member.id).copied().unwrap_or(0);
                BalanceEntry {
                    member_id: member.id.clone(),
                    member_name: member.name.clone(),
                    amount_in_cents: cents,
                    amount: from_cents(cents, currency),
                    currency_code: currency,
                }
            })
            .collect();
        GroupBalancesResponse {
            group_id: group.id().to_string(),
            balances: entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Expense, Member};

    fn expense_request() -> CreateExpenseRequest {
        CreateExpenseRequest {
            name: "Dinner".to_string(),
            amount_in_cents: Some(5000),
            amount: None,
            currency_code: None,
            payer_id: "m1".to_string(),
            participants: vec!["m1".to_string(), "m2".to_string()],
        }
    }

    #[test]
    fn group_request_accepts_empty_member_list() {
        let request: CreateGroupRequest = serde_json::from_str(r#"{"name": "Trip"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.members.is_empty());
    }

    #[test]
    fn group_request_rejects_blank_names() {
        let request = CreateGroupRequest {
            name: "  ".to_string(),
            members: vec![],
        };
        assert!(request.validate().is_err());

        let request = CreateGroupRequest {
            name: "Trip".to_string(),
            members: vec![CreateMemberRequest {
                id: "m1".to_string(),
                name: String::new(),
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn expense_request_requires_a_positive_amount() {
        let expense = expense_request().validate().unwrap();
        assert_eq!(expense.amount_in_cents, 5000);

        let mut request = expense_request();
        request.amount_in_cents = Some(0);
        assert!(request.clone().validate().is_err());
        request.amount_in_cents = Some(-100);
        assert!(request.validate().is_err());
    }

    #[test]
    fn expense_request_accepts_currency_units() {
        let mut request = expense_request();
        request.amount_in_cents = None;
        request.amount = Some(50.0);
        request.currency_code = Some("BRL".to_string());
        let expense = request.validate().unwrap();
        assert_eq!(expense.amount_in_cents, 5000);
    }

    #[test]
    fn expense_request_needs_exactly_one_amount_shape() {
        let mut request = expense_request();
        request.amount = Some(50.0);
        assert!(request.clone().validate().is_err());
        request.amount_in_cents = None;
        request.amount = None;
        assert!(request.clone().validate().is_err());
        request.amount = Some(12.0);
        request.currency_code = Some("JPY".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn expense_request_requires_participants() {
        let mut request = expense_request();
        request.participants.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn balances_query_defaults_to_usd() {
        assert_eq!(
            BalancesQuery { currency: None }.currency_code(),
            Ok(CurrencyCode::Usd)
        );
        assert_eq!(
            BalancesQuery {
                currency: Some("BRL".to_string())
            }
            .currency_code(),
            Ok(CurrencyCode::Brl)
        );
        assert!(BalancesQuery {
            currency: Some("JPY".to_string())
        }
        .currency_code()
        .is_err());
    }

    #[test]
    fn balances_response_follows_member_order() {
        let mut group = Group::new("g1".to_string(), "Trip".to_string());
        for (id, name) in [("m1", "Alice"), ("m2", "Bob"), ("m3", "Carol")] {
            group
                .add_member(Member {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .unwrap();
        }
        group
            .add_expense(Expense {
                id: "e1".to_string(),
                name: "Dinner".to_string(),
                amount_in_cents: 100,
                payer_id: "m1".to_string(),
                participants: vec!["m1".into(), "m2".into(), "m3".into()],
            })
            .unwrap();

        let response =
            GroupBalancesResponse::from_balances(&group, &group.balances(), CurrencyCode::Usd);
        let ids: Vec<_> = response
            .balances
            .iter()
            .map(|entry| entry.member_id.as_str())
            .collect();
        assert_eq!(ids, ["m1", "m2", "m3"]);
        assert_eq!(response.balances[0].amount_in_cents, 66);
        assert_eq!(response.balances[0].amount, 0.66);
        assert_eq!(response.balances[1].member_name, "Bob");
    }

    #[test]
    fn responses_serialize_as_camel_case() {
        let mut group = Group::new("g1".to_string(), "Trip".to_string());
        group
            .add_member(Member {
                id: "m1".to_string(),
                name: "Alice".to_string(),
            })
            .unwrap();
        group
            .add_expense(Expense {
                id: "e1".to_string(),
                name: "Taxi".to_string(),
                amount_in_cents: 900,
                payer_id: "m1".to_string(),
                participants: vec!["m1".to_string()],
            })
            .unwrap();

        let json = serde_json::to_value(GroupResponse::from_group(&group)).unwrap();
        assert_eq!(json["expenses"][0]["amountInCents"], 900);
        assert_eq!(json["expenses"][0]["payerId"], "m1");

        let json = serde_json::to_value(GroupBalancesResponse::from_balances(
            &group,
            &group.balances(),
            CurrencyCode::Usd,
        ))
        .unwrap();
        assert_eq!(json["groupId"], "g1");
        assert_eq!(json["balances"][0]["memberId"], "m1");
        assert_eq!(json["balances"][0]["currencyCode"], "USD");
    }
}
