use crate::error::DomainError;

pub type GroupId = String;
pub type MemberId = String;
pub type ExpenseId = String;

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount_in_cents: i64,
    pub payer_id: MemberId,
    pub participants: Vec<MemberId>,
}

/// Aggregate root for a trip. Members and expenses only grow, and only
/// through `add_member`/`add_expense`, so the invariants checked there hold
/// for every group that exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    id: GroupId,
    pub name: String,
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl Group {
    pub fn new(id: GroupId, name: String) -> Self {
        Group {
            id,
            name,
            members: vec![],
            expenses: vec![],
        }
    }

    /// Rebuilds a group from stored state. Only the repository layer should
    /// need this; the lists are trusted to have passed the invariant checks
    /// when they were first written.
    pub fn from_parts(
        id: GroupId,
        name: String,
        members: Vec<Member>,
        expenses: Vec<Expense>,
    ) -> Self {
        Group {
            id,
            name,
            members,
            expenses,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    fn is_member(&self, id: &str) -> bool {
        self.members.iter().any(|member| member.id == id)
    }

    pub fn add_member(&mut self, member: Member) -> Result<(), DomainError> {
        if self.is_member(&member.id) {
            return Err(DomainError::MemberAlreadyExists(member.id));
        }
        self.members.push(member);
        Ok(())
    }

    /// The payer is checked before the participants, and participants are
    /// checked in list order, so the reported id is deterministic. Nothing is
    /// appended unless every check passes.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), DomainError> {
        if !self.is_member(&expense.payer_id) {
            return Err(DomainError::PayerNotMember(expense.payer_id));
        }
        if expense.participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        if let Some(unknown) = expense
            .participants
            .iter()
            .find(|participant| !self.is_member(participant))
        {
            return Err(DomainError::ParticipantNotMember(unknown.clone()));
        }
        self.expenses.push(expense);
        Ok(())
    }

    pub fn balances(&self) -> std::collections::HashMap<MemberId, i64> {
        crate::balance::compute_balances(self)
    }
}
