use crate::domain::models::ledger::LedgerTotals;
use crate::domain::models::user::User as DomainUser;
use shared::{AdminUserSummary, AuthResponse, User};

pub struct UserMapper;

impl UserMapper {
    /// Public shape: the credential hash never crosses this boundary.
    pub fn to_dto(user: DomainUser) -> User {
        User {
            id: user.id,
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }

    pub fn to_auth_response(user: DomainUser, token: String) -> AuthResponse {
        AuthResponse {
            user: Self::to_dto(user),
            token,
        }
    }

    pub fn to_admin_summary(user: DomainUser, totals: LedgerTotals) -> AdminUserSummary {
        AdminUserSummary {
            id: user.id,
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
            created_at: user.created_at,
            total_earned: totals.total_earned,
            total_spent: totals.total_spent,
        }
    }
}
