//! Credential model -> entity mapper

use auth_core::entities::CredentialRecord;

use crate::models::CredentialModel;

/// Rows come from a table that already enforces non-empty fields,
/// so no validation is repeated here.
impl From<CredentialModel> for CredentialRecord {
    fn from(model: CredentialModel) -> Self {
        CredentialRecord {
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
