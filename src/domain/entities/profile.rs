//! User profile entity.

/// Editable profile of the signed-in user.
///
/// `email` is fixed at account creation; it is sent back unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// `LinkedIn` profile URL.
    pub linkedin: String,
    /// Career goal statement.
    pub career_goal: String,
}
