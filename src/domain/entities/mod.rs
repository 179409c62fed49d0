//! Domain entity definitions.

mod application;
mod company;
mod id;
mod note;
mod profile;
mod reminder;
mod session;
mod stats;
mod token;
mod user;

pub use application::{Application, ApplicationStatus, CompanyRef, UnknownStatus};
pub use company::Company;
pub use id::{ApplicationId, CompanyId, NoteId, ReminderId, UserId};
pub use note::Note;
pub use profile::UserProfile;
pub use reminder::{Reminder, ReminderStatus};
pub use session::Session;
pub use stats::{StatusSlice, TimelinePoint};
pub use token::AuthToken;
pub use user::User;
