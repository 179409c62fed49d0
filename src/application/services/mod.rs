pub mod notification_manager;
pub mod query_client;
pub mod reminder_clock;

pub use notification_manager::NotificationManager;
pub use query_client::{
    Mutation, MutationOutcome, Query, QueryClient, QueryData, QueryKey, plan_refetch,
};
pub use reminder_clock::{ReminderClock, TimeInputError};
