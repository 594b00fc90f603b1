//! Form-instance plumbing: modes, render context, submissions, session

mod context;
mod datetime;
mod session;
mod submission;

pub use context::{Mode, RenderContext, WidgetId};
pub use datetime::{combine_date_and_time, start_of_day, with_time_of_day};
pub use session::{FormSession, SubmitOutcome};
pub use submission::{FieldError, Parameters, Submission};
