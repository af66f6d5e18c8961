pub mod note;
pub mod session;
pub mod chat;
pub mod plan;
pub mod study;
pub mod view;
pub mod clock;

pub use note::{normalize_tag, Note};
pub use session::SessionLog;
pub use chat::{ChatMessage, GroundingSource, Sender};
pub use plan::{StudyDay, StudyPlan, StudyTask, TaskType};
pub use study::{Difficulty, Flashcard, GenerationOptions, QuizQuestion};
pub use view::View;
pub use clock::{Clock, FixedClock, SystemClock};
