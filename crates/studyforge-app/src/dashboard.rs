use studyforge_types::{Note, SessionLog};

const RECENT_NOTES: usize = 3;

/// Dashboard shortcut that switches view and does something on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    NewNote,
    NewSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_notes: usize,
    pub sessions: usize,
    pub total_minutes: u32,
    /// First notes of the collection
    pub recent_notes: Vec<Note>,
}

impl DashboardStats {
    pub fn collect(notes: &[Note], logs: &[SessionLog]) -> Self {
        Self {
            total_notes: notes.len(),
            sessions: logs.len(),
            total_minutes: logs.iter().map(|l| l.duration).sum(),
            recent_notes: notes.iter().take(RECENT_NOTES).cloned().collect(),
        }
    }
}
