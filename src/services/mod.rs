pub mod attendance;
pub mod leaderboard;
pub mod matchday;
pub mod roster;

pub use attendance::{AttendanceService, AttendanceStat, MonthlyAttendance, SavedAttendance};
pub use leaderboard::LeaderboardService;
pub use matchday::{parse_score, MatchDraft, MatchdayService, SavedScores};
pub use roster::RosterService;
