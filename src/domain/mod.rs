pub mod collection;
pub mod ids;
pub mod models;
pub mod period;
pub mod session;

pub use collection::{
    AttendanceDocument, Collection, CollectionDocument, MatchesDocument, MembersDocument,
};
pub use ids::generate_id;
pub use models::{
    AttendanceRecord, Match, MatchId, Member, MemberId, RankingEntry, ScheduledMatch, Winner,
};
pub use period::{DateRange, RankingPeriod};
pub use session::SessionContext;
