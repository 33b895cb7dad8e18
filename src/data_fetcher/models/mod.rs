pub mod detail;
pub mod history;

pub use detail::{
    GraphQlError, GraphQlResponse, MatchPlayerRecord, MatchQueryData, OpenDotaMatch,
    OpenDotaMatchPlayer, StratzMatch,
};
pub use history::MatchSummary;
