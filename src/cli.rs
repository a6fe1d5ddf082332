use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::{RankingPeriod, SessionContext};

#[derive(Parser, Debug)]
#[command(author, version, about = "Seocho tennis club manager")]
pub struct Cli {
    /// Session date (YYYY-MM-DD), defaults to today
    #[arg(short, long, global = true)]
    pub date: Option<NaiveDate>,

    /// Name of the person using the app, stored with recorded matches
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn session(&self) -> SessionContext {
        match self.date {
            Some(date) => SessionContext::new(self.user.clone(), date),
            None => SessionContext::today(self.user.clone()),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Manage the member roster
    #[clap(subcommand)]
    Member(MemberCommand),
    /// Record or inspect session attendance
    #[clap(subcommand)]
    Attendance(AttendanceCommand),
    /// Draw doubles matches for the session date's attendees
    Schedule {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Enter scores for the drawn matches in order, e.g. `6:4 - 5:5`
    Scores {
        #[arg(required = true, allow_hyphen_values = true)]
        scores: Vec<String>,
    },
    /// Record a match outside the drawn schedule
    Record(RecordArgs),
    /// List match results of the session date
    Matches,
    /// Delete a match result
    DeleteMatch { id: String },
    /// Show the points leaderboard
    Rankings(RankingArgs),
    /// Erase all members, attendance and matches
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MemberCommand {
    /// Register a new member
    Add {
        name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change a member's name or phone
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a member
    Remove { id: String },
    /// List all members
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AttendanceCommand {
    /// Save the attendees of the session date (replaces earlier records)
    Save {
        #[arg(required = true)]
        member_ids: Vec<String>,
    },
    /// Show the attendees of the session date
    Show,
    /// Attendance rates for the month of the session date
    Stats,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RecordArgs {
    #[arg(long, num_args = 2, required = true)]
    pub team1: Vec<String>,
    #[arg(long, num_args = 2, required = true)]
    pub team2: Vec<String>,
    /// Final score, team1 first, e.g. 6:4
    #[arg(long)]
    pub score: String,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RankingArgs {
    #[arg(short, long, value_enum, default_value_t = PeriodArg::Weekly)]
    pub period: PeriodArg,
    /// Start of a custom range; overrides --period
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// End of a custom range (inclusive)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<PeriodArg> for RankingPeriod {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Daily => RankingPeriod::Daily,
            PeriodArg::Weekly => RankingPeriod::Weekly,
            PeriodArg::Monthly => RankingPeriod::Monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_date_builds_session() {
        let cli = Cli::parse_from(["tennis-club", "--date", "2025-03-06", "-u", "Kim", "matches"]);
        let session = cli.session();

        assert_eq!(session.selected_date, NaiveDate::from_ymd_opt(2025, 3, 6).unwrap());
        assert_eq!(session.user(), Some("Kim"));
        assert_eq!(cli.command, Command::Matches);
    }

    #[test]
    fn test_scores_accept_skip_marker() {
        let cli = Cli::parse_from(["tennis-club", "scores", "6:4", "-", "5:5"]);
        assert_eq!(
            cli.command,
            Command::Scores {
                scores: vec!["6:4".into(), "-".into(), "5:5".into()]
            }
        );
    }

    #[test]
    fn test_record_takes_two_players_per_team() {
        let cli = Cli::parse_from([
            "tennis-club", "record", "--team1", "a", "b", "--team2", "c", "d", "--score", "6:2",
        ]);
        match cli.command {
            Command::Record(args) => {
                assert_eq!(args.team1, vec!["a", "b"]);
                assert_eq!(args.team2, vec!["c", "d"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
