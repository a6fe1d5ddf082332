pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod http;
pub mod ranking;
pub mod repository;
pub mod scheduler;
pub mod services;
pub mod store;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cache::Cache;
use crate::cli::{AttendanceCommand, Cli, Command, MemberCommand, RankingArgs, RecordArgs};
use crate::config::settings::AppConfig;
use crate::domain::{
    AttendanceDocument, DateRange, MatchesDocument, MembersDocument, RankingPeriod,
    SessionContext,
};
use crate::repository::{attendance, members};
use crate::services::{
    parse_score, AttendanceService, LeaderboardService, MatchdayService, RosterService,
};
use crate::store::{open_store, Store};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

/// Runs one command against the configured store.
pub fn handle_command(command: &Command, session: &SessionContext) -> Result<()> {
    let config = AppConfig::new();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let store = open_store(&config.store)?;
        dispatch(command, &store, &config, session).await
    })
}

async fn dispatch(
    command: &Command,
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    match command {
        Command::Member(sub) => handle_member(sub, store, session).await,
        Command::Attendance(sub) => handle_attendance(sub, store, config, session).await,
        Command::Schedule { seed } => handle_schedule(*seed, store, config, session).await,
        Command::Scores { scores } => handle_scores(scores, store, config, session).await,
        Command::Record(args) => handle_record(args, store, config, session).await,
        Command::Matches => handle_matches(store, config, session).await,
        Command::DeleteMatch { id } => handle_delete_match(id, store, config, session).await,
        Command::Rankings(args) => handle_rankings(args, store, session).await,
        Command::Reset { yes } => handle_reset(*yes, store).await,
        Command::Completions { shell } => handle_completions(*shell),
    }
}

async fn handle_member(command: &MemberCommand, store: &Store, session: &SessionContext) -> Result<()> {
    let service = RosterService::new(store, session);
    match command {
        MemberCommand::Add { name, phone } => {
            let member = service.register(name, phone.as_deref()).await?;
            println!("Registered {} as {}", member.name, member.id);
        }
        MemberCommand::Edit { id, name, phone } => {
            let member = service.edit(id, name.as_deref(), phone.as_deref()).await?;
            println!("Updated {} ({})", member.name, member.id);
        }
        MemberCommand::Remove { id } => {
            let member = service.remove(id).await?;
            println!("Removed {} ({})", member.name, member.id);
        }
        MemberCommand::List => display::print_members(&service.list().await),
    }
    Ok(())
}

async fn handle_attendance(
    command: &AttendanceCommand,
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    let service = AttendanceService::new(store, &config.club);
    let date = session.selected_date;
    match command {
        AttendanceCommand::Save { member_ids } => {
            let saved = service.record(date, member_ids).await?;
            println!("Attendance for {}: {} members", date, saved.member_ids.len());
            display::print_sync(saved.status);
        }
        AttendanceCommand::Show => {
            display::print_attendees(date, &service.attendees(date).await)
        }
        AttendanceCommand::Stats => display::print_monthly(&service.monthly_stats(date).await),
    }
    Ok(())
}

async fn handle_schedule(
    seed: Option<u64>,
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    let drafts = Cache::new(&config.store.data_dir)?;
    let service = MatchdayService::new(store, &config.club, session, &drafts);

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let draft = service.plan(&mut rng).await?;
    info!("Draft saved for {}", draft.date);

    let roster = members::load_all(store).await;
    let attendee_ids = attendance::attendees_on(store, session.selected_date).await;
    display::print_draft(&draft, &attendee_ids, &roster);
    Ok(())
}

async fn handle_scores(
    scores: &[String],
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    let parsed = scores
        .iter()
        .map(|s| parse_score(s))
        .collect::<Result<Vec<_>>>()?;

    let drafts = Cache::new(&config.store.data_dir)?;
    let service = MatchdayService::new(store, &config.club, session, &drafts);
    let outcome = service.record_scores(&parsed).await?;
    display::print_saved_scores(&outcome);
    Ok(())
}

async fn handle_record(
    args: &RecordArgs,
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    let (team1, team2) = match (args.team1.as_slice(), args.team2.as_slice()) {
        ([a, b], [c, d]) => ([a.clone(), b.clone()], [c.clone(), d.clone()]),
        _ => bail!("Each team needs exactly two players"),
    };
    let Some((score1, score2)) = parse_score(&args.score)? else {
        bail!("A score is required to record a match");
    };

    let drafts = Cache::new(&config.store.data_dir)?;
    let service = MatchdayService::new(store, &config.club, session, &drafts);
    let game = service.record_manual(team1, team2, score1, score2).await?;
    println!("Recorded {} ({}:{}, {})", game.id, game.score1, game.score2, game.winner.as_str());
    Ok(())
}

async fn handle_matches(store: &Store, config: &AppConfig, session: &SessionContext) -> Result<()> {
    let drafts = Cache::new(&config.store.data_dir)?;
    let service = MatchdayService::new(store, &config.club, session, &drafts);
    let roster = members::load_all(store).await;
    display::print_results(&service.results().await, &roster);
    Ok(())
}

async fn handle_delete_match(
    id: &str,
    store: &Store,
    config: &AppConfig,
    session: &SessionContext,
) -> Result<()> {
    let drafts = Cache::new(&config.store.data_dir)?;
    let service = MatchdayService::new(store, &config.club, session, &drafts);
    let game = service.delete(id).await?;
    println!("Deleted match {} from {}", game.id, game.date);
    Ok(())
}

async fn handle_rankings(args: &RankingArgs, store: &Store, session: &SessionContext) -> Result<()> {
    let range = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            if from > to {
                bail!("--from {} is after --to {}", from, to);
            }
            DateRange::new(from, to)
        }
        _ => RankingPeriod::from(args.period).range_for(session.selected_date),
    };

    let rankings = LeaderboardService::new(store).rankings(range).await;
    display::print_rankings(range, &rankings);
    Ok(())
}

async fn handle_reset(confirmed: bool, store: &Store) -> Result<()> {
    if !confirmed {
        bail!("Refusing to erase all data without --yes");
    }

    repository::save(store, &MembersDocument::default()).await?;
    repository::save(store, &AttendanceDocument::default()).await?;
    let status = repository::save(store, &MatchesDocument::default()).await?;
    info!("All collections reset");
    display::print_sync(status);
    Ok(())
}
