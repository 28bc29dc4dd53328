// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service operations.
//!
//! Each operation loads what it needs from the store, runs the engine and
//! writes back only players whose licenses changed.

use std::collections::HashSet;

use bishl_licensing::{ClassificationStats, LicensingEngine, LicensingOutcome};
use bishl_licensing_audit::{PlayerChangeSet, Trigger};
use bishl_licensing_domain::Player;
use bishl_licensing_persistence::{Persistence, PersistenceError};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{
    BootstrapOptions, BootstrapSummary, ImportOptions, ImportSummary, IshdRoster,
    IshdRosterPlayer, PlayerLicensingResponse, RejectedPlayer, RosterAction,
};
use crate::roster::{self, Identity};

fn response(outcome: LicensingOutcome, persisted: bool) -> PlayerLicensingResponse {
    PlayerLicensingResponse {
        player: outcome.player,
        report: outcome.report,
        persisted,
    }
}

fn require_batch_size(batch_size: usize) -> Result<(), ApiError> {
    if batch_size == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("batch_size"),
            message: String::from("Batch size must be at least 1"),
        });
    }
    Ok(())
}

/// Classifies and validates a submitted player document without storing it.
///
/// # Errors
///
/// Returns `InvalidInput` if the document fails input validation.
pub fn check_player(
    engine: &LicensingEngine,
    player: &Player,
) -> Result<PlayerLicensingResponse, ApiError> {
    let outcome = engine.process(player, Trigger::Revalidation)?;
    Ok(response(outcome, false))
}

/// Re-runs classification and validation for one stored player.
///
/// The player is written back only when a license changed.
///
/// # Errors
///
/// Returns `PlayerNotFound` if no player has this id, `InvalidInput` if the
/// stored document fails input validation, or a persistence error.
pub fn revalidate_player(
    persistence: &mut Persistence,
    engine: &LicensingEngine,
    player_id: &str,
) -> Result<PlayerLicensingResponse, ApiError> {
    let player = persistence
        .get_player(player_id)?
        .ok_or_else(|| ApiError::PlayerNotFound(player_id.to_string()))?;

    let outcome = engine.process(&player, Trigger::Revalidation)?;
    let persisted = outcome.is_modified();
    if persisted {
        persistence.save_licensing_result(&outcome.player, &outcome.changes)?;
    }

    Ok(response(outcome, persisted))
}

/// Reclassifies and revalidates every stored player.
///
/// Players are loaded in id order, one page of `batch_size` at a time.
/// A player whose stored document fails input validation is reported and
/// skipped; it does not stop the run.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero batch size, or a persistence error.
pub fn bootstrap_all_players(
    persistence: &mut Persistence,
    engine: &LicensingEngine,
    options: BootstrapOptions,
) -> Result<BootstrapSummary, ApiError> {
    require_batch_size(options.batch_size)?;
    info!(batch_size = options.batch_size, "Starting license bootstrap");

    let mut summary = BootstrapSummary::default();
    let mut after: Option<String> = None;

    loop {
        let page = persistence.load_players_page(after.as_deref(), options.batch_size)?;
        let page_len = page.len();

        for player in &page {
            summary.processed += 1;
            match engine.process(player, Trigger::Bootstrap) {
                Ok(outcome) if outcome.is_modified() => {
                    persistence.save_licensing_result(&outcome.player, &outcome.changes)?;
                    summary.modified += 1;
                    summary.modified_ids.push(player.id.clone());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(player_id = %player.id, error = %e, "Skipping player");
                    summary.rejected.push(RejectedPlayer {
                        player_id: player.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            page_len,
            processed = summary.processed,
            modified = summary.modified,
            "Bootstrap page done"
        );

        match page.last() {
            Some(last) if page_len == options.batch_size => after = Some(last.id.clone()),
            _ => break,
        }
    }

    info!(
        processed = summary.processed,
        modified = summary.modified,
        rejected = summary.rejected.len(),
        "License bootstrap finished"
    );
    Ok(summary)
}

/// Totals of stored licenses by type and status.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero batch size, or a persistence error.
pub fn classification_stats(
    persistence: &mut Persistence,
    batch_size: usize,
) -> Result<ClassificationStats, ApiError> {
    require_batch_size(batch_size)?;

    let mut stats = ClassificationStats::default();
    let mut after: Option<String> = None;
    loop {
        let page = persistence.load_players_page(after.as_deref(), batch_size)?;
        for player in &page {
            stats.record(player);
        }
        match page.last() {
            Some(last) if page.len() == batch_size => after = Some(last.id.clone()),
            _ => break,
        }
    }
    Ok(stats)
}

enum Synced {
    Stored,
    Rejected(String),
}

/// One roster sync in progress.
struct RosterSync<'a> {
    persistence: &'a mut Persistence,
    engine: &'a LicensingEngine,
    dry_run: bool,
    summary: ImportSummary,
}

impl RosterSync<'_> {
    /// Runs the engine over a merged document and stores the result.
    ///
    /// `stored` is the player as it was before the sync touched it; the
    /// change set is taken against it so the log shows what the sync did
    /// overall.
    fn store(&mut self, stored: &Player, merged: &Player) -> Result<Synced, ApiError> {
        let outcome = match self.engine.process(merged, Trigger::RosterImport) {
            Ok(outcome) => outcome,
            Err(e) => return Ok(Synced::Rejected(e.to_string())),
        };
        if !self.dry_run {
            let changes = PlayerChangeSet::diff(Trigger::RosterImport, stored, &outcome.player);
            self.persistence.save_licensing_result(&outcome.player, &changes)?;
        }
        Ok(Synced::Stored)
    }

    /// Runs the engine over a player the sync creates and inserts it.
    ///
    /// Ids are derived from names, so two roster spellings the identity
    /// match tells apart can still collide. The later one is rejected.
    fn insert(&mut self, player: &Player) -> Result<Synced, ApiError> {
        let outcome = match self.engine.process(player, Trigger::RosterImport) {
            Ok(outcome) => outcome,
            Err(e) => return Ok(Synced::Rejected(e.to_string())),
        };
        if self.dry_run {
            return Ok(Synced::Stored);
        }

        let unassigned = Player {
            assigned_teams: Vec::new(),
            ..player.clone()
        };
        let changes = PlayerChangeSet::diff(Trigger::RosterImport, &unassigned, &outcome.player);
        match self
            .persistence
            .insert_licensed_player(&outcome.player, &changes)
        {
            Ok(()) => Ok(Synced::Stored),
            Err(PersistenceError::PlayerAlreadyExists(id)) => {
                warn!(player_id = %id, "Roster player id already taken");
                Ok(Synced::Rejected(format!(
                    "Player id {id} is already taken by another player"
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn log(&mut self, player: &Player, action: RosterAction, synced: Synced) {
        match synced {
            Synced::Stored => self.summary.log(player, action, None),
            Synced::Rejected(reason) => {
                self.summary.log(player, RosterAction::Rejected, Some(reason));
            }
        }
    }

    fn sync_entry(
        &mut self,
        roster: &IshdRoster,
        entry: &IshdRosterPlayer,
    ) -> Result<(), ApiError> {
        let found = self.persistence.find_by_identity(
            &entry.first_name,
            &entry.last_name,
            entry.date_of_birth,
        )?;
        let Some(stored) = found else {
            let player = roster::new_player(roster, entry);
            let synced = self.insert(&player)?;
            self.log(&player, RosterAction::AddPlayer, synced);
            return Ok(());
        };

        if !stored.managed_by_ishd {
            self.summary.log(&stored, RosterAction::SkippedUnmanaged, None);
            return Ok(());
        }

        let mut merged = stored.clone();
        let assignment = roster::ishd_assignment(&roster.team, entry);
        if let Some(action) = roster::merge_entry(&mut merged, &roster.club, assignment) {
            let synced = self.store(&stored, &merged)?;
            self.log(&stored, action, synced);
        }
        Ok(())
    }

    /// Removes the team's federation assignment from players not on the
    /// roster.
    fn withdraw_departed(
        &mut self,
        roster: &IshdRoster,
        on_roster: &HashSet<Identity>,
    ) -> Result<(), ApiError> {
        let club_id = roster.club.club_id.as_str();
        let team_id = roster.team.team_id.as_str();

        let departed: Vec<Player> = self
            .persistence
            .find_players_assigned_to(team_id)?
            .into_iter()
            .filter(|p| {
                roster::holds_ishd_assignment(p, club_id, team_id)
                    && !on_roster.contains(&p.identity())
            })
            .collect();

        for stored in departed {
            if !stored.managed_by_ishd {
                self.summary.log(&stored, RosterAction::SkippedUnmanaged, None);
                continue;
            }
            let mut merged = stored.clone();
            let Some(action) = roster::withdraw(&mut merged, club_id, team_id) else {
                continue;
            };
            let synced = self.store(&stored, &merged)?;
            self.log(&stored, action, synced);
        }
        Ok(())
    }
}

/// Reconciles one federation team roster with the stored players.
///
/// - Entries matching no stored player create a new player.
/// - Matched players get the roster assignment added or refreshed.
/// - Stored players holding a federation assignment of the team who are no
///   longer on the roster lose it, and the club assignment if it ends up
///   empty.
///
/// Every touched player is classified, validated and written back. Players
/// with `managedByISHD` unset are never modified. With
/// [`ImportOptions::dry_run`] the same log is produced and nothing is
/// written.
///
/// # Errors
///
/// Returns a persistence error. Entries whose merged document fails input
/// validation, or whose new player id is taken, are logged as `Rejected`
/// and do not stop the sync.
pub fn import_ishd_roster(
    persistence: &mut Persistence,
    engine: &LicensingEngine,
    roster: &IshdRoster,
    options: ImportOptions,
) -> Result<ImportSummary, ApiError> {
    info!(
        club_ishd_id = roster.club.club_ishd_id,
        team_ishd_id = %roster.team.team_ishd_id,
        players = roster.players.len(),
        dry_run = options.dry_run,
        "Syncing federation roster"
    );

    let mut sync = RosterSync {
        persistence,
        engine,
        dry_run: options.dry_run,
        summary: ImportSummary {
            dry_run: options.dry_run,
            entries: Vec::new(),
        },
    };
    let mut on_roster: HashSet<Identity> = HashSet::new();

    for entry in &roster.players {
        if !on_roster.insert(roster::roster_identity(entry)) {
            debug!(
                first_name = %entry.first_name,
                last_name = %entry.last_name,
                "Duplicate roster entry ignored"
            );
            continue;
        }
        sync.sync_entry(roster, entry)?;
    }

    sync.withdraw_departed(roster, &on_roster)?;

    let summary = sync.summary;
    let removed = summary.count(RosterAction::RemoveTeam) + summary.count(RosterAction::RemoveClub);
    info!(
        added = summary.count(RosterAction::AddPlayer),
        removed,
        rejected = summary.count(RosterAction::Rejected),
        dry_run = summary.dry_run,
        "Federation roster synced"
    );
    Ok(summary)
}
