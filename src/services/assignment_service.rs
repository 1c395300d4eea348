//! # Assignment Service

//! Orchestrates the check-then-act flow around the pure core: snapshot the active
//! records and block-list, resolve occupancy, validate the request, commit the
//! conditional write, then hand a notice to the notification collaborator without
//! waiting on it. The occupancy snapshot is taken fresh immediately before
//! validation; the remaining race window is closed by the version-conditional write,
//! which surfaces `StaleWrite` for the caller to re-fetch and re-validate.

use std::sync::Arc;
use chrono::Utc;
use tracing::{error, info, warn};
use crate::assignment::{validate_block_reason, AssignmentRequest, AssignmentValidator};
use crate::config::{Settings, YardSettings};
use crate::errors::{CheckInError, CheckInResult};
use crate::models::{
    CallerIdentity, DockOccupancy, LoadRecord, LoadStatus, YardOccupancy, RAMP_SENTINEL,
};
use crate::notification::{AssignmentNotice, Notifier};
use crate::occupancy::OccupancyResolver;
use crate::repositories::{AssignmentUpdate, BlockListRepository, LoadRecordRepository};
use crate::scheduling::AdherenceCalculator;

/// The stateful decision point in front of the daily log.
pub struct AssignmentService {
    yard: YardSettings,
    resolver: OccupancyResolver,
    validator: AssignmentValidator,
    adherence: AdherenceCalculator,
    loads: Arc<dyn LoadRecordRepository>,
    blocks: Arc<dyn BlockListRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AssignmentService {
    /// Wires the service to its collaborators.
    pub fn new(
        settings: &Settings,
        loads: Arc<dyn LoadRecordRepository>,
        blocks: Arc<dyn BlockListRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> CheckInResult<Self> {
        Ok(AssignmentService {
            resolver: OccupancyResolver::new(&settings.yard),
            validator: AssignmentValidator::new(settings.yard.symbolic_codes.clone()),
            adherence: AdherenceCalculator::new(&settings.yard)?,
            yard: settings.yard.clone(),
            loads,
            blocks,
            notifier,
        })
    }

    /// The adherence/detention calculator configured for this yard.
    pub fn adherence(&self) -> &AdherenceCalculator {
        &self.adherence
    }

    /// Resolves current occupancy for the whole yard from a fresh snapshot.
    pub async fn yard_occupancy(&self) -> CheckInResult<YardOccupancy> {
        let records = self.loads.active_records().await?;
        let block_list = self.blocks.all().await?;
        Ok(self.resolver.resolve(&records, &block_list))
    }

    /// Resolves current occupancy for a single dock. Cheap and side-effect-free, so
    /// callers may poll it at whatever cadence they choose.
    pub async fn check_dock(&self, dock_number: &str) -> CheckInResult<DockOccupancy> {
        let occupancy = self.yard_occupancy().await?;
        occupancy
            .dock(dock_number)
            .cloned()
            .ok_or_else(|| CheckInError::UnknownDock(dock_number.to_string()))
    }

    /// Validates and commits a dock assignment.
    ///
    /// On permit, the record is updated through the conditional write; if the record
    /// changed since the snapshot the repository reports `StaleWrite` and nothing is
    /// written. After the commit a notice is handed to the notification collaborator
    /// on a detached task; its failure is logged, never propagated.
    pub async fn assign_dock(
        &self,
        caller: &CallerIdentity,
        request: AssignmentRequest,
    ) -> CheckInResult<LoadRecord> {
        let record = self
            .loads
            .find(&request.record_id)
            .await?
            .ok_or_else(|| CheckInError::RecordNotFound(request.record_id.clone()))?;

        let occupancy = self.yard_occupancy().await?;
        let approved = self.validator.validate(&request, &occupancy)?;

        if approved.creates_double_booking {
            warn!(
                operator = %caller.name,
                role = %caller.role,
                dock = %approved.dock_number,
                record_id = %approved.record_id,
                "double-booking confirmed by operator"
            );
        }

        let update = AssignmentUpdate {
            record_id: approved.record_id.clone(),
            expected_version: record.version,
            dock_number: approved.dock_number.clone(),
            appointment_time: request.appointment_time.clone(),
            status: LoadStatus::Assigned,
        };
        let updated = self.loads.apply_assignment(&update).await?;

        info!(
            operator = %caller.name,
            role = %caller.role,
            dock = %updated.dock_number.as_deref().unwrap_or_default(),
            record_id = %updated.id,
            reference = %updated.reference_number,
            "dock assigned"
        );

        let notice = AssignmentNotice {
            dock_display: dock_display(&approved.dock_number),
            driver_name: updated.driver_name.clone(),
            reference_number: updated.reference_number.clone(),
            appointment_display: approved.appointment.as_ref().map(|a| a.to_string()),
        };
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.send_assignment_notice(&notice).await {
                error!("failed to deliver assignment notice: {}", e);
            }
        });

        Ok(updated)
    }

    /// Marks a dock blocked with an operator-supplied reason.
    ///
    /// Occupant records are untouched; the dock simply stops accepting assignments
    /// until unblocked. Rejects empty reasons with `InvalidReason` and docks outside
    /// the configured set with `UnknownDock`.
    pub async fn block_dock(
        &self,
        caller: &CallerIdentity,
        dock_number: &str,
        reason: &str,
    ) -> CheckInResult<()> {
        let reason = validate_block_reason(reason)?;
        if !self.yard.is_known_dock(dock_number) {
            return Err(CheckInError::UnknownDock(dock_number.to_string()));
        }
        self.blocks.set(dock_number, reason).await?;
        info!(
            operator = %caller.name,
            role = %caller.role,
            dock = %dock_number,
            reason = %reason,
            "dock blocked"
        );
        Ok(())
    }

    /// Removes a dock's block entry. Unblocking a dock that was never blocked is a
    /// no-op success.
    pub async fn unblock_dock(&self, caller: &CallerIdentity, dock_number: &str) -> CheckInResult<()> {
        self.blocks.remove(dock_number).await?;
        info!(
            operator = %caller.name,
            role = %caller.role,
            dock = %dock_number,
            "dock unblocked"
        );
        Ok(())
    }

    /// Advances a load's lifecycle status through the conditional write path,
    /// stamping loading-start/completion/check-out timestamps as it goes.
    pub async fn update_status(
        &self,
        record_id: &str,
        expected_version: i64,
        status: LoadStatus,
    ) -> CheckInResult<LoadRecord> {
        self.loads
            .apply_status(record_id, expected_version, status, Utc::now())
            .await
    }
}

fn dock_display(dock_number: &str) -> String {
    if dock_number == RAMP_SENTINEL {
        dock_number.to_string()
    } else {
        format!("Dock {}", dock_number)
    }
}
