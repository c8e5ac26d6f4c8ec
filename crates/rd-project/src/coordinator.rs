//! Project lifecycle: workspace, database records, datastores and engine runs.

use std::path::{Path, PathBuf};

use chrono::Local;
use rd_core::diff::{SnapshotDiff, diff};
use rd_core::entities::{Project, SystemView};
use rd_core::enums::{DatastoreKind, GoalComparison, HazardImpact, HazardLikelihood};
use rd_core::naming::{METRIC_CLASS_NAME, RESULT_VALUE_PARAMETER};
use rd_db::repos::HazardClassification;
use rd_db::service::RdService;
use rd_db::updates::GoalUpdateBuilder;
use rd_spine::{SpineSession, WriteOutcome};
use tracing::{debug, info, warn};

use crate::edits::{GoalEdit, SystemEdit};
use crate::engine::{EngineOutcome, OptimizationEngine};
use crate::error::ProjectError;
use crate::layout::WorkspaceLayout;
use crate::reports::{BatchReport, ImportReport, ResultsReport, RunReport, SkipReason, SkippedResult};
use crate::workspace;

/// Coordinates one request against the projects of an application database.
///
/// Datastore writes stay pending in the session until [`Self::commit`].
pub struct ProjectCoordinator<E> {
    service: RdService,
    session: SpineSession,
    engine: E,
    layout: WorkspaceLayout,
}

impl<E: OptimizationEngine> ProjectCoordinator<E> {
    pub fn new(
        service: RdService,
        session: SpineSession,
        engine: E,
        layout: WorkspaceLayout,
    ) -> Self {
        Self {
            service,
            session,
            engine,
            layout,
        }
    }

    #[must_use]
    pub const fn service(&self) -> &RdService {
        &self.service
    }

    #[must_use]
    pub const fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn session_mut(&mut self) -> &mut SpineSession {
        &mut self.session
    }

    #[must_use]
    pub fn template_spreadsheet_path(&self) -> PathBuf {
        self.layout.template_spreadsheet_path()
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Copy the template into a new timestamped workspace and record the
    /// project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if the template is missing, the copy fails or
    /// the record cannot be written. The workspace is removed again when the
    /// record fails.
    pub async fn build(&self, name: &str, user_id: &str) -> Result<Project, ProjectError> {
        let dir = workspace::create_from_template(
            self.layout.template_dir(),
            self.layout.projects_dir(),
            name,
            Local::now().naive_local(),
        )
        .await?;
        match self.service.create_project(name, user_id, &dir).await {
            Ok(project) => Ok(project),
            Err(error) => {
                workspace::remove(&dir).await?;
                Err(error.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` for an unknown id.
    pub async fn open(&self, project_id: &str) -> Result<Project, ProjectError> {
        self.service
            .find_project(project_id)
            .await?
            .ok_or_else(|| ProjectError::NotFound(project_id.to_string()))
    }

    /// Projects of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Database` if the query fails.
    pub async fn list_projects(&self, user_id: &str, limit: u32) -> Result<Vec<Project>, ProjectError> {
        Ok(self.service.list_projects(user_id, limit).await?)
    }

    /// Remove the workspace and the record of a project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if the workspace or the record cannot be removed.
    pub async fn delete(&mut self, project: &Project) -> Result<(), ProjectError> {
        // Open handles would keep the datastore files busy.
        self.session.release().await;
        workspace::remove(&project.directory).await?;
        if !self.service.delete_project(&project.id).await? {
            warn!(project = %project.id, "project record already deleted");
        }
        Ok(())
    }

    async fn reload(&self, project: &Project) -> Result<Project, ProjectError> {
        self.open(&project.id).await
    }

    // -----------------------------------------------------------------------
    // Engine
    // -----------------------------------------------------------------------

    /// Pending writes must be on disk before the engine reads the datastores,
    /// and cached state is stale once it has written them.
    async fn run_engine(&mut self, project: &Project, import: bool) -> Result<EngineOutcome, ProjectError> {
        let committed = self.session.commit().await?;
        if committed > 0 {
            debug!(committed, "flushed datastore writes before engine run");
        }
        let outcome = if import {
            self.engine.import_system(&project.directory).await
        } else {
            self.engine.run(&project.directory).await
        };
        self.session.release().await;
        outcome
    }

    /// Save an uploaded system description into the workspace and import it.
    ///
    /// A baseline import also snapshots the current datastore as the
    /// baseline, runs the full workflow, rebuilds hazards from the scenarios
    /// and loads baseline metric values.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` on file, engine, datastore or database failures.
    pub async fn import_system(
        &mut self,
        project: &Project,
        file: &Path,
        is_baseline: bool,
    ) -> Result<ImportReport, ProjectError> {
        workspace::copy_file(file, &self.layout.spreadsheet(&project.directory)).await?;
        info!(project = %project.id, file = %file.display(), is_baseline, "system description saved");

        let mut report = ImportReport {
            baseline: is_baseline,
            ..ImportReport::default()
        };
        report.engine.push(self.run_engine(project, true).await?);
        if !is_baseline {
            return Ok(report);
        }

        let current = self.layout.location(&project.directory, DatastoreKind::Current);
        let baseline = self.layout.location(&project.directory, DatastoreKind::Baseline);
        workspace::copy_file(&current.path(), &baseline.path()).await?;
        debug!(project = %project.id, "baseline snapshot taken");

        report.engine.push(self.run_engine(project, false).await?);

        let refreshed = self.import_hazards(project).await?;
        report.hazards = refreshed.hazards.len();
        report.metrics = refreshed.metrics.len();
        report.results = Some(self.load_results(&refreshed, true).await?);
        Ok(report)
    }

    /// Run the full workflow and load the proposed metric values.
    ///
    /// The engine outcome is stored as the project's results.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` on engine, datastore or database failures.
    pub async fn run_optimization(&mut self, project: &Project) -> Result<RunReport, ProjectError> {
        let engine = self.run_engine(project, false).await?;
        let blob = serde_json::to_value(&engine)?;
        self.service.set_project_results(&project.id, &blob).await?;
        let results = self.load_results(project, false).await?;
        Ok(RunReport { engine, results })
    }

    // -----------------------------------------------------------------------
    // System
    // -----------------------------------------------------------------------

    /// Objects and relationships of the current or baseline datastore.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Spine` if the datastore cannot be read.
    pub async fn get_system(&mut self, project: &Project, baseline: bool) -> Result<SystemView, ProjectError> {
        let location = self.layout.system_location(&project.directory, baseline);
        Ok(self.session.snapshot(&location).await?)
    }

    /// # Errors
    ///
    /// Returns `ProjectError::Spine` if the current datastore cannot be read.
    pub async fn update_object_parameter(
        &mut self,
        project: &Project,
        entity_id: i64,
        parameter: &str,
        value: &str,
    ) -> Result<WriteOutcome, ProjectError> {
        let location = self.layout.location(&project.directory, DatastoreKind::Current);
        Ok(self
            .session
            .update_object_parameter(&location, entity_id, parameter, value)
            .await?)
    }

    /// # Errors
    ///
    /// Returns `ProjectError::Spine` if the current datastore cannot be read.
    pub async fn update_relationship_object(
        &mut self,
        project: &Project,
        relationship_id: i64,
        member_index: usize,
        name: &str,
    ) -> Result<WriteOutcome, ProjectError> {
        let location = self.layout.location(&project.directory, DatastoreKind::Current);
        Ok(self
            .session
            .update_relationship_object(&location, relationship_id, member_index, name)
            .await?)
    }

    /// Apply every edit independently against the current datastore.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Spine` only if the datastore cannot be read;
    /// rejected edits are reported as failures.
    pub async fn apply_system_edits(
        &mut self,
        project: &Project,
        edits: &[SystemEdit],
    ) -> Result<BatchReport, ProjectError> {
        let mut report = BatchReport::default();
        for edit in edits {
            let outcome = match edit {
                SystemEdit::ObjectParameter {
                    entity_id,
                    parameter,
                    value,
                } => {
                    self.update_object_parameter(project, *entity_id, parameter, value)
                        .await?
                }
                SystemEdit::RelationshipMember {
                    relationship_id,
                    member_index,
                    name,
                } => {
                    self.update_relationship_object(project, *relationship_id, *member_index, name)
                        .await?
                }
            };
            match outcome {
                WriteOutcome::Applied => report.record_applied(),
                WriteOutcome::Rejected(rejection) => {
                    report.record_failure(edit.to_string(), rejection.to_string());
                }
            }
        }
        Ok(report)
    }

    /// Objects added to, removed from and changed in the current datastore
    /// relative to the baseline.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Spine` if either datastore cannot be read.
    pub async fn calculate_proposed_changes(&mut self, project: &Project) -> Result<SnapshotDiff, ProjectError> {
        let current = self.layout.location(&project.directory, DatastoreKind::Current);
        let baseline = self.layout.location(&project.directory, DatastoreKind::Baseline);
        let proposed = self.session.get_objects(&current).await?.to_vec();
        let original = self.session.get_objects(&baseline).await?;
        Ok(diff(&proposed, original))
    }

    // -----------------------------------------------------------------------
    // Hazards, goals and results
    // -----------------------------------------------------------------------

    /// Replace the hazards and metrics of a project: one hazard per scenario
    /// of the current datastore, one metric per `metrics` entity of the
    /// results datastore, one unset goal per hazard and metric.
    ///
    /// Returns the project as reloaded after the rebuild.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if a datastore cannot be read or the database
    /// write fails.
    pub async fn import_hazards(&mut self, project: &Project) -> Result<Project, ProjectError> {
        let current = self.layout.location(&project.directory, DatastoreKind::Current);
        let results = self.layout.location(&project.directory, DatastoreKind::Results);

        let scenarios: Vec<String> = self
            .session
            .get_scenarios(&current)
            .await?
            .iter()
            .map(|scenario| scenario.name.clone())
            .collect();
        let metrics: Vec<String> = self
            .session
            .get_objects(&results)
            .await?
            .iter()
            .filter(|object| object.class_name == METRIC_CLASS_NAME)
            .map(|object| object.name.clone())
            .collect();

        let (hazards, metrics) = self
            .service
            .rebuild_hazards(&project.id, &scenarios, &metrics)
            .await?;
        info!(
            project = %project.id,
            hazards = hazards.len(),
            metrics = metrics.len(),
            "hazards imported"
        );
        self.reload(project).await
    }

    /// Set the raw comparison and target of a goal. Returns `false` when the
    /// hazard, metric or goal does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Database` if the write fails.
    pub async fn update_goal(
        &self,
        project: &Project,
        hazard_name: &str,
        metric_name: &str,
        comparison: Option<GoalComparison>,
        target_value: Option<f64>,
    ) -> Result<bool, ProjectError> {
        let project = self.reload(project).await?;
        let Some(view) = project.goal_view(hazard_name, metric_name) else {
            warn!(project = %project.id, hazard_name, metric_name, "goal not found");
            return Ok(false);
        };
        let update = GoalUpdateBuilder::new()
            .comparison(comparison)
            .target_value(target_value)
            .build();
        self.service.update_goal(&view.goal().id, &update).await?;
        debug!(hazard_name, metric_name, ?comparison, ?target_value, "goal updated");
        Ok(true)
    }

    /// Apply every goal edit independently.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Database` if a write fails.
    pub async fn apply_goal_edits(&self, project: &Project, edits: &[GoalEdit]) -> Result<BatchReport, ProjectError> {
        let mut report = BatchReport::default();
        for edit in edits {
            let found = self
                .update_goal(
                    project,
                    &edit.hazard,
                    &edit.metric,
                    edit.comparison,
                    edit.target_value,
                )
                .await?;
            if found {
                report.record_applied();
            } else {
                report.record_failure(edit.goal_name(), "no such goal");
            }
        }
        Ok(report)
    }

    /// Reset every hazard to unknown impact and likelihood, then apply the
    /// given `(hazard name, impact, likelihood)` assignments.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Database` if the transaction fails.
    pub async fn classify_hazards(
        &self,
        project: &Project,
        assignments: &[(String, HazardImpact, HazardLikelihood)],
    ) -> Result<BatchReport, ProjectError> {
        let project = self.reload(project).await?;
        let mut report = BatchReport::default();
        let mut classifications = Vec::with_capacity(assignments.len());
        for (name, impact, likelihood) in assignments {
            match project.hazard(name) {
                Some(hazard) => classifications.push(HazardClassification {
                    hazard_id: hazard.id.clone(),
                    impact: *impact,
                    likelihood: *likelihood,
                }),
                None => {
                    warn!(project = %project.id, hazard = %name, "unknown hazard in classification");
                    report.record_failure(name.clone(), "no such hazard");
                }
            }
        }

        let unmatched = self
            .service
            .classify_hazards(&project.id, &classifications)
            .await?;
        for classification in &classifications {
            if unmatched.contains(&classification.hazard_id) {
                report.record_failure(classification.hazard_id.clone(), "hazard disappeared");
            } else {
                report.record_applied();
            }
        }
        Ok(report)
    }

    /// Assign metric values from the relationships of the results datastore.
    ///
    /// Member 0 of each relationship names the scenario (`no_*` scenarios
    /// report against `Base`), member 1 the metric, and the `value`
    /// parameter holds the number. Values go to the baseline or final value
    /// of the metric. Anything that cannot be resolved or parsed is skipped
    /// and reported.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if the results datastore or the database cannot
    /// be read or written.
    pub async fn load_results(&mut self, project: &Project, baseline: bool) -> Result<ResultsReport, ProjectError> {
        let project = self.reload(project).await?;
        let location = self.layout.location(&project.directory, DatastoreKind::Results);
        let system = self.session.snapshot(&location).await?;

        let mut report = ResultsReport {
            baseline,
            ..ResultsReport::default()
        };
        for relationship in &system.relationships {
            let resolved = resolve_result(&project, relationship);
            let (metric_id, value) = match resolved {
                Ok(found) => found,
                Err(reason) => {
                    warn!(
                        relationship = %relationship.name,
                        ?reason,
                        "skipping result"
                    );
                    report.skipped.push(SkippedResult {
                        relationship_id: relationship.id,
                        relationship: relationship.name.clone(),
                        reason,
                    });
                    continue;
                }
            };
            if self.service.set_metric_value(&metric_id, baseline, Some(value)).await? {
                report.applied += 1;
            }
        }
        info!(
            project = %project.id,
            baseline,
            applied = report.applied,
            skipped = report.skipped.len(),
            "results loaded"
        );
        Ok(report)
    }

    /// Make pending datastore writes durable. Returns the number of
    /// datastores committed.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::Spine` if a commit fails.
    pub async fn commit(&mut self) -> Result<usize, ProjectError> {
        Ok(self.session.commit().await?)
    }

    /// Discard pending datastore writes and cached state.
    pub async fn release(&mut self) {
        self.session.release().await;
    }
}

/// Metric id and value a results relationship reports.
fn resolve_result(
    project: &Project,
    relationship: &rd_core::entities::RelationshipView,
) -> Result<(String, f64), SkipReason> {
    let [scenario, metric, ..] = relationship.members.as_slice() else {
        return Err(SkipReason::MissingMembers {
            count: relationship.members.len(),
        });
    };
    let hazard = project
        .result_hazard(&scenario.name)
        .ok_or_else(|| SkipReason::UnknownHazard {
            name: scenario.name.clone(),
        })?;
    let metric_id = project
        .metric_by_name(&metric.name)
        .filter(|m| hazard.goal_for_metric(&m.id).is_some())
        .map(|m| m.id.clone())
        .ok_or_else(|| SkipReason::UnknownMetric {
            hazard: hazard.name.clone(),
            name: metric.name.clone(),
        })?;
    let text = relationship
        .parameters
        .get(RESULT_VALUE_PARAMETER)
        .and_then(Option::as_ref)
        .map(|value| value.value.as_str())
        .ok_or(SkipReason::MissingValue)?;
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| SkipReason::NotNumeric {
            value: text.to_string(),
        })?;
    Ok((metric_id, value))
}
